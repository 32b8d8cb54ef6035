// Built-in catalog tables

use super::{EmotionEntry, EmotionLabel, PatternCatalog, PhraseCategory};

const CRISIS_PATTERNS: &[&str] = &[
    // Direct self-harm / suicide phrasing
    r"\b(suicide|suicidal|kill myself|end it all|want to die|not worth living)\b",
    r"\b(harm myself|hurt myself|self[- ]harm|cut myself)\b",
    r"\b(overdose|pills to die|end my life|take my own life)\b",
    // Instrument word followed by an ending-life verb in the same message
    r"\b(gun|knife|rope|bridge|jump)\b.*\b(end|die|kill)\b",
    // Hopelessness idioms
    r"\b(no point|can't go on|cant go on|cannot go on|no reason to live|better off dead|better off without me)\b",
];

struct EmotionSeed {
    label: EmotionLabel,
    keywords: &'static [&'static str],
    coping: &'static str,
    reply: &'static str,
    callout: &'static str,
}

const EMOTIONS: &[EmotionSeed] = &[
    EmotionSeed {
        label: EmotionLabel::Anxiety,
        keywords: &["anxious", "anxiety", "worried", "nervous", "panic", "fear", "scared"],
        coping: "Try deep breathing: inhale for 4, hold for 4, exhale for 6. \
                 Grounding technique: name 5 things you see, 4 you hear, 3 you touch.",
        reply: "I hear that you're feeling anxious. That's really difficult to experience. \
                Can you tell me what might be contributing to these anxious feelings?",
        callout: "💡 **Try this:**",
    },
    EmotionSeed {
        label: EmotionLabel::Depression,
        keywords: &["sad", "depressed", "hopeless", "empty", "worthless", "tired", "down lately"],
        coping: "Small steps matter. Try one tiny positive action today. \
                 Consider reaching out to a friend or doing something you used to enjoy.",
        reply: "I can sense that you're going through a really tough time right now. \
                Your feelings are valid, and I want you to know that you're not alone.",
        callout: "💙 **Gentle reminder:**",
    },
    EmotionSeed {
        label: EmotionLabel::Anger,
        keywords: &["angry", "mad", "frustrated", "furious", "rage", "irritated"],
        coping: "Take a pause before reacting. Try physical release like walking or squeezing \
                 a stress ball. Count to 10 and breathe deeply.",
        reply: "It sounds like something has really upset you, and anger is a natural response \
                to feeling hurt or treated unfairly. What happened that brought this up?",
        callout: "🔥 **Cooling down:**",
    },
    EmotionSeed {
        label: EmotionLabel::Stress,
        keywords: &["stressed", "stress", "overwhelmed", "pressure", "burden", "exhausted"],
        coping: "Prioritize your tasks. Take breaks every hour. Try progressive muscle \
                 relaxation: tense and release each muscle group.",
        reply: "It sounds like you're carrying a lot right now. Feeling stressed and overwhelmed \
                is exhausting. What's been weighing on your mind the most?",
        callout: "🌱 **Stress relief:**",
    },
    EmotionSeed {
        label: EmotionLabel::Loneliness,
        keywords: &["lonely", "alone", "isolated", "disconnected", "abandoned"],
        coping: "Consider reaching out to one person today. \
                 Join online communities or local groups with shared interests.",
        reply: "Feeling lonely can be so painful, and I'm glad you reached out. \
                You deserve connection and care. When did you start feeling this way?",
        callout: "🤝 **Staying connected:**",
    },
    EmotionSeed {
        label: EmotionLabel::Grief,
        keywords: &["grief", "grieving", "mourning", "passed away", "lost someone", "bereaved"],
        coping: "Let yourself feel the loss without judging it. \
                 Writing a letter to the person you miss or sharing a memory with someone can help.",
        reply: "I'm so sorry for your loss. Grief can feel overwhelming and it doesn't follow a \
                schedule. Would you like to tell me about who or what you're missing?",
        callout: "🕊️ **Honoring your loss:**",
    },
    EmotionSeed {
        label: EmotionLabel::Confusion,
        keywords: &["confused", "unsure", "uncertain", "don't know what to do", "lost", "mixed up"],
        coping: "Write down the decision or question in one sentence, then list what you know \
                 and what you don't. Taking one small next step often brings clarity.",
        reply: "It sounds like things feel unclear right now, and that uncertainty can be \
                unsettling. Let's slow down together. What feels most confusing at the moment?",
        callout: "🧭 **Finding clarity:**",
    },
];

const GENERIC_COPING: &str =
    "Remember to practice self-care. Take time for activities that bring you peace.";

const GREETING_PHRASES: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "hiya",
    "good morning",
    "good afternoon",
    "good evening",
];

const GREETING_REPLY: &str = "Hello! Welcome to SafeSpace. I'm here to listen and support you. \
                              How are you feeling today?";

const GRATITUDE_PHRASES: &[&str] = &[
    "thank",
    "thanks",
    "thanked",
    "thanking",
    "thank you",
    "thankful",
    "grateful",
    "appreciate it",
];

const GRATITUDE_REPLY: &str = "You're very welcome. It takes courage to reach out and talk about \
                               these things. I'm glad I could be here for you. How else can I \
                               support you today?";

const CHECK_IN_PHRASES: &[&str] = &[
    "how are you",
    "what's up",
    "whats up",
    "checking in",
    "can we talk",
    "need to talk",
    "want to talk",
    "someone to talk to",
];

const CHECK_IN_REPLY: &str = "Thank you for checking in. I'm here and ready to listen whenever \
                              you are. How has your day been, and how are you feeling right now?";

const DEFAULT_REPLY: &str = "I hear you, and I want you to know that your feelings are valid. \
                             Sometimes it helps to talk through what's on your mind. \
                             What would you like to share with me?";

const FALLBACK_PRIORITY: [EmotionLabel; 7] = [
    EmotionLabel::Anxiety,
    EmotionLabel::Depression,
    EmotionLabel::Stress,
    EmotionLabel::Loneliness,
    EmotionLabel::Anger,
    EmotionLabel::Grief,
    EmotionLabel::Confusion,
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn catalog() -> PatternCatalog {
    PatternCatalog {
        crisis_patterns: strings(CRISIS_PATTERNS),
        emotions: EMOTIONS
            .iter()
            .map(|seed| EmotionEntry {
                label: seed.label,
                keywords: strings(seed.keywords),
                coping: Some(seed.coping.to_string()),
                reply: Some(seed.reply.to_string()),
                callout: seed.callout.to_string(),
            })
            .collect(),
        generic_coping: GENERIC_COPING.to_string(),
        greeting: PhraseCategory {
            phrases: strings(GREETING_PHRASES),
            reply: GREETING_REPLY.to_string(),
        },
        gratitude: PhraseCategory {
            phrases: strings(GRATITUDE_PHRASES),
            reply: GRATITUDE_REPLY.to_string(),
        },
        check_in: PhraseCategory {
            phrases: strings(CHECK_IN_PHRASES),
            reply: CHECK_IN_REPLY.to_string(),
        },
        default_reply: DEFAULT_REPLY.to_string(),
        fallback_priority: FALLBACK_PRIORITY.to_vec(),
    }
}
