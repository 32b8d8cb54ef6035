// Static support text shown by the chat and HTTP hosts

use serde::Serialize;
use std::str::FromStr;

use crate::crisis::HotlineRegion;

pub const WELCOME: &str = "🌟 **Welcome to SafeSpace**\n\n\
This is a safe, confidential environment where you can express your thoughts and feelings. \
I'm here to listen, provide support, and help you find resources when needed.\n\n\
**Remember:** If you're experiencing a mental health crisis, please reach out to \
professional help immediately (type /resources).";

pub const DISCLAIMER: &str = "**Disclaimer:** SafeSpace is a support tool and is not a substitute \
for professional mental health treatment. If you're experiencing a mental health crisis, please \
contact emergency services or a mental health professional immediately. Conversations are kept \
in memory only and are not stored permanently.";

/// A titled list of bullet items
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSection {
    pub title: &'static str,
    pub items: Vec<&'static str>,
}

impl ResourceSection {
    fn new(title: &'static str, items: &[&'static str]) -> Self {
        Self {
            title,
            items: items.to_vec(),
        }
    }
}

/// Crisis lines for the region followed by general support resources
pub fn support_resources(region: HotlineRegion) -> Vec<ResourceSection> {
    let mut sections = vec![ResourceSection::new(
        "Crisis Support",
        region.hotlines(),
    )];

    match region {
        HotlineRegion::Us => {
            sections.push(ResourceSection::new(
                "Mental Health Support",
                &[
                    "National Alliance on Mental Illness (NAMI): 1-800-950-NAMI",
                    "SAMHSA National Helpline: 1-800-662-4357",
                    "Psychology Today (Find a Therapist): https://www.psychologytoday.com/",
                ],
            ));
        }
        HotlineRegion::India => {
            sections.push(ResourceSection::new(
                "Mental Health Support",
                &[
                    "National Domestic Violence Hotline: 7827170170",
                    "The India Mental Health Alliance (IMHA): 800-950-6264",
                    "SPIF - Suicide Prevention India Foundation: https://spif.in/",
                    "Psychology India (Find a Therapist): https://psychologyindia.com/",
                ],
            ));
        }
    }

    sections.push(ResourceSection::new(
        "Self-Care Apps",
        &[
            "Headspace (meditation)",
            "Calm (sleep & relaxation)",
            "Mood Meter (emotion tracking)",
            "Sanvello (mood & anxiety tracking)",
        ],
    ));

    sections
}

pub fn self_care_tips() -> Vec<ResourceSection> {
    vec![
        ResourceSection::new(
            "Immediate Comfort",
            &[
                "Take 5 deep breaths",
                "Drink a glass of water",
                "Step outside for fresh air",
                "Listen to calming music",
            ],
        ),
        ResourceSection::new(
            "Daily Self-Care",
            &[
                "Maintain a regular sleep schedule",
                "Eat nourishing meals",
                "Move your body gently",
                "Connect with supportive people",
            ],
        ),
        ResourceSection::new(
            "Weekly Self-Care",
            &[
                "Engage in a hobby you enjoy",
                "Spend time in nature",
                "Practice gratitude",
                "Set boundaries when needed",
            ],
        ),
        ResourceSection::new(
            "Quick Tips",
            &[
                "Deep Breathing: 4 counts in, 4 hold, 6 out",
                "Grounding: Name 5 things you see, 4 you hear, 3 you touch",
                "Movement: Take a short walk or stretch",
                "Connection: Reach out to someone you trust",
            ],
        ),
    ]
}

/// Render sections as markdown-ish text for the terminal
pub fn render_sections(intro: &str, sections: &[ResourceSection], outro: &str) -> String {
    let mut out = String::from(intro);

    for section in sections {
        out.push_str(&format!("\n\n**{}:**", section.title));
        for item in &section.items {
            out.push_str(&format!("\n• {}", item));
        }
    }

    if !outro.is_empty() {
        out.push_str("\n\n");
        out.push_str(outro);
    }
    out
}

pub fn resources_text(region: HotlineRegion) -> String {
    render_sections(
        "Here are some helpful mental health resources:",
        &support_resources(region),
        "Remember: Professional help is always available when you need it.",
    )
}

pub fn self_care_text() -> String {
    render_sections(
        "Here are some gentle self-care reminders:",
        &self_care_tips(),
        "**Remember:** Self-care isn't selfish. You deserve kindness, especially from yourself.",
    )
}

/// One-tap conversation starters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickStart {
    Anxious,
    Sad,
    Stressed,
    Lonely,
}

impl QuickStart {
    pub const ALL: [QuickStart; 4] = [
        QuickStart::Anxious,
        QuickStart::Sad,
        QuickStart::Stressed,
        QuickStart::Lonely,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuickStart::Anxious => "anxious",
            QuickStart::Sad => "sad",
            QuickStart::Stressed => "stressed",
            QuickStart::Lonely => "lonely",
        }
    }

    /// The message sent on the user's behalf
    pub fn prompt(&self) -> &'static str {
        match self {
            QuickStart::Anxious => "I'm feeling anxious and worried about everything",
            QuickStart::Sad => "I'm feeling really sad and down lately",
            QuickStart::Stressed => "I'm feeling overwhelmed and stressed out",
            QuickStart::Lonely => "I'm feeling lonely and disconnected",
        }
    }
}

impl FromStr for QuickStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        QuickStart::ALL
            .into_iter()
            .find(|quick| quick.name() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown quick start '{}'. Options: anxious, sad, stressed, lonely",
                    s.trim()
                )
            })
    }
}
