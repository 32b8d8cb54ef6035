// Region-specific crisis replies

use serde::{Deserialize, Serialize};

/// Region whose hotline numbers appear in crisis replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotlineRegion {
    #[default]
    Us,
    India,
}

impl HotlineRegion {
    pub fn name(&self) -> &'static str {
        match self {
            HotlineRegion::Us => "United States",
            HotlineRegion::India => "India",
        }
    }

    /// Bullet lines listing immediate-support contacts
    pub fn hotlines(&self) -> &'static [&'static str] {
        match self {
            HotlineRegion::Us => &[
                "**Call 988** - Suicide & Crisis Lifeline (24/7, free, confidential)",
                "**Text HOME to 741741** - Crisis Text Line",
                "**Call 911** for immediate emergencies",
            ],
            HotlineRegion::India => &[
                "**Call 1800-121-3667** - Suicide & Crisis Lifeline",
                "**Call 1800-599-0019** - Kiran Mental Health Helpline (24/7)",
                "**Text HOME to 741741** - Crisis Text Line",
                "**Call 112** for immediate emergencies",
            ],
        }
    }
}

/// The fixed crisis reply for a region
pub fn crisis_reply(region: HotlineRegion) -> String {
    let hotlines = region
        .hotlines()
        .iter()
        .map(|line| format!("• {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I'm very concerned about what you're sharing. Your life has value and there are \
         people who want to help.\n\n\
         🆘 **Immediate Support:**\n\
         {}\n\n\
         🌟 **You are not alone.** Professional counselors are available right now to talk \
         with you.\n\n\
         Would you like to talk about what's bringing up these feelings?",
        hotlines
    )
}
