// Terminal rendering of pipeline replies

use chrono::{DateTime, Local};

use crate::pipeline::{ResponseResult, ResponseStatus};

pub const CRISIS_BANNER: &str = "🚨 **Crisis Support Activated**";

/// Reply text as shown to the user; crisis replies get a banner
pub fn reply_text(result: &ResponseResult) -> String {
    if result.is_crisis() {
        format!("{}\n\n{}", CRISIS_BANNER, result.response)
    } else {
        result.response.clone()
    }
}

/// Footer line under an assistant reply
pub fn reply_footer(result: &ResponseResult, at: DateTime<Local>) -> String {
    let mut footer = format!("Responded at {}", at.format("%H:%M"));
    if result.status == ResponseStatus::Degraded {
        footer.push_str(" (rule-based mode)");
    }
    footer
}
