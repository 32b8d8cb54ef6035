// Crisis detection and crisis replies

mod detector;
mod hotlines;

pub use detector::CrisisDetector;
pub use hotlines::{crisis_reply, HotlineRegion};
