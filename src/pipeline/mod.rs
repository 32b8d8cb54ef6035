// Response pipeline: crisis check, emotion detection, generation, fallback

pub mod fallback;
pub mod orchestrator;
pub mod types;

pub use fallback::{FallbackCategory, FallbackTree};
pub use orchestrator::{ResponseOrchestrator, TECHNICAL_FALLBACK_REPLY};
pub use types::{ResponseResult, ResponseStatus, ResponseTool};
