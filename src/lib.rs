// SafeSpace - empathic conversational support
// Library exports

pub mod catalog; // Crisis patterns, emotion keywords, fallback replies
pub mod cli; // Terminal chat host
pub mod config;
pub mod conversation;
pub mod crisis;
pub mod emotion;
pub mod errors;
pub mod metrics;
pub mod pipeline;
pub mod providers; // Remote text generation
pub mod resources;
pub mod server; // HTTP host
