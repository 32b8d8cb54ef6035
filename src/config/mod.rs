// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{default_config_path, load_config, load_config_file, write_default_config};
pub use settings::{CrisisSettings, GenerationSettings, ServerSettings, Settings, DEFAULT_ENDPOINT};
