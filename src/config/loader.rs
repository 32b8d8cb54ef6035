// Configuration loader
// Layers ~/.safespace/config.toml, SAFESPACE_* environment variables and HF_TOKEN

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::errors::config_parse_error;

const ENV_PREFIX: &str = "SAFESPACE";
const TOKEN_ENV: &str = "HF_TOKEN";

/// Default config location: ~/.safespace/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".safespace/config.toml"))
}

/// Load settings from the given (or default) config file plus environment.
///
/// A missing file is not an error: every setting has a default, and a
/// missing credential simply means rule-based mode.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let built = ::config::Config::builder()
        .add_source(::config::File::from(path.as_path()).required(false))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| anyhow::anyhow!(config_parse_error(&path.display().to_string(), &e.to_string())))?;

    let mut settings: Settings = built
        .try_deserialize()
        .map_err(|e| anyhow::anyhow!(config_parse_error(&path.display().to_string(), &e.to_string())))?;

    apply_token_env(&mut settings);

    tracing::debug!(
        path = %path.display(),
        ai_enabled = settings.generation.credential().is_some(),
        "Loaded configuration"
    );

    Ok(settings)
}

/// Load settings from a TOML file only, ignoring the environment
pub fn load_config_file(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// HF_TOKEN fills the credential when the config file leaves it unset
fn apply_token_env(settings: &mut Settings) {
    if settings.generation.credential().is_some() {
        return;
    }

    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            settings.generation.api_token = Some(token);
        }
    }
}

/// Write the default settings as TOML
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let contents =
        toml::to_string_pretty(&Settings::default()).context("Failed to serialize config")?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crisis::HotlineRegion;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[generation]\nmax_attempts = 5\n\n[crisis]\nregion = \"india\"\n",
        )
        .unwrap();

        let settings = load_config_file(&path).unwrap();
        assert_eq!(settings.generation.max_attempts, 5);
        assert_eq!(settings.generation.timeout_secs, 10);
        assert_eq!(settings.crisis.region, HotlineRegion::India);
        assert_eq!(settings.server.max_sessions, 100);
    }

    #[test]
    fn test_write_default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        write_default_config(&path, false).unwrap();
        let settings = load_config_file(&path).unwrap();
        assert_eq!(settings.generation.endpoint, super::super::settings::DEFAULT_ENDPOINT);

        // Refuses to overwrite without force
        assert!(write_default_config(&path, false).is_err());
        assert!(write_default_config(&path, true).is_ok());
    }

    #[test]
    fn test_invalid_region_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[crisis]\nregion = \"atlantis\"\n").unwrap();

        assert!(load_config_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings.server.session_timeout_minutes, 30);
    }
}
