use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, ENV_PREFIX};
use crate::types::CompatibilityMode;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub writer: WriterConfig,
    pub reader: ReaderConfig,
    pub logging: LoggingConfig,
}

/// Output switches shared by the vCard writers.
#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    /// Append a PRODID property naming this library to every written card.
    pub add_prodid: bool,
    /// Drop properties that do not support the target version.
    pub version_strict: bool,
    /// Pretty-print structured output (jCard, xCard).
    pub indent: bool,
    /// Enclose every jCard written to one stream in an outer JSON array.
    pub wrap_in_array: bool,
    /// Version used by the plain-text writer ("2.1", "3.0" or "4.0").
    pub target_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    pub compatibility_mode: CompatibilityMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            add_prodid: true,
            version_strict: true,
            indent: false,
            wrap_in_array: false,
            target_version: "4.0".to_string(),
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            compatibility_mode: CompatibilityMode::Rfc,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `kunai.toml` in the working directory, in increasing order of precedence
    /// for the file.
    ///
    /// Environment keys use the `KUNAI_` prefix and `__` between sections,
    /// e.g. `KUNAI_WRITER__ADD_PRODID=false`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("writer.add_prodid", true)?
            .set_default("writer.version_strict", true)?
            .set_default("writer.indent", false)?
            .set_default("writer.wrap_in_array", false)?
            .set_default("writer.target_version", "4.0")?
            .set_default("reader.compatibility_mode", "rfc")?
            .set_default("logging.level", "info")?
            // Env file
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        tracing::debug!(
            compatibility_mode = %settings.reader.compatibility_mode,
            target_version = %settings.writer.target_version,
            "Configuration loaded"
        );

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
