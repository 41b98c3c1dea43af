//! Configuration management for gatewayts code generation.
//!
//! A `Config` names the registry dump to read and the directory to write the
//! TypeScript modules to. It can be created programmatically or loaded from a
//! YAML (or `.toml`) file; command-line flags override file values.
//!
//! # Examples
//!
//! ```no_run
//! use gatewayts_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> gatewayts_core::Result<()> {
//! let mut config = Config::new("registry.json", "src/gen");
//! config.use_proto_names = Some(true);
//!
//! // Or load from a config file
//! let config = Config::from_file("gatewayts.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the schema registry dump (JSON or YAML)
    pub registry_path: PathBuf,

    /// Output directory for generated code
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Keep declared field names instead of lowerCamelCase.
    /// `None` keeps whatever the registry dump says.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_proto_names: Option<bool>,
}

impl Config {
    pub fn new(registry_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            output_dir: output_dir.into(),
            use_proto_names: None,
        }
    }

    /// Load configuration from a file, TOML when the extension says so and YAML otherwise
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("gen")
}
