use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BUILDER: &str = "buildah";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Name or path of the external image builder.
    pub builder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            builder: DEFAULT_BUILDER.to_string(),
        }
    }
}

impl Config {
    const APP_NAME: &'static str = "rk8s";
    const CONFIG_NAME: &'static str = "rkc";

    /// Loads `rk8s/rkc.toml` from the user's config directory.
    ///
    /// A missing file, or a config directory that cannot be resolved, yields the
    /// defaults. Nothing is ever written.
    pub fn load() -> anyhow::Result<Self> {
        match confy::get_configuration_file_path(Self::APP_NAME, Self::CONFIG_NAME) {
            Ok(path) => Self::load_from(path),
            Err(err) => {
                tracing::debug!("no config directory, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        confy::load_path::<Self>(path)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    /// Builder to run, preferring an explicit override (`--builder` or `RKC_BUILDER`).
    pub fn builder_name(&self, cli_override: Option<&str>) -> String {
        cli_override.unwrap_or(&self.builder).to_string()
    }
}
