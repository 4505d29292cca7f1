use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tc_lang::CompileOptions;

use crate::condition::ConditionSection;
use crate::logging::LoggingConfig;
use crate::preview::PreviewConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ComposeConfigRaw {
    condition: ConditionSection,
    preview: PreviewConfig,
    logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// ComposeConfig (resolved, validated)
// ---------------------------------------------------------------------------

/// Resolved contents of `trigger.toml`.
#[derive(Debug, Clone, Default)]
pub struct ComposeConfig {
    pub condition: CompileOptions,
    pub preview: PreviewConfig,
    pub logging: LoggingConfig,
}

impl ComposeConfig {
    /// Read and parse a `trigger.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for ComposeConfig {
    type Err = anyhow::Error;

    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: ComposeConfigRaw = toml::from_str(toml_str)?;
        let config = ComposeConfig {
            condition: raw.condition.resolve()?,
            preview: raw.preview,
            logging: raw.logging,
        };
        validate::validate(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
