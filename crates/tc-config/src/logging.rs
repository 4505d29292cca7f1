use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// `[logging]` section. Omitting it logs `info` and above to stderr.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base filter directive, e.g. `"warn"` or `"debug"`.
    pub level: String,
    /// Per-target overrides, e.g. `{ "tc_preview" = "debug" }`.
    pub modules: HashMap<String, String>,
    /// Optional log file; relative paths resolve against the config file's
    /// directory.
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Render `level` plus module overrides as an `EnvFilter` directive list.
    pub fn directives(&self) -> String {
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();
        let mut out = self.level.clone();
        for (module, level) in modules {
            out.push_str(&format!(",{module}={level}"));
        }
        out
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            modules: HashMap::new(),
            file: None,
            format: LogFormat::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Json,
}
