use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tc_config::ComposeConfig;

/// Path argument meaning "read standard input".
pub const STDIN_MARKER: &str = "-";

/// Read a whole input, from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_MARKER {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Decode JSON text, naming what was expected on failure.
pub fn parse_json<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("input is not a valid {what}"))
}

/// Load `--config` when given, else the built-in defaults.
///
/// The returned directory anchors relative paths in the config (the log
/// file); without a config file it is the working directory.
pub fn load_config(path: Option<&Path>) -> Result<(ComposeConfig, PathBuf)> {
    match path {
        Some(path) => {
            let path = path
                .canonicalize()
                .with_context(|| format!("config path '{}'", path.display()))?;
            let config = ComposeConfig::load(&path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((config, base_dir))
        }
        None => Ok((ComposeConfig::default(), std::env::current_dir()?)),
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
