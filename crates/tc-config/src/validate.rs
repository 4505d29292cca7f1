use crate::compose::ComposeConfig;
use crate::preview::PreviewConfig;

/// Semantic checks that serde cannot express.
pub(crate) fn validate(config: &ComposeConfig) -> anyhow::Result<()> {
    validate_preview(&config.preview)?;
    if config.condition.script_lang.trim().is_empty() {
        anyhow::bail!("condition.script_lang must not be empty");
    }
    if config.logging.level.trim().is_empty() {
        anyhow::bail!("logging.level must not be empty");
    }
    Ok(())
}

fn validate_preview(preview: &PreviewConfig) -> anyhow::Result<()> {
    if preview.span.is_zero() {
        anyhow::bail!("preview.span must be greater than zero");
    }
    if preview.synthetic_buckets == 0 {
        anyhow::bail!("preview.synthetic_buckets must be at least 1");
    }
    if preview.min_buckets == 0 {
        anyhow::bail!("preview.min_buckets must be at least 1");
    }
    if !is_identifier(&preview.synthetic_field) {
        anyhow::bail!(
            "preview.synthetic_field {:?} must be an identifier ([A-Za-z_][A-Za-z0-9_]*)",
            preview.synthetic_field
        );
    }
    if preview.timestamp_candidates.is_empty() {
        anyhow::bail!("preview.timestamp_candidates must list at least one field");
    }
    if let Some(blank) = preview
        .timestamp_candidates
        .iter()
        .position(|c| c.trim().is_empty())
    {
        anyhow::bail!("preview.timestamp_candidates[{blank}] is blank");
    }
    if let Some(quoted) = preview
        .timestamp_candidates
        .iter()
        .position(|c| c.contains('`'))
    {
        anyhow::bail!("preview.timestamp_candidates[{quoted}] contains a backtick");
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
