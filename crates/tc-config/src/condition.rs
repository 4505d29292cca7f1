use serde::Deserialize;
use tc_lang::CompileOptions;
use tc_lang::ast::Connector;

/// Raw `[condition]` section as written in `trigger.toml`.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConditionSection {
    default_connector: String,
    script_lang: String,
    parent_bucket_path: String,
    gap_policy: Option<String>,
}

impl Default for ConditionSection {
    fn default() -> Self {
        let defaults = CompileOptions::default();
        Self {
            default_connector: "and".to_string(),
            script_lang: defaults.script_lang,
            parent_bucket_path: defaults.parent_bucket_path,
            gap_policy: defaults.gap_policy,
        }
    }
}

impl ConditionSection {
    pub(crate) fn resolve(self) -> anyhow::Result<CompileOptions> {
        let default_connector: Connector = self
            .default_connector
            .parse()
            .map_err(|e| anyhow::anyhow!("condition.default_connector: {e}"))?;
        Ok(CompileOptions {
            default_connector,
            script_lang: self.script_lang,
            parent_bucket_path: self.parent_bucket_path,
            gap_policy: self.gap_policy.filter(|g| !g.is_empty()),
        })
    }
}
