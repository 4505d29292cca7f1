use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Connectors
// ---------------------------------------------------------------------------

/// Boolean connector joining a clause to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    /// Script symbol: `&&` or `||`.
    pub fn symbol(self) -> &'static str {
        match self {
            Connector::And => "&&",
            Connector::Or => "||",
        }
    }

    pub fn from_symbol(token: &str) -> Option<Self> {
        match token {
            "&&" => Some(Connector::And),
            "||" => Some(Connector::Or),
            _ => None,
        }
    }
}

impl FromStr for Connector {
    type Err = String;

    /// Accepts `and`/`or` in any case, or the script symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = Connector::from_symbol(s) {
            return Ok(c);
        }
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(Connector::And),
            "or" => Ok(Connector::Or),
            _ => Err(format!("unknown connector {s:?} (expected and|or)")),
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::And => f.write_str("AND"),
            Connector::Or => f.write_str("OR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Threshold operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThresholdOp {
    Above,
    Below,
    Exactly,
}

impl ThresholdOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ThresholdOp::Above => ">",
            ThresholdOp::Below => "<",
            ThresholdOp::Exactly => "==",
        }
    }

    pub fn from_symbol(token: &str) -> Option<Self> {
        match token {
            ">" => Some(ThresholdOp::Above),
            "<" => Some(ThresholdOp::Below),
            "==" => Some(ThresholdOp::Exactly),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Threshold value
// ---------------------------------------------------------------------------

/// Right-hand side of a clause. Tokens that parse as a finite number become
/// `Number`, everything else is kept verbatim as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Number(f64),
    Text(String),
}

impl Threshold {
    pub fn from_token(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Threshold::Number(n),
            _ => Threshold::Text(token.to_string()),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Number(n) => write!(f, "{n}"),
            Threshold::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

/// One `[connector] field operator threshold` clause of a bucket-level
/// trigger condition.
///
/// The anchor (first) clause never carries a connector. Fields that a short
/// token group could not supply are `None` (or an empty `field`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_connector: Option<Connector>,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operator: Option<ThresholdOp>,
    #[serde(default)]
    pub threshold: Option<Threshold>,
}

impl ConditionClause {
    pub fn anchor(field: impl Into<String>, operator: ThresholdOp, threshold: Threshold) -> Self {
        Self {
            boolean_connector: None,
            field: field.into(),
            operator: Some(operator),
            threshold: Some(threshold),
        }
    }

    pub fn joined(
        connector: Connector,
        field: impl Into<String>,
        operator: ThresholdOp,
        threshold: Threshold,
    ) -> Self {
        Self {
            boolean_connector: Some(connector),
            ..Self::anchor(field, operator, threshold)
        }
    }
}

// ---------------------------------------------------------------------------
// Bucket selector (engine payload)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub source: String,
    #[serde(default = "default_script_lang")]
    pub lang: String,
}

fn default_script_lang() -> String {
    "painless".to_string()
}

/// Condition object exchanged with the rule-evaluation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSelector {
    #[serde(default)]
    pub buckets_path: BTreeMap<String, String>,
    #[serde(default)]
    pub parent_bucket_path: String,
    pub script: Script,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_policy: Option<String>,
}

/// Editable form of a [`BucketSelector`]: the decoded clause list plus the
/// metadata copied verbatim from the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionForm {
    pub conditions: Vec<ConditionClause>,
    pub buckets_path: BTreeMap<String, String>,
    pub parent_bucket_path: String,
    pub script: Script,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_policy: Option<String>,
}
