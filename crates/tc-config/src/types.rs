use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const UNITS: [(&str, u64); 4] = [("d", 86_400), ("h", 3_600), ("m", 60), ("s", 1)];

// ---------------------------------------------------------------------------
// HumanDuration
// ---------------------------------------------------------------------------

/// A whole-second duration written as `<n>(s|m|h|d)`, e.g. `"1h"`.
///
/// The display form is the largest unit that divides evenly, which is also
/// the span literal the query language accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(Duration);

impl HumanDuration {
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Width in epoch milliseconds, saturating at `i64::MAX`.
    pub fn as_millis_i64(&self) -> i64 {
        i64::try_from(self.0.as_millis()).unwrap_or(i64::MAX)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<HumanDuration> for Duration {
    fn from(hd: HumanDuration) -> Self {
        hd.0
    }
}

impl FromStr for HumanDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        let Some((digits, unit)) = s
            .find(|c: char| !c.is_ascii_digit())
            .map(|idx| s.split_at(idx))
        else {
            anyhow::bail!("duration {s:?} needs a unit suffix (s/m/h/d)");
        };
        if digits.is_empty() {
            anyhow::bail!("duration {s:?} has no numeric part");
        }
        let value: u64 = digits
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid number in duration {s:?}"))?;
        let scale = UNITS
            .iter()
            .find_map(|(suffix, secs)| (*suffix == unit).then_some(*secs))
            .ok_or_else(|| anyhow::anyhow!("unsupported unit {unit:?} in duration {s:?}"))?;
        let secs = value
            .checked_mul(scale)
            .ok_or_else(|| anyhow::anyhow!("duration {s:?} overflows"))?;
        Ok(Self::from_secs(secs))
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        if secs == 0 {
            return f.write_str("0s");
        }
        let (suffix, scale) = UNITS
            .iter()
            .find(|(_, scale)| secs % scale == 0)
            .copied()
            .unwrap_or(("s", 1));
        write!(f, "{}{suffix}", secs / scale)
    }
}

impl Serialize for HumanDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
