//! Stock movements

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Stock received
    In,
    /// Stock withdrawn
    Out,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown movement type: {0}")]
pub struct UnknownMovementType(pub String);

impl FromStr for MovementType {
    type Err = UnknownMovementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(MovementType::In),
            "out" => Ok(MovementType::Out),
            other => Err(UnknownMovementType(other.to_string())),
        }
    }
}

/// A single recorded stock change. Immutable once appended to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub qty: i64,
}

/// Summed quantities over a set of movements. Sums saturate at `i64::MAX`,
/// since edits reset stock and the history is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementTotals {
    pub total_in: i64,
    pub total_out: i64,
    pub count: usize,
}

impl MovementTotals {
    pub fn from_movements<'a>(movements: impl IntoIterator<Item = &'a Movement>) -> Self {
        movements
            .into_iter()
            .fold(Self::default(), |mut acc, m| {
                match m.kind {
                    MovementType::In => acc.total_in = acc.total_in.saturating_add(m.qty),
                    MovementType::Out => acc.total_out = acc.total_out.saturating_add(m.qty),
                }
                acc.count += 1;
                acc
            })
    }
}
