//! Stock level classification and threshold alerts

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Item;

/// Stock status shown in the stock table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Ok,
    /// At or below the minimum
    Low,
    /// At or above a configured maximum
    High,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Ok => write!(f, "OK"),
            StockStatus::Low => write!(f, "Low"),
            StockStatus::High => write!(f, "High"),
        }
    }
}

/// Classify a stock level. `max == 0` means no maximum.
///
/// When both thresholds are crossed (only possible with `min >= max > 0`)
/// `Low` wins.
pub fn classify_stock(stock: i64, min: i64, max: i64) -> StockStatus {
    if stock <= min {
        StockStatus::Low
    } else if max > 0 && stock >= max {
        StockStatus::High
    } else {
        StockStatus::Ok
    }
}

/// Threshold crossings raised after a movement.
///
/// Unlike [`classify_stock`], both crossings are reported independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdAlert {
    pub item_name: String,
    pub stock: i64,
    /// Minimum that was reached or passed
    pub at_or_below_min: Option<i64>,
    /// Maximum that was reached or passed
    pub at_or_above_max: Option<i64>,
}

impl ThresholdAlert {
    /// Evaluate an item's current stock; `None` when no threshold is crossed
    pub fn evaluate(item: &Item) -> Option<Self> {
        let stock = item.stock();
        let low = (stock <= item.min()).then_some(item.min());
        let high = (item.max() > 0 && stock >= item.max()).then_some(item.max());

        if low.is_none() && high.is_none() {
            return None;
        }

        Some(Self {
            item_name: item.name().to_string(),
            stock,
            at_or_below_min: low,
            at_or_above_max: high,
        })
    }
}

impl fmt::Display for ThresholdAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALERT for {}:", self.item_name)?;
        if let Some(min) = self.at_or_below_min {
            write!(f, " Stock at or below the minimum ({}).", min)?;
        }
        if let Some(max) = self.at_or_above_max {
            write!(f, " Stock at or above the maximum ({}).", max)?;
        }
        Ok(())
    }
}
