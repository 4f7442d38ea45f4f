//! Restocking suggestions from the trailing week of movements

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Item, MovementTotals};

/// Length of the trailing window, in days
pub const SUGGESTION_WINDOW_DAYS: i64 = 7;

/// Withdrawals above this share of `max` suggest raising the maximum
pub const INCREASE_MAX_OUT_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Withdrawals below this share of `max` (with low stock) suggest lowering it
pub const DECREASE_MAX_OUT_RATIO: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Stock below this share of `max` is required before suggesting a lower maximum
pub const DECREASE_MAX_STOCK_RATIO: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// One advisory for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    IncreaseMax { item: String, out_qty: i64, max: i64 },
    DecreaseMax { item: String, out_qty: i64, max: i64 },
    RaiseStock { item: String, out_qty: i64, min: i64 },
}

impl Suggestion {
    pub fn item_name(&self) -> &str {
        match self {
            Suggestion::IncreaseMax { item, .. }
            | Suggestion::DecreaseMax { item, .. }
            | Suggestion::RaiseStock { item, .. } => item,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::IncreaseMax { item, out_qty, max } => write!(
                f,
                "Consider increasing the maximum for {}. Withdrawals in the last 7 days: {}, current maximum: {}.",
                item, out_qty, max
            ),
            Suggestion::DecreaseMax { item, out_qty, max } => write!(
                f,
                "You could decrease the maximum for {}. Withdrawals in the last 7 days: {}, current maximum: {}.",
                item, out_qty, max
            ),
            Suggestion::RaiseStock { item, out_qty, min } => write!(
                f,
                "{} has moved a lot (withdrawals: {}) and is near its minimum ({}). Consider raising stock or reorder frequency.",
                item, out_qty, min
            ),
        }
    }
}

/// Movement totals inside `[now - 7 days, now]`, or `None` if nothing moved
pub fn weekly_totals(item: &Item, now: DateTime<Utc>) -> Option<MovementTotals> {
    let window_start = now - Duration::days(SUGGESTION_WINDOW_DAYS);
    let totals = MovementTotals::from_movements(
        item.transactions()
            .iter()
            .filter(|m| m.date >= window_start && m.date <= now),
    );

    (totals.count > 0).then_some(totals)
}

/// Advisories for a single item
pub fn suggest(item: &Item, now: DateTime<Utc>) -> Vec<Suggestion> {
    let Some(week) = weekly_totals(item, now) else {
        return Vec::new();
    };

    let out_qty = week.total_out;
    let max = item.max();
    let mut suggestions = Vec::new();

    if max > 0 {
        let out = Decimal::from(out_qty);
        let ceiling = Decimal::from(max);

        if out > ceiling * INCREASE_MAX_OUT_RATIO {
            suggestions.push(Suggestion::IncreaseMax {
                item: item.name().to_string(),
                out_qty,
                max,
            });
        } else if out < ceiling * DECREASE_MAX_OUT_RATIO
            && Decimal::from(item.stock()) < ceiling * DECREASE_MAX_STOCK_RATIO
        {
            suggestions.push(Suggestion::DecreaseMax {
                item: item.name().to_string(),
                out_qty,
                max,
            });
        }
    } else if out_qty > 0 && item.stock() <= item.min() {
        suggestions.push(Suggestion::RaiseStock {
            item: item.name().to_string(),
            out_qty,
            min: item.min(),
        });
    }

    suggestions
}

/// Suggestions across a whole item collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "suggestions", rename_all = "snake_case")]
pub enum SuggestionReport {
    /// There are no items at all
    NoItems,
    /// Items exist but none produced a suggestion
    InsufficientData,
    /// At least one suggestion, in item order
    Suggestions(Vec<Suggestion>),
}

impl SuggestionReport {
    pub fn build<'a>(items: impl IntoIterator<Item = &'a Item>, now: DateTime<Utc>) -> Self {
        let mut seen_any = false;
        let mut all = Vec::new();
        for item in items {
            seen_any = true;
            all.extend(suggest(item, now));
        }

        match (seen_any, all.is_empty()) {
            (false, _) => SuggestionReport::NoItems,
            (true, true) => SuggestionReport::InsufficientData,
            (true, false) => SuggestionReport::Suggestions(all),
        }
    }

    /// Lines to present to the user; never empty
    pub fn messages(&self) -> Vec<String> {
        match self {
            SuggestionReport::NoItems => {
                vec!["Create some items and record movements to see suggestions.".to_string()]
            }
            SuggestionReport::InsufficientData => vec![
                "There are not enough movements in the last 7 days to generate suggestions yet."
                    .to_string(),
            ],
            SuggestionReport::Suggestions(list) => list.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemFields, MovementType};
    use crate::types::{ItemCode, ItemId};

    fn now() -> DateTime<Utc> {
        "2025-06-15T12:00:00Z".parse().unwrap()
    }

    /// Item whose ledger ends at `stock` after the given movements
    fn item_with(min: i64, max: i64, opening: i64, moves: &[(MovementType, i64, i64)]) -> Item {
        let mut item = Item::create(
            ItemId::generate(),
            ItemCode::generate(),
            &ItemFields::new("Filtro").with_thresholds(min, max).with_stock(opening),
            Decimal::ZERO,
        )
        .unwrap();
        for (kind, qty, days_ago) in moves {
            item.record_movement(*kind, *qty, now() - Duration::days(*days_ago))
                .unwrap();
        }
        item
    }

    #[test]
    fn test_ratio_constants() {
        assert_eq!(INCREASE_MAX_OUT_RATIO, Decimal::new(7, 1));
        assert_eq!(DECREASE_MAX_OUT_RATIO, Decimal::new(2, 1));
        assert_eq!(DECREASE_MAX_STOCK_RATIO, Decimal::new(3, 1));
    }

    #[test]
    fn test_increase_max() {
        let item = item_with(0, 100, 100, &[(MovementType::Out, 75, 2)]);
        let s = suggest(&item, now());
        assert_eq!(
            s,
            vec![Suggestion::IncreaseMax { item: "Filtro".into(), out_qty: 75, max: 100 }]
        );
    }

    #[test]
    fn test_decrease_max() {
        let item = item_with(0, 100, 30, &[(MovementType::Out, 10, 1)]);
        assert_eq!(item.stock(), 20);
        assert_eq!(
            suggest(&item, now()),
            vec![Suggestion::DecreaseMax { item: "Filtro".into(), out_qty: 10, max: 100 }]
        );
    }

    #[test]
    fn test_raise_stock_without_max() {
        let item = item_with(5, 0, 8, &[(MovementType::Out, 3, 3)]);
        assert_eq!(item.stock(), 5);
        assert_eq!(
            suggest(&item, now()),
            vec![Suggestion::RaiseStock { item: "Filtro".into(), out_qty: 3, min: 5 }]
        );
    }

    #[test]
    fn test_no_recent_movements() {
        let item = item_with(5, 0, 8, &[(MovementType::Out, 3, 8)]);
        assert!(weekly_totals(&item, now()).is_none());
        assert!(suggest(&item, now()).is_empty());
    }

    #[test]
    fn test_window_inclusive_at_both_ends() {
        let mut item = item_with(0, 100, 100, &[]);
        item.record_movement(MovementType::Out, 40, now() - Duration::days(7))
            .unwrap();
        item.record_movement(MovementType::Out, 40, now()).unwrap();
        let week = weekly_totals(&item, now()).unwrap();
        assert_eq!(week.total_out, 80);
        assert_eq!(week.count, 2);
    }

    #[test]
    fn test_future_movements_excluded() {
        let mut item = item_with(0, 100, 100, &[]);
        item.record_movement(MovementType::Out, 90, now() + Duration::seconds(1))
            .unwrap();
        assert!(weekly_totals(&item, now()).is_none());
    }

    #[test]
    fn test_middle_band_has_no_suggestion() {
        // 50 out of max 100: neither above 70% nor below 20%
        let item = item_with(0, 100, 100, &[(MovementType::Out, 50, 1)]);
        assert!(suggest(&item, now()).is_empty());
    }

    #[test]
    fn test_low_out_but_healthy_stock_has_no_suggestion() {
        let item = item_with(0, 100, 60, &[(MovementType::Out, 10, 1)]);
        assert!(suggest(&item, now()).is_empty());
    }

    #[test]
    fn test_only_inbound_without_max_has_no_suggestion() {
        let item = item_with(5, 0, 0, &[(MovementType::In, 2, 1)]);
        assert!(suggest(&item, now()).is_empty());
    }

    #[test]
    fn test_exact_boundary_is_not_increase() {
        // 70 is not strictly greater than 0.7 * 100
        let item = item_with(0, 100, 100, &[(MovementType::Out, 70, 1)]);
        assert!(suggest(&item, now()).is_empty());
    }

    #[test]
    fn test_report_variants() {
        assert_eq!(SuggestionReport::build(Vec::<&Item>::new(), now()), SuggestionReport::NoItems);

        let quiet = item_with(0, 100, 50, &[]);
        assert_eq!(
            SuggestionReport::build([&quiet], now()),
            SuggestionReport::InsufficientData
        );

        let busy = item_with(0, 100, 100, &[(MovementType::Out, 80, 1)]);
        let report = SuggestionReport::build([&quiet, &busy], now());
        match &report {
            SuggestionReport::Suggestions(list) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].item_name(), "Filtro");
            }
            other => panic!("unexpected report {:?}", other),
        }
        assert_eq!(report.messages().len(), 1);
    }

    #[test]
    fn test_report_messages_never_empty() {
        assert_eq!(SuggestionReport::NoItems.messages().len(), 1);
        assert_eq!(SuggestionReport::InsufficientData.messages().len(), 1);
    }

    #[test]
    fn test_suggestion_text_cites_figures() {
        let text = Suggestion::IncreaseMax { item: "Filtro".into(), out_qty: 75, max: 100 }.to_string();
        assert!(text.contains("Filtro"));
        assert!(text.contains("75"));
        assert!(text.contains("100"));
    }
}
