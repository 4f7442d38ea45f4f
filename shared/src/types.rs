//! Common types used across the stock tracker

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix carried by every generated item code
pub const ITEM_CODE_PREFIX: &str = "IT-";

const CODE_FRAGMENT_LEN: usize = 8;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scannable item code, e.g. `IT-K3J2H1X9`
///
/// Blank codes only exist in legacy data and are backfilled on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

impl ItemCode {
    /// Generate a fresh code. Callers that need uniqueness against an
    /// existing collection must check for collisions themselves.
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            ITEM_CODE_PREFIX,
            random_fragment().to_uppercase()
        ))
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Eight base-36 characters drawn from a v4 UUID
fn random_fragment() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(CODE_FRAGMENT_LEN);
    for _ in 0..CODE_FRAGMENT_LEN {
        out.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    out
}

/// Format an amount as Chilean pesos: `$1.234.567`, no decimals
pub fn format_clp(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_item_code_shape() {
        let code = ItemCode::generate();
        let s = code.as_str();
        assert!(s.starts_with(ITEM_CODE_PREFIX));
        assert_eq!(s.len(), ITEM_CODE_PREFIX.len() + CODE_FRAGMENT_LEN);
        assert!(s[ITEM_CODE_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_item_codes_distinct() {
        let codes: HashSet<_> = (0..500).map(|_| ItemCode::generate()).collect();
        assert_eq!(codes.len(), 500);
    }

    #[test]
    fn test_blank_code() {
        assert!(ItemCode::default().is_blank());
        assert!(ItemCode::from("  ").is_blank());
        assert!(!ItemCode::generate().is_blank());
    }

    #[test]
    fn test_item_id_unique() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }

    #[test]
    fn test_format_clp() {
        assert_eq!(format_clp(Decimal::from(0)), "$0");
        assert_eq!(format_clp(Decimal::from(999)), "$999");
        assert_eq!(format_clp(Decimal::from(1000)), "$1.000");
        assert_eq!(format_clp(Decimal::from(1234567)), "$1.234.567");
        assert_eq!(format_clp(Decimal::new(15995, 1)), "$1.600");
        assert_eq!(format_clp(Decimal::new(-25005, 1)), "-$2.501");
    }
}
