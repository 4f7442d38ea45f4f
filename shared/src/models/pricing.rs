//! Unit price composition (net / tax / total)

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// Which figure the user typed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceMode {
    /// Tax-exclusive amount
    #[serde(alias = "without")]
    Net,
    /// Tax-inclusive amount
    #[serde(alias = "with")]
    Total,
}

impl PriceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceMode::Net => "net",
            PriceMode::Total => "total",
        }
    }
}

impl fmt::Display for PriceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown price mode: {0}")]
pub struct UnknownPriceMode(pub String);

impl FromStr for PriceMode {
    type Err = UnknownPriceMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "net" | "without" => Ok(PriceMode::Net),
            "total" | "with" => Ok(PriceMode::Total),
            other => Err(UnknownPriceMode(other.to_string())),
        }
    }
}

/// Canonical price of a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub net: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub mode: PriceMode,
}

/// A price as entered on the item form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInput {
    pub amount: Decimal,
    pub mode: PriceMode,
}

/// Split a user-entered amount into net, tax and total.
///
/// Returns `Ok(None)` ("no price configured") for absent, zero or negative
/// amounts. A negative tax rate, or an amount whose breakdown does not fit
/// in a `Decimal`, is rejected.
pub fn compute_price(
    amount: Option<Decimal>,
    mode: PriceMode,
    tax_rate: Decimal,
) -> Result<Option<Price>, ValidationError> {
    if tax_rate < Decimal::ZERO {
        return Err(ValidationError::NegativeValue { field: "tax_rate" });
    }
    let Some(raw) = amount.filter(|a| *a > Decimal::ZERO) else {
        return Ok(None);
    };

    let price = match mode {
        PriceMode::Total => {
            let net = Decimal::ONE
                .checked_add(tax_rate)
                .and_then(|divisor| raw.checked_div(divisor))
                .ok_or(ValidationError::AmountOutOfRange)?;
            Price {
                net,
                tax: raw - net,
                total: raw,
                mode,
            }
        }
        PriceMode::Net => {
            let tax = raw
                .checked_mul(tax_rate)
                .ok_or(ValidationError::AmountOutOfRange)?;
            Price {
                net: raw,
                tax,
                total: raw.checked_add(tax).ok_or(ValidationError::AmountOutOfRange)?,
                mode,
            }
        }
    };

    Ok(Some(price))
}

impl PriceInput {
    pub fn resolve(&self, tax_rate: Decimal) -> Result<Option<Price>, ValidationError> {
        compute_price(Some(self.amount), self.mode, tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rate() -> Decimal {
        Decimal::new(19, 2)
    }

    #[test]
    fn test_net_mode() {
        let price = compute_price(Some(Decimal::from(1000)), PriceMode::Net, rate()).unwrap().unwrap();
        assert_eq!(price.net, Decimal::from(1000));
        assert_eq!(price.tax, Decimal::from(190));
        assert_eq!(price.total, Decimal::from(1190));
        assert_eq!(price.mode, PriceMode::Net);
    }

    #[test]
    fn test_total_mode() {
        let price = compute_price(Some(Decimal::from(1190)), PriceMode::Total, rate()).unwrap().unwrap();
        assert_eq!(price.total, Decimal::from(1190));
        assert_eq!(price.net, Decimal::from(1000));
        assert_eq!(price.tax, Decimal::from(190));
    }

    #[test]
    fn test_no_price_configured() {
        assert_eq!(compute_price(None, PriceMode::Net, rate()), Ok(None));
        assert_eq!(compute_price(Some(Decimal::ZERO), PriceMode::Total, rate()), Ok(None));
        assert_eq!(compute_price(Some(Decimal::from(-5)), PriceMode::Net, rate()), Ok(None));
    }

    #[test]
    fn test_amount_too_large() {
        assert_eq!(
            compute_price(Some(Decimal::MAX), PriceMode::Net, rate()),
            Err(ValidationError::AmountOutOfRange)
        );
        let near_max = Decimal::from_str("70000000000000000000000000000").unwrap();
        assert_eq!(
            compute_price(Some(near_max), PriceMode::Net, rate()),
            Err(ValidationError::AmountOutOfRange)
        );
        // total mode only divides, so the same amount is fine there
        let price = compute_price(Some(near_max), PriceMode::Total, rate()).unwrap().unwrap();
        assert_eq!(price.total, near_max);
    }

    #[test]
    fn test_negative_tax_rate_rejected() {
        assert_eq!(
            compute_price(Some(Decimal::from(10)), PriceMode::Total, Decimal::NEGATIVE_ONE),
            Err(ValidationError::NegativeValue { field: "tax_rate" })
        );
        assert!(compute_price(None, PriceMode::Net, Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_zero_tax_rate() {
        let price = compute_price(Some(Decimal::from(50)), PriceMode::Total, Decimal::ZERO).unwrap().unwrap();
        assert_eq!(price.net, Decimal::from(50));
        assert_eq!(price.tax, Decimal::ZERO);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("net".parse::<PriceMode>(), Ok(PriceMode::Net));
        assert_eq!("total".parse::<PriceMode>(), Ok(PriceMode::Total));
        assert_eq!("with".parse::<PriceMode>(), Ok(PriceMode::Total));
        assert_eq!("without".parse::<PriceMode>(), Ok(PriceMode::Net));
        assert!("gross".parse::<PriceMode>().is_err());
    }

    #[test]
    fn test_legacy_mode_aliases() {
        let with: PriceMode = serde_json::from_str("\"with\"").unwrap();
        let without: PriceMode = serde_json::from_str("\"without\"").unwrap();
        assert_eq!(with, PriceMode::Total);
        assert_eq!(without, PriceMode::Net);
        assert_eq!(serde_json::to_string(&PriceMode::Total).unwrap(), "\"total\"");
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn rate_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 4))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_total_round_trip(total in amount_strategy(), r in rate_strategy()) {
            let price = compute_price(Some(total), PriceMode::Total, r).unwrap().unwrap();
            prop_assert_eq!(price.total, total);
            prop_assert_eq!(price.net + price.tax, total);
        }

        #[test]
        fn prop_net_round_trip(net in amount_strategy(), r in rate_strategy()) {
            let price = compute_price(Some(net), PriceMode::Net, r).unwrap().unwrap();
            prop_assert_eq!(price.net, net);
            prop_assert_eq!(price.net * (Decimal::ONE + r), price.total);
        }

        #[test]
        fn prop_net_times_rate_is_total(total in amount_strategy(), r in rate_strategy()) {
            let price = compute_price(Some(total), PriceMode::Total, r).unwrap().unwrap();
            let diff = (price.net * (Decimal::ONE + r) - price.total).abs();
            prop_assert!(diff < Decimal::new(1, 12));
        }
    }
}
