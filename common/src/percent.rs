//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage, possibly negative (a decrease).
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `-100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= -Decimal::ONE_HUNDRED).then_some(Self(val))
    }

    /// Returns this [`Percent`] as a fraction of one (`3%` is `0.03`).
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Indicates whether this [`Percent`] is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("percent value is less than -100")
    }
}

impl From<Percent> for Decimal {
    fn from(p: Percent) -> Self {
        p.0
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal_macros::dec;

    use super::Percent;

    #[test]
    fn fraction() {
        assert_eq!(Percent::from_str("3").unwrap().fraction(), dec!(0.03));
        assert_eq!(Percent::from_str("-2.5").unwrap().fraction(), dec!(-0.025));
        assert_eq!(Percent::ZERO.fraction(), dec!(0));
    }

    #[test]
    fn rejects_impossible_decrease() {
        assert!(Percent::new(dec!(-100)).is_some());
        assert!(Percent::new(dec!(-100.01)).is_none());
        assert!(Percent::from_str("abc").is_err());
    }
}
