//! VSYS amount, fee, and timestamp types.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Smallest units per whole VSYS coin (10^-8 VSYS precision).
pub const UNIT: u64 = 100_000_000;

/// A VSYS coin amount in smallest units (10^-8 VSYS).
///
/// # Creating Amounts
///
/// ```
/// use vsys_kit::Amount;
///
/// let five = Amount::vsys(5);
/// let raw = Amount::from_units(500_000_000);
/// assert_eq!(five, raw);
///
/// // Decimal input for runtime/user values
/// let half = Amount::from_vsys_decimal("0.5").unwrap();
/// assert_eq!(half.as_units(), 50_000_000);
/// ```
///
/// Granularity finer than 10^-8 VSYS is rejected rather than rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    /// Zero VSYS.
    pub const ZERO: Self = Self(0);
    /// One whole VSYS coin.
    pub const ONE_VSYS: Self = Self(UNIT);

    /// Create from whole VSYS coins.
    ///
    /// # Panics
    ///
    /// Panics if `coins` exceeds `u64::MAX / UNIT` (about 1.8e11 VSYS, far
    /// beyond total supply) — in release builds too, not just debug. Use
    /// [`Amount::from_vsys_decimal`] for untrusted runtime input.
    pub const fn vsys(coins: u64) -> Self {
        match coins.checked_mul(UNIT) {
            Some(units) => Self(units),
            None => panic!("amount overflows u64 smallest units"),
        }
    }

    /// Create from smallest units.
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Parse a decimal VSYS amount (e.g. `"1.5"`).
    ///
    /// At most 8 fractional digits are meaningful; anything finer fails with
    /// [`ValidationError::AmountGranularity`].
    pub fn from_vsys_decimal(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();

        let (integer_part, decimal_part) = match s.find('.') {
            Some(dot) => (&s[..dot], &s[dot + 1..]),
            None => (s, ""),
        };

        let integer: u64 = if integer_part.is_empty() {
            0
        } else {
            integer_part
                .parse()
                .map_err(|_| ValidationError::InvalidNumber(s.to_string()))?
        };

        if decimal_part.len() > 8 && decimal_part[8..].bytes().any(|b| b != b'0') {
            return Err(ValidationError::AmountGranularity(s.to_string()));
        }
        let decimal_str = &decimal_part[..decimal_part.len().min(8)];

        let decimal: u64 = if decimal_str.is_empty() {
            0
        } else {
            decimal_str
                .parse()
                .map_err(|_| ValidationError::InvalidNumber(s.to_string()))?
        };
        let decimal_units = decimal * 10u64.pow((8 - decimal_str.len()) as u32);

        integer
            .checked_mul(UNIT)
            .and_then(|v| v.checked_add(decimal_units))
            .map(Self)
            .ok_or(ValidationError::Overflow)
    }

    /// Get the raw smallest-unit value.
    pub const fn as_units(&self) -> u64 {
        self.0
    }

    /// Get the value as whole VSYS (may lose precision).
    pub fn as_vsys_f64(&self) -> f64 {
        self.0 as f64 / UNIT as f64
    }

    /// Checked addition.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Check if zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_vsys_decimal(s)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNIT;
        let frac = self.0 % UNIT;
        if frac == 0 {
            write!(f, "{whole} VSYS")
        } else {
            let frac = format!("{frac:08}");
            write!(f, "{whole}.{} VSYS", frac.trim_end_matches('0'))
        }
    }
}

/// A transaction fee in smallest units.
///
/// Every transaction kind has its own minimum (which is also the default).
/// The serialized fee is always paired with the fixed [`Fee::SCALE`] of 100,
/// encoded as a 2-byte big-endian value right after the fee itself.
///
/// ```
/// use vsys_kit::Fee;
///
/// let fee = Fee::PAYMENT;
/// assert_eq!(fee.as_units(), 10_000_000); // 0.1 VSYS
///
/// // Custom fees must still clear the kind minimum
/// assert!(Fee::custom(5, Fee::PAYMENT).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fee(u64);

impl Fee {
    /// Fee scale constant serialized alongside every fee.
    pub const SCALE: u16 = 100;

    /// Minimum/default fee for Payment (0.1 VSYS).
    pub const PAYMENT: Self = Self(10_000_000);
    /// Minimum/default fee for Lease (0.1 VSYS).
    pub const LEASING: Self = Self(10_000_000);
    /// Minimum/default fee for LeaseCancel (0.1 VSYS).
    pub const LEASE_CANCEL: Self = Self(10_000_000);
    /// Minimum/default fee for RegisterContract (100 VSYS).
    pub const REGISTER_CONTRACT: Self = Self(100 * UNIT);
    /// Minimum/default fee for ExecuteContractFunction (0.3 VSYS).
    pub const EXECUTE_CONTRACT: Self = Self(30_000_000);
    /// Minimum/default fee for ContendSlots (50,000 VSYS).
    pub const CONTEND_SLOTS: Self = Self(50_000 * UNIT);
    /// Minimum/default fee for DBPut (1 VSYS).
    pub const DB_PUT: Self = Self(UNIT);

    /// Create a custom fee, rejecting values below the kind minimum.
    pub fn custom(units: u64, minimum: Fee) -> Result<Self, ValidationError> {
        if units < minimum.0 {
            return Err(ValidationError::FeeTooLow {
                fee: units,
                minimum: minimum.0,
            });
        }
        Ok(Self(units))
    }

    /// Get the raw smallest-unit value.
    pub const fn as_units(&self) -> u64 {
        self.0
    }
}

impl Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Amount::from_units(self.0))
    }
}

/// A VSYS timestamp: nanoseconds since the Unix epoch.
///
/// The chain rejects sub-second timestamps, so construction accepts either 0
/// (genesis convention) or at least [`Timestamp::SCALE`] nanoseconds.
/// Monotonic advancement is recommended but not enforced by the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Nanoseconds per second.
    pub const SCALE: u64 = 1_000_000_000;

    /// Create from raw nanoseconds since epoch.
    pub fn from_nanos(nanos: u64) -> Result<Self, ValidationError> {
        if nanos != 0 && nanos < Self::SCALE {
            return Err(ValidationError::InvalidTimestamp(nanos));
        }
        Ok(Self(nanos))
    }

    /// Create from whole Unix seconds.
    pub fn from_unix(secs: u64) -> Result<Self, ValidationError> {
        let nanos = secs
            .checked_mul(Self::SCALE)
            .ok_or(ValidationError::Overflow)?;
        Self::from_nanos(nanos)
    }

    /// The current system time.
    pub fn now() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self(nanos)
    }

    /// Get the raw nanosecond value.
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Get the value as Unix seconds (truncated).
    pub const fn as_unix(&self) -> u64 {
        self.0 / Self::SCALE
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_constructors_agree() {
        assert_eq!(Amount::vsys(5), Amount::from_units(500_000_000));
        assert_eq!(Amount::ONE_VSYS.as_units(), UNIT);
    }

    #[test]
    fn test_vsys_accepts_the_full_representable_range() {
        let max_coins = u64::MAX / UNIT;
        assert_eq!(Amount::vsys(max_coins).as_units(), max_coins * UNIT);
    }

    #[test]
    #[should_panic(expected = "overflows u64")]
    fn test_vsys_panics_past_the_representable_range() {
        let _ = Amount::vsys(u64::MAX / UNIT + 1);
    }

    #[test]
    fn test_amount_decimal_parsing() {
        assert_eq!(Amount::from_vsys_decimal("1.5").unwrap(), Amount::from_units(150_000_000));
        assert_eq!(Amount::from_vsys_decimal("0.00000001").unwrap(), Amount::from_units(1));
        assert_eq!(Amount::from_vsys_decimal(".25").unwrap(), Amount::from_units(25_000_000));
        assert_eq!(Amount::from_vsys_decimal("3").unwrap(), Amount::vsys(3));
        // Trailing zeros beyond 8 places are harmless
        assert_eq!(
            Amount::from_vsys_decimal("1.0000000100").unwrap(),
            Amount::from_units(100_000_001)
        );
    }

    #[test]
    fn test_amount_rejects_sub_unit_granularity() {
        let err = Amount::from_vsys_decimal("0.000000001").unwrap_err();
        assert!(matches!(err, ValidationError::AmountGranularity(_)));
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(Amount::from_vsys_decimal("five").is_err());
        assert!(Amount::from_vsys_decimal("1.2x").is_err());
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::vsys(5).to_string(), "5 VSYS");
        assert_eq!(Amount::from_units(150_000_000).to_string(), "1.5 VSYS");
    }

    #[test]
    fn test_fee_minimums() {
        assert_eq!(Fee::PAYMENT.as_units(), 10_000_000);
        assert_eq!(Fee::REGISTER_CONTRACT.as_units(), 10_000_000_000);
        assert_eq!(Fee::EXECUTE_CONTRACT.as_units(), 30_000_000);
        assert_eq!(Fee::DB_PUT.as_units(), UNIT);
    }

    #[test]
    fn test_custom_fee_enforces_minimum() {
        let err = Fee::custom(9_999_999, Fee::PAYMENT).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FeeTooLow {
                fee: 9_999_999,
                minimum: 10_000_000
            }
        );
        assert_eq!(Fee::custom(20_000_000, Fee::PAYMENT).unwrap().as_units(), 20_000_000);
    }

    #[test]
    fn test_timestamp_validation() {
        assert!(Timestamp::from_nanos(0).is_ok());
        assert!(Timestamp::from_nanos(Timestamp::SCALE).is_ok());
        assert!(Timestamp::from_nanos(999_999_999).is_err());
    }

    #[test]
    fn test_timestamp_from_unix() {
        let ts = Timestamp::from_unix(1_690_000_000).unwrap();
        assert_eq!(ts.as_nanos(), 1_690_000_000_000_000_000);
        assert_eq!(ts.as_unix(), 1_690_000_000);
    }

    #[test]
    fn test_timestamp_now_is_plausible() {
        // Anything after 2020 in nanoseconds
        assert!(Timestamp::now().as_nanos() > 1_577_836_800 * Timestamp::SCALE);
    }

    #[test]
    fn test_scalars_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_value(Amount::vsys(5)).unwrap(), serde_json::json!(500_000_000u64));
        assert_eq!(serde_json::to_value(Fee::PAYMENT).unwrap(), serde_json::json!(10_000_000u64));
    }
}
