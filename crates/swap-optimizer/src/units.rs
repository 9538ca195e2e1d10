//! Unit conversion between human decimal amounts and integer base units
//!
//! Base-unit math is exact (`BigUint`). The decimal side is `f64` and is
//! only used for display and for the approximate net score.

use std::fmt;
use std::str::FromStr;

use gasguard_core::constants::MAX_TOKEN_DECIMALS;
use gasguard_core::BaseUnits;
use num_bigint::BigUint;
use num_traits::{Num, Zero};

/// Exact non-negative decimal number: `mantissa * 10^-scale`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalAmount {
    mantissa: BigUint,
    scale: i64,
}

/// Reason a decimal amount string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAmountError(String);

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseAmountError {}

impl FromStr for DecimalAmount {
    type Err = ParseAmountError;

    /// Accepts `123`, `0.5`, `.5`, `+1.25`, `1e-3`, `2.5E6`. Negative values are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unsigned = s.strip_prefix('+').unwrap_or(s);
        if unsigned.starts_with('-') {
            return Err(ParseAmountError(format!("negative amount: {}", s)));
        }

        let (number, exponent) = match unsigned.find(['e', 'E']) {
            Some(idx) => {
                let exp: i64 = unsigned[idx + 1..]
                    .parse()
                    .map_err(|_| ParseAmountError(format!("invalid exponent: {}", s)))?;
                (&unsigned[..idx], exp)
            }
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = match number.split_once('.') {
            Some((i, f)) => (i, f),
            None => (number, ""),
        };

        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(ParseAmountError(format!("not a decimal number: {:?}", s)));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let max_exponent = i64::from(2 * MAX_TOKEN_DECIMALS).saturating_add(digits.len() as i64);
        if exponent.unsigned_abs() > max_exponent.unsigned_abs() {
            return Err(ParseAmountError(format!("exponent out of range: {}", s)));
        }

        let mantissa = BigUint::from_str_radix(&digits, 10)
            .map_err(|e| ParseAmountError(format!("{}: {}", s, e)))?;
        let scale = (frac_part.len() as i64)
            .checked_sub(exponent)
            .ok_or_else(|| ParseAmountError(format!("exponent out of range: {}", s)))?;

        Ok(Self { mantissa, scale })
    }
}

impl DecimalAmount {
    /// `round(self * 10^decimals)`, half rounded up
    pub fn to_base_units(&self, decimals: u32) -> BaseUnits {
        let shift = i64::from(decimals).saturating_sub(self.scale);
        if shift >= 0 {
            return BaseUnits(&self.mantissa * pow10(shift.unsigned_abs()));
        }

        // Shifted past every mantissa digit: the value is below 0.1
        let mantissa_digits = self.mantissa.to_str_radix(10).len() as u64;
        if shift.unsigned_abs() > mantissa_digits {
            return BaseUnits::zero();
        }

        let divisor = pow10(shift.unsigned_abs());
        let quotient = &self.mantissa / &divisor;
        let remainder = &self.mantissa % &divisor;
        if remainder * 2u32 >= divisor {
            BaseUnits(quotient + 1u32)
        } else {
            BaseUnits(quotient)
        }
    }

    /// The value as an integer, or `None` if it has a non-zero fraction
    pub fn to_integer(&self) -> Option<BigUint> {
        let rounded = self.to_base_units(0).0;
        let exact = match self.scale {
            scale if scale <= 0 => true,
            scale => &rounded * pow10(scale.unsigned_abs()) == self.mantissa,
        };
        exact.then_some(rounded)
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }
}

fn pow10(exp: u64) -> BigUint {
    num_traits::pow(BigUint::from(10u32), exp as usize)
}

/// Render `raw / 10^decimals` as an exact decimal string
pub fn format_units(raw: &BigUint, decimals: u32) -> String {
    let digits = raw.to_str_radix(10);
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Convert a base-unit amount to a decimal number.
///
/// Missing amount yields 0. Missing decimals means no shift. An amount that
/// is not an unsigned integer yields 0.
pub fn to_decimal(raw_amount: Option<&str>, decimals: Option<u32>) -> f64 {
    let Some(raw) = raw_amount else {
        tracing::warn!("to_decimal: amount is missing, returning 0");
        return 0.0;
    };
    let decimals = decimals.unwrap_or_else(|| {
        tracing::warn!(
            "to_decimal: decimals missing for amount {}, using zero shift",
            raw
        );
        0
    });

    match BigUint::from_str(raw.trim()) {
        Ok(value) => base_units_to_f64(&value, decimals),
        Err(e) => {
            tracing::warn!(
                "to_decimal: failed to convert {:?} with {} decimals: {}",
                raw,
                decimals,
                e
            );
            0.0
        }
    }
}

/// Exact-then-round conversion of base units to `f64`
pub fn base_units_to_f64(raw: &BigUint, decimals: u32) -> f64 {
    format_units(raw, decimals).parse().unwrap_or(0.0)
}

/// Convert a human decimal amount to base units.
///
/// Missing amount yields zero. Missing decimals rounds the input as if it
/// were already base-scaled. Unparseable input yields zero.
pub fn to_base_unit(decimal_amount: Option<&str>, decimals: Option<u32>) -> BaseUnits {
    let Some(amount) = decimal_amount else {
        tracing::warn!("to_base_unit: amount is missing, returning 0");
        return BaseUnits::zero();
    };
    let decimals = decimals.unwrap_or_else(|| {
        tracing::warn!(
            "to_base_unit: decimals missing for amount {}, assuming base units",
            amount
        );
        0
    });

    match amount.parse::<DecimalAmount>() {
        Ok(parsed) => parsed.to_base_units(decimals),
        Err(e) => {
            tracing::warn!("to_base_unit: failed to convert {:?}: {}", amount, e);
            BaseUnits::zero()
        }
    }
}
