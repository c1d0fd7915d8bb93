use crate::{
    NUMERIC_MAX_PRECISION, NUMERIC_MAX_SCALE,
    error::{NumericError, ParseError, ParseTarget, PrecisionError},
};
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};

///
/// Numeric
///
/// Exact signed decimal within the warehouse NUMERIC ceiling.
///
/// Invariant:
/// - value == unscaled * 10^-scale
/// - scale <= 9
/// - significant digits of `unscaled` <= 38
///
/// Construction rounds any scale above 9 half-up (away from zero) and then
/// rejects values whose precision is still too large. Display keeps the
/// scale; equality, ordering and hashing compare numeric value only, so
/// `1.0 == 1.00`.
///

#[derive(Clone, Debug)]
pub struct Numeric {
    unscaled: BigInt,
    scale: u32,
}

impl Numeric {
    pub const MAX_PRECISION: u32 = NUMERIC_MAX_PRECISION;
    pub const MAX_SCALE: u32 = NUMERIC_MAX_SCALE;

    /// Build from an unscaled integer and a scale, normalizing the scale and
    /// enforcing the precision ceiling.
    pub fn from_parts(unscaled: BigInt, scale: u32) -> Result<Self, PrecisionError> {
        let (unscaled, scale) = if scale > Self::MAX_SCALE {
            (
                round_half_up(&unscaled, scale - Self::MAX_SCALE),
                Self::MAX_SCALE,
            )
        } else {
            (unscaled, scale)
        };

        let precision = digit_count(&unscaled);
        if precision > Self::MAX_PRECISION {
            return Err(PrecisionError {
                precision,
                max: Self::MAX_PRECISION,
            });
        }

        Ok(Self { unscaled, scale })
    }

    /// Build from a native decimal. Its scale tops out at 28, so rounding may
    /// apply but the precision check never fails in practice.
    pub fn from_decimal(decimal: rust_decimal::Decimal) -> Result<Self, PrecisionError> {
        Self::from_parts(BigInt::from(decimal.mantissa()), decimal.scale())
    }

    /// Decode the data-interchange fixed-point form: a two's-complement
    /// big-endian unscaled integer at scale 9.
    pub fn from_fixed_bytes(bytes: &[u8]) -> Result<Self, NumericError> {
        if bytes.is_empty() {
            return Err(ParseError::new(
                ParseTarget::Numeric,
                "<0 bytes>",
                "fixed-point encoding must carry at least one byte",
            )
            .into());
        }

        let unscaled = BigInt::from_signed_bytes_be(bytes);

        Ok(Self::from_parts(unscaled, Self::MAX_SCALE)?)
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Number of significant digits in the unscaled value (zero has one).
    #[must_use]
    pub fn precision(&self) -> u32 {
        digit_count(&self.unscaled)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    #[must_use]
    pub fn is_sign_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    /// Same value with trailing fractional zeros removed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let ten = BigInt::from(10u8);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;

        while scale > 0 && !unscaled.is_zero() && (&unscaled % &ten).is_zero() {
            unscaled /= &ten;
            scale -= 1;
        }
        if unscaled.is_zero() {
            scale = 0;
        }

        Self { unscaled, scale }
    }

    /// Unscaled value rescaled to `MAX_SCALE`; scales never exceed it.
    fn aligned(&self) -> BigInt {
        &self.unscaled * pow10(Self::MAX_SCALE - self.scale)
    }
}

///
/// TEXT
///

impl FromStr for Numeric {
    type Err = NumericError;

    /// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`, including `.5` and `5.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| {
            NumericError::from(ParseError::new(ParseTarget::Numeric, s, reason))
        };

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(at) => {
                let exp = &body[at + 1..];
                let exp: i64 = match exp.parse() {
                    Ok(exp) => exp,
                    // too long for i64 but well-formed: saturate
                    Err(_) if is_signed_digits(exp) => {
                        if exp.starts_with('-') { i64::MIN } else { i64::MAX }
                    }
                    Err(_) => return Err(err("invalid exponent")),
                };
                (&body[..at], exp)
            }
            None => (body, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err("expected at least one digit"));
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(err("expected decimal digits"));
        }

        let digits = format!("{int_part}{frac_part}");
        let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| err("expected decimal digits"))?;
        let mut unscaled = BigInt::from(magnitude);
        if negative {
            unscaled = -unscaled;
        }

        let frac_len = i64::try_from(frac_part.len()).map_err(|_| err("too many digits"))?;
        let scale = frac_len.saturating_sub(exponent);

        if scale >= 0 {
            // every digit falls below half a unit at MAX_SCALE
            if scale > i64::from(digit_count(&unscaled) + Self::MAX_SCALE) {
                return Ok(Self::from_parts(BigInt::zero(), Self::MAX_SCALE)?);
            }
            let scale = u32::try_from(scale).map_err(|_| err("exponent out of range"))?;
            return Ok(Self::from_parts(unscaled, scale)?);
        }

        // negative scale: shift into the integer part, checking precision first
        if unscaled.is_zero() {
            return Ok(Self::from_parts(unscaled, 0)?);
        }
        let shift = scale.unsigned_abs();
        let precision = u64::from(digit_count(&unscaled)).saturating_add(shift);
        if precision > u64::from(Self::MAX_PRECISION) {
            return Err(PrecisionError {
                precision: u32::try_from(precision).unwrap_or(u32::MAX),
                max: Self::MAX_PRECISION,
            }
            .into());
        }

        let shift = u32::try_from(shift).map_err(|_| err("exponent out of range"))?;
        let shifted = unscaled * pow10(shift);

        Ok(Self::from_parts(shifted, 0)?)
    }
}

impl TryFrom<&str> for Numeric {
    type Error = NumericError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        let sign = if self.unscaled.is_negative() { "-" } else { "" };

        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let scale = self.scale as usize;
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);

        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

///
/// CONVERSIONS
///

macro_rules! impl_numeric_from_int {
    ( $( $type:ty ),* ) => {
        $(
            impl From<$type> for Numeric {
                fn from(n: $type) -> Self {
                    Self {
                        unscaled: BigInt::from(n),
                        scale: 0,
                    }
                }
            }
        )*
    };
}

// every listed type has at most 20 digits
impl_numeric_from_int!(u8, u16, u32, u64, i8, i16, i32, i64);

impl TryFrom<rust_decimal::Decimal> for Numeric {
    type Error = PrecisionError;

    fn try_from(decimal: rust_decimal::Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(decimal)
    }
}

///
/// VALUE SEMANTICS
///

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.aligned() == other.aligned()
    }
}

impl Eq for Numeric {}

impl Hash for Numeric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.aligned().hash(state);
    }
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        self.aligned().cmp(&other.aligned())
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Serde: always the canonical decimal text, never a float.
impl Serialize for Numeric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

///
/// HELPERS
///

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}

#[expect(clippy::cast_possible_truncation)]
fn is_signed_digits(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn digit_count(value: &BigInt) -> u32 {
    if value.is_zero() {
        return 1;
    }

    value.magnitude().to_string().len() as u32
}

/// Drop `digits` trailing decimal digits, rounding half away from zero.
fn round_half_up(value: &BigInt, digits: u32) -> BigInt {
    // anything shorter than the dropped span is below half a unit
    if digits > digit_count(value) {
        return BigInt::zero();
    }

    let divisor = pow10(digits);
    let quotient = value / &divisor;
    let remainder = value % &divisor;

    if remainder.magnitude() * 2u32 >= *divisor.magnitude() {
        quotient + value.signum()
    } else {
        quotient
    }
}

///
/// TESTS
///
