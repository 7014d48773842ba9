//! Precise amount math
//!
//! Fixed-point decimal arithmetic for token amounts. Amounts are kept as an
//! arbitrary-precision mantissa with an explicit decimal scale, so repeated
//! recalculation while the user types never accumulates binary
//! floating-point error.
//!
//! ## Key Functions
//! - `apply_slippage_decrease`: worst-case minimum received, `amount × (1 − s/100)`
//! - `apply_slippage_increase`: worst-case maximum paid, `amount × (1 + s/100)`
//!
//! Both take and return decimal strings. Empty, zero or malformed input is
//! handed back untouched.

use crate::shared::constants::{AMOUNT_PRECISION, MAX_SLIPPAGE_PERCENT, MIN_SLIPPAGE_PERCENT};
use crate::shared::error::WalletError;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Rounding direction when precision has to be dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlippageDirection {
    Decrease,
    Increase,
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

/// Non-negative decimal number: `mantissa × 10^-scale`
#[derive(Debug, Clone)]
pub struct PreciseAmount {
    mantissa: BigUint,
    scale: u32,
}

impl PreciseAmount {
    pub fn zero() -> Self {
        Self {
            mantissa: BigUint::zero(),
            scale: 0,
        }
    }

    /// Parse a plain decimal numeral such as `"12"`, `"0.5"`, `"1."` or `".25"`.
    ///
    /// Signs, exponents, separators and a second `.` are rejected. Returns
    /// `None` instead of an error because half-typed input is expected here.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (int_part, frac_part) = input.split_once('.').unwrap_or((input, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        // A second '.' ends up in frac_part and fails here
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let digits = format!("{}{}", int_part, frac_part);
        let mantissa = BigUint::parse_bytes(digits.as_bytes(), 10)?;
        Some(Self {
            mantissa,
            scale: frac_part.len() as u32,
        })
    }

    /// Interpret on-chain integer units with the token's decimals
    pub fn from_base_units(units: BigUint, decimals: u8) -> Self {
        Self {
            mantissa: units,
            scale: decimals as u32,
        }
    }

    /// Convert to on-chain integer units, truncating digits beyond `decimals`
    pub fn to_base_units(&self, decimals: u8) -> BigUint {
        let decimals = decimals as u32;
        if self.scale <= decimals {
            &self.mantissa * pow10(decimals - self.scale)
        } else {
            &self.mantissa / pow10(self.scale - decimals)
        }
    }

    /// Slippage percent as a decimal, clamped to [0, 100]
    ///
    /// The float goes through its shortest decimal rendering, so `0.5`
    /// becomes exactly `0.5`. Non-finite values count as zero.
    pub fn from_percent(percent: f64) -> Self {
        if !percent.is_finite() || percent <= MIN_SLIPPAGE_PERCENT {
            return Self::zero();
        }
        let clamped = percent.min(MAX_SLIPPAGE_PERCENT);
        Self::parse(&clamped.to_string()).unwrap_or_else(Self::zero)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    fn rescaled(&self, scale: u32) -> BigUint {
        debug_assert!(scale >= self.scale);
        &self.mantissa * pow10(scale - self.scale)
    }

    /// Same value with trailing fractional zeros removed
    pub fn normalized(&self) -> Self {
        let ten = BigUint::from(10u32);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 && !mantissa.is_zero() && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }
        if mantissa.is_zero() {
            scale = 0;
        }
        Self { mantissa, scale }
    }

    pub fn add(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self {
            mantissa: self.rescaled(scale) + other.rescaled(scale),
            scale,
        }
    }

    /// `self − other`, floored at zero
    pub fn saturating_sub(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        let (a, b) = (self.rescaled(scale), other.rescaled(scale));
        if a <= b {
            return Self::zero();
        }
        Self {
            mantissa: a - b,
            scale,
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self {
            mantissa: &self.mantissa * &other.mantissa,
            scale: self.scale + other.scale,
        }
    }

    /// Divide by `10^places`; exact
    pub fn shift_scale(&self, places: u32) -> Self {
        Self {
            mantissa: self.mantissa.clone(),
            scale: self.scale + places,
        }
    }

    /// Drop fractional digits beyond `scale`
    pub fn round_to_scale(&self, scale: u32, rounding: Rounding) -> Self {
        if self.scale <= scale {
            return self.clone();
        }
        let divisor = pow10(self.scale - scale);
        let mut mantissa = &self.mantissa / &divisor;
        if rounding == Rounding::Up && !(&self.mantissa % &divisor).is_zero() {
            mantissa += BigUint::one();
        }
        Self { mantissa, scale }
    }

    fn adjust_by_percent(&self, percent: &Self, direction: SlippageDirection) -> Self {
        let hundred = Self::from(100u64);
        let (factor, rounding) = match direction {
            SlippageDirection::Decrease => (hundred.saturating_sub(percent), Rounding::Down),
            SlippageDirection::Increase => (hundred.add(percent), Rounding::Up),
        };
        let precision = self.scale.max(AMOUNT_PRECISION);
        self.mul(&factor)
            .shift_scale(2)
            .round_to_scale(precision, rounding)
    }

    /// `self × (1 − percent/100)`, rounded down
    pub fn decrease_by_percent(&self, percent: &Self) -> Self {
        self.adjust_by_percent(percent, SlippageDirection::Decrease)
    }

    /// `self × (1 + percent/100)`, rounded up
    pub fn increase_by_percent(&self, percent: &Self) -> Self {
        self.adjust_by_percent(percent, SlippageDirection::Increase)
    }
}

impl From<u64> for PreciseAmount {
    fn from(value: u64) -> Self {
        Self {
            mantissa: BigUint::from(value),
            scale: 0,
        }
    }
}

impl FromStr for PreciseAmount {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| WalletError::validation(format!("Invalid decimal amount: {:?}", s)))
    }
}

impl Ord for PreciseAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.rescaled(scale).cmp(&other.rescaled(scale))
    }
}

impl PartialOrd for PreciseAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PreciseAmount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PreciseAmount {}

impl fmt::Display for PreciseAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normalized();
        if n.scale == 0 {
            return write!(f, "{}", n.mantissa);
        }
        let scale = n.scale as usize;
        let digits = format!("{:0>width$}", n.mantissa.to_string(), width = scale + 1);
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        write!(f, "{}.{}", int_part, frac_part)
    }
}

fn adjust_amount(amount: &str, slippage_percent: f64, direction: SlippageDirection) -> String {
    let value = match PreciseAmount::parse(amount) {
        Some(value) if !value.is_zero() => value,
        _ => return amount.to_string(),
    };
    let percent = PreciseAmount::from_percent(slippage_percent);
    value.adjust_by_percent(&percent, direction).to_string()
}

/// Minimum amount received after slippage: `amount × (1 − slippage/100)`
pub fn apply_slippage_decrease(amount: &str, slippage_percent: f64) -> String {
    adjust_amount(amount, slippage_percent, SlippageDirection::Decrease)
}

/// Maximum amount paid after slippage: `amount × (1 + slippage/100)`
pub fn apply_slippage_increase(amount: &str, slippage_percent: f64) -> String {
    adjust_amount(amount, slippage_percent, SlippageDirection::Increase)
}

/// Numeric comparison of two decimal strings; `None` if either is malformed
pub fn compare_amounts(a: &str, b: &str) -> Option<Ordering> {
    Some(PreciseAmount::parse(a)?.cmp(&PreciseAmount::parse(b)?))
}

/// True when the string parses to a value greater than zero
pub fn is_positive_amount(amount: &str) -> bool {
    PreciseAmount::parse(amount).is_some_and(|a| !a.is_zero())
}
