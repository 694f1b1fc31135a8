//! Time representation for edit-unit accurate conversion
//!
//! Uses rational numbers to avoid floating-point accumulation errors.
//! IMF counts everything in edit units of a track's edit rate; converting
//! between rates goes through an exact rational number of seconds.

use num_rational::Ratio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// An exact time in seconds.
///
/// Backed by a 128-bit ratio so that any `i64` count of edit units at any `u32`
/// rate is representable without overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RationalTime {
    /// Time value as a rational number (seconds)
    value: Ratio<i128>,
}

impl RationalTime {
    /// Time of `units` edit units at the given rate.
    #[inline]
    pub fn from_edit_units(units: i64, rate: EditRate) -> Self {
        Self {
            value: Ratio::new(
                i128::from(units) * i128::from(rate.denominator),
                i128::from(rate.numerator),
            ),
        }
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn to_seconds_f64(self) -> f64 {
        *self.value.numer() as f64 / *self.value.denom() as f64
    }

    /// Whole edit units at the given rate, rounding down. `None` when the count
    /// does not fit in an `i64`.
    pub fn to_edit_units(self, rate: EditRate) -> Option<i64> {
        let numer = self.value.numer().checked_mul(i128::from(rate.numerator))?;
        let denom = self.value.denom().checked_mul(i128::from(rate.denominator))?;
        i64::try_from(numer.div_euclid(denom)).ok()
    }
}

impl fmt::Display for RationalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.to_seconds_f64())
    }
}

/// Edit rate as a rational number (e.g., 24000/1001 for 23.976 fps, 48000/1 for audio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditRate {
    /// Numerator (e.g., 24000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl EditRate {
    /// Create a new edit rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Convert to edit units per second as f64.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Nearest whole number of edit units per second, used as a timecode base.
    #[inline]
    pub fn rounded(self) -> u32 {
        (self.numerator + self.denominator / 2) / self.denominator
    }

    /// Convert a count of edit units at this rate into whole edit units at `target`,
    /// rounding down. `None` when the result does not fit in an `i64`.
    pub fn checked_convert_units(self, units: i64, target: EditRate) -> Option<i64> {
        if self == target {
            return Some(units);
        }
        RationalTime::from_edit_units(units, self).to_edit_units(target)
    }

    /// Like [`checked_convert_units`](Self::checked_convert_units), saturating at the
    /// `i64` bounds.
    pub fn convert_units(self, units: i64, target: EditRate) -> i64 {
        self.checked_convert_units(units, target)
            .unwrap_or(if units < 0 { i64::MIN } else { i64::MAX })
    }

    /// Common edit rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_50: Self = Self::new(50, 1);
    pub const FPS_59_94: Self = Self::new(60000, 1001);
    pub const FPS_60: Self = Self::new(60, 1);
    pub const AUDIO_48K: Self = Self::new(48000, 1);
    pub const AUDIO_96K: Self = Self::new(96000, 1);
}

impl Default for EditRate {
    fn default() -> Self {
        Self::FPS_24
    }
}

/// Parses the CPL form `"<numerator> <denominator>"`. A lone integer is read as `n/1`.
impl FromStr for EditRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidEditRate(s.to_string());
        let mut parts = s.split_whitespace();
        let numerator: u32 = parts
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let denominator: u32 = match parts.next() {
            Some(d) => d.parse().map_err(|_| invalid())?,
            None => 1,
        };
        if parts.next().is_some() || numerator == 0 || denominator == 0 {
            return Err(invalid());
        }
        Ok(Self::new(numerator, denominator))
    }
}

impl fmt::Display for EditRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator % self.denominator == 0 {
            write!(f, "{}", self.numerator / self.denominator)
        } else {
            write!(f, "{:.3}", self.to_f64())
        }
    }
}
