//! SMPTE timecode with drop-frame and non-drop-frame counting.
//!
//! A [`Timecode`] is a frame count paired with a [`TimecodeFormat`]. Arithmetic
//! happens on the frame count; the `HH:MM:SS:FF` address is only produced when
//! rendering and only consumed when parsing. Drop-frame addresses use `;` before
//! the frame field and skip frame labels `00` and `01` (per 30 fps of base rate)
//! at the start of every minute not divisible by ten.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::error::{CoreError, Result};

const SECONDS_PER_DAY: i64 = 86_400;

/// Frame counting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimecodeMode {
    NonDropFrame,
    DropFrame,
}

/// Timecode base rate and counting mode shared by every timecode of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimecodeFormat {
    rate: u32,
    mode: TimecodeMode,
}

impl TimecodeFormat {
    /// Create a format. Drop-frame counting requires a base rate that is a multiple of 30.
    pub fn new(rate: u32, mode: TimecodeMode) -> Result<Self> {
        if rate == 0 {
            return Err(CoreError::InvalidParameter(
                "timecode rate must be positive".into(),
            ));
        }
        if mode == TimecodeMode::DropFrame && rate % 30 != 0 {
            return Err(CoreError::InvalidParameter(format!(
                "drop-frame timecode is undefined at {} fps",
                rate
            )));
        }
        Ok(Self { rate, mode })
    }

    /// Non-drop-frame format at the given base rate.
    pub fn non_drop(rate: u32) -> Result<Self> {
        Self::new(rate, TimecodeMode::NonDropFrame)
    }

    /// Frames per second of the timecode base.
    #[inline]
    pub fn rate(self) -> u32 {
        self.rate
    }

    #[inline]
    pub fn mode(self) -> TimecodeMode {
        self.mode
    }

    #[inline]
    pub fn is_drop_frame(self) -> bool {
        self.mode == TimecodeMode::DropFrame
    }

    /// Frame labels skipped at each dropping minute (2 at 30 fps, 4 at 60 fps).
    #[inline]
    fn dropped_per_minute(self) -> i64 {
        match self.mode {
            TimecodeMode::DropFrame => self.rate as i64 / 15,
            TimecodeMode::NonDropFrame => 0,
        }
    }

    /// Number of distinct frames in a 24 hour day.
    pub fn frames_per_day(self) -> i64 {
        let nominal = self.rate as i64 * SECONDS_PER_DAY;
        // 1296 of the 1440 minutes in a day drop frames
        nominal - self.dropped_per_minute() * (24 * 60 - 24 * 6)
    }
}

/// A frame-accurate timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timecode {
    frames: i64,
    format: TimecodeFormat,
}

impl Timecode {
    /// Timecode at the given frame count from `00:00:00:00`.
    #[inline]
    pub fn from_frames(frames: i64, format: TimecodeFormat) -> Self {
        Self { frames, format }
    }

    /// Timecode `00:00:00:00` in the given format.
    #[inline]
    pub fn zero(format: TimecodeFormat) -> Self {
        Self::from_frames(0, format)
    }

    /// Parse an address such as `01:00:00:00` or `00:01:00;02`.
    ///
    /// The field separators may be `:`, `;` or `.`; the counting mode always comes
    /// from `format`, never from the separator.
    pub fn parse(address: &str, format: TimecodeFormat) -> Result<Self> {
        let invalid = |reason: &str| CoreError::InvalidTimecode {
            value: address.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = address.trim().split([':', ';', '.']).collect();
        if fields.len() != 4 {
            return Err(invalid("expected HH:MM:SS:FF"));
        }
        let mut values = [0i64; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("fields must be decimal numbers"));
            }
            *value = field.parse().map_err(|_| invalid("field out of range"))?;
        }
        let [hours, minutes, seconds, frames] = values;

        if hours >= 24 || minutes >= 60 || seconds >= 60 {
            return Err(invalid("field out of range"));
        }
        if frames >= format.rate as i64 {
            return Err(invalid("frame field exceeds timecode rate"));
        }

        let drop = format.dropped_per_minute();
        if drop > 0 && seconds == 0 && minutes % 10 != 0 && frames < drop {
            return Err(invalid("frame label is dropped in drop-frame counting"));
        }

        let total_minutes = hours * 60 + minutes;
        let nominal =
            (hours * 3600 + minutes * 60 + seconds) * format.rate as i64 + frames;
        let count = nominal - drop * (total_minutes - total_minutes / 10);

        Ok(Self::from_frames(count, format))
    }

    /// Frame count from `00:00:00:00`.
    #[inline]
    pub fn frames(self) -> i64 {
        self.frames
    }

    #[inline]
    pub fn format(self) -> TimecodeFormat {
        self.format
    }

    #[inline]
    pub fn mode(self) -> TimecodeMode {
        self.format.mode
    }

    #[inline]
    pub fn is_drop_frame(self) -> bool {
        self.format.is_drop_frame()
    }

    /// Offset this timecode by a (possibly negative) number of frames, saturating
    /// at the `i64` frame count bounds.
    #[inline]
    pub fn add_frames(self, frames: i64) -> Self {
        Self::from_frames(self.frames.saturating_add(frames), self.format)
    }

    /// Hours, minutes, seconds and frames of the address, wrapped to a 24 hour day.
    pub fn components(self) -> (u32, u32, u32, u32) {
        let rate = self.format.rate as i64;
        let mut count = self.frames.rem_euclid(self.format.frames_per_day());

        let drop = self.format.dropped_per_minute();
        if drop > 0 {
            let per_ten_minutes = rate * 600 - drop * 9;
            let per_minute = rate * 60 - drop;
            let tens = count / per_ten_minutes;
            let rest = count % per_ten_minutes;
            count += drop * 9 * tens;
            if rest > drop {
                count += drop * ((rest - drop) / per_minute);
            }
        }

        let frames = count % rate;
        let total_seconds = count / rate;
        (
            (total_seconds / 3600) as u32,
            (total_seconds / 60 % 60) as u32,
            (total_seconds % 60) as u32,
            frames as u32,
        )
    }
}

impl Add<i64> for Timecode {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        self.add_frames(rhs)
    }
}

impl AddAssign<i64> for Timecode {
    fn add_assign(&mut self, rhs: i64) {
        self.frames = self.frames.saturating_add(rhs);
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds, frames) = self.components();
        let separator = if self.is_drop_frame() { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            hours, minutes, seconds, separator, frames
        )
    }
}
