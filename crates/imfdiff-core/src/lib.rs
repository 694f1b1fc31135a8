//! IMF Differ Core - Foundation types for IMF inspection
//!
//! This crate provides the fundamental types used throughout IMF Differ:
//! - Time representation (RationalTime, EditRate)
//! - SMPTE timecode with drop-frame and non-drop-frame counting
//! - The shared error type

pub mod error;
pub mod time;
pub mod timecode;

pub use error::{CoreError, Result};
pub use time::{EditRate, RationalTime};
pub use timecode::{Timecode, TimecodeFormat, TimecodeMode};
