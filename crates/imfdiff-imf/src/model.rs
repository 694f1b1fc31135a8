//! Composition playlist types.

use imfdiff_core::{EditRate, Timecode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Essence carried by a sequence and its resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Image,
    Audio,
}

impl ResourceKind {
    /// Single-letter EDL track code.
    pub fn track_code(self) -> &'static str {
        match self {
            Self::Image => "V",
            Self::Audio => "A",
        }
    }

    /// Human-readable media type.
    pub fn media_label(self) -> &'static str {
        match self {
            Self::Image => "Video",
            Self::Audio => "Audio",
        }
    }

    /// CPL element name of sequences of this kind.
    pub fn sequence_element(self) -> &'static str {
        match self {
            Self::Image => "MainImageSequence",
            Self::Audio => "MainAudioSequence",
        }
    }
}

/// A track file resource (clip) within a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource ID
    pub id: Uuid,
    /// Track file referenced through the packing list
    pub file_id: Uuid,
    /// Essence kind, inherited from the enclosing sequence
    pub kind: ResourceKind,
    /// Edit rate of the track file
    pub edit_rate: EditRate,
    /// Full length of the track file in edit units
    pub intrinsic_duration: i64,
    /// First edit unit played
    pub entry_point: i64,
    /// Edit units played per repetition
    pub source_duration: i64,
    /// Number of times the played range repeats
    pub repeat_count: u32,
}

impl Resource {
    /// In point in track file edit units.
    #[inline]
    pub fn in_point(&self) -> i64 {
        self.entry_point
    }

    /// Out point (exclusive) in track file edit units.
    #[inline]
    pub fn out_point(&self) -> i64 {
        self.entry_point.saturating_add(self.source_duration)
    }

    /// Length on the timeline in track file edit units.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.source_duration
            .saturating_mul(i64::from(self.repeat_count))
    }

    /// Length on the timeline in composition edit units.
    pub fn duration_in(&self, composition_rate: EditRate) -> i64 {
        self.edit_rate
            .convert_units(self.duration(), composition_rate)
    }

    /// [`duration_in`](Self::duration_in), or `None` if any step leaves the `i64` range.
    pub fn checked_duration_in(&self, composition_rate: EditRate) -> Option<i64> {
        let units = self
            .source_duration
            .checked_mul(i64::from(self.repeat_count))?;
        self.edit_rate.checked_convert_units(units, composition_rate)
    }
}

/// An ordered track of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: Uuid,
    pub track_id: Uuid,
    pub kind: ResourceKind,
    pub resources: Vec<Resource>,
}

impl Sequence {
    /// Total length in composition edit units.
    pub fn duration_in(&self, composition_rate: EditRate) -> i64 {
        self.resources
            .iter()
            .map(|r| r.duration_in(composition_rate))
            .fold(0, i64::saturating_add)
    }

    pub fn checked_duration_in(&self, composition_rate: EditRate) -> Option<i64> {
        self.resources.iter().try_fold(0i64, |total, r| {
            total.checked_add(r.checked_duration_in(composition_rate)?)
        })
    }
}

/// A span of the composition covered by parallel sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: Uuid,
    pub sequences: Vec<Sequence>,
}

impl Segment {
    /// Length in composition edit units: the longest of its sequences.
    pub fn duration_in(&self, composition_rate: EditRate) -> i64 {
        self.sequences
            .iter()
            .map(|s| s.duration_in(composition_rate))
            .max()
            .unwrap_or(0)
    }

    pub fn checked_duration_in(&self, composition_rate: EditRate) -> Option<i64> {
        self.sequences.iter().try_fold(0i64, |longest, s| {
            Some(longest.max(s.checked_duration_in(composition_rate)?))
        })
    }

    pub fn resource_count(&self) -> usize {
        self.sequences.iter().map(|s| s.resources.len()).sum()
    }
}

/// A composition playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    /// Composition ID
    pub id: Uuid,
    /// Content title
    pub title: String,
    /// Composition edit rate; timecode frames count these units
    pub edit_rate: EditRate,
    /// Timecode of the first edit unit
    pub start: Timecode,
    /// Segments in playback order
    pub segments: Vec<Segment>,
}

impl Composition {
    /// Number of resources across every segment and sequence.
    pub fn resource_count(&self) -> usize {
        self.segments.iter().map(Segment::resource_count).sum()
    }

    /// Total length in composition edit units, `None` if it leaves the `i64` range.
    pub fn checked_duration(&self) -> Option<i64> {
        self.segments.iter().try_fold(0i64, |total, s| {
            total.checked_add(s.checked_duration_in(self.edit_rate)?)
        })
    }

    /// Iterate over every resource in document order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.segments
            .iter()
            .flat_map(|seg| seg.sequences.iter())
            .flat_map(|seq| seq.resources.iter())
    }
}
