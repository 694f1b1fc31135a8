//! Record timeline of a composition.
//!
//! Walks segments, sequences and resources in document order and assigns every
//! resource its source and record timecodes. Within a sequence the record cursor
//! advances contiguously by each resource's duration. Every sequence of a segment
//! starts at the segment's record start; a segment starts where the previous one
//! ended, the first one at the composition start timecode.
//!
//! Only the first segment starts at the composition start. Later segments are
//! offset by the longest sequence of each earlier segment instead of restarting
//! at the start timecode, so events of different segments never share record
//! times.

use imfdiff_core::Timecode;

use crate::model::{Composition, Resource, ResourceKind, Segment, Sequence};
use crate::package::ImfPackage;
use crate::pkl::Asset;

/// Reel name used for resources whose track file is not in the packing list.
pub const EXTERNAL_REEL: &str = "External";

/// One resource placed on the record timeline.
#[derive(Debug, Clone, Copy)]
pub struct TimelineEvent<'a> {
    /// 1-based position in document order across the whole composition
    pub number: usize,
    pub segment_index: usize,
    pub sequence_index: usize,
    /// Position within the sequence
    pub row: usize,
    pub resource: &'a Resource,
    /// Resolved track file, `None` for external references
    pub asset: Option<&'a Asset>,
    pub source_in: Timecode,
    pub source_out: Timecode,
    pub record_in: Timecode,
    pub record_out: Timecode,
}

impl<'a> TimelineEvent<'a> {
    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.resource.kind
    }

    /// Track file stem, or [`EXTERNAL_REEL`] when unresolved.
    pub fn reel_name(&self) -> &'a str {
        self.asset.map(Asset::stem).unwrap_or(EXTERNAL_REEL)
    }

    /// Resolved track file name.
    pub fn file_name(&self) -> Option<&'a str> {
        self.asset.map(|a| a.file_name.as_str())
    }
}

/// A sequence and its placed resources.
#[derive(Debug, Clone)]
pub struct SequenceSpan<'a> {
    pub index: usize,
    pub sequence: &'a Sequence,
    pub events: Vec<TimelineEvent<'a>>,
}

/// A segment and its placed sequences.
#[derive(Debug, Clone)]
pub struct SegmentSpan<'a> {
    pub index: usize,
    pub segment: &'a Segment,
    pub record_in: Timecode,
    pub record_out: Timecode,
    pub sequences: Vec<SequenceSpan<'a>>,
}

impl<'a> SegmentSpan<'a> {
    pub fn events(&self) -> impl Iterator<Item = &TimelineEvent<'a>> {
        self.sequences.iter().flat_map(|s| s.events.iter())
    }
}

/// The placed composition.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    package: &'a ImfPackage,
    segments: Vec<SegmentSpan<'a>>,
}

impl<'a> Timeline<'a> {
    /// Place every resource of the package's composition.
    pub fn build(package: &'a ImfPackage) -> Self {
        let composition = package.composition();
        let rate = composition.edit_rate;
        let format = composition.start.format();

        let mut segments = Vec::with_capacity(composition.segments.len());
        let mut segment_start = composition.start;
        let mut number = 0;

        for (segment_index, segment) in composition.segments.iter().enumerate() {
            let mut sequences = Vec::with_capacity(segment.sequences.len());

            for (sequence_index, sequence) in segment.sequences.iter().enumerate() {
                let mut cursor = segment_start;
                let mut events = Vec::with_capacity(sequence.resources.len());

                for (row, resource) in sequence.resources.iter().enumerate() {
                    number += 1;
                    let record_out = cursor + resource.duration_in(rate);
                    let to_frames = |units| resource.edit_rate.convert_units(units, rate);
                    events.push(TimelineEvent {
                        number,
                        segment_index,
                        sequence_index,
                        row,
                        resource,
                        asset: package.asset_for(resource),
                        source_in: Timecode::from_frames(to_frames(resource.in_point()), format),
                        source_out: Timecode::from_frames(to_frames(resource.out_point()), format),
                        record_in: cursor,
                        record_out,
                    });
                    cursor = record_out;
                }

                sequences.push(SequenceSpan {
                    index: sequence_index,
                    sequence,
                    events,
                });
            }

            let record_out = segment_start + segment.duration_in(rate);
            segments.push(SegmentSpan {
                index: segment_index,
                segment,
                record_in: segment_start,
                record_out,
                sequences,
            });
            segment_start = record_out;
        }

        Self { package, segments }
    }

    pub fn package(&self) -> &'a ImfPackage {
        self.package
    }

    pub fn composition(&self) -> &'a Composition {
        self.package.composition()
    }

    pub fn segments(&self) -> &[SegmentSpan<'a>] {
        &self.segments
    }

    /// Every placed resource in document order.
    pub fn events(&self) -> impl Iterator<Item = &TimelineEvent<'a>> {
        self.segments.iter().flat_map(|s| s.events())
    }

    pub fn event_count(&self) -> usize {
        self.segments
            .iter()
            .flat_map(|s| s.sequences.iter())
            .map(|s| s.events.len())
            .sum()
    }

    /// Record timecode one past the last edit unit.
    pub fn record_end(&self) -> Timecode {
        self.segments
            .last()
            .map(|s| s.record_out)
            .unwrap_or(self.composition().start)
    }
}
