//! Composition playlist (SMPTE ST 2067-3) reader.
//!
//! Only the main image and main audio virtual tracks are read; other sequence
//! kinds (subtitles, markers, ancillary data) are skipped.

use imfdiff_core::{EditRate, Timecode, TimecodeFormat, TimecodeMode};
use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::{ImfError, Result};
use crate::model::{Composition, Resource, ResourceKind, Segment, Sequence};
use crate::xml::{
    child, child_text, children, expect_root, parse_bool, parse_number, parse_uuid,
    required_child, required_text,
};

/// Root element local name of a composition playlist.
pub const ROOT_ELEMENT: &str = "CompositionPlaylist";

/// Parse a composition playlist from XML text.
pub fn parse_composition(xml: &str) -> Result<Composition> {
    let doc = Document::parse(xml)?;
    read_composition(&doc)
}

pub(crate) fn read_composition(doc: &Document<'_>) -> Result<Composition> {
    let root = doc.root_element();
    expect_root(root, ROOT_ELEMENT)?;

    let id = parse_uuid(required_text(root, "Id", ROOT_ELEMENT)?, "Id")?;
    let title = child_text(root, "ContentTitle")
        .unwrap_or("Untitled")
        .to_string();
    let edit_rate: EditRate = required_text(root, "EditRate", ROOT_ELEMENT)?.parse()?;
    let start = read_start_timecode(root, edit_rate)?;

    let segment_list = required_child(root, "SegmentList", ROOT_ELEMENT)?;
    let segments = children(segment_list, "Segment")
        .map(|node| read_segment(node, edit_rate))
        .collect::<Result<Vec<_>>>()?;

    debug!(%id, %title, segments = segments.len(), "Parsed composition playlist");

    let composition = Composition {
        id,
        title,
        edit_rate,
        start,
        segments,
    };
    let end = composition
        .checked_duration()
        .and_then(|duration| start.frames().checked_add(duration));
    if end.is_none() {
        return Err(ImfError::InvalidValue {
            element: "SegmentList".into(),
            value: composition.title,
            reason: "total duration overflows the composition timeline".into(),
        });
    }
    Ok(composition)
}

fn read_start_timecode(root: Node<'_, '_>, edit_rate: EditRate) -> Result<Timecode> {
    let Some(tc) = child(root, "CompositionTimecode") else {
        let format = TimecodeFormat::non_drop(edit_rate.rounded())?;
        return Ok(Timecode::zero(format));
    };

    let drop_frame = parse_bool(
        required_text(tc, "TimecodeDropFrame", "CompositionTimecode")?,
        "TimecodeDropFrame",
    )?;
    let rate: u32 = parse_number(
        required_text(tc, "TimecodeRate", "CompositionTimecode")?,
        "TimecodeRate",
    )?;
    let mode = if drop_frame {
        TimecodeMode::DropFrame
    } else {
        TimecodeMode::NonDropFrame
    };
    let format = TimecodeFormat::new(rate, mode)?;

    let address = required_text(tc, "TimecodeStartAddress", "CompositionTimecode")?;
    Ok(Timecode::parse(address, format)?)
}

fn read_segment(node: Node<'_, '_>, edit_rate: EditRate) -> Result<Segment> {
    let id = parse_uuid(required_text(node, "Id", "Segment")?, "Id")?;
    let sequence_list = required_child(node, "SequenceList", "Segment")?;

    let mut sequences = Vec::new();
    for seq in sequence_list.children().filter(Node::is_element) {
        let kind = match seq.tag_name().name() {
            "MainImageSequence" => ResourceKind::Image,
            "MainAudioSequence" => ResourceKind::Audio,
            other => {
                debug!(segment = %id, kind = other, "Skipping virtual track");
                continue;
            }
        };
        sequences.push(read_sequence(seq, kind, edit_rate)?);
    }

    Ok(Segment { id, sequences })
}

fn read_sequence(node: Node<'_, '_>, kind: ResourceKind, edit_rate: EditRate) -> Result<Sequence> {
    let context = kind.sequence_element();
    let id = parse_uuid(required_text(node, "Id", context)?, "Id")?;
    let track_id = parse_uuid(required_text(node, "TrackId", context)?, "TrackId")?;
    let resource_list = required_child(node, "ResourceList", context)?;

    let resources = children(resource_list, "Resource")
        .map(|res| read_resource(res, kind, edit_rate))
        .collect::<Result<Vec<_>>>()?;

    Ok(Sequence {
        id,
        track_id,
        kind,
        resources,
    })
}

fn read_resource(node: Node<'_, '_>, kind: ResourceKind, default_rate: EditRate) -> Result<Resource> {
    let id = parse_uuid(required_text(node, "Id", "Resource")?, "Id")?;
    let file_id = parse_uuid(
        required_text(node, "TrackFileId", "Resource")?,
        "TrackFileId",
    )?;
    let edit_rate = match child_text(node, "EditRate") {
        Some(rate) => rate.parse()?,
        None => default_rate,
    };

    let intrinsic_duration: i64 = parse_number(
        required_text(node, "IntrinsicDuration", "Resource")?,
        "IntrinsicDuration",
    )?;
    let entry_point: i64 = match child_text(node, "EntryPoint") {
        Some(v) => parse_number(v, "EntryPoint")?,
        None => 0,
    };
    if entry_point < 0 || entry_point > intrinsic_duration {
        return Err(ImfError::InvalidValue {
            element: "EntryPoint".into(),
            value: entry_point.to_string(),
            reason: format!("outside intrinsic duration {}", intrinsic_duration),
        });
    }
    let source_duration: i64 = match child_text(node, "SourceDuration") {
        Some(v) => parse_number(v, "SourceDuration")?,
        None => intrinsic_duration - entry_point,
    };
    let repeat_count: u32 = match child_text(node, "RepeatCount") {
        Some(v) => parse_number(v, "RepeatCount")?,
        None => 1,
    };

    let out_point = entry_point.checked_add(source_duration);
    if source_duration < 0 || !matches!(out_point, Some(out) if out <= intrinsic_duration) {
        return Err(ImfError::InvalidValue {
            element: "SourceDuration".into(),
            value: source_duration.to_string(),
            reason: format!(
                "exceeds intrinsic duration {} from entry point {}",
                intrinsic_duration, entry_point
            ),
        });
    }

    let resource = Resource {
        id,
        file_id,
        kind,
        edit_rate,
        intrinsic_duration,
        entry_point,
        source_duration,
        repeat_count,
    };
    if resource.checked_duration_in(default_rate).is_none()
        || edit_rate
            .checked_convert_units(resource.out_point(), default_rate)
            .is_none()
    {
        return Err(ImfError::InvalidValue {
            element: "Resource".into(),
            value: id.to_string(),
            reason: format!(
                "{} x {} edit units at {} overflow the composition timeline",
                source_duration, repeat_count, edit_rate
            ),
        });
    }

    Ok(resource)
}
