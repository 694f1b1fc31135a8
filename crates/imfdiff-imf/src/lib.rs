//! IMF Differ IMF - Interoperable Master Format package model
//!
//! Implements the read-only object graph of an IMF delivery:
//! - Compositions containing segments
//! - Segments containing parallel image/audio sequences
//! - Sequences containing track file resources
//! - Packing list and asset map resolution of track files
//! - Record timeline computation shared by views and exporters

pub mod cpl;
pub mod error;
pub mod model;
pub mod package;
pub mod pkl;
pub mod session;
pub mod timeline;
mod xml;

pub use error::{ImfError, Result};
pub use model::{Composition, Resource, ResourceKind, Segment, Sequence};
pub use package::ImfPackage;
pub use pkl::{Asset, PackingList};
pub use session::Session;
pub use timeline::{SegmentSpan, SequenceSpan, Timeline, TimelineEvent};
