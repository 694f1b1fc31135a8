//! IMF Differ Export - timeline export to text formats
//!
//! This crate handles:
//! - CMX-style EDL export of every resource
//! - Tab-separated change lists of packaged resources
//! - Atomic write-then-rename of export files

pub mod edl;
pub mod error;
pub mod job;
pub mod settings;
pub mod text;
pub mod writer;


pub use edl::{render_edl, write_edl};
pub use error::{ExportError, Result};
pub use job::{ExportFormat, ExportJob, ExportSummary};
pub use settings::ExportSettings;
pub use text::{render_change_list, write_change_list};
pub use writer::write_atomically;
