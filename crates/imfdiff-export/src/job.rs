//! Export jobs: a format, a destination and settings, run against a loaded package.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use imfdiff_imf::{ImfPackage, Timeline};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::edl::write_edl;
use crate::error::Result;
use crate::settings::ExportSettings;
use crate::text::write_change_list;
use crate::writer::write_atomically;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    /// CMX-style edit decision list
    Edl,
    /// Tab-separated change list
    Text,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Edl, ExportFormat::Text];

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Edl => "edl",
            Self::Text => "txt",
        }
    }

    /// Menu entry and save dialog title.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Edl => "Export EDL",
            Self::Text => "Export Text File",
        }
    }

    /// Name shown in save dialog filters.
    pub fn filter_name(self) -> &'static str {
        match self {
            Self::Edl => "EDL",
            Self::Text => "Plaintext File",
        }
    }

    /// Suggested file name for a composition title.
    pub fn default_file_name(self, title: &str) -> PathBuf {
        let stem = if title.trim().is_empty() {
            "untitled"
        } else {
            title.trim()
        };
        Path::new(stem).with_extension(self.extension())
    }

    /// Write `timeline` in this format. Returns the number of entries written.
    pub fn write(
        self,
        out: &mut dyn Write,
        timeline: &Timeline<'_>,
        settings: &ExportSettings,
    ) -> io::Result<usize> {
        match self {
            Self::Edl => write_edl(out, timeline, settings),
            Self::Text => write_change_list(out, timeline, settings),
        }
    }
}

/// Outcome of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// EDL events or change list lines written
    pub entries: usize,
}

/// An export job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJob {
    /// Output file path.
    pub output_path: PathBuf,
    pub format: ExportFormat,
    #[serde(default)]
    pub settings: ExportSettings,
}

impl ExportJob {
    /// Create a job with default settings.
    pub fn new(output_path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            output_path: output_path.into(),
            format,
            settings: ExportSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Export `package`, replacing the output file atomically.
    pub fn run(&self, package: &ImfPackage) -> Result<ExportSummary> {
        let timeline = package.timeline();
        let entries = write_atomically(&self.output_path, |out| {
            self.format.write(out, &timeline, &self.settings)
        })?;

        info!(
            path = %self.output_path.display(),
            format = ?self.format,
            entries,
            "Export complete"
        );
        Ok(ExportSummary {
            path: self.output_path.clone(),
            entries,
        })
    }
}
