//! Native file pickers and message boxes.

use std::path::{Path, PathBuf};

use imfdiff_export::ExportFormat;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

/// Ask for an IMF package directory.
pub fn pick_package(start: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title("Open IMF Package");
    if let Some(dir) = start {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_folder()
}

/// Ask where to write an export, suggesting `<title>.<ext>` next to the package.
pub fn pick_export_path(format: ExportFormat, title: &str, start: &Path) -> Option<PathBuf> {
    let file_name = format.default_file_name(title);
    FileDialog::new()
        .set_title(format.action_label())
        .set_directory(start)
        .set_file_name(file_name.to_string_lossy())
        .add_filter(format.filter_name(), &[format.extension()])
        .save_file()
}

pub fn error(title: &str, message: impl Into<String>) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn info(title: &str, message: impl Into<String>) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
