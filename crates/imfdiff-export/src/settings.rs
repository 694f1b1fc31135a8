//! Export configuration.

use serde::{Deserialize, Serialize};

/// Default width the EDL reel column is padded to.
pub const DEFAULT_REEL_WIDTH: usize = 128;

/// Default first line of a change list, followed by the composition title.
pub const DEFAULT_CHANGE_LIST_HEADER: &str = "The following changes were found in";

/// Formatting options shared by the exporters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Reel names are left-justified and padded to this many characters.
    pub reel_width: usize,
    /// Change list header text.
    pub change_list_header: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            reel_width: DEFAULT_REEL_WIDTH,
            change_list_header: DEFAULT_CHANGE_LIST_HEADER.to_string(),
        }
    }
}
