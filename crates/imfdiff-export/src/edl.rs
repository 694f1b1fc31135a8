//! Edit decision list export.
//!
//! One cut event per resource, in document order:
//!
//! ```text
//! TITLE: FEATURE_OV
//! FCM: NON-DROP FRAME
//!
//! 0001  VIDEO_reel1<padding>  V  C  00:00:00:00 00:00:01:00 01:00:00:00 01:00:01:00
//! ```

use std::io::{self, Write};

use imfdiff_imf::Timeline;
use tracing::debug;

use crate::settings::ExportSettings;

/// Write the EDL for `timeline`. Returns the number of events written.
pub fn write_edl<W: Write + ?Sized>(
    out: &mut W,
    timeline: &Timeline<'_>,
    settings: &ExportSettings,
) -> io::Result<usize> {
    let composition = timeline.composition();
    let frame_mode = if composition.start.is_drop_frame() {
        "DROP FRAME"
    } else {
        "NON-DROP FRAME"
    };

    writeln!(out, "TITLE: {}", composition.title)?;
    writeln!(out, "FCM: {}", frame_mode)?;
    writeln!(out)?;

    let mut count = 0;
    for event in timeline.events() {
        writeln!(
            out,
            "{:04}  {:<width$}  {}  C  {} {} {} {}",
            event.number,
            event.reel_name(),
            event.kind().track_code(),
            event.source_in,
            event.source_out,
            event.record_in,
            event.record_out,
            width = settings.reel_width,
        )?;
        count += 1;
    }

    debug!(events = count, "Wrote EDL");
    Ok(count)
}

/// Render the EDL for `timeline` to a string.
pub fn render_edl(timeline: &Timeline<'_>, settings: &ExportSettings) -> String {
    let mut buf = Vec::new();
    write_edl(&mut buf, timeline, settings).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
