//! Change list export.
//!
//! A summary line, then one block per segment introduced by a blank line. Each
//! packaged resource is a tab-separated line of record in, record out, file name
//! and media type. Resources whose track file is not in the packing list produce
//! no line, but their duration still moves the record cursor, so later lines keep
//! their true record position.

use std::io::{self, Write};

use imfdiff_imf::Timeline;
use tracing::debug;

use crate::settings::ExportSettings;

/// Write the change list for `timeline`. Returns the number of resource lines written.
pub fn write_change_list<W: Write + ?Sized>(
    out: &mut W,
    timeline: &Timeline<'_>,
    settings: &ExportSettings,
) -> io::Result<usize> {
    writeln!(
        out,
        "{} {}",
        settings.change_list_header,
        timeline.composition().title
    )?;

    let mut count = 0;
    let mut skipped = 0;
    for segment in timeline.segments() {
        writeln!(out)?;
        for event in segment.events() {
            let Some(file_name) = event.file_name() else {
                skipped += 1;
                continue;
            };
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                event.record_in,
                event.record_out,
                file_name,
                event.kind().media_label()
            )?;
            count += 1;
        }
    }

    debug!(lines = count, skipped, "Wrote change list");
    Ok(count)
}

/// Render the change list for `timeline` to a string.
pub fn render_change_list(timeline: &Timeline<'_>, settings: &ExportSettings) -> String {
    let mut buf = Vec::new();
    write_change_list(&mut buf, timeline, settings).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
