//! Integration tests for EDL and change list export of loaded packages.

use imfdiff_export::{
    render_change_list, render_edl, ExportFormat, ExportJob, ExportSettings,
};
use imfdiff_imf::ImfPackage;
use tempfile::TempDir;
use uuid::Uuid;

use crate::fixture::{package_dir, CplDoc, Res, Track};

// ── Helpers ────────────────────────────────────────────────────

fn narrow() -> ExportSettings {
    ExportSettings {
        reel_width: 12,
        ..ExportSettings::default()
    }
}

fn load(cpl: &CplDoc, assets: &[(Uuid, &str)]) -> (TempDir, ImfPackage) {
    let dir = package_dir(cpl, assets);
    let pkg = ImfPackage::from_path(dir.path()).unwrap();
    (dir, pkg)
}

fn event_lines(edl: &str) -> Vec<&str> {
    edl.lines().skip(3).collect()
}

/// `(record in, record out)` of an EDL event line.
fn record_span(line: &str) -> (&str, &str) {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let n = fields.len();
    (fields[n - 2], fields[n - 1])
}

/// Two segments: image [A 24f, B 48f] + audio [1s], then image [C 24f].
fn feature() -> (TempDir, ImfPackage) {
    let (a, b, c, snd) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let cpl = CplDoc::new("FEATURE_OV")
        .segment(vec![
            (Track::Image, vec![Res::frames(a, 24), Res::frames(b, 48)]),
            (Track::Audio, vec![Res::samples(snd, 48_000)]),
        ])
        .segment(vec![(Track::Image, vec![Res::frames(c, 24)])]);
    load(
        &cpl,
        &[
            (a, "VIDEO_A.mxf"),
            (b, "VIDEO_B.mxf"),
            (c, "VIDEO_C.mxf"),
            (snd, "AUDIO_EN.mxf"),
        ],
    )
}

// ── EDL ────────────────────────────────────────────────────────

#[test]
fn two_one_second_image_events() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let cpl = CplDoc::new("ONE_SECOND").segment(vec![(
        Track::Image,
        vec![Res::frames(a, 24), Res::frames(b, 24)],
    )]);
    let (_dir, pkg) = load(&cpl, &[(a, "VIDEO_A.mxf"), (b, "VIDEO_B.mxf")]);

    let edl = render_edl(&pkg.timeline(), &narrow());
    let expected = "TITLE: ONE_SECOND\n\
FCM: NON-DROP FRAME\n\
\n\
0001  VIDEO_A       V  C  00:00:00:00 00:00:01:00 01:00:00:00 01:00:01:00\n\
0002  VIDEO_B       V  C  00:00:00:00 00:00:01:00 01:00:01:00 01:00:02:00\n";
    assert_eq!(edl, expected);
}

#[test]
fn event_count_and_numbering() {
    let (_dir, pkg) = feature();
    let edl = render_edl(&pkg.timeline(), &ExportSettings::default());
    let events = event_lines(&edl);

    assert_eq!(events.len(), pkg.composition().resource_count());
    for (i, line) in events.iter().enumerate() {
        assert!(line.starts_with(&format!("{:04}  ", i + 1)), "{line}");
    }
}

#[test]
fn record_times_are_contiguous_within_a_sequence() {
    let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
    let lengths = [24, 7, 100, 1, 36];
    let resources = ids
        .iter()
        .zip(lengths)
        .map(|(id, len)| Res::frames(*id, len))
        .collect();
    let cpl = CplDoc::new("CONTIGUOUS").segment(vec![(Track::Image, resources)]);
    let names: Vec<String> = (0..5).map(|i| format!("R{i}.mxf")).collect();
    let assets: Vec<(Uuid, &str)> = ids.iter().copied().zip(names.iter().map(String::as_str)).collect();
    let (_dir, pkg) = load(&cpl, &assets);

    let edl = render_edl(&pkg.timeline(), &narrow());
    let events = event_lines(&edl);
    assert_eq!(events.len(), 5);
    for pair in events.windows(2) {
        assert_eq!(record_span(pair[0]).1, record_span(pair[1]).0);
    }
    assert_eq!(record_span(events[4]).1, "01:00:07:00");
}

#[test]
fn segments_follow_each_other() {
    let (_dir, pkg) = feature();
    let edl = render_edl(&pkg.timeline(), &narrow());
    let events = event_lines(&edl);

    // audio restarts at the segment start
    assert_eq!(record_span(events[2]), ("01:00:00:00", "01:00:01:00"));
    // second segment starts after the longest sequence of the first
    assert_eq!(record_span(events[3]), ("01:00:03:00", "01:00:04:00"));
}

#[test]
fn track_codes_follow_resource_kind() {
    let (_dir, pkg) = feature();
    let edl = render_edl(&pkg.timeline(), &narrow());
    let codes: Vec<&str> = event_lines(&edl)
        .iter()
        .map(|l| l.split_whitespace().nth(2).unwrap())
        .collect();
    assert_eq!(codes, ["V", "V", "A", "V"]);
}

#[test]
fn audio_source_times_use_composition_frames() {
    let snd = Uuid::new_v4();
    let cpl = CplDoc::new("AUDIO").segment(vec![(
        Track::Audio,
        vec![Res::samples(snd, 192_000).trimmed(48_000, 96_000)],
    )]);
    let (_dir, pkg) = load(&cpl, &[(snd, "AUDIO.wav")]);

    let edl = render_edl(&pkg.timeline(), &narrow());
    let line = event_lines(&edl)[0];
    assert!(
        line.ends_with("00:00:01:00 00:00:03:00 01:00:00:00 01:00:02:00"),
        "{line}"
    );
}

#[test]
fn repeat_count_extends_record_time() {
    let v = Uuid::new_v4();
    let cpl = CplDoc::new("LOOP").segment(vec![(
        Track::Image,
        vec![Res::frames(v, 24).trimmed(0, 12).repeated(3)],
    )]);
    let (_dir, pkg) = load(&cpl, &[(v, "LOOP.mxf")]);

    let edl = render_edl(&pkg.timeline(), &narrow());
    let line = event_lines(&edl)[0];
    assert!(
        line.ends_with("00:00:00:00 00:00:00:12 01:00:00:00 01:00:01:12"),
        "{line}"
    );
}

#[test]
fn unresolved_resource_uses_external_reel() {
    let cpl = CplDoc::new("EXT")
        .segment(vec![(Track::Image, vec![Res::frames(Uuid::new_v4(), 24)])]);
    let (_dir, pkg) = load(&cpl, &[]);
    let edl = render_edl(&pkg.timeline(), &narrow());
    assert!(event_lines(&edl)[0].starts_with("0001  External      V  C  "));
}

#[test]
fn drop_frame_edl() {
    let v = Uuid::new_v4();
    let mut cpl = CplDoc::new("DF")
        .segment(vec![(Track::Image, vec![Res::frames(v, 4)])]);
    cpl.edit_rate = "30000 1001";
    cpl.timecode = Some((true, 30, "00:59:59;28"));
    let (_dir, pkg) = load(&cpl, &[(v, "DF.mxf")]);

    let edl = render_edl(&pkg.timeline(), &narrow());
    assert!(edl.starts_with("TITLE: DF\nFCM: DROP FRAME\n\n"));
    assert!(
        edl.ends_with("00:00:00;00 00:00:00;04 00:59:59;28 01:00:00;02\n"),
        "{edl}"
    );
}

// ── Change list ────────────────────────────────────────────────

#[test]
fn change_list_blocks_per_segment() {
    let (_dir, pkg) = feature();
    let text = render_change_list(&pkg.timeline(), &ExportSettings::default());
    let expected = "The following changes were found in FEATURE_OV\n\
\n\
01:00:00:00\t01:00:01:00\tVIDEO_A.mxf\tVideo\n\
01:00:01:00\t01:00:03:00\tVIDEO_B.mxf\tVideo\n\
01:00:00:00\t01:00:01:00\tAUDIO_EN.mxf\tAudio\n\
\n\
01:00:03:00\t01:00:04:00\tVIDEO_C.mxf\tVideo\n";
    assert_eq!(text, expected);
}

#[test]
fn change_list_skips_unresolved_but_advances() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let cpl = CplDoc::new("GAP").segment(vec![(
        Track::Image,
        vec![
            Res::frames(a, 24),
            Res::frames(Uuid::new_v4(), 24),
            Res::frames(b, 24),
        ],
    )]);
    let (_dir, pkg) = load(&cpl, &[(a, "A.mxf"), (b, "B.mxf")]);

    let text = render_change_list(&pkg.timeline(), &ExportSettings::default());
    let lines: Vec<&str> = text.lines().filter(|l| l.contains('\t')).collect();
    assert_eq!(
        lines,
        [
            "01:00:00:00\t01:00:01:00\tA.mxf\tVideo",
            "01:00:02:00\t01:00:03:00\tB.mxf\tVideo",
        ]
    );
}

// ── Export jobs ────────────────────────────────────────────────

#[test]
fn exports_are_byte_identical() {
    let (dir, pkg) = feature();
    for format in ExportFormat::ALL {
        let first = dir.path().join(format.default_file_name("first"));
        let second = dir.path().join(format.default_file_name("second"));
        ExportJob::new(&first, format).run(&pkg).unwrap();
        ExportJob::new(&second, format).run(&pkg).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }
}

#[test]
fn export_replaces_existing_file() {
    let (dir, pkg) = feature();
    let out = dir.path().join("FEATURE_OV.edl");
    std::fs::write(&out, "stale export that is longer than nothing").unwrap();

    let summary = ExportJob::new(&out, ExportFormat::Edl).run(&pkg).unwrap();
    assert_eq!(summary.entries, 4);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        render_edl(&pkg.timeline(), &ExportSettings::default())
    );
}

#[test]
fn export_into_missing_directory_fails_cleanly() {
    let (dir, pkg) = feature();
    let out = dir.path().join("missing").join("out.txt");
    assert!(ExportJob::new(&out, ExportFormat::Text).run(&pkg).is_err());
    assert!(!out.exists());
}
