//! On-disk IMF package fixtures.
//!
//! Builds CPL, PKL and ASSETMAP documents as text and writes them into a
//! temporary directory.

use std::fmt::Write as _;
use std::path::Path;

use tempfile::TempDir;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub enum Track {
    Image,
    Audio,
}

impl Track {
    fn element(self) -> &'static str {
        match self {
            Track::Image => "cc:MainImageSequence",
            Track::Audio => "cc:MainAudioSequence",
        }
    }
}

#[derive(Clone)]
pub struct Res {
    pub file_id: Uuid,
    pub edit_rate: Option<&'static str>,
    pub intrinsic: i64,
    pub entry: Option<i64>,
    pub source: Option<i64>,
    pub repeat: Option<u32>,
}

impl Res {
    /// Whole track file at the composition rate.
    pub fn frames(file_id: Uuid, frames: i64) -> Self {
        Self {
            file_id,
            edit_rate: None,
            intrinsic: frames,
            entry: None,
            source: None,
            repeat: None,
        }
    }

    /// 48 kHz audio track file.
    pub fn samples(file_id: Uuid, samples: i64) -> Self {
        Self {
            edit_rate: Some("48000 1"),
            ..Self::frames(file_id, samples)
        }
    }

    pub fn trimmed(mut self, entry: i64, source: i64) -> Self {
        self.entry = Some(entry);
        self.source = Some(source);
        self
    }

    pub fn repeated(mut self, count: u32) -> Self {
        self.repeat = Some(count);
        self
    }
}

pub struct CplDoc {
    pub title: String,
    pub edit_rate: &'static str,
    /// (drop frame, rate, start address)
    pub timecode: Option<(bool, u32, &'static str)>,
    pub segments: Vec<Vec<(Track, Vec<Res>)>>,
}

impl CplDoc {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            edit_rate: "24 1",
            timecode: Some((false, 24, "01:00:00:00")),
            segments: Vec::new(),
        }
    }

    pub fn segment(mut self, sequences: Vec<(Track, Vec<Res>)>) -> Self {
        self.segments.push(sequences);
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            xml,
            r#"<CompositionPlaylist xmlns="http://www.smpte-ra.org/schemas/2067-3/2016" xmlns:cc="http://www.smpte-ra.org/schemas/2067-2/2016">"#
        );
        let _ = writeln!(xml, "  <Id>{}</Id>", urn(Uuid::new_v4()));
        let _ = writeln!(xml, "  <ContentTitle>{}</ContentTitle>", self.title);
        let _ = writeln!(xml, "  <EditRate>{}</EditRate>", self.edit_rate);
        if let Some((drop_frame, rate, start)) = self.timecode {
            let _ = writeln!(
                xml,
                "  <CompositionTimecode><TimecodeDropFrame>{drop_frame}</TimecodeDropFrame>\
                 <TimecodeRate>{rate}</TimecodeRate>\
                 <TimecodeStartAddress>{start}</TimecodeStartAddress></CompositionTimecode>"
            );
        }
        let _ = writeln!(xml, "  <SegmentList>");
        for sequences in &self.segments {
            let _ = writeln!(xml, "    <Segment><Id>{}</Id><SequenceList>", urn(Uuid::new_v4()));
            for (track, resources) in sequences {
                let _ = writeln!(
                    xml,
                    "      <{el}><Id>{}</Id><TrackId>{}</TrackId><ResourceList>",
                    urn(Uuid::new_v4()),
                    urn(Uuid::new_v4()),
                    el = track.element()
                );
                for res in resources {
                    let _ = write!(xml, "        <Resource><Id>{}</Id>", urn(Uuid::new_v4()));
                    if let Some(rate) = res.edit_rate {
                        let _ = write!(xml, "<EditRate>{rate}</EditRate>");
                    }
                    let _ = write!(xml, "<IntrinsicDuration>{}</IntrinsicDuration>", res.intrinsic);
                    if let Some(entry) = res.entry {
                        let _ = write!(xml, "<EntryPoint>{entry}</EntryPoint>");
                    }
                    if let Some(source) = res.source {
                        let _ = write!(xml, "<SourceDuration>{source}</SourceDuration>");
                    }
                    if let Some(repeat) = res.repeat {
                        let _ = write!(xml, "<RepeatCount>{repeat}</RepeatCount>");
                    }
                    let _ = writeln!(xml, "<TrackFileId>{}</TrackFileId></Resource>", urn(res.file_id));
                }
                let _ = writeln!(xml, "      </ResourceList></{}>", track.element());
            }
            let _ = writeln!(xml, "    </SequenceList></Segment>");
        }
        let _ = writeln!(xml, "  </SegmentList>");
        let _ = writeln!(xml, "</CompositionPlaylist>");
        xml
    }
}

/// Packing list over `(asset id, original file name)` pairs.
pub fn pkl_xml(assets: &[(Uuid, &str)]) -> String {
    let mut xml = String::from(
        "<PackingList xmlns=\"http://www.smpte-ra.org/schemas/2067-2/2016/PKL\">\n",
    );
    let _ = writeln!(xml, "  <Id>{}</Id>\n  <AssetList>", urn(Uuid::new_v4()));
    for (id, name) in assets {
        let _ = writeln!(
            xml,
            "    <Asset><Id>{}</Id><Size>1024</Size><Type>application/mxf</Type>\
             <OriginalFileName>{name}</OriginalFileName></Asset>",
            urn(*id)
        );
    }
    xml.push_str("  </AssetList>\n</PackingList>\n");
    xml
}

/// Asset map over `(asset id, chunk path)` pairs.
pub fn asset_map_xml(assets: &[(Uuid, &str)]) -> String {
    let mut xml =
        String::from("<AssetMap xmlns=\"http://www.smpte-ra.org/schemas/429-9/2007/AM\">\n");
    let _ = writeln!(xml, "  <Id>{}</Id>\n  <AssetList>", urn(Uuid::new_v4()));
    for (id, path) in assets {
        let _ = writeln!(
            xml,
            "    <Asset><Id>{}</Id><ChunkList><Chunk><Path>{path}</Path></Chunk></ChunkList></Asset>",
            urn(*id)
        );
    }
    xml.push_str("  </AssetList>\n</AssetMap>\n");
    xml
}

pub fn urn(id: Uuid) -> String {
    format!("urn:uuid:{id}")
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// A package directory holding `cpl` plus a PKL and ASSETMAP naming `assets`.
pub fn package_dir(cpl: &CplDoc, assets: &[(Uuid, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "CPL_feature.xml", &cpl.to_xml());
    write(dir.path(), "PKL_feature.xml", &pkl_xml(assets));
    write(dir.path(), "ASSETMAP.xml", &asset_map_xml(assets));
    dir
}
