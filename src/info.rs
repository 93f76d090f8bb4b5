// Scan pipeline: sync, walk frames, read the ID3v1 trailer, assemble

use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScanError};
use crate::id3::Id3v1Tag;
use crate::mpeg::{find_sync, FrameHeader, FrameScanner};
use crate::policy::{ScanOptions, ScanPolicy, ScanType};

/// Everything learned about one MPEG audio stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mp3Info {
    /// Where the stream came from, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Offset of the first frame
    pub data_offset: u64,
    /// First valid frame header
    pub header: FrameHeader,
    /// Playing time; `None` when no frames were walked
    pub duration_secs: Option<f64>,
    /// Frames walked
    pub frames: Option<u64>,
    /// Representative bitrate in kbps, reduced per VBR mode
    pub bitrate: u32,
    pub vbr: bool,
    pub bad_frames: u64,
    pub id3: Id3v1Tag,
}

impl Mp3Info {
    /// Duration rounded to whole seconds.
    pub fn length_secs(&self) -> Option<u64> {
        self.duration_secs.map(|secs| secs.round() as u64)
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs_f64)
    }
}

/// Scan a stream of `length` bytes, positioned anywhere, with default
/// options.
pub fn scan<R: Read + Seek>(reader: R, length: u64, policy: ScanPolicy) -> Result<Mp3Info> {
    scan_with_options(reader, length, policy, &ScanOptions::default())
}

pub fn scan_with_options<R: Read + Seek>(
    mut reader: R,
    length: u64,
    policy: ScanPolicy,
    options: &ScanOptions,
) -> Result<Mp3Info> {
    debug!("scanning {} bytes with {:?}", length, policy);

    let trailer = Id3v1Tag::read_optional(&mut reader, length)?;
    let trailer_size = if trailer.is_some() { Id3v1Tag::TAG_SIZE as u64 } else { 0 };
    debug!("ID3v1 trailer {}", if trailer.is_some() { "found" } else { "absent" });
    // Frames must end before the trailer
    let audio_end = length - trailer_size;

    let sync = find_sync(&mut reader, 0, length, options)?;
    debug!(
        "synced at {}: {} {}, {} kbps, {} Hz",
        sync.offset,
        sync.header.version,
        sync.header.layer,
        sync.header.bitrate,
        sync.header.sample_rate
    );

    let summary = FrameScanner::new(&mut reader, audio_end, options).scan(&sync, policy.scan)?;

    let audio_bytes = audio_end.saturating_sub(sync.offset);
    let duration_secs = summary.duration(policy, audio_bytes);
    let bitrate = summary
        .bitrate(policy.vbr)
        .map_or(sync.header.bitrate, |kbps| kbps.round() as u32);
    let frames = (policy.scan != ScanType::None).then_some(summary.frames);

    Ok(Mp3Info {
        source: None,
        data_offset: sync.offset,
        vbr: summary.is_vbr(),
        bad_frames: summary.bad_frames,
        header: sync.header,
        duration_secs,
        frames,
        bitrate,
        id3: trailer.unwrap_or_default(),
    })
}

/// Open `path` and scan it. Failure to open is reported as `NotFound`.
pub fn scan_file<P: AsRef<Path>>(
    path: P,
    policy: ScanPolicy,
    options: &ScanOptions,
) -> Result<Mp3Info> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let length = file.metadata()?.len();

    let mut info = scan_with_options(BufReader::new(file), length, policy, options)?;
    info.source = Some(path.display().to_string());
    Ok(info)
}
