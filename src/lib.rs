//! mp3info - MPEG audio stream scanner
//!
//! Finds the first frame of an MPEG audio stream, walks its frames to
//! estimate playing time (including VBR streams), and reads the ID3v1
//! trailer.
//!
//! ```no_run
//! use mp3info::{scan_file, ScanOptions, ScanPolicy, VbrMode};
//!
//! let info = scan_file("track.mp3", ScanPolicy::full(VbrMode::Median), &ScanOptions::default())?;
//! println!("{} kbps, {:?} s", info.bitrate, info.length_secs());
//! # Ok::<(), mp3info::ScanError>(())
//! ```

pub mod error;
pub mod id3;
mod info;
pub mod mpeg;
pub mod policy;
mod utils;

pub use error::{Result, ScanError};
pub use id3::Id3v1Tag;
pub use info::{scan, scan_file, scan_with_options, Mp3Info};
pub use mpeg::{ChannelMode, Emphasis, FrameHeader, Layer, MpegVersion};
pub use policy::{
    ScanOptions, ScanPolicy, ScanType, VbrMode, SCAN_FULL, SCAN_NONE, SCAN_QUICK, VBR_AVERAGE,
    VBR_MEDIAN, VBR_VARIABLE,
};
