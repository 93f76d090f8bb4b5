// Scan strategy and tunables

use serde::{Deserialize, Serialize};

/// How many frames the scanner visits.
///
/// The numeric codes match the `SCAN_*` constants of the classic mp3info
/// interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    /// Decode the first header only; duration stays unknown.
    None = 0,
    /// Sample a bounded prefix of frames and extrapolate.
    #[default]
    Quick = 1,
    /// Walk every frame to end of stream.
    Full = 2,
}

/// How per-frame bitrates are reduced to a single figure.
///
/// Codes match the `VBR_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VbrMode {
    /// Unweighted mean of per-frame bitrates.
    Variable = 0,
    /// Mean weighted by each frame's playing time.
    #[default]
    Average = 1,
    /// Middle value of the sorted bitrates.
    Median = 2,
}

impl TryFrom<u8> for ScanType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ScanType::None),
            1 => Ok(ScanType::Quick),
            2 => Ok(ScanType::Full),
            other => Err(other),
        }
    }
}

impl TryFrom<u8> for VbrMode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VbrMode::Variable),
            1 => Ok(VbrMode::Average),
            2 => Ok(VbrMode::Median),
            other => Err(other),
        }
    }
}

pub const SCAN_NONE: u8 = ScanType::None as u8;
pub const SCAN_QUICK: u8 = ScanType::Quick as u8;
pub const SCAN_FULL: u8 = ScanType::Full as u8;
pub const VBR_VARIABLE: u8 = VbrMode::Variable as u8;
pub const VBR_AVERAGE: u8 = VbrMode::Average as u8;
pub const VBR_MEDIAN: u8 = VbrMode::Median as u8;

/// Scan depth together with the VBR reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanPolicy {
    pub scan: ScanType,
    pub vbr: VbrMode,
}

impl ScanPolicy {
    pub fn new(scan: ScanType, vbr: VbrMode) -> Self {
        Self { scan, vbr }
    }

    pub fn none() -> Self {
        Self::new(ScanType::None, VbrMode::default())
    }

    pub fn quick(vbr: VbrMode) -> Self {
        Self::new(ScanType::Quick, vbr)
    }

    pub fn full(vbr: VbrMode) -> Self {
        Self::new(ScanType::Full, vbr)
    }
}

/// Tunables shared by the synchronizer and the frame scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Frames sampled by a QUICK scan.
    pub quick_frames: usize,
    /// Frames that must decode back-to-back before a sync point is accepted.
    pub min_consecutive_frames: usize,
    /// Undecodable bytes tolerated at the end of the stream.
    pub trailing_slack: u64,
    /// Byte-scan for the next header instead of failing when sync is lost.
    pub resync: bool,
    /// Jump over a leading ID3v2 tag instead of byte-scanning through it.
    pub skip_id3v2: bool,
}

impl ScanOptions {
    pub const DEFAULT_QUICK_FRAMES: usize = 256;
    pub const DEFAULT_TRAILING_SLACK: u64 = 128;
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            quick_frames: Self::DEFAULT_QUICK_FRAMES,
            min_consecutive_frames: 1,
            trailing_slack: Self::DEFAULT_TRAILING_SLACK,
            resync: false,
            skip_id3v2: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_constants() {
        assert_eq!(SCAN_NONE, 0);
        assert_eq!(SCAN_QUICK, 1);
        assert_eq!(SCAN_FULL, 2);
        assert_eq!(VBR_MEDIAN, 2);
        assert_eq!(ScanType::try_from(SCAN_FULL), Ok(ScanType::Full));
        assert_eq!(VbrMode::try_from(VBR_VARIABLE), Ok(VbrMode::Variable));
        assert_eq!(ScanType::try_from(7), Err(7));
    }

    #[test]
    fn test_default_policy_is_quick_average() {
        let policy = ScanPolicy::default();
        assert_eq!(policy.scan, ScanType::Quick);
        assert_eq!(policy.vbr, VbrMode::Average);
    }

    #[test]
    fn test_options_deserialize_partial_json() {
        let options: ScanOptions =
            serde_json::from_str(r#"{"quick_frames": 64, "resync": true}"#).unwrap();
        assert_eq!(options.quick_frames, 64);
        assert!(options.resync);
        assert_eq!(options.trailing_slack, ScanOptions::DEFAULT_TRAILING_SLACK);
        assert!(options.skip_id3v2);
    }
}
