// MPEG audio frame header decoding
//
// Header layout (32 bits, big-endian):
//
//   AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//
//   A sync (11)   B version    C layer       D protection (0 = CRC follows)
//   E bitrate     F frequency  G padding     H private
//   I mode        J mode ext   K copyright   L original    M emphasis

use serde::Serialize;
use std::fmt;

use super::tables::{
    BITRATES_MPEG1, BITRATES_MPEG2, FREE_FORMAT_BITRATE_INDEX, RESERVED_BITRATE_INDEX,
    RESERVED_SAMPLE_RATE_INDEX, SAMPLES_PER_FRAME, SAMPLE_RATES,
};
use crate::error::{Result, ScanError};

pub const FRAME_HEADER_SIZE: usize = 4;
pub const SYNC_WORD: u32 = 0x7FF;
pub const SYNC_BYTE: u8 = 0xFF;

/// MPEG audio version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MpegVersion {
    #[serde(rename = "MPEG-1")]
    Mpeg1,
    #[serde(rename = "MPEG-2")]
    Mpeg2,
    #[serde(rename = "MPEG-2.5")]
    Mpeg25,
}

impl MpegVersion {
    /// Returns `None` for the reserved code `0b01`.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0b11 {
            0b00 => Some(MpegVersion::Mpeg25),
            0b10 => Some(MpegVersion::Mpeg2),
            0b11 => Some(MpegVersion::Mpeg1),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            MpegVersion::Mpeg25 => 0b00,
            MpegVersion::Mpeg2 => 0b10,
            MpegVersion::Mpeg1 => 0b11,
        }
    }

    fn table_index(self) -> usize {
        match self {
            MpegVersion::Mpeg1 => 0,
            MpegVersion::Mpeg2 => 1,
            MpegVersion::Mpeg25 => 2,
        }
    }
}

impl fmt::Display for MpegVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MpegVersion::Mpeg1 => write!(f, "MPEG-1"),
            MpegVersion::Mpeg2 => write!(f, "MPEG-2"),
            MpegVersion::Mpeg25 => write!(f, "MPEG-2.5"),
        }
    }
}

/// MPEG audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layer {
    I,
    II,
    III,
}

impl Layer {
    /// Returns `None` for the reserved code `0b00`.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0b11 {
            0b01 => Some(Layer::III),
            0b10 => Some(Layer::II),
            0b11 => Some(Layer::I),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Layer::III => 0b01,
            Layer::II => 0b10,
            Layer::I => 0b11,
        }
    }

    fn table_index(self) -> usize {
        match self {
            Layer::I => 0,
            Layer::II => 1,
            Layer::III => 2,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::I => write!(f, "Layer I"),
            Layer::II => write!(f, "Layer II"),
            Layer::III => write!(f, "Layer III"),
        }
    }
}

/// Channel mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

impl ChannelMode {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => ChannelMode::Stereo,
            0b01 => ChannelMode::JointStereo,
            0b10 => ChannelMode::DualChannel,
            _ => ChannelMode::Mono,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            ChannelMode::Stereo => 0b00,
            ChannelMode::JointStereo => 0b01,
            ChannelMode::DualChannel => 0b10,
            ChannelMode::Mono => 0b11,
        }
    }
}

/// De-emphasis to apply after decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    None,
    Ms5015,
    Reserved,
    CcittJ17,
}

impl Emphasis {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Emphasis::None,
            0b01 => Emphasis::Ms5015,
            0b10 => Emphasis::Reserved,
            _ => Emphasis::CcittJ17,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Emphasis::None => 0b00,
            Emphasis::Ms5015 => 0b01,
            Emphasis::Reserved => 0b10,
            Emphasis::CcittJ17 => 0b11,
        }
    }
}

/// A decoded frame header. Only valid headers are ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameHeader {
    /// The 11-bit frame sync pattern, always `SYNC_WORD`
    pub sync: u16,
    pub version: MpegVersion,
    pub layer: Layer,
    /// A 16-bit CRC follows the header
    pub crc: bool,
    pub bitrate_index: u8,
    /// Bitrate in kbps
    pub bitrate: u32,
    pub sample_rate_index: u8,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub padding: bool,
    pub private: bool,
    pub mode: ChannelMode,
    /// Joint-stereo band or intensity/MS flags, depending on layer
    pub mode_extension: u8,
    pub copyright: bool,
    pub original: bool,
    pub emphasis: Emphasis,
}

impl FrameHeader {
    /// Decode 4 raw header bytes.
    pub fn decode(bytes: [u8; FRAME_HEADER_SIZE]) -> Result<Self> {
        let word = u32::from_be_bytes(bytes);

        if word >> 21 != SYNC_WORD {
            return Err(ScanError::Malformed("sync word not found"));
        }

        let version = MpegVersion::from_bits((word >> 19) as u8)
            .ok_or(ScanError::Malformed("reserved MPEG version"))?;
        let layer =
            Layer::from_bits((word >> 17) as u8).ok_or(ScanError::Malformed("reserved layer"))?;

        let bitrate_index = ((word >> 12) & 0x0F) as u8;
        if bitrate_index == RESERVED_BITRATE_INDEX {
            return Err(ScanError::Malformed("reserved bitrate index"));
        }
        if bitrate_index == FREE_FORMAT_BITRATE_INDEX {
            return Err(ScanError::Malformed("free-format bitrate"));
        }

        let sample_rate_index = ((word >> 10) & 0b11) as u8;
        if sample_rate_index == RESERVED_SAMPLE_RATE_INDEX {
            return Err(ScanError::Malformed("reserved sample rate index"));
        }

        let bitrate = match version {
            MpegVersion::Mpeg1 => BITRATES_MPEG1[layer.table_index()][bitrate_index as usize],
            MpegVersion::Mpeg2 | MpegVersion::Mpeg25 => {
                BITRATES_MPEG2[layer.table_index()][bitrate_index as usize]
            }
        };
        let sample_rate = SAMPLE_RATES[version.table_index()][sample_rate_index as usize];

        Ok(FrameHeader {
            sync: (word >> 21) as u16,
            version,
            layer,
            crc: (word >> 16) & 1 == 0,
            bitrate_index,
            bitrate,
            sample_rate_index,
            sample_rate,
            padding: (word >> 9) & 1 == 1,
            private: (word >> 8) & 1 == 1,
            mode: ChannelMode::from_bits((word >> 6) as u8),
            mode_extension: ((word >> 4) & 0b11) as u8,
            copyright: (word >> 3) & 1 == 1,
            original: (word >> 2) & 1 == 1,
            emphasis: Emphasis::from_bits(word as u8),
        })
    }

    /// Encode back into the 4 header bytes.
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let word = (self.sync as u32) << 21
            | (self.version.bits() as u32) << 19
            | (self.layer.bits() as u32) << 17
            | (!self.crc as u32) << 16
            | (self.bitrate_index as u32) << 12
            | (self.sample_rate_index as u32) << 10
            | (self.padding as u32) << 9
            | (self.private as u32) << 8
            | (self.mode.bits() as u32) << 6
            | (self.mode_extension as u32 & 0b11) << 4
            | (self.copyright as u32) << 3
            | (self.original as u32) << 2
            | self.emphasis.bits() as u32;
        word.to_be_bytes()
    }

    pub fn samples_per_frame(&self) -> u32 {
        SAMPLES_PER_FRAME[self.version.table_index()][self.layer.table_index()]
    }

    /// Frame length in bytes, header included.
    pub fn frame_length(&self) -> u32 {
        let bits_per_sec = self.bitrate * 1000;
        let padding = self.padding as u32;

        match self.layer {
            // Layer I counts in 4-byte slots
            Layer::I => (12 * bits_per_sec / self.sample_rate + padding) * 4,
            Layer::II | Layer::III => {
                self.samples_per_frame() / 8 * bits_per_sec / self.sample_rate + padding
            }
        }
    }

    /// Playing time of one frame in seconds.
    pub fn duration(&self) -> f64 {
        self.samples_per_frame() as f64 / self.sample_rate as f64
    }

    /// Whether `other` can belong to the same elementary stream.
    pub fn same_stream(&self, other: &FrameHeader) -> bool {
        self.version == other.version
            && self.layer == other.layer
            && self.sample_rate == other.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MPEG1_L3_128K: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

    #[test]
    fn test_decode_mpeg1_layer3() {
        let header = FrameHeader::decode(MPEG1_L3_128K).unwrap();
        assert_eq!(header.version, MpegVersion::Mpeg1);
        assert_eq!(header.layer, Layer::III);
        assert!(!header.crc);
        assert_eq!(header.bitrate, 128);
        assert_eq!(header.sample_rate, 44100);
        assert!(!header.padding);
        assert_eq!(header.mode, ChannelMode::JointStereo);
        assert_eq!(header.mode_extension, 0b10);
        assert!(header.original);
        assert!(!header.copyright);
        assert_eq!(header.emphasis, Emphasis::None);
        assert_eq!(header.frame_length(), 417);
        assert_eq!(header.samples_per_frame(), 1152);
        assert_eq!(header.sync, 0x7FF);
        assert!((header.duration() - 1152.0 / 44100.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_length_padding_and_layers() {
        // 128 kbps 44.1 kHz with padding
        let padded = FrameHeader::decode([0xFF, 0xFB, 0x92, 0x00]).unwrap();
        assert_eq!(padded.frame_length(), 418);

        // MPEG-1 Layer I, 384 kbps, 48 kHz, padded: (12 * 384000 / 48000 + 1) * 4
        let layer1 = FrameHeader::decode([0xFF, 0xFF, 0xC6, 0x00]).unwrap();
        assert_eq!(layer1.layer, Layer::I);
        assert_eq!(layer1.bitrate, 384);
        assert_eq!(layer1.frame_length(), 388);

        // MPEG-1 Layer II, 192 kbps, 48 kHz
        let layer2 = FrameHeader::decode([0xFF, 0xFD, 0xA4, 0x00]).unwrap();
        assert_eq!(layer2.layer, Layer::II);
        assert_eq!(layer2.frame_length(), 576);

        // MPEG-2 Layer III, 64 kbps, 22.05 kHz uses 576 samples per frame
        let mpeg2 = FrameHeader::decode([0xFF, 0xF3, 0x80, 0x00]).unwrap();
        assert_eq!(mpeg2.version, MpegVersion::Mpeg2);
        assert_eq!(mpeg2.bitrate, 64);
        assert_eq!(mpeg2.sample_rate, 22050);
        assert_eq!(mpeg2.samples_per_frame(), 576);
        assert_eq!(mpeg2.frame_length(), 208);
        assert!((mpeg2.duration() - 576.0 / 22050.0).abs() < 1e-12);

        // MPEG-2.5 Layer III, 8 kbps, 8 kHz
        let mpeg25 = FrameHeader::decode([0xFF, 0xE3, 0x18, 0x00]).unwrap();
        assert_eq!(mpeg25.version, MpegVersion::Mpeg25);
        assert_eq!(mpeg25.sample_rate, 8000);
        assert_eq!(mpeg25.frame_length(), 72);
    }

    #[test]
    fn test_round_trip_all_valid_combinations() {
        for version in [0b00u8, 0b10, 0b11] {
            for layer in [0b01u8, 0b10, 0b11] {
                for bitrate_index in 1u8..15 {
                    for sample_rate_index in 0u8..3 {
                        let bytes = [
                            0xFF,
                            0xE0 | version << 3 | layer << 1 | 1,
                            bitrate_index << 4 | sample_rate_index << 2 | 0b10,
                            0b0101_1101,
                        ];
                        let header = FrameHeader::decode(bytes).unwrap();
                        assert_eq!(header.to_bytes(), bytes);
                        assert_eq!(FrameHeader::decode(header.to_bytes()).unwrap(), header);
                    }
                }
            }
        }
    }

    #[test]
    fn test_reject_reserved_codes() {
        // Reserved bitrate index
        assert!(matches!(
            FrameHeader::decode([0xFF, 0xFB, 0xF0, 0x00]),
            Err(ScanError::Malformed(_))
        ));
        // Reserved sample rate index
        assert!(matches!(
            FrameHeader::decode([0xFF, 0xFB, 0x9C, 0x00]),
            Err(ScanError::Malformed(_))
        ));
        // Reserved version 0b01
        assert!(matches!(
            FrameHeader::decode([0xFF, 0xEB, 0x90, 0x00]),
            Err(ScanError::Malformed(_))
        ));
        // Reserved layer 0b00
        assert!(matches!(
            FrameHeader::decode([0xFF, 0xF9, 0x90, 0x00]),
            Err(ScanError::Malformed(_))
        ));
        // Free format
        assert!(matches!(
            FrameHeader::decode([0xFF, 0xFB, 0x00, 0x00]),
            Err(ScanError::Malformed(_))
        ));
    }

    #[test]
    fn test_reject_missing_sync() {
        assert!(FrameHeader::decode([0x00, 0x00, 0x00, 0x00]).is_err());
        assert!(FrameHeader::decode([0xFF, 0x1B, 0x90, 0x00]).is_err());
        assert!(FrameHeader::decode([0x7F, 0xFB, 0x90, 0x00]).is_err());
    }

    #[test]
    fn test_reserved_emphasis_still_decodes() {
        let header = FrameHeader::decode([0xFF, 0xFB, 0x90, 0x02]).unwrap();
        assert_eq!(header.emphasis, Emphasis::Reserved);
    }
}
