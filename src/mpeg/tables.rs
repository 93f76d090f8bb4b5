// Static lookup tables for MPEG audio frame headers (ISO/IEC 11172-3, 13818-3)

/// Bitrates in kbps, indexed by bitrate index. Index 0 is free format,
/// index 15 is reserved; both map to 0.
pub static BITRATES_MPEG1: [[u32; 16]; 3] = [
    // Layer I
    [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
    // Layer II
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
    // Layer III
    [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
];

/// MPEG-2 and MPEG-2.5 share one set of bitrate tables.
pub static BITRATES_MPEG2: [[u32; 16]; 3] = [
    // Layer I
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
    // Layer II
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
    // Layer III
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
];

/// Sample rates in Hz, indexed by [version][sample rate index].
/// Version order is MPEG-1, MPEG-2, MPEG-2.5.
pub static SAMPLE_RATES: [[u32; 4]; 3] = [
    [44100, 48000, 32000, 0],
    [22050, 24000, 16000, 0],
    [11025, 12000, 8000, 0],
];

/// PCM samples per frame, indexed by [version][layer - 1].
pub static SAMPLES_PER_FRAME: [[u32; 3]; 3] = [
    [384, 1152, 1152],
    [384, 1152, 576],
    [384, 1152, 576],
];

pub const RESERVED_BITRATE_INDEX: u8 = 0b1111;
pub const FREE_FORMAT_BITRATE_INDEX: u8 = 0;
pub const RESERVED_SAMPLE_RATE_INDEX: u8 = 0b11;
