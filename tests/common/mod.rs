// Synthetic MPEG streams for integration tests
#![allow(dead_code)]

use mp3info::FrameHeader;

/// MPEG-1 Layer III, 44.1 kHz, joint stereo, no CRC.
pub fn header_bytes(bitrate_index: u8, padding: bool) -> [u8; 4] {
    [0xFF, 0xFB, bitrate_index << 4 | (padding as u8) << 1, 0x40]
}

/// One frame: header followed by zeroed payload.
pub fn frame(bitrate_index: u8, padding: bool) -> Vec<u8> {
    let header = header_bytes(bitrate_index, padding);
    let length = FrameHeader::decode(header).unwrap().frame_length() as usize;
    let mut frame = vec![0u8; length];
    frame[..4].copy_from_slice(&header);
    frame
}

/// Constant-bitrate stream of `count` frames.
pub fn cbr_stream(bitrate_index: u8, count: usize) -> Vec<u8> {
    (0..count).flat_map(|_| frame(bitrate_index, false)).collect()
}

/// Frames whose bitrate indices follow `indices`.
pub fn vbr_stream(indices: &[u8]) -> Vec<u8> {
    indices.iter().flat_map(|&index| frame(index, false)).collect()
}

/// ID3v2.3 tag with a `body_len`-byte zeroed body.
pub fn id3v2_tag(body_len: u32) -> Vec<u8> {
    let mut tag = b"ID3\x03\x00\x00".to_vec();
    tag.extend([
        (body_len >> 21 & 0x7F) as u8,
        (body_len >> 14 & 0x7F) as u8,
        (body_len >> 7 & 0x7F) as u8,
        (body_len & 0x7F) as u8,
    ]);
    tag.extend(vec![0u8; body_len as usize]);
    tag
}

/// 128-byte ID3v1 trailer.
pub fn id3v1_tag(title: &str, artist: &str, album: &str, year: &str, comment: &str) -> Vec<u8> {
    fn put(tag: &mut [u8], at: usize, width: usize, text: &str) {
        let bytes = text.as_bytes();
        let n = bytes.len().min(width);
        tag[at..at + n].copy_from_slice(&bytes[..n]);
    }

    let mut tag = vec![0u8; 128];
    tag[..3].copy_from_slice(b"TAG");
    put(&mut tag, 3, 30, title);
    put(&mut tag, 33, 30, artist);
    put(&mut tag, 63, 30, album);
    put(&mut tag, 93, 4, year);
    put(&mut tag, 97, 30, comment);
    tag[127] = 255;
    tag
}
