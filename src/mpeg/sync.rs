// Frame synchronisation over a noisy byte stream

use log::{debug, trace, warn};
use std::io::{Read, Seek};

use super::header::{FrameHeader, FRAME_HEADER_SIZE, SYNC_BYTE};
use crate::error::{Result, ScanError};
use crate::id3::Id3v2Header;
use crate::policy::ScanOptions;
use crate::utils::io::{read_chunk_at, read_header_bytes};

const SCAN_CHUNK_SIZE: usize = 4096;

/// A position where a valid frame header starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPoint {
    pub offset: u64,
    pub header: FrameHeader,
}

/// Find the first frame at or after `start`. When scanning from offset 0,
/// leading ID3v2 tags are jumped over first.
pub fn find_sync<R: Read + Seek>(
    reader: &mut R,
    start: u64,
    length: u64,
    options: &ScanOptions,
) -> Result<SyncPoint> {
    let from = if start == 0 && options.skip_id3v2 {
        skip_id3v2(reader, length)?
    } else {
        start
    };

    next_sync(reader, from, length, options.min_consecutive_frames)
}

/// Offset just past any ID3v2 tags at the start of the stream.
fn skip_id3v2<R: Read + Seek>(reader: &mut R, length: u64) -> Result<u64> {
    let mut offset = 0;

    while let Some(tag) = Id3v2Header::read_at(reader, offset, length)? {
        let end = offset + tag.total_size();
        if end > length {
            warn!(
                "ID3v2 tag at {} claims {} bytes, past end of stream; scanning through it",
                offset,
                tag.total_size()
            );
            break;
        }

        debug!(
            "skipping ID3v2.{}.{} tag: {} bytes at {}",
            tag.version.0,
            tag.version.1,
            tag.total_size(),
            offset
        );
        offset = end;
    }

    Ok(offset)
}

/// Byte-scan from `from` for a header that decodes and is followed by
/// `confirm - 1` more frames of the same stream.
pub fn next_sync<R: Read + Seek>(
    reader: &mut R,
    from: u64,
    length: u64,
    confirm: usize,
) -> Result<SyncPoint> {
    let mut buffer = vec![0u8; SCAN_CHUNK_SIZE];
    let mut chunk_start = from;

    while chunk_start + FRAME_HEADER_SIZE as u64 <= length {
        let want = (length - chunk_start).min(SCAN_CHUNK_SIZE as u64) as usize;
        let filled = read_chunk_at(reader, chunk_start, &mut buffer[..want])?;
        if filled < FRAME_HEADER_SIZE {
            break;
        }

        // Candidates are positions with a full header inside the chunk
        let candidates = filled - FRAME_HEADER_SIZE + 1;
        for i in 0..candidates {
            if buffer[i] != SYNC_BYTE {
                continue;
            }

            let bytes = [buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]];
            let Ok(header) = FrameHeader::decode(bytes) else {
                continue;
            };

            let offset = chunk_start + i as u64;
            if confirm_frames(reader, offset, &header, length, confirm)? {
                return Ok(SyncPoint { offset, header });
            }
            trace!("sync candidate at {} not confirmed", offset);
        }

        chunk_start += candidates as u64;
    }

    Err(ScanError::NoSyncFound)
}

/// Check that `required - 1` frames follow the one at `offset`. Running out
/// of stream counts as confirmation.
fn confirm_frames<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    first: &FrameHeader,
    length: u64,
    required: usize,
) -> Result<bool> {
    let mut next = offset + first.frame_length() as u64;

    for _ in 1..required {
        if next + FRAME_HEADER_SIZE as u64 > length {
            return Ok(true);
        }

        match FrameHeader::decode(read_header_bytes(reader, next)?) {
            Ok(header) if header.same_stream(first) => next += header.frame_length() as u64,
            _ => return Ok(false),
        }
    }

    Ok(true)
}
