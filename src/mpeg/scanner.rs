// Frame-by-frame walk and duration estimation

use log::{debug, trace, warn};
use std::collections::BTreeMap;
use std::io::{Read, Seek};

use super::header::{FrameHeader, FRAME_HEADER_SIZE};
use super::sync::{next_sync, SyncPoint};
use crate::error::{Result, ScanError};
use crate::policy::{ScanOptions, ScanPolicy, ScanType, VbrMode};
use crate::utils::io::read_header_bytes;

/// Aggregates collected while walking frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub frames: u64,
    /// Sum of per-frame bitrates in kbps
    pub bitrate_sum: u64,
    pub bytes: u64,
    /// PCM samples across all walked frames
    pub samples: u64,
    pub sample_rate: u32,
    /// Times sync was lost and recovered by byte-scanning
    pub bad_frames: u64,
    /// The walk stopped at end of stream rather than at the frame cap
    pub reached_end: bool,
    /// Frame count per bitrate (kbps)
    histogram: BTreeMap<u32, u64>,
}

impl ScanSummary {
    fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    fn record(&mut self, header: &FrameHeader) {
        self.frames += 1;
        self.bitrate_sum += header.bitrate as u64;
        self.bytes += header.frame_length() as u64;
        self.samples += header.samples_per_frame() as u64;
        *self.histogram.entry(header.bitrate).or_insert(0) += 1;
    }

    /// Exact playing time of the walked frames.
    pub fn seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples as f64 / self.sample_rate as f64
    }

    /// More than one bitrate was seen.
    pub fn is_vbr(&self) -> bool {
        self.histogram.len() > 1
    }

    /// Reduce the walked bitrates to one figure in kbps; `None` if no
    /// frames were walked.
    pub fn bitrate(&self, mode: VbrMode) -> Option<f64> {
        if self.frames == 0 {
            return None;
        }

        let kbps = match mode {
            VbrMode::Variable => self.bitrate_sum as f64 / self.frames as f64,
            VbrMode::Average => self.bytes as f64 * 8.0 / self.seconds() / 1000.0,
            VbrMode::Median => self.median_bitrate() as f64,
        };
        Some(kbps)
    }

    fn median_bitrate(&self) -> u32 {
        let mut seen = 0;
        for (&kbps, &count) in &self.histogram {
            seen += count;
            if seen * 2 >= self.frames {
                return kbps;
            }
        }
        0
    }

    /// Duration in seconds under `policy`. `audio_bytes` is the size of the
    /// audio payload that QUICK extrapolates over.
    pub fn duration(&self, policy: ScanPolicy, audio_bytes: u64) -> Option<f64> {
        match policy.scan {
            ScanType::None => None,
            ScanType::Full => Some(self.seconds()),
            ScanType::Quick if self.reached_end => Some(self.seconds()),
            ScanType::Quick => {
                let kbps = self.bitrate(policy.vbr)?;
                if kbps <= 0.0 {
                    return None;
                }
                Some(audio_bytes as f64 * 8.0 / (kbps * 1000.0))
            }
        }
    }
}

/// Walks frames from a sync point, hopping by each frame's length.
pub struct FrameScanner<'a, R> {
    reader: &'a mut R,
    length: u64,
    options: &'a ScanOptions,
}

impl<'a, R: Read + Seek> FrameScanner<'a, R> {
    pub fn new(reader: &'a mut R, length: u64, options: &'a ScanOptions) -> Self {
        Self {
            reader,
            length,
            options,
        }
    }

    pub fn scan(&mut self, start: &SyncPoint, scan: ScanType) -> Result<ScanSummary> {
        let limit = match scan {
            ScanType::None => return Ok(ScanSummary::new(start.header.sample_rate)),
            // QUICK always samples at least one frame
            ScanType::Quick => Some(self.options.quick_frames.max(1) as u64),
            ScanType::Full => None,
        };

        let mut summary = ScanSummary::new(start.header.sample_rate);
        let mut position = start.offset;

        loop {
            if limit.is_some_and(|limit| summary.frames >= limit) {
                break;
            }

            let remaining = self.length.saturating_sub(position);
            if remaining == 0 {
                summary.reached_end = true;
                break;
            }

            match self.header_at(position, remaining, &start.header)? {
                Some(header) => {
                    let frame_length = header.frame_length() as u64;
                    if frame_length > remaining {
                        return Err(ScanError::TruncatedFrame {
                            offset: position,
                            remaining,
                        });
                    }
                    trace!("frame {} at {}: {} kbps", summary.frames, position, header.bitrate);
                    summary.record(&header);
                    position += frame_length;
                }
                None if remaining <= self.options.trailing_slack => {
                    debug!("{} trailing bytes after last frame at {}", remaining, position);
                    summary.reached_end = true;
                    break;
                }
                None if self.options.resync => {
                    summary.bad_frames += 1;
                    match next_sync(self.reader, position + 1, self.length, 1) {
                        Ok(point) => {
                            warn!("lost sync at {}, resumed at {}", position, point.offset);
                            position = point.offset;
                        }
                        Err(ScanError::NoSyncFound) => {
                            warn!("lost sync at {}, no further frames", position);
                            summary.reached_end = true;
                            break;
                        }
                        Err(e) => return Err(e),
                    }
                }
                None => {
                    return Err(ScanError::TruncatedFrame {
                        offset: position,
                        remaining,
                    })
                }
            }
        }

        debug!(
            "walked {} frames ({} bytes, {} bad)",
            summary.frames, summary.bytes, summary.bad_frames
        );
        Ok(summary)
    }

    /// The header at `position` if it decodes and belongs to the stream
    /// started by `first`.
    fn header_at(
        &mut self,
        position: u64,
        remaining: u64,
        first: &FrameHeader,
    ) -> Result<Option<FrameHeader>> {
        if remaining < FRAME_HEADER_SIZE as u64 {
            return Ok(None);
        }

        let bytes = read_header_bytes(self.reader, position)?;
        Ok(FrameHeader::decode(bytes)
            .ok()
            .filter(|header| header.same_stream(first)))
    }
}
