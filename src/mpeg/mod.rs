// MPEG audio frame handling
pub mod header;
pub mod scanner;
pub mod sync;
mod tables;

pub use header::{ChannelMode, Emphasis, FrameHeader, Layer, MpegVersion};
pub use scanner::{FrameScanner, ScanSummary};
pub use sync::{find_sync, next_sync, SyncPoint};
