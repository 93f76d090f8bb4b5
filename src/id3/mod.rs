// ID3 tag handling: the v1 trailer is read, v2 headers are only skipped
pub mod v1;
pub mod v2;

pub use v1::Id3v1Tag;
pub use v2::Id3v2Header;
