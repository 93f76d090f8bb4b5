// ID3v2 header detection, used to jump over leading tags

use std::io::{Read, Seek};

use crate::utils::io::{read_at, synchsafe_u32};

/// ID3v2 header structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: u8,
    /// Tag body size, excluding header and footer
    pub size: u32,
}

impl Id3v2Header {
    pub const HEADER_SIZE: usize = 10;
    const ID: [u8; 3] = [b'I', b'D', b'3'];
    const FLAG_FOOTER: u8 = 0x10;

    /// Parse a 10-byte header; `None` if the signature is absent or the
    /// fields are out of range.
    pub fn parse(buffer: &[u8; Self::HEADER_SIZE]) -> Option<Self> {
        if buffer[0..3] != Self::ID {
            return None;
        }

        let version = (buffer[3], buffer[4]);
        if version.0 == 0xFF || version.1 == 0xFF {
            return None;
        }

        // Size bytes must be synchsafe
        let size_bytes = [buffer[6], buffer[7], buffer[8], buffer[9]];
        if size_bytes.iter().any(|&b| b & 0x80 != 0) {
            return None;
        }

        Some(Id3v2Header {
            version,
            flags: buffer[5],
            size: synchsafe_u32(size_bytes),
        })
    }

    /// Read a header at `offset`, if one is there.
    pub fn read_at<R: Read + Seek>(
        reader: &mut R,
        offset: u64,
        length: u64,
    ) -> std::io::Result<Option<Self>> {
        if length.saturating_sub(offset) < Self::HEADER_SIZE as u64 {
            return Ok(None);
        }

        let mut buffer = [0u8; Self::HEADER_SIZE];
        read_at(reader, offset, &mut buffer)?;
        Ok(Self::parse(&buffer))
    }

    /// Bytes occupied by the whole tag: header, body and optional footer.
    pub fn total_size(&self) -> u64 {
        let footer = if self.version.0 >= 4 && self.flags & Self::FLAG_FOOTER != 0 {
            Self::HEADER_SIZE as u64
        } else {
            0
        };
        Self::HEADER_SIZE as u64 + self.size as u64 + footer
    }
}
