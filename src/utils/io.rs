// I/O utilities for reading audio streams

use std::io::{Read, Seek};

/// Move to `offset` relative to the current position, so buffered readers
/// keep their buffer on short hops.
pub fn seek_to<R: Seek>(reader: &mut R, offset: u64) -> std::io::Result<()> {
    let current = reader.stream_position()?;
    if current != offset {
        reader.seek_relative(offset as i64 - current as i64)?;
    }
    Ok(())
}

/// Read exactly `buffer.len()` bytes starting at `offset`.
pub fn read_at<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    buffer: &mut [u8],
) -> std::io::Result<()> {
    seek_to(reader, offset)?;
    reader.read_exact(buffer)
}

/// Read up to `buffer.len()` bytes starting at `offset`, stopping early only
/// at end of stream. Returns the number of bytes read.
pub fn read_chunk_at<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    buffer: &mut [u8],
) -> std::io::Result<usize> {
    seek_to(reader, offset)?;
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read a 4-byte frame header at `offset`.
pub fn read_header_bytes<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
) -> std::io::Result<[u8; 4]> {
    let mut buffer = [0u8; 4];
    read_at(reader, offset, &mut buffer)?;
    Ok(buffer)
}

/// Decode a synchsafe 32-bit integer (7 bits per byte)
pub fn synchsafe_u32(bytes: [u8; 4]) -> u32 {
    ((bytes[0] as u32 & 0x7F) << 21)
        | ((bytes[1] as u32 & 0x7F) << 14)
        | ((bytes[2] as u32 & 0x7F) << 7)
        | (bytes[3] as u32 & 0x7F)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_synchsafe() {
        assert_eq!(synchsafe_u32([0x00, 0x00, 0x02, 0x01]), 257);
        assert_eq!(synchsafe_u32([0x7F, 0x7F, 0x7F, 0x7F]), 0x0FFF_FFFF);
    }

    #[test]
    fn test_read_chunk_at_stops_at_end() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        let mut buffer = [0u8; 8];
        let n = read_chunk_at(&mut cursor, 3, &mut buffer).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&buffer[..n], &[4, 5]);
    }

    #[test]
    fn test_read_header_bytes() {
        let mut cursor = Cursor::new(vec![0u8, 0xFF, 0xFB, 0x90, 0x00]);
        assert_eq!(read_header_bytes(&mut cursor, 1).unwrap(), [0xFF, 0xFB, 0x90, 0x00]);
        assert!(read_header_bytes(&mut cursor, 3).is_err());
    }
}
