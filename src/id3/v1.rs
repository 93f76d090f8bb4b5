// ID3v1 trailer reader

use serde::Serialize;
use std::io::{Read, Seek};

use crate::error::Result;
use crate::utils::encoding::decode_latin1_field;
use crate::utils::io::read_at;

/// ID3v1 tag structure. All fields are empty when the stream has no tag.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    /// ID3v1.1 track number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<u8>,
    /// Genre index; 255 means none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<u8>,
}

impl Id3v1Tag {
    pub const TAG_SIZE: usize = 128;
    const TAG_ID: [u8; 3] = [b'T', b'A', b'G'];
    const NO_GENRE: u8 = 255;

    /// Read the trailer of a stream of known `length`. The stream position
    /// is unspecified afterwards.
    pub fn read<R: Read + Seek>(reader: &mut R, length: u64) -> Result<Self> {
        Ok(Self::read_optional(reader, length)?.unwrap_or_default())
    }

    /// Like [`Id3v1Tag::read`], but tells an absent trailer apart from an
    /// empty one.
    pub fn read_optional<R: Read + Seek>(reader: &mut R, length: u64) -> Result<Option<Self>> {
        if length < Self::TAG_SIZE as u64 {
            return Ok(None);
        }

        let mut buffer = [0u8; Self::TAG_SIZE];
        read_at(reader, length - Self::TAG_SIZE as u64, &mut buffer)?;

        Ok(Self::parse(&buffer))
    }

    /// Parse a 128-byte trailer; `None` unless it starts with `TAG`.
    pub fn parse(buffer: &[u8; Self::TAG_SIZE]) -> Option<Self> {
        if buffer[0..3] != Self::TAG_ID {
            return None;
        }

        // ID3v1.1 steals the last two comment bytes for a track number
        let (comment, track) = if buffer[125] == 0 && buffer[126] != 0 {
            (decode_latin1_field(&buffer[97..125]), Some(buffer[126]))
        } else {
            (decode_latin1_field(&buffer[97..127]), None)
        };

        let genre = Some(buffer[127]).filter(|&g| g != Self::NO_GENRE);

        Some(Id3v1Tag {
            title: decode_latin1_field(&buffer[3..33]),
            artist: decode_latin1_field(&buffer[33..63]),
            album: decode_latin1_field(&buffer[63..93]),
            year: decode_latin1_field(&buffer[93..97]),
            comment,
            track,
            genre,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn trailer(title: &str, comment: &[u8], genre: u8) -> Vec<u8> {
        let mut tag = vec![0u8; 128];
        tag[0..3].copy_from_slice(b"TAG");
        tag[3..3 + title.len()].copy_from_slice(title.as_bytes());
        tag[33..39].copy_from_slice(b"Artist");
        tag[63..68].copy_from_slice(b"Album");
        tag[93..97].copy_from_slice(b"1999");
        tag[97..97 + comment.len()].copy_from_slice(comment);
        tag[127] = genre;
        tag
    }

    #[test]
    fn test_short_stream_has_empty_tag() {
        let mut cursor = Cursor::new(vec![0u8; 40]);
        let tag = Id3v1Tag::read(&mut cursor, 40).unwrap();
        assert!(tag.is_empty());
    }

    #[test]
    fn test_missing_marker_is_not_an_error() {
        let data = vec![0x55u8; 1000];
        let mut cursor = Cursor::new(data);
        assert!(Id3v1Tag::read(&mut cursor, 1000).unwrap().is_empty());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut data = vec![0u8; 300];
        let mut tag = trailer("Title", b"Nice one", 17);
        // space padding instead of NULs
        tag[8..33].fill(b' ');
        data.extend(tag);
        let length = data.len() as u64;

        let tag = Id3v1Tag::read(&mut Cursor::new(data), length).unwrap();
        assert_eq!(tag.title, "Title");
        assert_eq!(tag.artist, "Artist");
        assert_eq!(tag.album, "Album");
        assert_eq!(tag.year, "1999");
        assert_eq!(tag.comment, "Nice one");
        assert_eq!(tag.track, None);
        assert_eq!(tag.genre, Some(17));
    }

    #[test]
    fn test_v11_track_number() {
        let mut buffer = [0u8; 128];
        buffer.copy_from_slice(&trailer("Song", b"Comment", 255));
        buffer[126] = 7;

        let tag = Id3v1Tag::parse(&buffer).unwrap();
        assert_eq!(tag.comment, "Comment");
        assert_eq!(tag.track, Some(7));
        assert_eq!(tag.genre, None);
    }

    #[test]
    fn test_full_width_comment_without_track() {
        let comment = [b'c'; 30];
        let mut buffer = [0u8; 128];
        buffer.copy_from_slice(&trailer("Song", &comment, 0));

        let tag = Id3v1Tag::parse(&buffer).unwrap();
        assert_eq!(tag.comment.len(), 30);
        assert_eq!(tag.track, None);
    }
}
