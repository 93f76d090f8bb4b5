// Encoding utilities

use encoding_rs::mem::decode_latin1;

/// Decode a fixed-width ISO-8859-1 field. The field ends at the first NUL;
/// trailing space padding is dropped.
pub fn decode_latin1_field(bytes: &[u8]) -> String {
    let terminated = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let end = bytes[..terminated]
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(0, |last| last + 1);

    decode_latin1(&bytes[..end]).into_owned()
}
