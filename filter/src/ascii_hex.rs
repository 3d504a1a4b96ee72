use crate::{
    error::{DecodeError, DecodeResult, Malformed},
    is_white_space, Codec, EncodeResult, FilterKind, Options,
};
use log::error;
use memchr::memchr;

const EOD: u8 = b'>';

/// `ASCIIHexDecode`, no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AsciiHex;

impl Codec for AsciiHex {
    fn encode(&self, raw: &[u8], _options: &Options) -> EncodeResult<Vec<u8>> {
        Ok(encode(raw))
    }

    fn decode(&self, encoded: &[u8], _options: &Options) -> DecodeResult<Vec<u8>> {
        decode(encoded)
    }
}

/// Two upper case hex digits per byte, no end-of-data marker.
pub fn encode(raw: &[u8]) -> Vec<u8> {
    hex::encode_upper(raw).into_bytes()
}

/// Decode up to the first `>`, white space ignored. An odd trailing digit is
/// followed by an implicit `0`.
pub fn decode(input: &[u8]) -> DecodeResult<Vec<u8>> {
    let data = memchr(EOD, input).map_or(input, |p| &input[..p]);
    let mut digits = Vec::with_capacity(data.len());
    for &b in data.iter().filter(|&&b| !is_white_space(b)) {
        let Some(v) = hex_value(b) else {
            error!("ASCIIHexDecode: invalid character {:#04x}", b);
            return Err(DecodeError::invalid(
                FilterKind::AsciiHex,
                Malformed::InvalidCharacter(b),
                input,
                // a lone high nibble is not a decoded byte yet
                pack(&digits[..digits.len() / 2 * 2]),
            ));
        };
        digits.push(v);
    }
    Ok(pack(&digits))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn pack(nibbles: &[u8]) -> Vec<u8> {
    nibbles
        .chunks(2)
        .map(|pair| pair[0] << 4 | pair.get(1).copied().unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests;
