use crate::{
    error::{DecodeError, DecodeResult, Malformed},
    is_white_space, Codec, EncodeResult, FilterKind, Options,
};
use log::error;
use memchr::memmem;

const EOD: &[u8] = b"~>";

/// `ASCII85Decode`, no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ascii85;

impl Codec for Ascii85 {
    fn encode(&self, raw: &[u8], _options: &Options) -> EncodeResult<Vec<u8>> {
        Ok(encode(raw))
    }

    fn decode(&self, encoded: &[u8], _options: &Options) -> DecodeResult<Vec<u8>> {
        decode(encoded)
    }
}

/// Every 4 bytes become 5 characters in `!`..=`u`, an all zero group becomes
/// `z`. The last group of n < 4 bytes is written as n + 1 characters. No
/// end-of-data marker is appended.
pub fn encode(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity((raw.len() + 3) / 4 * 5);
    for chunk in raw.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let mut q = u32::from_be_bytes(word);
        if q == 0 && chunk.len() == 4 {
            out.push(b'z');
            continue;
        }

        let mut group = [0u8; 5];
        for c in group.iter_mut().rev() {
            // q % 85 < 85
            *c = (q % 85) as u8 + b'!';
            q /= 85;
        }
        out.extend_from_slice(&group[..chunk.len() + 1]);
    }
    out
}

/// Decode up to `~>` if present, white space ignored.
pub fn decode(input: &[u8]) -> DecodeResult<Vec<u8>> {
    let data = memmem::find(input, EOD).map_or(input, |p| &input[..p]);
    let mut out = Vec::with_capacity((data.len() + 4) / 5 * 4);
    let fail = |reason: Malformed, out: Vec<u8>| {
        error!("ASCII85Decode: {}", reason);
        DecodeError::invalid(FilterKind::Ascii85, reason, input, out)
    };

    let mut symbols = data.iter().copied().filter(|&b| !is_white_space(b));
    while let Some(a) = symbols.next() {
        if a == b'z' {
            out.extend_from_slice(&[0; 4]);
            continue;
        }

        // a short last group is padded with `u`
        let mut group = [b'u'; 5];
        group[0] = a;
        let mut n = 1;
        for (slot, b) in group[1..].iter_mut().zip(symbols.by_ref()) {
            *slot = b;
            n += 1;
        }
        if let Some(&b) = group[..n].iter().find(|&&b| sym_85(b).is_none()) {
            return Err(fail(Malformed::InvalidCharacter(b), out));
        }
        if n == 1 {
            return Err(fail(Malformed::IncompleteGroup, out));
        }
        let Some(word) = word_85(group) else {
            return Err(fail(Malformed::GroupOverflow, out));
        };
        out.extend_from_slice(&word[..n - 1]);
    }
    Ok(out)
}

fn sym_85(byte: u8) -> Option<u8> {
    match byte {
        b @ 0x21..=0x75 => Some(b - 0x21),
        _ => None,
    }
}

fn word_85(group: [u8; 5]) -> Option<[u8; 4]> {
    let mut q = 0u64;
    for b in group {
        q = q * 85 + u64::from(sym_85(b)?);
    }
    u32::try_from(q).ok().map(u32::to_be_bytes)
}
