use crate::{
    error::{DecodeError, DecodeResult, Malformed},
    Codec, EncodeResult, FilterKind, Options,
};
use log::error;
use std::iter::repeat;

const EOD: u8 = 128;
const MAX_RUN: usize = 128;

/// `RunLengthDecode`, no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunLength;

impl Codec for RunLength {
    fn encode(&self, raw: &[u8], _options: &Options) -> EncodeResult<Vec<u8>> {
        Ok(encode(raw))
    }

    fn decode(&self, encoded: &[u8], _options: &Options) -> DecodeResult<Vec<u8>> {
        decode(encoded)
    }
}

/// Runs of two or more equal bytes become repeat records, other bytes are
/// grouped into literal records, both capped at 128 bytes. Ends with EOD.
pub fn encode(raw: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(raw.len() + raw.len() / MAX_RUN + 2);
    let mut c = 0;
    while c < raw.len() {
        let b = raw[c];
        let run = raw[c..].iter().take(MAX_RUN).take_while(|&&v| v == b).count();
        if run > 1 {
            // 129..=255
            buf.push((257 - run) as u8);
            buf.push(b);
            c += run;
            continue;
        }

        // literal stops where a repeat run starts
        let mut end = c + 1;
        while end < raw.len() && end - c < MAX_RUN && raw.get(end + 1) != Some(&raw[end]) {
            end += 1;
        }
        // 0..=127
        buf.push((end - c - 1) as u8);
        buf.extend_from_slice(&raw[c..end]);
        c = end;
    }
    buf.push(EOD);
    buf
}

/// Decode until EOD or end of input. A record missing its payload is an
/// error, bytes decoded so far are kept in the error.
pub fn decode(data: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(data.len());
    let mut c = 0;

    while c < data.len() {
        let length = data[c]; // length is first byte
        let ok = if length < 128 {
            let start = c + 1;
            let end = start + length as usize + 1;
            // copy _following_ length + 1 bytes literally
            data.get(start..end).map(|literal| {
                buf.extend_from_slice(literal);
                c = end;
            })
        } else if length > 128 {
            let copy = 257 - length as usize; // copy 2 - 128 times
            data.get(c + 1).map(|&b| {
                buf.extend(repeat(b).take(copy));
                c += 2;
            })
        } else {
            break; // EOD
        };

        if ok.is_none() {
            error!("RunLengthDecode: truncated record at {}", c);
            return Err(DecodeError::invalid(
                FilterKind::RunLength,
                Malformed::Truncated,
                data,
                buf,
            ));
        }
    }

    Ok(buf)
}
