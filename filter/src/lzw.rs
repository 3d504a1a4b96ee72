//! `LZWDecode`: variable width (9 to 12 bit) MSB-first LZW with the PDF
//! `EarlyChange` switch.

use crate::{
    bits::{BitReader, BitWriter},
    error::{DecodeError, DecodeResult, Malformed},
    params::LzwParams,
    predictor::{post_prediction, pre_prediction},
    Codec, EncodeResult, FilterKind, Options,
};
use ahash::AHashMap;
use log::{debug, error, trace};

const CLEAR: u16 = 256;
const EOD: u16 = 257;
const FIRST_CODE: u16 = 258;
const MIN_WIDTH: u32 = 9;
const MAX_WIDTH: u32 = 12;
const TABLE_SIZE: usize = 1 << MAX_WIDTH;
const NO_PREFIX: u16 = u16::MAX;

impl Codec for LzwParams {
    fn encode(&self, raw: &[u8], _options: &Options) -> EncodeResult<Vec<u8>> {
        let data = pre_prediction(raw, &self.predictor)?;
        Ok(encode(&data, self.early_change))
    }

    fn decode(&self, encoded: &[u8], options: &Options) -> DecodeResult<Vec<u8>> {
        self.predictor.validate()?;
        let data = decode(encoded, self.early_change)?;
        post_prediction(&data, &self.predictor, options)
            .map_err(|e| e.into_decode_error(FilterKind::Lzw, encoded))
    }
}

/// Compress `raw`. The stream starts with a clear code, ends with EOD, and
/// the table is cleared once it holds 4096 entries.
pub fn encode(raw: &[u8], early_change: bool) -> Vec<u8> {
    let early = u16::from(early_change);
    let mut w = BitWriter::new();
    let mut table: AHashMap<(u16, u8), u16> = AHashMap::new();
    let mut next = FIRST_CODE;
    let mut width = MIN_WIDTH;

    w.write(CLEAR.into(), width);
    let Some((&first, rest)) = raw.split_first() else {
        w.write(EOD.into(), width);
        return w.finish();
    };

    let mut s = u16::from(first);
    for &b in rest {
        if let Some(&code) = table.get(&(s, b)) {
            s = code;
            continue;
        }

        w.write(s.into(), width);
        table.insert((s, b), next);
        next += 1;
        if usize::from(next) >= TABLE_SIZE {
            trace!("lzw table full at bit {}, clear", w.pos());
            w.write(CLEAR.into(), width);
            table.clear();
            next = FIRST_CODE;
            width = MIN_WIDTH;
        } else if next + early > 1 << width {
            width += 1;
        }
        s = u16::from(b);
    }
    w.write(s.into(), width);

    // decoder adds an entry for the last code before it reads EOD
    if width < MAX_WIDTH && next + early >= 1 << width {
        width += 1;
    }
    w.write(EOD.into(), width);
    w.finish()
}

#[derive(Debug, Clone, Copy)]
struct Node {
    prefix: u16,
    byte: u8,
    first: u8,
    len: u16,
}

struct Table {
    nodes: Vec<Node>,
}

impl Table {
    fn new() -> Self {
        let mut nodes = Vec::with_capacity(TABLE_SIZE);
        nodes.extend((0..=255u8).map(|b| Node {
            prefix: NO_PREFIX,
            byte: b,
            first: b,
            len: 1,
        }));
        // CLEAR and EOD, never emitted
        nodes.extend([Node {
            prefix: NO_PREFIX,
            byte: 0,
            first: 0,
            len: 0,
        }; 2]);
        Self { nodes }
    }

    fn reset(&mut self) {
        self.nodes.truncate(FIRST_CODE.into());
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Code width for the next read, widening one code early if
    /// `early` is 1.
    fn width(&self, early: usize) -> u32 {
        (MIN_WIDTH..MAX_WIDTH)
            .find(|w| self.len() + early < 1 << w)
            .unwrap_or(MAX_WIDTH)
    }

    fn push(&mut self, prefix: u16, byte: u8) {
        let p = self.nodes[usize::from(prefix)];
        self.nodes.push(Node {
            prefix,
            byte,
            first: p.first,
            len: p.len + 1,
        });
    }

    /// Append the string of `code` to `out`.
    fn emit(&self, code: u16, out: &mut Vec<u8>) {
        let mut node = self.nodes[usize::from(code)];
        let start = out.len();
        out.resize(start + usize::from(node.len), 0);
        for dest in out[start..].iter_mut().rev() {
            *dest = node.byte;
            if node.prefix != NO_PREFIX {
                node = self.nodes[usize::from(node.prefix)];
            }
        }
    }
}

/// Decompress an LZW stream. A leading clear code is optional and a missing
/// EOD is accepted.
pub fn decode(input: &[u8], early_change: bool) -> DecodeResult<Vec<u8>> {
    let early = usize::from(early_change);
    let mut r = BitReader::new(input);
    let mut table = Table::new();
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut prev: Option<u16> = None;

    let fail = |reason: Malformed, bit: u64, out: Vec<u8>| {
        error!("LZWDecode: {} at bit {}", reason, bit);
        DecodeError::invalid(FilterKind::Lzw, reason, input, out)
    };

    loop {
        let bit = r.pos();
        let Some(code) = r.read(table.width(early)) else {
            debug!("LZWDecode: end of data without EOD");
            break;
        };
        // fits in 12 bits
        let code = code as u16;
        match code {
            CLEAR => {
                table.reset();
                prev = None;
                continue;
            }
            EOD => break,
            _ => {}
        }

        let Some(p) = prev else {
            if code > 255 {
                return Err(fail(Malformed::InvalidCode(code), bit, out));
            }
            table.emit(code, &mut out);
            prev = Some(code);
            continue;
        };

        if table.len() >= TABLE_SIZE {
            return Err(fail(Malformed::TableFull, bit, out));
        }
        let len = table.len();
        match usize::from(code) {
            c if c < len => {
                let first = table.nodes[c].first;
                table.push(p, first);
            }
            c if c == len => {
                let first = table.nodes[usize::from(p)].first;
                table.push(p, first);
            }
            _ => return Err(fail(Malformed::InvalidCode(code), bit, out)),
        }
        table.emit(code, &mut out);
        prev = Some(code);
    }
    Ok(out)
}
