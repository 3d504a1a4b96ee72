//! `CCITTFaxDecode`, one-dimensional modified Huffman coding (Group 3, K = 0).
//!
//! Rows are packed MSB first and padded to a byte boundary. Runs alternate
//! color starting from white, a line starting with black begins with a white
//! run of length 0.

mod codes;

use crate::{
    bits::{BitReader, BitWriter},
    error::{
        ConfigError, DecodeError, DecodeResult, EncodeError, Malformed, SetupError, Unsupported,
    },
    params::CcittParams,
    Codec, EncodeResult, FilterKind, Options,
};
use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec, view::BitView};
use codes::{EOL, EOL_LEN, MAX_CODE_LEN, MAX_MAKEUP, RTC_EOLS};
use log::{debug, error, trace};
use std::iter::repeat;

#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
enum Color {
    Black,
    #[default]
    White,
}

impl Color {
    fn toggle(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl CcittParams {
    /// Checked `Columns`, rejects two-dimensional coding and bad geometry
    /// before any bit is touched.
    fn checked_columns(&self) -> Result<usize, SetupError> {
        if self.k != 0 {
            return Err(Unsupported::TwoDimensionalFax(self.k).into());
        }
        if self.columns <= 0 {
            return Err(ConfigError::InvalidColumns(self.columns).into());
        }
        if self.rows < 0 {
            return Err(ConfigError::InvalidRows(self.rows).into());
        }
        // positive i32 fits in usize
        Ok(self.columns as usize)
    }

    fn row_bytes(columns: usize) -> usize {
        columns.div_ceil(8)
    }

    /// Bit value of a white pixel.
    fn white(&self) -> bool {
        !self.black_is_1
    }
}

impl Codec for CcittParams {
    fn encode(&self, raw: &[u8], _options: &Options) -> EncodeResult<Vec<u8>> {
        let columns = self.checked_columns()?;
        let row = Self::row_bytes(columns);
        if raw.len() % row != 0 {
            return Err(EncodeError::InvalidInput(Malformed::PartialRow {
                len: raw.len(),
                row,
            }));
        }

        let mut w = BitWriter::new();
        for line in raw.chunks(row) {
            if self.end_of_line {
                w.write(EOL, EOL_LEN);
            }
            encode_line(&line.view_bits::<Msb0>()[..columns], self.white(), &mut w);
            if self.encoded_byte_align {
                w.align();
            }
        }
        if self.end_of_block {
            for _ in 0..RTC_EOLS {
                w.write(EOL, EOL_LEN);
            }
        }
        Ok(w.finish())
    }

    fn decode(&self, encoded: &[u8], _options: &Options) -> DecodeResult<Vec<u8>> {
        let columns = self.checked_columns()?;
        if !self.end_of_block && self.rows <= 0 {
            return Err(ConfigError::InvalidRows(self.rows).into());
        }

        let mut out = BitVec::<u8, Msb0>::with_capacity(encoded.len() * 8);
        match self.decode_lines(encoded, columns, &mut out) {
            Ok(()) => Ok(out.into_vec()),
            Err(reason) => {
                error!("CCITTFaxDecode: {}", reason);
                Err(DecodeError::invalid(
                    FilterKind::CcittFax,
                    reason,
                    encoded,
                    out.into_vec(),
                ))
            }
        }
    }
}

fn write_run(color: Color, run: usize, w: &mut BitWriter) {
    let mut n = run;
    while n >= usize::from(MAX_MAKEUP) {
        let (code, len) = codes::makeup(color, MAX_MAKEUP);
        w.write(code.into(), len.into());
        n -= usize::from(MAX_MAKEUP);
    }
    // n < 2560
    let n = n as u16;
    if n >= 64 {
        let (code, len) = codes::makeup(color, n / 64 * 64);
        w.write(code.into(), len.into());
    }
    let (code, len) = codes::terminal(color, n % 64);
    w.write(code.into(), len.into());
}

fn encode_line(pixels: &BitSlice<u8, Msb0>, white: bool, w: &mut BitWriter) {
    let mut color = Color::White;
    let mut pos = 0;
    while pos < pixels.len() {
        let target = (color == Color::White) == white;
        let run = pixels[pos..]
            .iter()
            .by_vals()
            .take_while(|&b| b == target)
            .count();
        write_run(color, run, w);
        pos += run;
        color = color.toggle();
    }
}

/// Consume a return-to-control sequence if one starts at the cursor.
fn skip_rtc(r: &mut BitReader) -> bool {
    let start = r.pos();
    for _ in 0..RTC_EOLS {
        if r.read(EOL_LEN) != Some(EOL) {
            r.seek(start);
            return false;
        }
    }
    true
}

/// Only zero fill bits, fewer than a byte, are left.
fn at_fill(r: &mut BitReader) -> bool {
    let remaining = r.remaining();
    // remaining < 8
    remaining < 8 && r.peek(remaining as u32) == 0
}

impl CcittParams {
    fn decode_lines(
        &self,
        input: &[u8],
        columns: usize,
        out: &mut BitVec<u8, Msb0>,
    ) -> Result<(), Malformed> {
        let row_bits = Self::row_bytes(columns) * 8;
        let max_rows = usize::try_from(self.rows).ok().filter(|&n| n > 0);
        let mut r = BitReader::new(input);
        loop {
            if max_rows.is_some_and(|n| out.len() / row_bits >= n) {
                break;
            }
            if self.encoded_byte_align {
                r.align();
            }
            if r.eod() {
                break;
            }
            if self.end_of_block && skip_rtc(&mut r) {
                debug!("CCITTFaxDecode: end of block at bit {}", r.pos());
                break;
            }
            if at_fill(&mut r) {
                trace!("CCITTFaxDecode: {} fill bits at end", r.remaining());
                break;
            }

            if r.peek(EOL_LEN) == EOL {
                r.skip(EOL_LEN);
                if r.eod() || at_fill(&mut r) {
                    break;
                }
            } else if self.end_of_line {
                return Err(Malformed::MissingEndOfLine { bit: r.pos() });
            }

            decode_line(&mut r, columns, self.white(), out)?;
            let padded = out.len() + (row_bits - columns);
            out.resize(padded, false);
        }
        Ok(())
    }
}

/// Decode runs into `out` until `columns` pixels are filled.
fn decode_line(
    r: &mut BitReader,
    columns: usize,
    white: bool,
    out: &mut BitVec<u8, Msb0>,
) -> Result<(), Malformed> {
    let mut color = Color::White;
    let mut filled = 0;
    while filled < columns {
        let mut run = 0;
        loop {
            let bit = r.pos();
            let slot = codes::lookup(color, r.peek(MAX_CODE_LEN));
            if slot.len == 0 && r.remaining() >= u64::from(MAX_CODE_LEN) {
                // 13 bits, fits in u16
                return Err(Malformed::InvalidCode(r.peek(MAX_CODE_LEN) as u16));
            }
            if slot.len == 0 || u64::from(slot.len) > r.remaining() {
                return Err(Malformed::UnfinishedLine { bit });
            }
            r.skip(slot.len.into());
            run += usize::from(slot.run);
            if slot.terminal {
                break;
            }
        }

        if filled + run > columns {
            return Err(Malformed::LineTooLong { bit: r.pos() });
        }
        out.extend(repeat((color == Color::White) == white).take(run));
        filled += run;
        color = color.toggle();
    }
    Ok(())
}

#[cfg(test)]
mod tests;
