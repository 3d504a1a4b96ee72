//! Sequential MSB-first bit cursor over a byte buffer, shared by the LZW and
//! CCITT codecs.

use bitstream_io::{BigEndian, BitRead, BitWrite};
use std::io::{Cursor, SeekFrom};

pub struct BitReader<'a> {
    inner: bitstream_io::BitReader<Cursor<&'a [u8]>, BigEndian>,
    pos: u64,
    size: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            inner: bitstream_io::BitReader::endian(Cursor::new(buf), BigEndian),
            pos: 0,
            size: buf.len() as u64 * 8,
        }
    }

    /// Position in bits.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn remaining(&self) -> u64 {
        self.size() - self.pos
    }

    pub fn eod(&self) -> bool {
        self.pos >= self.size()
    }

    /// Read next `n` bits, `None` if fewer than `n` bits remain, the cursor is
    /// left untouched in that case.
    pub fn read(&mut self, n: u32) -> Option<u32> {
        debug_assert!(n <= 32);
        if u64::from(n) > self.remaining() {
            return None;
        }
        if n == 0 {
            return Some(0);
        }
        let v = self.inner.read::<u32>(n).ok()?;
        self.pos += u64::from(n);
        Some(v)
    }

    /// Next `n` bits without consuming them. Bits past the end of data read
    /// as zero.
    pub fn peek(&mut self, n: u32) -> u32 {
        debug_assert!(n < 32);
        let avail = n.min(u32::try_from(self.remaining()).unwrap_or(u32::MAX));
        if avail == 0 {
            return 0;
        }
        let v = self.inner.read::<u32>(avail).unwrap_or_default();
        self.rewind();
        v << (n - avail)
    }

    /// Advance `n` bits, stops at end of data.
    pub fn skip(&mut self, n: u32) {
        self.pos = (self.pos + u64::from(n)).min(self.size);
        self.rewind();
    }

    /// Move the cursor to bit `pos`, clamped to the end of data.
    pub fn seek(&mut self, pos: u64) {
        self.pos = pos.min(self.size);
        self.rewind();
    }

    /// Round the cursor up to the next byte boundary.
    pub fn align(&mut self) {
        let aligned = (self.pos + 7) / 8 * 8;
        if aligned != self.pos {
            self.pos = aligned.min(self.size);
            self.rewind();
        }
    }

    fn rewind(&mut self) {
        // seeking inside an in-memory cursor can not fail
        let _ = self.inner.seek_bits(SeekFrom::Start(self.pos));
    }
}

pub struct BitWriter {
    inner: bitstream_io::BitWriter<Vec<u8>, BigEndian>,
    pos: u64,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            inner: bitstream_io::BitWriter::endian(Vec::new(), BigEndian),
            pos: 0,
        }
    }

    /// Bits written so far.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Append the low `n` bits of `value`.
    pub fn write(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32);
        if n == 0 {
            return;
        }
        let value = if n == 32 { value } else { value & ((1 << n) - 1) };
        // masked bits into a Vec<u8> can not fail
        let _ = self.inner.write(n, value);
        self.pos += u64::from(n);
    }

    /// Pad with zero bits to the next byte boundary.
    pub fn align(&mut self) {
        let padding = (8 - self.pos % 8) % 8;
        // padding < 8
        self.write(0, padding as u32);
    }

    /// Align and return the written bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.align();
        self.inner.into_writer()
    }
}
