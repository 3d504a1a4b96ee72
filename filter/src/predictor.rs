//! Row-wise predictors applied before LZW/Flate compression and reversed
//! after decompression.

use crate::{
    error::{Malformed, PredictionError},
    params::{Options, PngPredictor, Predictor, PredictorParams},
};
use bitvec::{field::BitField, order::Msb0, view::BitView};
use log::{error, trace, warn};

type Result<T> = std::result::Result<T, PredictionError>;

/// PNG row filter, the tag byte in front of each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum RowFilter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}

impl RowFilter {
    const ALL: [RowFilter; 5] = [
        RowFilter::None,
        RowFilter::Sub,
        RowFilter::Up,
        RowFilter::Average,
        RowFilter::Paeth,
    ];

    fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }

    fn from_predictor(p: PngPredictor) -> Option<Self> {
        match p {
            PngPredictor::None => Some(Self::None),
            PngPredictor::Sub => Some(Self::Sub),
            PngPredictor::Up => Some(Self::Up),
            PngPredictor::Average => Some(Self::Average),
            PngPredictor::Paeth => Some(Self::Paeth),
            PngPredictor::Optimum => None,
        }
    }

    fn predict(self, left: u8, up: u8, up_left: u8) -> u8 {
        match self {
            Self::None => 0,
            Self::Sub => left,
            Self::Up => up,
            // (255 + 255) / 2 fits in u8
            Self::Average => ((u16::from(left) + u16::from(up)) / 2) as u8,
            Self::Paeth => paeth(left, up, up_left),
        }
    }
}

/// Paeth, returns a, b, or c, whichever is closet to a + b - c
fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let aa = i16::from(a);
    let bb = i16::from(b);
    let cc = i16::from(c);

    let p = aa + bb - cc;

    let da = (p - aa).abs();
    let db = (p - bb).abs();
    let dc = (p - cc).abs();

    if da <= db && da <= dc {
        a
    } else if db <= dc {
        b
    } else {
        c
    }
}

fn check_rows(len: usize, row: usize) -> Result<()> {
    if len % row == 0 {
        Ok(())
    } else {
        Err(PredictionError::Malformed {
            reason: Malformed::PartialRow { len, row },
            partial: vec![],
        })
    }
}

/// Apply predictor to raw rows before compression.
pub fn pre_prediction(data: &[u8], params: &PredictorParams) -> Result<Vec<u8>> {
    params.validate()?;
    let row = params.bytes_per_row();
    match params.predictor {
        Predictor::None => Ok(data.to_vec()),
        Predictor::Tiff => {
            check_rows(data.len(), row)?;
            Ok(tiff_encode(data, params))
        }
        Predictor::Png(p) => {
            check_rows(data.len(), row)?;
            Ok(png_encode(data, row, params.bytes_per_pixel(), p))
        }
    }
}

/// Restore rows after decompression.
pub fn post_prediction(
    data: &[u8],
    params: &PredictorParams,
    options: &Options,
) -> Result<Vec<u8>> {
    params.validate()?;
    let row = params.bytes_per_row();
    match params.predictor {
        Predictor::None => Ok(data.to_vec()),
        Predictor::Tiff => tiff_decode(data, params),
        Predictor::Png(_) => png_decode(data, row, params.bytes_per_pixel(), options),
    }
}

fn tiff_encode(data: &[u8], params: &PredictorParams) -> Vec<u8> {
    let row = params.bytes_per_row();
    let bpc = usize::from(params.bits_per_component);
    let stride = usize::from(params.colors) * bpc;
    let row_bits = params.columns as usize * stride;

    let mut r = data.to_vec();
    for (src, dest) in data.chunks(row).zip(r.chunks_mut(row)) {
        let src = &src.view_bits::<Msb0>()[..row_bits];
        let dest = &mut dest.view_bits_mut::<Msb0>()[..row_bits];
        for start in (stride..row_bits).step_by(bpc) {
            let cur: u16 = src[start..start + bpc].load_be();
            let left: u16 = src[start - stride..start - stride + bpc].load_be();
            dest[start..start + bpc].store_be(cur.wrapping_sub(left));
        }
    }
    r
}

fn tiff_decode(data: &[u8], params: &PredictorParams) -> Result<Vec<u8>> {
    let row = params.bytes_per_row();
    let bpc = usize::from(params.bits_per_component);
    let stride = usize::from(params.colors) * bpc;
    let row_bits = params.columns as usize * stride;

    let mut r = data[..data.len() / row * row].to_vec();
    for dest in r.chunks_mut(row) {
        let bits = &mut dest.view_bits_mut::<Msb0>()[..row_bits];
        for start in (stride..row_bits).step_by(bpc) {
            let cur: u16 = bits[start..start + bpc].load_be();
            let left: u16 = bits[start - stride..start - stride + bpc].load_be();
            bits[start..start + bpc].store_be(cur.wrapping_add(left));
        }
    }

    if r.len() != data.len() {
        error!("TIFF predictor: {} trailing bytes", data.len() - r.len());
        return Err(PredictionError::Malformed {
            reason: Malformed::PartialRow {
                len: data.len(),
                row,
            },
            partial: r,
        });
    }
    Ok(r)
}

/// Write `cur - prediction` of each byte to `dest`.
fn filter_row(f: RowFilter, cur: &[u8], up: &[u8], bpp: usize, dest: &mut [u8]) {
    for i in 0..cur.len() {
        let (left, up_left) = if i >= bpp {
            (cur[i - bpp], up[i - bpp])
        } else {
            (0, 0)
        };
        dest[i] = cur[i].wrapping_sub(f.predict(left, up[i], up_left));
    }
}

/// Reverse of [`filter_row`], `up` is the restored previous row.
fn unfilter_row(f: RowFilter, cur: &[u8], up: &[u8], bpp: usize, dest: &mut [u8]) {
    for i in 0..cur.len() {
        let (left, up_left) = if i >= bpp {
            (dest[i - bpp], up[i - bpp])
        } else {
            (0, 0)
        };
        dest[i] = cur[i].wrapping_add(f.predict(left, up[i], up_left));
    }
}

/// Row filter with the smallest sum of absolute residuals, the PNG heuristic.
fn optimum_filter(cur: &[u8], up: &[u8], bpp: usize, buf: &mut [u8]) -> RowFilter {
    let mut best = (u32::MAX, RowFilter::None);
    for f in RowFilter::ALL {
        filter_row(f, cur, up, bpp, buf);
        let score: u32 = buf.iter().map(|&v| u32::from((v as i8).unsigned_abs())).sum();
        if score < best.0 {
            best = (score, f);
        }
    }
    best.1
}

fn png_encode(data: &[u8], row: usize, bpp: usize, predictor: PngPredictor) -> Vec<u8> {
    let mut r = Vec::with_capacity(data.len() + data.len() / row);
    let first_row = vec![0u8; row];
    let mut upper_row = &first_row[..];
    let mut buf = vec![0u8; row];
    for cur_row in data.chunks(row) {
        let f = RowFilter::from_predictor(predictor)
            .unwrap_or_else(|| optimum_filter(cur_row, upper_row, bpp, &mut buf));
        trace!("png predictor row filter: {:?}", f);
        filter_row(f, cur_row, upper_row, bpp, &mut buf);
        r.push(f as u8);
        r.extend_from_slice(&buf);
        upper_row = cur_row;
    }
    r
}

/// Restore data processed by png predictor.
fn png_decode(buf: &[u8], row: usize, bpp: usize, options: &Options) -> Result<Vec<u8>> {
    let first_row = vec![0u8; row];
    let rows = buf.chunks_exact(row + 1);
    let tail = rows.remainder().len();
    let mut r = Vec::with_capacity(buf.len() / (row + 1) * row);
    for cur_row in rows {
        let (flag, cur_row) = (cur_row[0], &cur_row[1..]);
        let f = match RowFilter::from_tag(flag) {
            Some(f) => f,
            None if options.tolerate_unknown_png_tag => {
                warn!("Unknown png predictor: {}, row copied as is", flag);
                RowFilter::None
            }
            None => {
                error!("Unknown png predictor: {}", flag);
                return Err(PredictionError::Malformed {
                    reason: Malformed::UnknownPngTag(flag),
                    partial: r,
                });
            }
        };

        let start = r.len();
        r.resize(start + row, 0);
        let (done, dest_row) = r.split_at_mut(start);
        let upper_row = if start == 0 {
            &first_row[..]
        } else {
            &done[start - row..]
        };
        unfilter_row(f, cur_row, upper_row, bpp, dest_row);
    }

    if tail != 0 {
        error!("PNG predictor: {} trailing bytes", tail);
        return Err(PredictionError::Malformed {
            reason: Malformed::PartialRow {
                len: buf.len(),
                row: row + 1,
            },
            partial: r,
        });
    }
    Ok(r)
}
