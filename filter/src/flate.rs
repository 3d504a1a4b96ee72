//! `FlateDecode` on top of `flate2`.

use crate::{
    error::{DecodeError, DecodeResult, Malformed},
    params::FlateParams,
    predictor::{post_prediction, pre_prediction},
    Codec, EncodeResult, FilterKind, Options,
};
use flate2::{
    bufread::{DeflateDecoder, ZlibDecoder},
    write::ZlibEncoder,
};
use log::{error, warn};
use std::io::{Read, Write};

impl Codec for FlateParams {
    fn encode(&self, raw: &[u8], _options: &Options) -> EncodeResult<Vec<u8>> {
        let data = pre_prediction(raw, &self.predictor)?;
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), self.level);
        encoder.write_all(&data)?;
        Ok(encoder.finish()?)
    }

    fn decode(&self, encoded: &[u8], options: &Options) -> DecodeResult<Vec<u8>> {
        self.predictor.validate()?;
        let data = inflate(encoded, options)?;
        post_prediction(&data, &self.predictor, options)
            .map_err(|e| e.into_decode_error(FilterKind::Flate, encoded))
    }
}

/// Inflate a zlib stream, or a raw deflate stream if the zlib wrapper is
/// missing or broken.
fn inflate(encoded: &[u8], options: &Options) -> DecodeResult<Vec<u8>> {
    let mut r = Vec::with_capacity(encoded.len() * 2);
    let Err(zlib_err) = ZlibDecoder::new(encoded).read_to_end(&mut r) else {
        return Ok(r);
    };

    let mut raw = Vec::with_capacity(encoded.len() * 2);
    let Err(e) = DeflateDecoder::new(encoded).read_to_end(&mut raw) else {
        return Ok(raw);
    };

    let partial = if raw.len() > r.len() { raw } else { r };
    if options.tolerate_corrupt_flate {
        warn!(
            "FlateDecode: {}, keep {} bytes inflated before the fault",
            zlib_err,
            partial.len()
        );
        return Ok(partial);
    }

    error!("FlateDecode: {}, as raw deflate: {}", zlib_err, e);
    Err(DecodeError::invalid(
        FilterKind::Flate,
        Malformed::Corrupt(zlib_err.to_string()),
        encoded,
        partial,
    ))
}
