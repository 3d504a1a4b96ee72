#![deny(clippy::dbg_macro)]
//! Encoders and decoders for the standard PDF stream filters.
pub mod ascii85;
pub mod ascii_hex;
mod bits;
mod ccitt;
pub mod error;
mod filter;
mod flate;
pub mod lzw;
pub mod params;
pub mod predictor;
pub mod run_length;

pub use error::{
    ConfigError, DecodeError, DecodeResult, EncodeError, EncodeResult, InvalidEncoding, Malformed,
    SetupError, Unsupported,
};
pub use filter::{decode_chain, encode_chain, filters, Codec, Filter, FilterKind};
pub use params::{
    CcittParams, Dictionary, FlateParams, LzwParams, Options, PngPredictor, Predictor,
    PredictorParams, Value,
};

/// PDF white space, skipped by the ASCII filters.
pub(crate) fn is_white_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\0')
}
