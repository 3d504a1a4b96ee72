//! Filter names, the [`Codec`] capability shared by every filter, and
//! decoding/encoding through a chain of filters.

use crate::{
    ascii85::Ascii85,
    ascii_hex::AsciiHex,
    error::{ConfigError, DecodeResult, EncodeResult, SetupError, Unsupported},
    params::{CcittParams, Dictionary, FlateParams, LzwParams, Options},
    run_length::RunLength,
};
use log::debug;
use std::{borrow::Cow, str::FromStr};
use strum::{Display, EnumString, IntoStaticStr};

/// Filter name as written in a stream dictionary, or its inline image
/// abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr)]
pub enum FilterKind {
    #[strum(to_string = "ASCIIHexDecode", serialize = "AHx")]
    AsciiHex,
    #[strum(to_string = "ASCII85Decode", serialize = "A85")]
    Ascii85,
    #[strum(to_string = "LZWDecode", serialize = "LZW")]
    Lzw,
    #[strum(to_string = "FlateDecode", serialize = "Fl")]
    Flate,
    #[strum(to_string = "RunLengthDecode", serialize = "RL")]
    RunLength,
    #[strum(to_string = "CCITTFaxDecode", serialize = "CCF")]
    CcittFax,
    #[strum(to_string = "DCTDecode", serialize = "DCT")]
    Dct,
    #[strum(to_string = "JPXDecode")]
    Jpx,
    #[strum(to_string = "JBIG2Decode")]
    Jbig2,
    #[strum(to_string = "Crypt")]
    Crypt,
}

/// A symmetric pair of transforms, `decode(encode(b)) == b`.
pub trait Codec {
    fn encode(&self, raw: &[u8], options: &Options) -> EncodeResult<Vec<u8>>;
    fn decode(&self, encoded: &[u8], options: &Options) -> DecodeResult<Vec<u8>>;
}

/// A filter with its parsed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    AsciiHex,
    Ascii85,
    RunLength,
    Lzw(LzwParams),
    Flate(FlateParams),
    CcittFax(CcittParams),
}

impl Filter {
    /// Parse `params` for `kind`, absent params take defaults.
    pub fn new(kind: FilterKind, params: Option<&Dictionary>) -> Result<Self, SetupError> {
        let empty = Dictionary::new();
        let params = params.unwrap_or(&empty);
        Ok(match kind {
            FilterKind::AsciiHex => Self::AsciiHex,
            FilterKind::Ascii85 => Self::Ascii85,
            FilterKind::RunLength => Self::RunLength,
            FilterKind::Lzw => Self::Lzw(params.try_into()?),
            FilterKind::Flate => Self::Flate(params.try_into()?),
            FilterKind::CcittFax => Self::CcittFax(params.try_into()?),
            FilterKind::Dct | FilterKind::Jpx | FilterKind::Jbig2 | FilterKind::Crypt => {
                return Err(Unsupported::Filter(kind).into());
            }
        })
    }

    pub fn from_name(name: &str, params: Option<&Dictionary>) -> Result<Self, SetupError> {
        let kind = FilterKind::from_str(name)
            .map_err(|_| ConfigError::UnknownFilter(name.to_owned()))?;
        Self::new(kind, params)
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::AsciiHex => FilterKind::AsciiHex,
            Self::Ascii85 => FilterKind::Ascii85,
            Self::RunLength => FilterKind::RunLength,
            Self::Lzw(_) => FilterKind::Lzw,
            Self::Flate(_) => FilterKind::Flate,
            Self::CcittFax(_) => FilterKind::CcittFax,
        }
    }

    fn codec(&self) -> &dyn Codec {
        match self {
            Self::AsciiHex => &AsciiHex,
            Self::Ascii85 => &Ascii85,
            Self::RunLength => &RunLength,
            Self::Lzw(p) => p,
            Self::Flate(p) => p,
            Self::CcittFax(p) => p,
        }
    }
}

impl Codec for Filter {
    fn encode(&self, raw: &[u8], options: &Options) -> EncodeResult<Vec<u8>> {
        self.codec().encode(raw, options)
    }

    fn decode(&self, encoded: &[u8], options: &Options) -> DecodeResult<Vec<u8>> {
        self.codec().decode(encoded, options)
    }
}

/// Filters of a stream from its `Filter` names and `DecodeParms` entries.
/// Missing trailing params are `None`.
pub fn filters(names: &[&str], params: &[Option<&Dictionary>]) -> Result<Vec<Filter>, SetupError> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Filter::from_name(name, params.get(i).copied().flatten()))
        .collect()
}

/// Decode through `filters` in order, the first filter reads `input`.
pub fn decode_chain<'a>(
    input: &'a [u8],
    filters: &[Filter],
    options: &Options,
) -> DecodeResult<Cow<'a, [u8]>> {
    let mut data = Cow::Borrowed(input);
    for f in filters {
        debug!("decode {} bytes with {}", data.len(), f.kind());
        data = Cow::Owned(f.decode(&data, options)?);
    }
    Ok(data)
}

/// Reverse of [`decode_chain`], applies `filters` last to first.
pub fn encode_chain<'a>(
    raw: &'a [u8],
    filters: &[Filter],
    options: &Options,
) -> EncodeResult<Cow<'a, [u8]>> {
    let mut data = Cow::Borrowed(raw);
    for f in filters.iter().rev() {
        debug!("encode {} bytes with {}", data.len(), f.kind());
        data = Cow::Owned(f.encode(&data, options)?);
    }
    Ok(data)
}
