//! Filter parameters: the `DecodeParms` dictionary handed over by the object
//! model, and the typed parameter structs parsed from it.

use crate::error::ConfigError;
use ahash::AHashMap;
use educe::Educe;
use flate2::Compression;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Integer(i32),
    Boolean(bool),
    Name(String),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Name(v.to_owned())
    }
}

/// Filter parameter dictionary, keys are PDF names without the leading `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary(AHashMap<String, Value>);

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Integer value of `key`, `default` if absent or null.
    pub fn int(&self, key: &'static str, default: i32) -> Result<i32, ConfigError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Integer(v)) => Ok(*v),
            Some(_) => Err(ConfigError::UnexpectedType {
                key,
                expected: "integer",
            }),
        }
    }

    /// Boolean value of `key`, `default` if absent or null.
    pub fn bool(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Boolean(v)) => Ok(*v),
            Some(_) => Err(ConfigError::UnexpectedType {
                key,
                expected: "boolean",
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Behaviour switches that turn selected decode faults into partial output.
/// Read only while filters run; pass the same value to concurrent calls freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Return what inflate salvaged from a corrupt Flate stream.
    pub tolerate_corrupt_flate: bool,
    /// Treat unknown PNG row tags as `None` instead of failing.
    pub tolerate_unknown_png_tag: bool,
}

impl Options {
    pub fn lenient() -> Self {
        Self {
            tolerate_corrupt_flate: true,
            tolerate_unknown_png_tag: true,
        }
    }
}

/// PNG row filter selection, `Predictor` values 10 to 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngPredictor {
    None,
    Sub,
    Up,
    Average,
    Paeth,
    /// Choose the filter per row when encoding.
    Optimum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Educe)]
#[educe(Default)]
pub enum Predictor {
    #[educe(Default)]
    None,
    Tiff,
    Png(PngPredictor),
}

impl TryFrom<i32> for Predictor {
    type Error = ConfigError;

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        Ok(match v {
            1 => Self::None,
            2 => Self::Tiff,
            10 => Self::Png(PngPredictor::None),
            11 => Self::Png(PngPredictor::Sub),
            12 => Self::Png(PngPredictor::Up),
            13 => Self::Png(PngPredictor::Average),
            14 => Self::Png(PngPredictor::Paeth),
            15 => Self::Png(PngPredictor::Optimum),
            _ => return Err(ConfigError::UnknownPredictor(v)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Educe)]
#[educe(Default)]
pub struct PredictorParams {
    pub predictor: Predictor,
    #[educe(Default = 1)]
    pub colors: u8,
    #[educe(Default = 8)]
    pub bits_per_component: u8,
    #[educe(Default = 1)]
    pub columns: u32,
}

impl PredictorParams {
    pub fn new(
        predictor: Predictor,
        colors: u8,
        bits_per_component: u8,
        columns: u32,
    ) -> Result<Self, ConfigError> {
        let r = Self {
            predictor,
            colors,
            bits_per_component,
            columns,
        };
        r.validate()?;
        Ok(r)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=4).contains(&self.colors) {
            return Err(ConfigError::InvalidColors(self.colors.into()));
        }
        if !matches!(self.bits_per_component, 1 | 2 | 4 | 8 | 16) {
            return Err(ConfigError::InvalidBitsPerComponent(
                self.bits_per_component.into(),
            ));
        }
        if self.columns == 0 {
            return Err(ConfigError::InvalidColumns(0));
        }
        Ok(())
    }

    /// `ceil(columns * colors * bpc / 8)`
    pub fn bytes_per_row(&self) -> usize {
        (self.columns as usize * self.colors as usize * self.bits_per_component as usize + 7) / 8
    }

    /// Distance in bytes to the corresponding byte of the previous pixel, at
    /// least 1.
    pub fn bytes_per_pixel(&self) -> usize {
        ((self.colors as usize * self.bits_per_component as usize + 7) / 8).max(1)
    }
}

impl TryFrom<&Dictionary> for PredictorParams {
    type Error = ConfigError;

    fn try_from(d: &Dictionary) -> Result<Self, Self::Error> {
        let predictor = Predictor::try_from(d.int("Predictor", 1)?)?;
        let colors = d.int("Colors", 1)?;
        let bpc = d.int("BitsPerComponent", 8)?;
        let columns = d.int("Columns", 1)?;
        Self::new(
            predictor,
            u8::try_from(colors).map_err(|_| ConfigError::InvalidColors(colors))?,
            u8::try_from(bpc).map_err(|_| ConfigError::InvalidBitsPerComponent(bpc))?,
            u32::try_from(columns).map_err(|_| ConfigError::InvalidColumns(columns))?,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Educe)]
#[educe(Default)]
pub struct LzwParams {
    pub predictor: PredictorParams,
    /// Widen codes one code early, PDF `EarlyChange` 1.
    #[educe(Default = true)]
    pub early_change: bool,
}

impl TryFrom<&Dictionary> for LzwParams {
    type Error = ConfigError;

    fn try_from(d: &Dictionary) -> Result<Self, Self::Error> {
        let early_change = match d.int("EarlyChange", 1)? {
            0 => false,
            1 => true,
            v => return Err(ConfigError::InvalidEarlyChange(v)),
        };
        Ok(Self {
            predictor: d.try_into()?,
            early_change,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlateParams {
    pub predictor: PredictorParams,
    /// Encode only, decoding accepts any level.
    pub level: Compression,
}

impl TryFrom<&Dictionary> for FlateParams {
    type Error = ConfigError;

    fn try_from(d: &Dictionary) -> Result<Self, Self::Error> {
        Ok(Self {
            predictor: d.try_into()?,
            level: Compression::default(),
        })
    }
}

/// `CCITTFaxDecode` parameters. `columns` and `rows` stay signed as in the
/// dictionary, they are checked before any coding starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Educe)]
#[educe(Default)]
pub struct CcittParams {
    pub k: i32,
    #[educe(Default = 1728)]
    pub columns: i32,
    pub rows: i32,
    pub end_of_line: bool,
    pub encoded_byte_align: bool,
    #[educe(Default = true)]
    pub end_of_block: bool,
    pub black_is_1: bool,
}

impl TryFrom<&Dictionary> for CcittParams {
    type Error = ConfigError;

    fn try_from(d: &Dictionary) -> Result<Self, Self::Error> {
        Ok(Self {
            k: d.int("K", 0)?,
            columns: d.int("Columns", 1728)?,
            rows: d.int("Rows", 0)?,
            end_of_line: d.bool("EndOfLine", false)?,
            encoded_byte_align: d.bool("EncodedByteAlign", false)?,
            end_of_block: d.bool("EndOfBlock", true)?,
            black_is_1: d.bool("BlackIs1", false)?,
        })
    }
}

#[cfg(test)]
mod tests;
