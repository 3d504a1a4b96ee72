use crate::FilterKind;

/// Why an encoded buffer can not be decoded, or why raw input can not be
/// encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("invalid character {0:#04x}")]
    InvalidCharacter(u8),
    #[error("truncated data")]
    Truncated,
    #[error("incomplete group at end of data")]
    IncompleteGroup,
    #[error("group value exceeds 2^32 - 1")]
    GroupOverflow,
    #[error("invalid code {0}")]
    InvalidCode(u16),
    #[error("table full, no clear flag")]
    TableFull,
    #[error("unknown png predictor: {0}")]
    UnknownPngTag(u8),
    #[error("data length {len} is not a multiple of row length {row}")]
    PartialRow { len: usize, row: usize },
    #[error("corrupt stream: {0}")]
    Corrupt(String),
    #[error("no end-of-line pattern found at bit {bit}")]
    MissingEndOfLine { bit: u64 },
    #[error("unfinished line at bit {bit}")]
    UnfinishedLine { bit: u64 },
    #[error("line is too long at bit {bit}")]
    LineTooLong { bit: u64 },
}

/// Decoding failed part way. Keeps the encoded input and whatever plain output
/// had been reconstructed before the fault, so callers can salvage it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{filter}: {reason}")]
pub struct InvalidEncoding {
    pub filter: FilterKind,
    pub reason: Malformed,
    pub input: Vec<u8>,
    pub partial: Vec<u8>,
}

impl InvalidEncoding {
    pub fn new(filter: FilterKind, reason: Malformed, input: &[u8], partial: Vec<u8>) -> Self {
        Self {
            filter,
            reason,
            input: input.to_vec(),
            partial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown filter {0}")]
    UnknownFilter(String),
    #[error("parameter {key} expects {expected}")]
    UnexpectedType {
        key: &'static str,
        expected: &'static str,
    },
    #[error("unknown predictor {0}")]
    UnknownPredictor(i32),
    #[error("colors must be in 1..=4, got {0}")]
    InvalidColors(i32),
    #[error("bits per component must be 1, 2, 4, 8 or 16, got {0}")]
    InvalidBitsPerComponent(i32),
    #[error("invalid value for parameter `Columns': {0}")]
    InvalidColumns(i32),
    #[error("invalid value for parameter `Rows': {0}")]
    InvalidRows(i32),
    #[error("invalid value for parameter `EarlyChange': {0}")]
    InvalidEarlyChange(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unsupported {
    #[error("two-dimensional CCITT encoding scheme (K={0}) not supported")]
    TwoDimensionalFax(i32),
    #[error("filter {0} not supported")]
    Filter(FilterKind),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    InvalidEncoding(Box<InvalidEncoding>),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Unsupported(#[from] Unsupported),
}

impl DecodeError {
    pub(crate) fn invalid(
        filter: FilterKind,
        reason: Malformed,
        input: &[u8],
        partial: Vec<u8>,
    ) -> Self {
        Self::InvalidEncoding(Box::new(InvalidEncoding::new(
            filter, reason, input, partial,
        )))
    }

    /// Plain output recovered before the fault, `None` if decoding never
    /// started.
    pub fn partial(&self) -> Option<&[u8]> {
        match self {
            Self::InvalidEncoding(e) => Some(&e.partial),
            _ => None,
        }
    }

    pub fn into_partial(self) -> Option<Vec<u8>> {
        match self {
            Self::InvalidEncoding(e) => Some(e.partial),
            _ => None,
        }
    }

    /// Reason of an invalid encoding error.
    pub fn malformed(&self) -> Option<&Malformed> {
        match self {
            Self::InvalidEncoding(e) => Some(&e.reason),
            _ => None,
        }
    }
}

impl From<InvalidEncoding> for DecodeError {
    fn from(e: InvalidEncoding) -> Self {
        Self::InvalidEncoding(Box::new(e))
    }
}

/// Failure of the predictor engine, a fault found in data carries the rows
/// restored before it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{reason}")]
    Malformed { reason: Malformed, partial: Vec<u8> },
}

impl PredictionError {
    pub(crate) fn into_decode_error(self, filter: FilterKind, input: &[u8]) -> DecodeError {
        match self {
            Self::Config(e) => e.into(),
            Self::Malformed { reason, partial } => {
                DecodeError::invalid(filter, reason, input, partial)
            }
        }
    }
}

/// Failure to select a filter by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Unsupported(#[from] Unsupported),
}

impl From<SetupError> for DecodeError {
    fn from(e: SetupError) -> Self {
        match e {
            SetupError::Config(e) => e.into(),
            SetupError::Unsupported(e) => e.into(),
        }
    }
}

impl From<SetupError> for EncodeError {
    fn from(e: SetupError) -> Self {
        match e {
            SetupError::Config(e) => e.into(),
            SetupError::Unsupported(e) => e.into(),
        }
    }
}

impl From<PredictionError> for EncodeError {
    fn from(e: PredictionError) -> Self {
        match e {
            PredictionError::Config(e) => e.into(),
            PredictionError::Malformed { reason, .. } => Self::InvalidInput(reason),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(Malformed),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Unsupported(#[from] Unsupported),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
pub type EncodeResult<T> = Result<T, EncodeError>;
