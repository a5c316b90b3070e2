use std::fmt;

use thiserror::Error;

/// The grammar rule that was running when decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading the discriminator byte of a value.
    StructurePrefix,
    /// Reading or parsing a byte string's length prefix.
    StringLength,
    /// Reading a byte string's payload.
    StringValue,
    /// Reading or parsing an integer's digits.
    IntegerValue,
    /// Decoding a dictionary key.
    DictKey,
    /// Decoding a dictionary value.
    DictVal,
    /// Looking for a dictionary's terminator.
    DictSuffix,
    /// Looking for a list's terminator.
    ListSuffix,
}

impl Stage {
    /// Returns the label used in error messages, e.g. `"dict key"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::StructurePrefix => "structure prefix",
            Stage::StringLength => "string length",
            Stage::StringValue => "string value",
            Stage::IntegerValue => "integer value",
            Stage::DictKey => "dict key",
            Stage::DictVal => "dict val",
            Stage::DictSuffix => "dict suffix",
            Stage::ListSuffix => "list suffix",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while decoding bencode.
///
/// Every variant means the input was malformed (or unreadable); decoding is
/// all-or-nothing, so no partial value accompanies an error.
#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("malformed input, cannot read {stage}: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input, cannot read {stage}: unexpected end of input")]
    UnexpectedEof { stage: Stage },

    #[error("malformed input, cannot parse {stage}: {text:?}")]
    InvalidNumber { stage: Stage, text: String },

    #[error("malformed input, cannot read string value: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("malformed input, dict key must be a byte string, found {found}")]
    NonStringKey { found: &'static str },

    #[error("non-canonical {stage}: {text:?}")]
    NonCanonical { stage: Stage, text: String },

    #[error("dict keys out of order")]
    UnsortedKeys,

    #[error("duplicate dict key")]
    DuplicateKey,

    #[error("nesting too deep (limit {limit})")]
    NestingTooDeep { limit: usize },

    #[error("trailing data after value")]
    TrailingData,

    #[error("failed to parse {stage}: {source}")]
    Nested {
        stage: Stage,
        #[source]
        source: Box<BencodeError>,
    },
}

impl BencodeError {
    pub(crate) fn io(stage: Stage, source: std::io::Error) -> Self {
        BencodeError::Io { stage, source }
    }

    pub(crate) fn within(self, stage: Stage) -> Self {
        BencodeError::Nested {
            stage,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping any dict key/val wrapping.
    pub fn root_cause(&self) -> &BencodeError {
        let mut err = self;
        while let BencodeError::Nested { source, .. } = err {
            err = source;
        }
        err
    }

    /// Returns the grammar stage at which the innermost failure happened.
    ///
    /// `TrailingData` is not tied to a rule and reports `None`.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            BencodeError::Io { stage, .. }
            | BencodeError::UnexpectedEof { stage }
            | BencodeError::InvalidNumber { stage, .. }
            | BencodeError::NonCanonical { stage, .. } => Some(*stage),
            BencodeError::ShortRead { .. } => Some(Stage::StringValue),
            BencodeError::NonStringKey { .. }
            | BencodeError::UnsortedKeys
            | BencodeError::DuplicateKey => Some(Stage::DictKey),
            BencodeError::NestingTooDeep { .. } => Some(Stage::StructurePrefix),
            BencodeError::TrailingData => None,
            BencodeError::Nested { source, .. } => source.stage(),
        }
    }
}
