//! Possible error types encountered while decoding a packed zone string.
//!
//! Failures split into two families: [`GrammarError`] for malformed fields
//! (wrong separator, illegal character, empty required element) and
//! [`StructuralError`] for fields that parse individually but are
//! inconsistent with each other. Both are unrecoverable for the string in
//! question; decoding is deterministic, so a retry fails identically.

use std::fmt;

use serde::de::{self, Unexpected};

/// The five pipe-separated fields of the packed format, in wire order.
/// Used to point decode errors at the field that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)] // The variant names match the wire fields.
pub enum Field {
    Name,
    Abbreviations,
    Offsets,
    Indices,
    Diffs,
}

impl Field {
    /// Returns a `&'static` [`str`] with the field name for formatting.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Abbreviations => "abbreviations",
            Self::Offsets => "offsets",
            Self::Indices => "indices",
            Self::Diffs => "diffs",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

/// A malformed field in the packed string. Positions are byte offsets
/// into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// A required element (the name, an abbreviation, an index digit) was
    /// empty.
    #[error("empty {field} element at byte {position}")]
    EmptyElement {
        /// The field being parsed.
        field: Field,
        /// Byte offset where the element was expected.
        position: usize,
    },
    /// A base-60 numeral with neither whole nor fractional digits.
    #[error("missing base-60 number in the {field} field at byte {position}")]
    EmptyNumber {
        /// The field being parsed.
        field: Field,
        /// Byte offset where the numeral was expected.
        position: usize,
    },
    /// The `|` separator expected after a field was missing.
    #[error("missing '|' separator after the {field} field at byte {position}")]
    MissingSeparator {
        /// The field the separator should follow.
        field: Field,
        /// Byte offset where the separator was expected.
        position: usize,
    },
    /// Input remained after the final field.
    #[error("trailing input after the {field} field at byte {position}")]
    TrailingInput {
        /// The last field parsed.
        field: Field,
        /// Byte offset of the first unconsumed byte.
        position: usize,
    },
}

/// A cross-field inconsistency in otherwise grammatical packed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    /// The abbreviations and offsets lists are parallel (one entry per
    /// distinct pair used across the zone's history) and must be the same
    /// length.
    #[error("{abbreviations} abbreviations with {offsets} offsets, counts must match")]
    PairCountMismatch {
        /// Number of abbreviations parsed.
        abbreviations: usize,
        /// Number of offsets parsed.
        offsets: usize,
    },
    /// A transition index does not select a valid abbreviation/offset pair.
    #[error("index {index} out of range for {pairs} abbreviation/offset pairs")]
    IndexOutOfRange {
        /// The out-of-range index.
        index: usize,
        /// Number of abbreviation/offset pairs available.
        pairs: usize,
    },
    /// Well-formed packed data always carries exactly one less diff than
    /// transition indices; anything else leaves span boundaries undefined.
    #[error("{diffs} diffs with {indices} indices, expected one less diff than indices")]
    DiffCount {
        /// Number of diffs parsed.
        diffs: usize,
        /// Number of transition indices parsed.
        indices: usize,
    },
    /// Cumulative-summed transition boundaries must strictly increase; a
    /// zero or negative diff would produce an empty or reversed span.
    #[error("transition boundaries do not strictly increase at transition {transition}")]
    NonMonotonicBoundary {
        /// Position of the offending boundary pair.
        transition: usize,
    },
}

/// Error types that can be encountered while decoding a packed zone
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A malformed field.
    #[error("malformed packed zone: {0}")]
    Grammar(#[from] GrammarError),
    /// Grammatical fields that are inconsistent with each other.
    #[error("inconsistent packed zone: {0}")]
    Structural(#[from] StructuralError),
}

impl Error {
    /// Formats 'self' as an arbitrary [`serde::de::Error`], given the
    /// packed string we tried to decode.
    pub fn into_de_error<E>(self, unexpected: Unexpected<'_>) -> E
    where
        E: de::Error,
    {
        de::Error::invalid_value(unexpected, &self.to_string().as_ref())
    }
}
