//! [`Span`] definition + assembly from validated packed fields.

use crate::conv;
use crate::error::StructuralError;
use crate::parse::RawPackedFields;

/// A maximal half-open interval `[from, until)` of instants during which a
/// single UTC offset and abbreviation applied.
///
/// Boundaries are milliseconds since the Unix epoch. The first span of a
/// zone starts at [`f64::NEG_INFINITY`] and the last ends at
/// [`f64::INFINITY`], and consecutive spans share their boundary, so every
/// instant belongs to exactly one span. Spans are immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    from: f64,
    until: f64,
    abbreviation: String,
    offset: i64,
}

impl Span {
    /// Inclusive start of this span, in epoch milliseconds.
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Exclusive end of this span, in epoch milliseconds.
    pub fn until(&self) -> f64 {
        self.until
    }

    /// The abbreviation in effect during this span (e.g. 'PST').
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// The offset to subtract from UTC during this span, in milliseconds.
    pub fn offset_millis(&self) -> i64 {
        self.offset
    }

    /// Returns 'true' if 'instant' falls within `[from, until)`.
    pub fn contains(&self, instant: f64) -> bool {
        self.from <= instant && instant < self.until
    }
}

/// Builds the span table from validated fields: cumulative-sums the diffs
/// into absolute boundary times, pads the boundary list with ±infinity and
/// selects the abbreviation/offset pair for each transition index.
///
/// Wire values are minutes; boundaries and stored offsets come out in
/// milliseconds, with offsets rounded to the nearest integer.
pub(crate) fn assemble(raw: &RawPackedFields<'_>) -> Result<Vec<Span>, StructuralError> {
    // the validator guarantees diffs.len() + 1 == indices.len()
    let mut boundaries = Vec::with_capacity(raw.indices.len() + 1);
    boundaries.push(f64::NEG_INFINITY);

    let mut at = 0.0_f64;
    for &diff in &raw.diffs {
        at += diff * conv::MILLIS_PER_MINUTE_F64;
        boundaries.push(at);
    }

    boundaries.push(f64::INFINITY);

    // a zero or negative diff would produce an empty or reversed span and
    // break the lookup invariant
    for (transition, pair) in boundaries.windows(2).enumerate() {
        if pair[0] >= pair[1] {
            return Err(StructuralError::NonMonotonicBoundary { transition });
        }
    }

    let spans = raw
        .indices
        .iter()
        .enumerate()
        .map(|(i, &index)| Span {
            from: boundaries[i],
            until: boundaries[i + 1],
            abbreviation: raw.abbreviations[index].to_owned(),
            offset: (raw.offsets[index] * conv::MILLIS_PER_MINUTE_F64).round() as i64,
        })
        .collect();

    Ok(spans)
}
