//! The decoded [`TimeZone`] value and its point-in-time queries.

use std::fmt;
use std::str::FromStr;

use crate::conv;
use crate::error::Error;
use crate::parse;
use crate::span::{self, Span};

/// A timezone decoded from its packed representation: a name plus an
/// ordered, non-empty table of [`Span`]s covering every instant from
/// `-infinity` to `+infinity`.
///
/// Constructed once by [`TimeZone::unpack`] and immutable afterwards, so
/// values can be queried from any number of threads without coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZone {
    name: String,
    spans: Vec<Span>,
}

impl TimeZone {
    /// Decodes a packed zone string. This is the sole way to construct a
    /// [`TimeZone`].
    ///
    /// ```
    /// # use packed_tz::TimeZone;
    /// let tz = TimeZone::unpack("America/Phoenix|MST|70|0|").unwrap();
    ///
    /// assert_eq!(tz.name(), "America/Phoenix");
    /// assert_eq!(tz.abbreviation_at(0.0), "MST");
    /// ```
    pub fn unpack(packed: &str) -> Result<Self, Error> {
        let raw = parse::parse(packed)?;
        let spans = span::assemble(&raw)?;

        tracing::trace!(message = "unpacked zone", zone = raw.name, spans = spans.len());

        Ok(Self {
            name: raw.name.to_owned(),
            spans,
        })
    }

    /// The zone name, as written in the packed data.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the same zone under a different name. The span table is
    /// unchanged.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The span table, ordered by time. Always non-empty, contiguous at
    /// every shared boundary, and bounded by ±infinity.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the unique span satisfying `from <= instant < until`.
    ///
    /// The table is sorted by `from`, so this is a binary search; some
    /// zones carry hundreds of spans.
    ///
    /// # Panics
    ///
    /// Panics if no span contains 'instant'. Decoding always produces a
    /// boundary-complete table, so this is reachable only with a NaN
    /// instant or a table whose construction invariants were broken, both
    /// of which are bugs rather than input errors.
    pub fn find_span(&self, instant: f64) -> &Span {
        let idx = self.spans.partition_point(|span| span.from() <= instant);

        match idx.checked_sub(1).map(|i| &self.spans[i]) {
            Some(span) if span.contains(instant) => span,
            _ => panic!("span table invariant broken: no span contains {instant}"),
        }
    }

    /// The offset to subtract from UTC at 'instant', in milliseconds.
    pub fn offset_millis(&self, instant: f64) -> i64 {
        self.find_span(instant).offset_millis()
    }

    /// The abbreviation in effect at 'instant'.
    pub fn abbreviation_at(&self, instant: f64) -> &str {
        self.find_span(instant).abbreviation()
    }

    /// Formats the offset at 'instant' as `±hh:mm`.
    ///
    /// The sign is inverted relative to [`offset_millis`]: the packed
    /// format stores the offset to subtract from UTC, while the ISO string
    /// reports the offset from UTC. A zone storing 5 hours (e.g. US
    /// Eastern standard time) prints as `-05:00`.
    ///
    /// ```
    /// # use packed_tz::TimeZone;
    /// let tz = TimeZone::unpack("America/Phoenix|MST|70|0|").unwrap();
    ///
    /// assert_eq!(tz.iso_offset_string(0.0), "-07:00");
    /// ```
    ///
    /// [`offset_millis`]: [`TimeZone::offset_millis`]
    pub fn iso_offset_string(&self, instant: f64) -> String {
        let total_minutes = self.offset_millis(instant) / conv::MILLIS_PER_MINUTE;

        let sign = if total_minutes <= 0 { '+' } else { '-' };
        let hours = total_minutes.abs() / 60;
        let minutes = total_minutes.abs() % 60;

        format!("{sign}{hours:02}:{minutes:02}")
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}

impl FromStr for TimeZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::unpack(s)
    }
}
