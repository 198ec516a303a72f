#![deny(clippy::suspicious, clippy::complexity, clippy::perf, clippy::style)]
#![deny(missing_docs)]
//! Decoder for the packed zone format: a compact, pipe-delimited text
//! encoding of a timezone's historical UTC-offset transitions.
//!
//! A packed zone string carries five fields (name, abbreviations, offsets,
//! transition indices and transition diffs), with the numeric fields written
//! as base-60 numerals. [`TimeZone::unpack`] decodes one into an immutable
//! [`TimeZone`] value whose [`Span`] table covers every instant from
//! `-infinity` to `+infinity`, and which answers point-in-time queries:
//! which UTC offset and abbreviation applied at a given instant.
//!
//! Instants are `f64` milliseconds since the Unix epoch.
//!
//! ```
//! use packed_tz::TimeZone;
//!
//! let tz = TimeZone::unpack("Test/Zone|STD DST|10 20|010|30 30").unwrap();
//!
//! assert_eq!(tz.name(), "Test/Zone");
//! assert_eq!(tz.abbreviation_at(0.0), "STD");
//! assert_eq!(tz.offset_millis(0.0), 60 * 60_000);
//! ```
//!
//! Decoding is a pure function: no I/O, no shared state, and a failed
//! decode fails identically on retry. [`TimeZone`] values are immutable
//! after construction and can be queried from any number of threads.

mod base60;
mod de;
pub mod error;
mod parse;
mod ser;
mod span;
mod timezone;

pub use crate::error::Error;
pub use crate::span::Span;
pub use crate::timezone::TimeZone;

/// Conversion constants between the packed format's wire unit (minutes)
/// and the stored unit (milliseconds).
pub(crate) mod conv {
    /// Number of milliseconds per minute.
    pub(crate) const MILLIS_PER_MINUTE: i64 = 60_000;

    /// Number of milliseconds per minute, in [`f64`] form.
    pub(crate) const MILLIS_PER_MINUTE_F64: f64 = 60_000.0;
}
