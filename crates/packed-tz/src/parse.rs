//! Parsing + validation for the packed zone grammar.
//!
//! A packed zone string carries exactly five fields separated by `|`:
//!
//! ```text
//! name|abbreviations|offsets|indices|diffs
//! ```
//!
//! - `name`: one or more characters, anything but `|`.
//! - `abbreviations`: one or more tokens separated by single spaces.
//! - `offsets`: one or more base-60 numerals separated by single spaces,
//!   in minutes.
//! - `indices`: one or more decimal digits, one per transition, with no
//!   separator.
//! - `diffs`: zero or more base-60 numerals separated by single spaces, in
//!   minutes; empty only when it ends the input (a zone with no
//!   transitions).
//!
//! Fields are consumed strictly left to right with no whitespace
//! tolerance. Every list follows the same shape: parse one element, then
//! repeatedly attempt "space + element", restoring the cursor on the first
//! attempt that fails so the `|` check after the field sees the unconsumed
//! separator.

use crate::base60::{self, Sign};
use crate::error::{Error, Field, GrammarError, StructuralError};

/// Parsed-but-unassembled fields of a packed zone string, borrowing from
/// the input. Offsets and diffs are in minutes, as written on the wire.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawPackedFields<'a> {
    pub(crate) name: &'a str,
    pub(crate) abbreviations: Vec<&'a str>,
    pub(crate) offsets: Vec<f64>,
    pub(crate) indices: Vec<usize>,
    pub(crate) diffs: Vec<f64>,
}

/// Parses and validates a full packed zone string.
pub(crate) fn parse(input: &str) -> Result<RawPackedFields<'_>, Error> {
    let mut cursor = Cursor::new(input);

    let name = cursor.parse_name()?;
    cursor.expect_separator(Field::Name)?;

    let abbreviations = cursor.parse_abbreviations()?;
    cursor.expect_separator(Field::Abbreviations)?;

    let offsets = cursor.parse_numbers(Field::Offsets)?;
    cursor.expect_separator(Field::Offsets)?;

    let indices = cursor.parse_indices()?;
    cursor.expect_separator(Field::Indices)?;

    let diffs = cursor.parse_diffs()?;
    cursor.expect_end()?;

    let raw = RawPackedFields {
        name,
        abbreviations,
        offsets,
        indices,
        diffs,
    };

    validate(&raw)?;

    Ok(raw)
}

/// Cross-field invariant checks, run after parsing and before assembly.
/// These are format invariants of the packed encoding; any violation fails
/// the whole decode.
fn validate(raw: &RawPackedFields<'_>) -> Result<(), StructuralError> {
    if raw.abbreviations.len() != raw.offsets.len() {
        return Err(StructuralError::PairCountMismatch {
            abbreviations: raw.abbreviations.len(),
            offsets: raw.offsets.len(),
        });
    }

    // the grammar guarantees at least one index, so the max is defined
    let max = raw.indices.iter().copied().max().unwrap_or(0);
    if max >= raw.abbreviations.len() {
        return Err(StructuralError::IndexOutOfRange {
            index: max,
            pairs: raw.abbreviations.len(),
        });
    }

    if raw.diffs.len() + 1 != raw.indices.len() {
        return Err(StructuralError::DiffCount {
            diffs: raw.diffs.len(),
            indices: raw.indices.len(),
        });
    }

    Ok(())
}

/// Byte-position scanner over a packed string.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes the leading run of characters matching 'predicate',
    /// returning the (possibly empty) run.
    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|ch: char| !predicate(ch))
            .unwrap_or(rest.len());

        self.pos += len;
        &rest[..len]
    }

    /// Consumes 'ch' if it is next, returning whether it was.
    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect_separator(&mut self, after: Field) -> Result<(), GrammarError> {
        if self.eat('|') {
            Ok(())
        } else {
            Err(GrammarError::MissingSeparator {
                field: after,
                position: self.pos,
            })
        }
    }

    fn expect_end(&self) -> Result<(), GrammarError> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(GrammarError::TrailingInput {
                field: Field::Diffs,
                position: self.pos,
            })
        }
    }

    // --------------------------------- fields --------------------------------- //

    fn parse_name(&mut self) -> Result<&'a str, GrammarError> {
        let start = self.pos;
        let name = self.take_while(|ch| ch != '|');

        if name.is_empty() {
            Err(GrammarError::EmptyElement {
                field: Field::Name,
                position: start,
            })
        } else {
            Ok(name)
        }
    }

    fn parse_abbreviation(&mut self) -> Result<&'a str, GrammarError> {
        let start = self.pos;
        let abbreviation = self.take_while(|ch| ch != ' ' && ch != '|');

        if abbreviation.is_empty() {
            Err(GrammarError::EmptyElement {
                field: Field::Abbreviations,
                position: start,
            })
        } else {
            Ok(abbreviation)
        }
    }

    fn parse_abbreviations(&mut self) -> Result<Vec<&'a str>, GrammarError> {
        self.parse_list(Self::parse_abbreviation)
    }

    /// Parses one `[sign]digits[.digits]` base-60 numeral, in minutes.
    fn parse_number(&mut self, field: Field) -> Result<f64, GrammarError> {
        let start = self.pos;

        let sign = if self.eat('-') {
            Sign::Negative
        } else {
            Sign::Positive
        };

        let whole = self.take_while(base60::is_digit);
        let frac = if self.eat('.') {
            self.take_while(base60::is_digit)
        } else {
            ""
        };

        if whole.is_empty() && frac.is_empty() {
            // a bare sign (or nothing at all) is a missing number, not zero
            self.pos = start;
            return Err(GrammarError::EmptyNumber {
                field,
                position: start,
            });
        }

        Ok(base60::decode(sign, whole, frac))
    }

    fn parse_numbers(&mut self, field: Field) -> Result<Vec<f64>, GrammarError> {
        self.parse_list(|cursor| cursor.parse_number(field))
    }

    fn parse_indices(&mut self) -> Result<Vec<usize>, GrammarError> {
        let start = self.pos;
        let digits = self.take_while(|ch| ch.is_ascii_digit());

        if digits.is_empty() {
            return Err(GrammarError::EmptyElement {
                field: Field::Indices,
                position: start,
            });
        }

        Ok(digits.bytes().map(|byte| (byte - b'0') as usize).collect())
    }

    /// The diffs field may be empty, but only when it ends the input.
    fn parse_diffs(&mut self) -> Result<Vec<f64>, GrammarError> {
        if self.pos == self.input.len() {
            return Ok(Vec::new());
        }

        self.parse_numbers(Field::Diffs)
    }

    /// Parses one element, then repeatedly attempts "space + element",
    /// restoring the cursor to before the space on the first attempt that
    /// fails.
    fn parse_list<T>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Result<T, GrammarError>,
    ) -> Result<Vec<T>, GrammarError> {
        let mut out = vec![element(self)?];

        loop {
            let checkpoint = self.pos;

            if !self.eat(' ') {
                break;
            }

            match element(self) {
                Ok(item) => out.push(item),
                Err(_) => {
                    self.pos = checkpoint;
                    break;
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{RawPackedFields, parse};
    use crate::error::{Error, Field, GrammarError, StructuralError};

    fn parse_ok(input: &str) -> RawPackedFields<'_> {
        parse(input).unwrap_or_else(|err| panic!("'{input}' failed to parse: {err}"))
    }

    fn grammar_err(input: &str) -> GrammarError {
        match parse(input).unwrap_err() {
            Error::Grammar(err) => err,
            Error::Structural(err) => panic!("expected a grammar error, got: {err}"),
        }
    }

    fn structural_err(input: &str) -> StructuralError {
        match parse(input).unwrap_err() {
            Error::Structural(err) => err,
            Error::Grammar(err) => panic!("expected a structural error, got: {err}"),
        }
    }

    #[test]
    fn test_full_zone() {
        let raw = parse_ok("Test/Zone|STD DST|10 -u|0101|2g 2g 2g");

        assert_eq!(raw.name, "Test/Zone");
        assert_eq!(raw.abbreviations, ["STD", "DST"]);
        assert_eq!(raw.offsets, [60.0, -30.0]);
        assert_eq!(raw.indices, [0, 1, 0, 1]);
        assert_eq!(raw.diffs, [136.0, 136.0, 136.0]);
    }

    #[test]
    fn test_no_transition_zone() {
        // empty diffs immediately followed by end of input
        let raw = parse_ok("Test|STD|-60|0|");

        assert_eq!(raw.offsets, [-360.0]);
        assert_eq!(raw.indices, [0]);
        assert!(raw.diffs.is_empty());
    }

    #[test]
    fn test_fractional_offset() {
        let raw = parse_ok("Test|STD|1.U|0|");
        assert_eq!(raw.offsets, [1.0 + 56.0 / 60.0]);

        // a trailing '.' with no fractional digits still reads as "1"
        let raw = parse_ok("Test|STD|1.|0|");
        assert_eq!(raw.offsets, [1.0]);
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            grammar_err("|STD|0|0|"),
            GrammarError::EmptyElement {
                field: Field::Name,
                position: 0,
            }
        );

        assert_eq!(
            grammar_err(""),
            GrammarError::EmptyElement {
                field: Field::Name,
                position: 0,
            }
        );
    }

    #[test]
    fn test_missing_separators() {
        assert_eq!(
            grammar_err("Test"),
            GrammarError::MissingSeparator {
                field: Field::Name,
                position: 4,
            }
        );

        assert_eq!(
            grammar_err("Test|STD"),
            GrammarError::MissingSeparator {
                field: Field::Abbreviations,
                position: 8,
            }
        );

        // '!' is not a base-60 digit, so the offsets list stops before it
        assert_eq!(
            grammar_err("Test|STD|0!|0|"),
            GrammarError::MissingSeparator {
                field: Field::Offsets,
                position: 10,
            }
        );
    }

    #[test]
    fn test_failed_list_attempt_backtracks() {
        // "0 -" starts a second offset that never materializes. The failed
        // attempt must not consume the space, so the error points at it.
        assert_eq!(
            grammar_err("Test|STD|0 -|0|"),
            GrammarError::MissingSeparator {
                field: Field::Offsets,
                position: 10,
            }
        );
    }

    #[test]
    fn test_empty_offsets() {
        assert_eq!(
            grammar_err("Test|STD||0|"),
            GrammarError::EmptyNumber {
                field: Field::Offsets,
                position: 9,
            }
        );

        // a bare sign is a missing number, not zero
        assert_eq!(
            grammar_err("Test|STD|-|0|"),
            GrammarError::EmptyNumber {
                field: Field::Offsets,
                position: 9,
            }
        );
    }

    #[test]
    fn test_indices_are_single_decimal_digits() {
        assert_eq!(
            grammar_err("Test|STD|0|x|"),
            GrammarError::EmptyElement {
                field: Field::Indices,
                position: 11,
            }
        );

        // indices are not space separated
        assert_eq!(
            grammar_err("Test|STD DST|0 1|0 1|"),
            GrammarError::MissingSeparator {
                field: Field::Indices,
                position: 18,
            }
        );
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            grammar_err("Test|STD|0|0|5|extra"),
            GrammarError::TrailingInput {
                field: Field::Diffs,
                position: 14,
            }
        );
    }

    #[test]
    fn test_pair_count_mismatch() {
        // 1 abbreviation against 2 offsets is structural, never grammatical
        assert_eq!(
            structural_err("Test|STD|-60 -120|00|"),
            StructuralError::PairCountMismatch {
                abbreviations: 1,
                offsets: 2,
            }
        );
    }

    #[test]
    fn test_index_out_of_range() {
        assert_eq!(
            structural_err("Test|STD|-60|9|"),
            StructuralError::IndexOutOfRange { index: 9, pairs: 1 }
        );
    }

    #[test]
    fn test_diff_count_mismatch() {
        // two transitions require exactly one diff
        assert_eq!(
            structural_err("Test|STD|1|00|"),
            StructuralError::DiffCount {
                diffs: 0,
                indices: 2,
            }
        );

        assert_eq!(
            structural_err("Test|STD|1|0|10 10"),
            StructuralError::DiffCount {
                diffs: 2,
                indices: 1,
            }
        );
    }
}
