//! Temporal codecs and the lexer they share.
//!
//! Input is split into an optional date portion, an optional time portion and
//! an optional trailing offset before each piece goes through chrono. Only
//! the lexer decides where whitespace may appear, so chrono never sees any.
mod date;
mod datetime;
mod time;
mod timestamp;

use crate::error::{ParseError, ParseTarget};
use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, SubsecRound, Utc};

// re-exports
pub use date::DateCodec;
pub use datetime::DateTimeCodec;
pub use time::TimeCodec;
pub use timestamp::TimestampCodec;

///
/// CONSTANTS
///

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Fractional digits kept on parse and emitted on format.
const SUBSEC_DIGITS: u16 = 6;

pub(super) const MICROS_PER_SECOND: i64 = 1_000_000;
pub(super) const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
pub(super) const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

///
/// Lexed
///
/// Raw slices of a temporal literal; nothing here is validated yet.
///

#[derive(Debug, Default, Eq, PartialEq)]
struct Lexed<'a> {
    date: Option<&'a str>,
    time: Option<&'a str>,
    offset: Option<&'a str>,
}

///
/// Lexer
///

struct Lexer<'a> {
    input: &'a str,
    target: ParseTarget,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str, target: ParseTarget) -> Self {
        Self { input, target }
    }

    fn error(&self, reason: impl Into<String>) -> ParseError {
        ParseError::new(self.target, self.input, reason)
    }

    /// Split `date[(T| )time][[ ]offset]`. The year may carry a sign, as
    /// chrono writes years outside 0000..=9999.
    fn date_led(&self) -> Result<Lexed<'a>, ParseError> {
        let sign = usize::from(self.input.starts_with('+'));
        let (body, _) = take_while(&self.input[sign..], |c| c.is_ascii_digit() || c == '-');
        if body.is_empty() {
            return Err(self.error("expected a date of the form yyyy-M-d"));
        }
        let (date, rest) = self.input.split_at(sign + body.len());

        let (time, rest) = match rest.as_bytes() {
            [b'T' | b' ', next, ..] if next.is_ascii_digit() => {
                let (time, rest) = take_while(&rest[1..], is_time_char);
                (Some(time), rest)
            }
            _ => (None, rest),
        };

        Ok(Lexed {
            date: Some(date),
            time,
            offset: self.offset(rest)?,
        })
    }

    /// Split `time[[ ]offset]`.
    fn time_led(&self) -> Result<Lexed<'a>, ParseError> {
        let (time, rest) = take_while(self.input, is_time_char);
        if time.is_empty() {
            return Err(self.error("expected a time of the form HH:mm:ss"));
        }

        Ok(Lexed {
            date: None,
            time: Some(time),
            offset: self.offset(rest)?,
        })
    }

    fn offset(&self, rest: &'a str) -> Result<Option<&'a str>, ParseError> {
        if rest.is_empty() {
            return Ok(None);
        }

        let offset = rest.strip_prefix(' ').unwrap_or(rest);
        if offset.is_empty() || offset.starts_with(char::is_whitespace) {
            return Err(self.error("unexpected whitespace"));
        }

        Ok(Some(offset))
    }
}

fn is_time_char(c: char) -> bool {
    c.is_ascii_digit() || c == ':' || c == '.'
}

fn take_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}

///
/// COMPONENT PARSERS
///

fn parse_date(lexer: &Lexer<'_>, date: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|err| lexer.error(format!("invalid date portion '{date}': {err}")))
}

fn parse_time(lexer: &Lexer<'_>, time: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map(|t| t.trunc_subsecs(SUBSEC_DIGITS))
        .map_err(|err| lexer.error(format!("invalid time portion '{time}': {err}")))
}

/// Accepts `Z`, `UTC`, `±HH`, `±HHMM` and `±HH:MM`.
fn parse_offset(lexer: &Lexer<'_>, offset: &str) -> Result<FixedOffset, ParseError> {
    if offset == "Z" || offset == "UTC" {
        return Ok(Utc.fix());
    }

    let invalid = || lexer.error(format!("invalid offset '{offset}'"));

    let (sign, body) = match offset.as_bytes().first() {
        Some(b'+') => (1, &offset[1..]),
        Some(b'-') => (-1, &offset[1..]),
        _ => return Err(invalid()),
    };
    if !body.is_ascii() {
        return Err(invalid());
    }

    let (hours, minutes) = match body.len() {
        2 => (body, "00"),
        4 => body.split_at(2),
        5 if body.as_bytes()[2] == b':' => (&body[..2], &body[3..]),
        _ => return Err(invalid()),
    };

    let digits = |s: &str| -> Option<i32> {
        if s.bytes().all(|b| b.is_ascii_digit()) {
            s.parse().ok()
        } else {
            None
        }
    };

    let (Some(hours), Some(minutes)) = (digits(hours), digits(minutes)) else {
        return Err(invalid());
    };
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60)).ok_or_else(invalid)
}

fn reject_offset(lexer: &Lexer<'_>, lexed: &Lexed<'_>) -> Result<(), ParseError> {
    match lexed.offset {
        Some(offset) => Err(lexer.error(format!(
            "unexpected trailing '{offset}'; this type carries no offset"
        ))),
        None => Ok(()),
    }
}
