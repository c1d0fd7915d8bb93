use super::{Lexer, MICROS_PER_DAY, MICROS_PER_SECOND, parse_time, reject_offset};
use crate::{
    codec::{LogicalType, RawValue, WireCodec},
    error::{ParseError, ParseTarget},
};
use chrono::{NaiveTime, Timelike};

///
/// TimeCodec
///
/// TIME: a wall-clock time of day with no date and no offset, rendered as
/// `HH:mm:ss.SSSSSS`. Raw integers are microseconds since midnight.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TimeCodec;

impl TimeCodec {
    const FORMAT: &'static str = "%H:%M:%S%.6f";

    /// Microseconds since midnight.
    #[must_use]
    pub fn to_micros_of_day(value: &NaiveTime) -> i64 {
        i64::from(value.num_seconds_from_midnight()) * MICROS_PER_SECOND
            + i64::from(value.nanosecond() / 1_000)
    }

    pub fn from_micros_of_day(micros: i64) -> Result<NaiveTime, ParseError> {
        let out_of_range = || {
            ParseError::new(
                ParseTarget::Time,
                micros.to_string(),
                "microseconds of day must be within [0, 86400000000)",
            )
        };

        if !(0..MICROS_PER_DAY).contains(&micros) {
            return Err(out_of_range());
        }

        let secs = u32::try_from(micros / MICROS_PER_SECOND).map_err(|_| out_of_range())?;
        let nanos = u32::try_from(micros % MICROS_PER_SECOND * 1_000).map_err(|_| out_of_range())?;

        NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).ok_or_else(out_of_range)
    }
}

impl WireCodec for TimeCodec {
    const LOGICAL_TYPE: LogicalType = LogicalType::Time;

    type Value = NaiveTime;
    type Error = ParseError;

    fn format(value: &Self::Value) -> String {
        value.format(Self::FORMAT).to_string()
    }

    fn parse(text: &str) -> Result<Self::Value, Self::Error> {
        let lexer = Lexer::new(text, ParseTarget::Time);
        let lexed = lexer.time_led()?;
        reject_offset(&lexer, &lexed)?;

        parse_time(&lexer, lexed.time.unwrap_or_default())
    }

    fn parse_raw(raw: RawValue<'_>) -> Result<Self::Value, Self::Error> {
        match raw {
            RawValue::Text(text) => Self::parse(text),
            RawValue::Int(micros) => Self::from_micros_of_day(micros),
            RawValue::Bytes(_) => Err(ParseError::new(
                ParseTarget::Time,
                raw.describe(),
                "expected text or microseconds of day",
            )),
        }
    }
}

///
/// TESTS
///
