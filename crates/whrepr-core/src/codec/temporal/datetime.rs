use super::{Lexer, parse_date, parse_time, reject_offset};
use crate::{
    codec::{LogicalType, RawValue, WireCodec},
    error::{ParseError, ParseTarget},
};
use chrono::{NaiveDateTime, NaiveTime};

///
/// DateTimeCodec
///
/// DATETIME: a civil date and time with no offset, rendered as
/// `yyyy-MM-ddTHH:mm:ss.SSSSSS`. A missing time portion means midnight.
/// Only text is accepted on the raw entry point.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DateTimeCodec;

impl DateTimeCodec {
    const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.6f";
}

impl WireCodec for DateTimeCodec {
    const LOGICAL_TYPE: LogicalType = LogicalType::DateTime;

    type Value = NaiveDateTime;
    type Error = ParseError;

    fn format(value: &Self::Value) -> String {
        value.format(Self::FORMAT).to_string()
    }

    fn parse(text: &str) -> Result<Self::Value, Self::Error> {
        let lexer = Lexer::new(text, ParseTarget::DateTime);
        let lexed = lexer.date_led()?;
        reject_offset(&lexer, &lexed)?;

        let date = parse_date(&lexer, lexed.date.unwrap_or_default())?;
        let time = match lexed.time {
            Some(time) => parse_time(&lexer, time)?,
            None => NaiveTime::MIN,
        };

        Ok(date.and_time(time))
    }

    fn parse_raw(raw: RawValue<'_>) -> Result<Self::Value, Self::Error> {
        match raw {
            RawValue::Text(text) => Self::parse(text),
            RawValue::Int(_) | RawValue::Bytes(_) => Err(ParseError::new(
                ParseTarget::DateTime,
                raw.describe(),
                format!("expected text, got {}", raw.shape()),
            )),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, micro)
            .unwrap()
    }

    #[test]
    fn format_has_no_offset() {
        assert_eq!(
            DateTimeCodec::format(&civil(2021, 1, 5, 10, 0, 0, 42)),
            "2021-01-05T10:00:00.000042"
        );
    }

    #[test]
    fn space_and_t_delimiters_are_equivalent() {
        let t = DateTimeCodec::parse("2021-01-05T10:00:00.5").unwrap();
        let space = DateTimeCodec::parse("2021-1-5 10:00:00.500000").unwrap();

        assert_eq!(t, space);
        assert_eq!(t, civil(2021, 1, 5, 10, 0, 0, 500_000));
    }

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(
            DateTimeCodec::parse("2021-01-05").unwrap(),
            civil(2021, 1, 5, 0, 0, 0, 0)
        );
    }

    #[test]
    fn offsets_are_rejected() {
        assert!(DateTimeCodec::parse("2021-01-05T10:00:00Z").is_err());
        assert!(DateTimeCodec::parse("2021-01-05T10:00:00 +00:00").is_err());
        assert!(DateTimeCodec::parse("2021-01-05T10:00:00+0000").is_err());
    }

    #[test]
    fn raw_integers_are_not_a_datetime_encoding() {
        let err = DateTimeCodec::parse_raw(RawValue::Int(0)).unwrap_err();

        assert_eq!(err.target, ParseTarget::DateTime);
        assert!(err.reason.contains("integer"));
    }
}
