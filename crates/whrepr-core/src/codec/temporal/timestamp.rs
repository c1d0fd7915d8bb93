use super::{Lexer, parse_date, parse_offset, parse_time};
use crate::{
    codec::{LogicalType, RawValue, WireCodec},
    error::{ParseError, ParseTarget},
};
use chrono::{DateTime, NaiveTime, Utc};

///
/// TimestampCodec
///
/// TIMESTAMP: an absolute instant, always rendered in UTC as
/// `yyyy-MM-ddTHH:mm:ss.SSSSSS +00:00`.
///
/// Input may use `T` or a space before the time, may omit the time or the
/// fraction, and may carry an offset with or without a leading space
/// (`+HH:MM`, `+HHMM`, `+HH`, `Z`, `UTC`). A missing offset means UTC.
///
/// Raw integers are microseconds since the Unix epoch.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TimestampCodec;

impl TimestampCodec {
    const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.6f +00:00";

    /// Microseconds since the Unix epoch; the inverse of the raw entry point.
    #[must_use]
    pub fn to_micros(value: &DateTime<Utc>) -> i64 {
        value.timestamp_micros()
    }

    /// Instant for a count of microseconds since the Unix epoch.
    pub fn from_micros(micros: i64) -> Result<DateTime<Utc>, ParseError> {
        DateTime::from_timestamp_micros(micros).ok_or_else(|| {
            ParseError::new(
                ParseTarget::Timestamp,
                micros.to_string(),
                "microseconds since epoch out of range",
            )
        })
    }
}

impl WireCodec for TimestampCodec {
    const LOGICAL_TYPE: LogicalType = LogicalType::Timestamp;

    type Value = DateTime<Utc>;
    type Error = ParseError;

    fn format(value: &Self::Value) -> String {
        value.format(Self::FORMAT).to_string()
    }

    fn parse(text: &str) -> Result<Self::Value, Self::Error> {
        let lexer = Lexer::new(text, ParseTarget::Timestamp);
        let lexed = lexer.date_led()?;

        let date = parse_date(&lexer, lexed.date.unwrap_or_default())?;
        let time = match lexed.time {
            Some(time) => parse_time(&lexer, time)?,
            None => NaiveTime::MIN,
        };

        let local = date.and_time(time);
        let instant = match lexed.offset {
            Some(offset) => {
                let offset = parse_offset(&lexer, offset)?;
                local
                    .and_local_timezone(offset)
                    .single()
                    .ok_or_else(|| lexer.error("instant out of range"))?
                    .with_timezone(&Utc)
            }
            None => local.and_utc(),
        };

        Ok(instant)
    }

    fn parse_raw(raw: RawValue<'_>) -> Result<Self::Value, Self::Error> {
        match raw {
            RawValue::Text(text) => Self::parse(text),
            RawValue::Int(micros) => Self::from_micros(micros),
            RawValue::Bytes(_) => Err(ParseError::new(
                ParseTarget::Timestamp,
                raw.describe(),
                "expected text or microseconds since epoch",
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
    use chrono::{TimeZone, Timelike};

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micros: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .unwrap()
            .with_nanosecond(micros * 1_000)
            .unwrap()
    }

    #[test]
    fn format_is_utc_with_space_before_offset() {
        let ts = instant(2021, 1, 5, 10, 0, 0, 120);

        assert_eq!(
            TimestampCodec::format(&ts),
            "2021-01-05T10:00:00.000120 +00:00"
        );
    }

    #[test]
    fn offset_styles_are_equivalent() {
        let spaced = TimestampCodec::parse("2021-01-05T10:00:00.000000 +0000").unwrap();
        let packed = TimestampCodec::parse("2021-01-05T10:00:00.000000+0000").unwrap();
        let colon = TimestampCodec::parse("2021-01-05T10:00:00.000000 +00:00").unwrap();
        let zulu = TimestampCodec::parse("2021-01-05T10:00:00Z").unwrap();
        let named = TimestampCodec::parse("2021-01-05 10:00:00 UTC").unwrap();

        assert_eq!(spaced, packed);
        assert_eq!(spaced, colon);
        assert_eq!(spaced, zulu);
        assert_eq!(spaced, named);
        assert_eq!(spaced, instant(2021, 1, 5, 10, 0, 0, 0));
    }

    #[test]
    fn non_utc_offsets_are_normalized() {
        let ts = TimestampCodec::parse("2021-01-05T10:00:00-08:00").unwrap();

        assert_eq!(ts, instant(2021, 1, 5, 18, 0, 0, 0));
        assert_eq!(
            TimestampCodec::format(&ts),
            "2021-01-05T18:00:00.000000 +00:00"
        );
    }

    #[test]
    fn missing_time_and_offset_default_to_utc_midnight() {
        let ts = TimestampCodec::parse("2021-1-5").unwrap();
        assert_eq!(ts, instant(2021, 1, 5, 0, 0, 0, 0));
    }

    #[test]
    fn fraction_beyond_micros_is_truncated() {
        let ts = TimestampCodec::parse("2021-01-05 10:00:00.123456789").unwrap();
        assert_eq!(ts, instant(2021, 1, 5, 10, 0, 0, 123_456));
    }

    #[test]
    fn malformed_input_is_rejected() {
        for input in [
            "",
            "yesterday",
            "2021-13-05T10:00:00",
            "2021-01-05T25:00:00",
            "2021-01-05T10:00:00 +25:00",
            "2021-01-05T10:00:00  +00:00",
            "2021-01-05T10:00:00 PST",
            " 2021-01-05",
        ] {
            let err = TimestampCodec::parse(input).unwrap_err();
            assert_eq!(err.target, ParseTarget::Timestamp, "input {input:?}");
        }
    }

    #[test]
    fn raw_integer_is_micros_since_epoch() {
        let ts = TimestampCodec::parse_raw(RawValue::Int(1_609_841_400_000_001)).unwrap();

        assert_eq!(ts, instant(2021, 1, 5, 10, 10, 0, 1));
        assert_eq!(TimestampCodec::to_micros(&ts), 1_609_841_400_000_001);
    }

    #[test]
    fn raw_text_delegates_and_raw_bytes_fail() {
        let text = TimestampCodec::parse_raw(RawValue::Text("1970-01-01T00:00:00")).unwrap();
        assert_eq!(text, DateTime::from_timestamp(0, 0).unwrap());

        assert!(TimestampCodec::parse_raw(RawValue::Bytes(&[0, 1])).is_err());
    }
}
