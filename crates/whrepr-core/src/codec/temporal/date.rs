use super::{Lexer, UNIX_EPOCH_DAYS_FROM_CE, parse_date, parse_time, reject_offset};
use crate::{
    codec::{LogicalType, RawValue, WireCodec},
    error::{ParseError, ParseTarget},
};
use chrono::{Datelike, NaiveDate};

///
/// DateCodec
///
/// DATE: a calendar date rendered as `yyyy-MM-dd`. Input accepts 1- or
/// 2-digit month and day, and a trailing time portion that is validated and
/// then dropped. Raw integers are days since the Unix epoch.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DateCodec;

impl DateCodec {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Days since 1970-01-01.
    #[must_use]
    pub fn to_epoch_days(value: &NaiveDate) -> i64 {
        i64::from(value.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
    }

    pub fn from_epoch_days(days: i64) -> Result<NaiveDate, ParseError> {
        days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(|ce| i32::try_from(ce).ok())
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| {
                ParseError::new(
                    ParseTarget::Date,
                    days.to_string(),
                    "days since epoch out of range",
                )
            })
    }
}

impl WireCodec for DateCodec {
    const LOGICAL_TYPE: LogicalType = LogicalType::Date;

    type Value = NaiveDate;
    type Error = ParseError;

    fn format(value: &Self::Value) -> String {
        value.format(Self::FORMAT).to_string()
    }

    fn parse(text: &str) -> Result<Self::Value, Self::Error> {
        let lexer = Lexer::new(text, ParseTarget::Date);
        let lexed = lexer.date_led()?;
        reject_offset(&lexer, &lexed)?;

        if let Some(time) = lexed.time {
            parse_time(&lexer, time)?;
        }

        parse_date(&lexer, lexed.date.unwrap_or_default())
    }

    fn parse_raw(raw: RawValue<'_>) -> Result<Self::Value, Self::Error> {
        match raw {
            RawValue::Text(text) => Self::parse(text),
            RawValue::Int(days) => Self::from_epoch_days(days),
            RawValue::Bytes(_) => Err(ParseError::new(
                ParseTarget::Date,
                raw.describe(),
                "expected text or days since epoch",
            )),
        }
    }
}

///
/// TESTS
///
