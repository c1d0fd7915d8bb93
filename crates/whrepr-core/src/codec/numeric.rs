use crate::{
    codec::{LogicalType, RawValue, WireCodec},
    error::NumericError,
    types::Numeric,
};

///
/// NumericCodec
///
/// NUMERIC: exact decimal text with at most 38 significant digits and 9
/// fractional digits. Raw bytes are the fixed-point two's-complement form at
/// scale 9; raw integers are read as whole numbers.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NumericCodec;

impl WireCodec for NumericCodec {
    const LOGICAL_TYPE: LogicalType = LogicalType::Numeric;

    type Value = Numeric;
    type Error = NumericError;

    fn format(value: &Self::Value) -> String {
        value.to_string()
    }

    fn parse(text: &str) -> Result<Self::Value, Self::Error> {
        text.parse()
    }

    fn parse_raw(raw: RawValue<'_>) -> Result<Self::Value, Self::Error> {
        match raw {
            RawValue::Text(text) => Self::parse(text),
            RawValue::Int(n) => Ok(Numeric::from(n)),
            RawValue::Bytes(bytes) => Numeric::from_fixed_bytes(bytes),
        }
    }
}
