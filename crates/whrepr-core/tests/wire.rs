//! End-to-end checks across codecs, sources, the write channel and config.
use chrono::{NaiveDate, TimeZone, Utc};
use whrepr_core::{
    codec::{DateCodec, DateTimeCodec, NumericCodec, RawValue, TimeCodec, TimestampCodec, WireCodec},
    config::WriteConfig,
    error::{NumericError, ParseTarget},
    row::TableRow,
    source::{Source, Table, TableReference},
    table_row,
    types::Numeric,
    write::{
        Disabled, Enabled, ErrorProto, ExecutionContext, ExtendedErrorInfo, InsertErrors,
        InsertFailure, LocalContext, PartitionType, TimePartitioning, WriteResult,
    },
};

///
/// Temporal
///

#[test]
fn date_inputs_are_permissive() {
    let expected = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();

    for input in ["2021-1-5", "2021-01-05", "2021-01-05T00:00:00", "2021-01-05 23:59:59.5"] {
        assert_eq!(DateCodec::parse(input).unwrap(), expected, "input {input:?}");
    }
}

#[test]
fn timestamp_offsets_denote_the_same_instant() {
    let spaced = TimestampCodec::parse("2021-01-05 12:34:56.000000 +0000").unwrap();
    let tight = TimestampCodec::parse("2021-01-05T12:34:56.000000+0000").unwrap();
    let shifted = TimestampCodec::parse("2021-01-05T14:34:56+02:00").unwrap();
    let zulu = TimestampCodec::parse("2021-01-05T12:34:56Z").unwrap();

    assert_eq!(spaced, tight);
    assert_eq!(spaced, shifted);
    assert_eq!(spaced, zulu);
    assert_eq!(spaced, Utc.with_ymd_and_hms(2021, 1, 5, 12, 34, 56).unwrap());
    assert_eq!(TimestampCodec::format(&shifted), "2021-01-05T12:34:56.000000 +00:00");
}

#[test]
fn output_formats_are_fixed_width() {
    let ts = TimestampCodec::parse("2021-01-05T01:02:03.4").unwrap();
    let naive = ts.naive_utc();

    assert_eq!(DateCodec::format(&naive.date()), "2021-01-05");
    assert_eq!(TimeCodec::format(&naive.time()), "01:02:03.400000");
    assert_eq!(DateTimeCodec::format(&naive), "2021-01-05T01:02:03.400000");
}

#[test]
fn malformed_temporal_text_names_its_type() {
    let cases = [
        (DateCodec::parse("2021-13-01").unwrap_err().target, ParseTarget::Date),
        (TimeCodec::parse("25:00:00").unwrap_err().target, ParseTarget::Time),
        (
            DateTimeCodec::parse("2021-01-05T00:00:00Z").unwrap_err().target,
            ParseTarget::DateTime,
        ),
        (
            TimestampCodec::parse(" 2021-01-05").unwrap_err().target,
            ParseTarget::Timestamp,
        ),
    ];

    for (got, expected) in cases {
        assert_eq!(got, expected);
    }
}

///
/// Numeric
///

#[test]
fn excess_scale_rounds_half_up() {
    assert_eq!(NumericCodec::parse("1.23456789012").unwrap().to_string(), "1.234567890");
    assert_eq!(NumericCodec::parse("0.0000000005").unwrap().to_string(), "0.000000001");
    assert_eq!(NumericCodec::parse("-0.0000000005").unwrap().to_string(), "-0.000000001");
}

#[test]
fn precision_boundary() {
    let fits = format!("{}.{}", "9".repeat(29), "9".repeat(9));
    let too_wide = format!("{}.{}", "9".repeat(30), "9".repeat(9));
    let rounds_over = format!("{}.{}", "9".repeat(29), "9".repeat(10));

    assert_eq!(NumericCodec::parse(&fits).unwrap().precision(), 38);
    assert!(NumericCodec::parse(&too_wide).unwrap_err().is_precision());
    assert!(NumericCodec::parse(&rounds_over).unwrap_err().is_precision());
    assert!(matches!(
        NumericCodec::parse(&"1".repeat(39)),
        Err(NumericError::Precision(_))
    ));
    assert!(matches!(NumericCodec::parse("1..0"), Err(NumericError::Parse(_))));
}

#[test]
fn numeric_compares_by_value() {
    let a: Numeric = "1.0".parse().unwrap();
    let b: Numeric = "1.00".parse().unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_string(), "1.0");
    assert_eq!(b.to_string(), "1.00");
    assert!(NumericCodec::parse("-2").unwrap() < a);
}

#[test]
fn raw_values_dispatch_per_shape() {
    assert_eq!(
        TimestampCodec::parse_raw(RawValue::Int(1_609_850_096_000_000)).unwrap(),
        Utc.with_ymd_and_hms(2021, 1, 5, 12, 34, 56).unwrap()
    );
    assert_eq!(
        DateCodec::parse_raw(RawValue::Text("2021-1-5")).unwrap(),
        NaiveDate::from_ymd_opt(2021, 1, 5).unwrap()
    );
    assert!(TimeCodec::parse_raw(RawValue::Int(86_400_000_000)).is_err());
    assert!(DateTimeCodec::parse_raw(RawValue::Int(0)).is_err());
    assert!(NumericCodec::parse_raw(RawValue::Bytes(&[])).is_err());
}

///
/// Sources
///

#[test]
fn table_duality() {
    let table = Table::from_spec("proj:ds.tbl").unwrap();
    assert_eq!(table.spec(), "proj:ds.tbl");

    let reference = TableReference::new("ds", "tbl").with_project("proj");
    assert_eq!(Table::from_ref(reference.clone()).reference(), &reference);
    assert_eq!(Table::from_ref(reference), table);

    for spec in ["", "tbl", "proj:ds", "ds.tbl.extra/"] {
        assert!(Table::from_spec(spec).is_err(), "spec {spec:?}");
    }
}

#[test]
fn source_displays_what_it_reads() {
    let sources: Vec<Source> = vec![
        Source::query("SELECT 1"),
        Table::from_spec("ds.tbl").unwrap().into(),
    ];

    let shown: Vec<String> = sources.iter().map(ToString::to_string).collect();
    assert_eq!(shown, ["SELECT 1", "ds.tbl"]);
}

///
/// Write channel
///

struct RecordedResult {
    failures: Vec<InsertFailure>,
}

impl WriteResult for RecordedResult {
    fn failed_inserts_with_err(&self) -> impl Iterator<Item = InsertFailure> + '_ {
        self.failures.iter().cloned()
    }

    fn failed_inserts(&self) -> impl Iterator<Item = TableRow> + '_ {
        self.failures.iter().map(|failure| failure.row.clone())
    }
}

// collects eagerly, standing in for a distributed runner
struct EagerContext;

impl ExecutionContext for EagerContext {
    type Collection<'a, T: 'a> = Vec<T>;

    fn wrap<'a, T, I>(&self, items: I) -> Vec<T>
    where
        T: 'a,
        I: Iterator<Item = T> + 'a,
    {
        items.collect()
    }
}

fn recorded() -> RecordedResult {
    let failures = (0..3u64)
        .map(|index| {
            InsertFailure::new(
                table_row! { "id" => index, "amount" => "12.50" },
                InsertErrors {
                    index,
                    errors: vec![ErrorProto::new("invalid", format!("row {index} rejected"))],
                },
            )
        })
        .collect();

    RecordedResult { failures }
}

fn failures<E: ExtendedErrorInfo>(result: &RecordedResult) -> Vec<E::Failure> {
    E::coll(result, &EagerContext)
}

#[test]
fn selector_fixes_failure_shape() {
    let result = recorded();

    let detailed: Vec<InsertFailure> = failures::<Enabled>(&result);
    let plain: Vec<TableRow> = failures::<Disabled>(&result);

    assert_eq!(detailed.len(), plain.len());
    assert_eq!(
        detailed.iter().map(|f| f.row.clone()).collect::<Vec<_>>(),
        plain
    );
    assert_eq!(detailed[2].errors.errors[0].message, "row 2 rejected");
}

#[test]
fn local_context_is_lazy_and_ordered() {
    let result = recorded();
    let mut rows = Disabled::coll(&result, &LocalContext);

    assert_eq!(rows.next().and_then(|row| row.get("id").cloned()), Some(0.into()));
    assert_eq!(rows.count(), 2);
}

///
/// Config
///

#[test]
fn config_drives_the_write() {
    let config = WriteConfig::from_toml_str(
        r#"
        table = "proj.ds.events"
        extended_error_info = true

        [time_partitioning]
        type = "HOUR"
        expiration_ms = 0
        require_partition_filter = true
        "#,
    )
    .unwrap();

    assert_eq!(config.table.spec(), "proj:ds.events");
    assert!(config.error_info_mode().is_enabled());

    let partitioning = config.time_partitioning.unwrap();
    assert_eq!(
        partitioning,
        TimePartitioning::new(PartitionType::Hour).with_require_partition_filter(true)
    );
    assert_eq!(
        serde_json::to_value(partitioning.to_wire()).unwrap(),
        serde_json::json!({ "type": "HOUR", "requirePartitionFilter": true })
    );
}
