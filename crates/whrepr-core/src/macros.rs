// table_row
/// Build a [`TableRow`](crate::row::TableRow) from literal `key => value` pairs.
///
/// Values go through `serde_json::json!`, so anything that macro accepts works
/// here, including nested literals.
#[macro_export]
macro_rules! table_row {
    () => {
        $crate::row::TableRow::new()
    };
    ( $( $key:expr => $value:tt ),+ $(,)? ) => {
        $crate::row::TableRow::from_pairs([
            $( ($key, $crate::__reexports::serde_json::json!($value)) ),+
        ])
    };
}
