//! Record batches shared by unit tests.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BinaryArray, BooleanArray, DurationSecondArray, Float64Array, Int64Array,
    StringArray, TimestampSecondArray,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

/// Builds a batch from `(label, values)` pairs, all columns nullable.
pub fn batch_of(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let row_count = columns.first().map_or(0, |(_, array)| array.len());
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();

    RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &RecordBatchOptions::new().with_row_count(Some(row_count)),
    )
    .expect("fixture columns have equal lengths")
}

/// Five orders covering every column kind the default registry knows, plus one
/// binary column it does not.
pub fn mixed_batch() -> RecordBatch {
    batch_of(vec![
        (
            "order id",
            Arc::new(Int64Array::from(vec![1, 2, 3, 4, 5])) as ArrayRef,
        ),
        (
            "customer name",
            Arc::new(StringArray::from(vec![
                Some("Ada"),
                None,
                Some("Alan Turing"),
                Some("Linus"),
                Some("Ken"),
            ])),
        ),
        (
            "Unit Price",
            Arc::new(Float64Array::from(vec![1.5, f64::NAN, 2.0, 3.25, 4.0])),
        ),
        (
            "is_paid",
            Arc::new(BooleanArray::from(vec![
                Some(true),
                Some(false),
                None,
                Some(true),
                Some(false),
            ])),
        ),
        (
            "created at",
            Arc::new(TimestampSecondArray::from(vec![
                Some(1_700_000_000),
                Some(1_700_003_600),
                None,
                Some(1_700_007_200),
                Some(1_700_010_800),
            ])),
        ),
        (
            "delay",
            Arc::new(DurationSecondArray::from(vec![60, 120, 0, 30, 90])),
        ),
        (
            "payload",
            Arc::new(BinaryArray::from(vec![
                b"a".as_ref(),
                b"b".as_ref(),
                b"c".as_ref(),
                b"d".as_ref(),
                b"e".as_ref(),
            ])),
        ),
    ])
}
