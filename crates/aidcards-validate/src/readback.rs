//! Typed read-back of checked records.
//!
//! The catalog deserializes every collection into typed records, so a
//! record that passes the field rules but still does not deserialize is a
//! violation of its own.

use aidcards_model::Collection;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::fields::Record;
use crate::report::{CLASS_RECORD_UNREADABLE, Findings};

/// Report records that do not deserialize as `T`.
///
/// Skipped when the collection's own rules added violations since `before`,
/// so one problem is not reported twice.
pub fn check_readable<T: DeserializeOwned>(
    collection: Collection,
    records: &[Record],
    before: usize,
    findings: &mut Findings,
) {
    if findings.len() > before {
        return;
    }
    for (i, record) in records.iter().enumerate() {
        if let Err(err) = serde_json::from_value::<T>(Value::Object(record.clone())) {
            findings.push(
                collection,
                CLASS_RECORD_UNREADABLE,
                format!("{collection}[{i}]: {err}"),
            );
        }
    }
}
