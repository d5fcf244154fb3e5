//! Group Key Trait
//!
//! A [`GroupKey`] maps a record to the key of the group it belongs to on one axis, or `None`
//! when the record does not participate in that axis (for example, a record without a level
//! never appears under `by_level`).

use crate::types::TestCaseRecord;

pub trait GroupKey {
    /// Returns the group key for `record`, or `None` to exclude it from this axis.
    fn key(&self, record: &TestCaseRecord) -> Option<String>;
}
