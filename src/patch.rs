//! Three-state field wrapper for partial updates.

use crate::error::AppError;
use serde::{Deserialize, Deserializer};

/// A field in an update body: missing from the JSON, explicitly `null`, or set.
///
/// Use with `#[serde(default)]` so a missing key deserializes to `Absent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    /// Value for a NOT NULL column: `Absent` keeps the current value, `Null` is rejected.
    pub fn into_required(self, field: &str) -> Result<Option<T>, AppError> {
        match self {
            Patch::Absent => Ok(None),
            Patch::Null => Err(AppError::Validation(format!("{} cannot be null", field))),
            Patch::Value(v) => Ok(Some(v)),
        }
    }
}
