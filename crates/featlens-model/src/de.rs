//! Deserialization helpers for loosely typed feed exports.

use serde::{Deserialize, Deserializer};

/// Deserializes an explicit `null` as `T::default()`.
///
/// Combine with `#[serde(default)]` so a missing key and a `null` value
/// are read the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
