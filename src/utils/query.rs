//! Lenient parsing helpers for query-string values.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

/// Parses a query value, mapping a blank value (`?Page=`) to `None`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "" => Ok(None),
        value => value.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}
