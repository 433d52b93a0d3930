//! Typed Identifiers

use std::{
    cmp::Ordering,
    convert::Infallible,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw identifier value as issued by the backend.
///
/// Older menus use integer ids, the REST API issues string ids (`_id`). Both
/// are kept in their original form so they can be sent back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    /// Integer identifier
    Number(i64),

    /// String identifier
    Text(String),
}

impl Display for IdValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            IdValue::Number(value) => Display::fmt(value, f),
            IdValue::Text(value) => f.write_str(value),
        }
    }
}

/// An identifier tagged with the record type it belongs to.
pub struct RecordId<T>(IdValue, PhantomData<fn() -> T>);

impl<T> RecordId<T> {
    /// Wrap a raw identifier value.
    pub const fn from_value(value: IdValue) -> Self {
        Self(value, PhantomData)
    }

    /// Borrow the raw identifier value.
    pub fn value(&self) -> &IdValue {
        &self.0
    }

    /// Unwrap into the raw identifier value.
    #[must_use]
    pub fn into_value(self) -> IdValue {
        self.0
    }
}

impl<T> Clone for RecordId<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for RecordId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for RecordId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for RecordId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for RecordId<T> {}

impl<T> Hash for RecordId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for RecordId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for RecordId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i64> for RecordId<T> {
    fn from(value: i64) -> Self {
        Self::from_value(IdValue::Number(value))
    }
}

impl<T> From<&str> for RecordId<T> {
    fn from(value: &str) -> Self {
        Self::from_value(IdValue::Text(value.to_string()))
    }
}

impl<T> From<String> for RecordId<T> {
    fn from(value: String) -> Self {
        Self::from_value(IdValue::Text(value))
    }
}

impl<T> FromStr for RecordId<T> {
    type Err = Infallible;

    /// Integers parse as numeric ids, anything else is kept as text.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(value
            .parse::<i64>()
            .map_or_else(|_| Self::from(value), Self::from))
    }
}

impl<T> Serialize for RecordId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for RecordId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IdValue::deserialize(deserializer).map(Self::from_value)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Marker;

    type MarkerId = RecordId<Marker>;

    #[test]
    fn parses_numeric_strings_as_numbers() -> TestResult {
        let id: MarkerId = "42".parse()?;

        assert_eq!(id.value(), &IdValue::Number(42));

        Ok(())
    }

    #[test]
    fn parses_other_strings_as_text() -> TestResult {
        let id: MarkerId = "65f1c0ffee".parse()?;

        assert_eq!(id.value(), &IdValue::Text("65f1c0ffee".to_string()));

        Ok(())
    }

    #[test]
    fn numeric_and_text_ids_are_distinct() {
        let number = MarkerId::from(1);
        let text = MarkerId::from("1");

        assert_ne!(number, text);
    }

    #[test]
    fn displays_raw_value() {
        assert_eq!(MarkerId::from(7).to_string(), "7");
        assert_eq!(MarkerId::from("abc").to_string(), "abc");
    }
}
