//! Result of a catalogue call.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// What a catalogue call resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The unwrapped response property, or a raw record for static-list ids.
    Value(Value),
    /// The response lacked the expected property.
    Missing,
    /// Auto-pagination result: the full envelope of every page, in order.
    Pages(Vec<Value>),
}

impl Payload {
    /// The single value, if this is [`Payload::Value`].
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Pages(_) => None,
        }
    }

    /// The page envelopes, if this is [`Payload::Pages`].
    #[must_use]
    pub fn pages(&self) -> Option<&[Value]> {
        match self {
            Self::Pages(pages) => Some(pages),
            Self::Value(_) | Self::Missing => None,
        }
    }

    /// Returns `true` for [`Payload::Missing`].
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Converts into a JSON value; pages become a JSON array of envelopes.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing => None,
            Self::Pages(pages) => Some(Value::Array(pages)),
        }
    }

    /// Decodes the payload into a caller-defined type.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Option<T>> {
        self.into_value()
            .map(serde_json::from_value)
            .transpose()
            .context("failed to decode IBL payload")
    }
}

impl From<Option<Value>> for Payload {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Missing, Self::Value)
    }
}
