use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub trait Entity {
    fn id(&self) -> ID;
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Identifier for a persisted entity. Ids are non-negative integers
/// assigned by the persistent store. `ID::UNASSIGNED` (zero) marks an
/// entity that has not been persisted yet; once the store has assigned
/// an id it never changes for the lifetime of the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ID(i64);

impl ID {
    /// Sentinel for entities that the store has not assigned an id yet.
    pub const UNASSIGNED: ID = ID(0);

    pub fn is_unassigned(&self) -> bool {
        self.0 == 0
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn inner(self) -> i64 {
        self.0
    }
}

impl Default for ID {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum InvalidIDError {
    #[error("ID: {0} is malformed")]
    Malformed(String),
}

impl TryFrom<i64> for ID {
    type Error = InvalidIDError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw < 0 {
            return Err(InvalidIDError::Malformed(raw.to_string()));
        }
        Ok(Self(raw))
    }
}

impl FromStr for ID {
    type Err = InvalidIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map_err(|_| InvalidIDError::Malformed(s.to_string()))
            .and_then(Self::try_from)
    }
}

impl Serialize for ID {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for ID {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IDVisitor;

        impl<'de> Visitor<'de> for IDVisitor {
            type Value = ID;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A non-negative integer id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<ID, E>
            where
                E: serde::de::Error,
            {
                ID::try_from(value).map_err(|_| E::custom(format!("Malformed id: {}", value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<ID, E>
            where
                E: serde::de::Error,
            {
                i64::try_from(value)
                    .map_err(|_| E::custom(format!("Malformed id: {}", value)))
                    .and_then(|v| self.visit_i64(v))
            }

            // Path parameters arrive as strings
            fn visit_str<E>(self, value: &str) -> Result<ID, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<ID>()
                    .map_err(|_| E::custom(format!("Malformed id: {}", value)))
            }
        }

        deserializer.deserialize_any(IDVisitor)
    }
}
