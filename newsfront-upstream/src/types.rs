//! Core records for companies, articles, and the upstream wire envelopes.
//!
//! The upstream API is loosely typed: identifiers arrive as numbers or
//! numeric strings, timestamps as epoch milliseconds, bare dates or full
//! datetimes. Everything
//! is normalised here so the query engine only ever sees canonical values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::UpstreamError;

/// Canonical integer identifier for companies and articles.
///
/// Deserialises from a JSON integer, an integral float, or a numeric
/// string, so `10`, `10.0` and `"10"` all compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub i64);

impl EntityId {
    /// Parse request text (e.g. a path segment or query value) into an id.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidInput`] if the text is not an integer.
    pub fn parse(raw: &str) -> Result<Self, UpstreamError> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| UpstreamError::InvalidInput(format!("`{raw}` is not a numeric id")))
    }

    /// Parse an optional filter value; empty or whitespace-only means absent.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, UpstreamError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => Self::parse(text).map(Some),
        }
    }

    /// The raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for EntityId {
    type Err = UpstreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntityIdVisitor)
    }
}

struct EntityIdVisitor;

impl<'de> Visitor<'de> for EntityIdVisitor {
    type Value = EntityId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer id or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntityId, E> {
        Ok(EntityId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityId, E> {
        i64::try_from(v)
            .map(EntityId)
            .map_err(|_| E::custom(format!("id {v} out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<EntityId, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(EntityId(v as i64))
        } else {
            Err(E::custom(format!("id {v} is not an integer")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityId, E> {
        v.trim()
            .parse::<i64>()
            .map(EntityId)
            .map_err(|_| E::custom(format!("id `{v}` is not numeric")))
    }
}

/// Publication timestamp of an article, always held in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublishedAt(pub DateTime<Utc>);

impl PublishedAt {
    /// Parse an upstream timestamp.
    ///
    /// Accepts RFC 3339 (`2024-03-01T09:30:00+01:00`), offsets without a
    /// colon (`2024-03-01T09:30:00.000+0100`), naive datetimes
    /// (`2024-03-01T09:30:00`, `2024-03-01 09:30:00.250`, read as UTC) and
    /// bare dates (`2024-03-01`, UTC midnight).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }

    /// Milliseconds since the Unix epoch, as JVM upstreams serialise dates.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }
}

impl Serialize for PublishedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl<'de> Deserialize<'de> for PublishedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PublishedAtVisitor)
    }
}

struct PublishedAtVisitor;

impl<'de> Visitor<'de> for PublishedAtVisitor {
    type Value = PublishedAt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a date string or epoch milliseconds")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PublishedAt, E> {
        PublishedAt::from_epoch_millis(v)
            .ok_or_else(|| E::custom(format!("timestamp {v} out of range")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PublishedAt, E> {
        i64::try_from(v)
            .ok()
            .and_then(PublishedAt::from_epoch_millis)
            .ok_or_else(|| E::custom(format!("timestamp {v} out of range")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PublishedAt, E> {
        PublishedAt::parse(v).ok_or_else(|| E::custom(format!("unrecognised timestamp `{v}`")))
    }
}

/// A company as served by the upstream API.
///
/// Only `id` and `nombre` are interpreted; every other field is carried
/// through untouched in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Unique company identifier.
    pub id: EntityId,
    /// Display name (`nombre` on the wire).
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Descriptive fields opaque to this crate.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// The company reference embedded in an article (`empresa` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRef {
    /// Identifier of the owning company.
    pub id: EntityId,
    /// Denormalised company name, when the upstream includes it.
    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A news article attributed to exactly one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique article identifier.
    pub id: EntityId,
    #[serde(rename = "tituloNoticia")]
    pub title: String,
    #[serde(rename = "resumenNoticia")]
    pub summary: String,
    #[serde(rename = "fechaPublicacion")]
    pub published_at: PublishedAt,
    /// Reference to the owning company.
    #[serde(rename = "empresa")]
    pub company: CompanyRef,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Article {
    /// Identifier of the company this article belongs to.
    pub fn company_id(&self) -> EntityId {
        self.company.id
    }
}

// ---------------------------------------------------------------------------
// Wire envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct CompaniesEnvelope {
    pub empresas: Vec<Company>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanyEnvelope {
    #[serde(default)]
    pub empresa: Option<Company>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticlesEnvelope {
    pub noticias: Vec<Article>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticleEnvelope {
    #[serde(default)]
    pub noticia: Option<Article>,
}
