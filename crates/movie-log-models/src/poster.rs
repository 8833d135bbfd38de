//! Serde adapter for poster URLs.
//!
//! OMDb uses the literal string `"N/A"` when a title has no image. In memory
//! that is `None`; on the wire the sentinel is written back so persisted
//! lists stay readable by older builds.

use serde::{Deserialize, Deserializer, Serializer};

pub const NO_IMAGE: &str = "N/A";

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|url| !url.trim().is_empty() && url != NO_IMAGE))
}

pub fn serialize<S>(poster: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(poster.as_deref().unwrap_or(NO_IMAGE))
}
