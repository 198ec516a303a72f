//! TimeZone deserialization from packed strings.
//!
//! Zone data bundles ship as JSON documents holding packed strings, so
//! [`TimeZone`] deserializes directly from a string:
//!
//! ```
//! # use packed_tz::TimeZone;
//! let zones: Vec<TimeZone> =
//!     serde_json::from_str(r#"["America/Phoenix|MST|70|0|"]"#).unwrap();
//!
//! assert_eq!(zones[0].name(), "America/Phoenix");
//! ```

use std::fmt;

use serde::Deserialize;
use serde::de::{self, Unexpected, Visitor};

use crate::TimeZone;

struct PackedZoneVisitor;

impl Visitor<'_> for PackedZoneVisitor {
    type Value = TimeZone;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a packed zone string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        TimeZone::unpack(value).map_err(|err| err.into_de_error(Unexpected::Str(value)))
    }
}

impl<'de> Deserialize<'de> for TimeZone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(PackedZoneVisitor)
    }
}
