//! TimeZone + Span serialization impls.
//!
//! There is no encoder back to the packed wire format, so serialization is
//! structural: a [`TimeZone`] writes its name and span table, a [`Span`]
//! writes its boundaries (epoch milliseconds), abbreviation and offset.
//! Downstream formats decide how to render the infinite boundaries of the
//! first and last span (serde_json, for one, writes them as null).

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{Span, TimeZone};

impl Serialize for Span {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Span", 4)?;

        state.serialize_field("from", &self.from())?;
        state.serialize_field("until", &self.until())?;
        state.serialize_field("abbreviation", self.abbreviation())?;
        state.serialize_field("offset", &self.offset_millis())?;

        state.end()
    }
}

impl Serialize for TimeZone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TimeZone", 2)?;

        state.serialize_field("name", self.name())?;
        state.serialize_field("spans", self.spans())?;

        state.end()
    }
}
