//! The parsed body as a tagged tree.
//!
//! Scalars are reduced to their kind while parsing; only booleans keep a value.
//! Objects are a list of members rather than a map, so repeated names survive
//! in document order.

use std::fmt;

use serde::de::{Deserialize, Deserializer, Error, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// Key `serde_json` hands out when a number is delivered in its
/// `arbitrary_precision` form.
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedactionTree {
    Null,
    Bool(bool),
    Number,
    String,
    Array(Vec<RedactionTree>),
    Object(Vec<(String, RedactionTree)>),
}

impl<'de> Deserialize<'de> for RedactionTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = RedactionTree;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON document")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(RedactionTree::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(RedactionTree::Null)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(RedactionTree::Bool(v))
    }

    fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(RedactionTree::Number)
    }

    fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(RedactionTree::Number)
    }

    fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(RedactionTree::Number)
    }

    fn visit_str<E>(self, _: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(RedactionTree::String)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(RedactionTree::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            if members.is_empty() && key == NUMBER_TOKEN {
                map.next_value::<IgnoredAny>()?;
                return Ok(RedactionTree::Number);
            }
            let child = map.next_value()?;
            members.push((key, child));
        }
        Ok(RedactionTree::Object(members))
    }
}
