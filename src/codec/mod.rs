//! Text encoding for the `category_budgets` column.
//!
//! A mapping is stored as a JSON object whose keys are category ids written as
//! decimal strings, in ascending id order, and whose values are limits in
//! shortest round-trip float form: `{"1":300.0,"2":450.0}`. The empty mapping
//! is `{}`. [`decode`] accepts exactly what [`encode`] produces.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::btree_map::Entry;
use std::fmt;

use crate::error::CodecError;
use crate::models::CategoryBudgets;

pub fn encode(category_budgets: &CategoryBudgets) -> Result<String, CodecError> {
    if let Some((&category_id, _)) = category_budgets.iter().find(|(_, v)| !v.is_finite()) {
        return Err(CodecError::NonFiniteLimit { category_id });
    }
    serde_json::to_string(category_budgets).map_err(|e| CodecError::Malformed(e.to_string()))
}

pub fn decode(text: &str) -> Result<CategoryBudgets, CodecError> {
    let entries: Entries =
        serde_json::from_str(text).map_err(|e| CodecError::Malformed(e.to_string()))?;

    let mut category_budgets = CategoryBudgets::new();
    for (category_id, limit) in entries.0 {
        match category_budgets.entry(category_id) {
            Entry::Vacant(slot) => {
                slot.insert(limit);
            }
            Entry::Occupied(_) => return Err(CodecError::DuplicateKey(category_id)),
        }
    }

    // Reject anything encode would not have written: whitespace, integer
    // literals, unordered or zero-padded keys.
    if encode(&category_budgets)? != text {
        return Err(CodecError::NonCanonical(text.to_string()));
    }
    Ok(category_budgets)
}

/// Object entries in document order, duplicates kept.
struct Entries(Vec<(i64, f64)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping category ids to limits")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Entries, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<i64, f64>()? {
            entries.push(entry);
        }
        Ok(Entries(entries))
    }
}
