use std::collections::BTreeMap;

use catalog_core::{DomainError, DomainResult, ValueObject, ValueObjectKind};

use super::{char_len, is_blank};

pub const MAX_SPECIFICATIONS: usize = 10;
pub const MAX_SPECIFICATION_KEY_LENGTH: usize = 50;
pub const MAX_SPECIFICATION_VALUE_LENGTH: usize = 80;

/// Technical specifications (`"screen" -> "6.5in"`), at most ten entries.
///
/// Entries are kept ordered by key so equality and serialization are stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Specifications(BTreeMap<String, String>);

impl Specifications {
    /// Build from an inbound map. An absent map is empty; an entry whose value
    /// is absent is rejected rather than dropped.
    pub fn new(entries: Option<BTreeMap<String, Option<String>>>) -> DomainResult<Self> {
        let Some(entries) = entries else {
            return Ok(Self::empty());
        };
        check_count(entries.len())?;

        let mut map = BTreeMap::new();
        for (key, value) in entries {
            let Some(value) = value else {
                return Err(invalid(format!(
                    "Specification value for '{key}' is required"
                )));
            };
            check_entry(&key, &value)?;
            map.insert(key, value);
        }
        Ok(Self(map))
    }

    /// Build from `(key, value)` pairs (e.g. storage rows). A repeated key keeps
    /// the last value.
    pub fn from_pairs<I>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            check_entry(&key, &value)?;
            map.insert(key, value);
        }
        check_count(map.len())?;
        Ok(Self(map))
    }

    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for Specifications {}

fn invalid(msg: String) -> DomainError {
    DomainError::invalid(ValueObjectKind::Specifications, msg)
}

fn check_count(count: usize) -> DomainResult<()> {
    if count > MAX_SPECIFICATIONS {
        return Err(invalid(format!(
            "Maximum {MAX_SPECIFICATIONS} specifications exceeded"
        )));
    }
    Ok(())
}

fn check_entry(key: &str, value: &str) -> DomainResult<()> {
    if is_blank(key) {
        return Err(invalid("Specification key must not be blank".to_string()));
    }
    if is_blank(value) {
        return Err(invalid(format!(
            "Specification value for '{key}' must not be blank"
        )));
    }
    if char_len(key) > MAX_SPECIFICATION_KEY_LENGTH {
        return Err(invalid(format!(
            "Specification key '{key}' exceeds {MAX_SPECIFICATION_KEY_LENGTH} characters"
        )));
    }
    if char_len(value) > MAX_SPECIFICATION_VALUE_LENGTH {
        return Err(invalid(format!(
            "Specification value for '{key}' exceeds {MAX_SPECIFICATION_VALUE_LENGTH} characters"
        )));
    }
    Ok(())
}
