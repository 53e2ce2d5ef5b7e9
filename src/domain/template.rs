use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::domain::value::TemplateId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
/// Static mapping from template names to Cloopen template ids.
pub struct Templates(BTreeMap<String, String>);

#[derive(Debug, Clone, PartialEq, Eq)]
/// A template name that has no usable id in the mapping.
pub struct UnknownTemplate {
    pub name: String,
}

impl fmt::Display for UnknownTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no template id registered for {}", self.name)
    }
}

impl std::error::Error for UnknownTemplate {}

impl Templates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a name → id entry.
    pub fn insert(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.0.insert(name.into(), id.into());
    }

    /// Raw id registered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pick the template id for a send.
    ///
    /// A non-empty `explicit_id` wins; otherwise `name` is looked up. Missing and
    /// empty mappings are both reported as [`UnknownTemplate`].
    pub fn resolve(
        &self,
        explicit_id: Option<&str>,
        name: &str,
    ) -> Result<TemplateId, UnknownTemplate> {
        if let Some(id) = explicit_id.and_then(|id| TemplateId::new(id).ok()) {
            return Ok(id);
        }

        self.get(name)
            .and_then(|id| TemplateId::new(id).ok())
            .ok_or_else(|| UnknownTemplate {
                name: name.to_owned(),
            })
    }
}

impl<K, V> FromIterator<(K, V)> for Templates
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, id)| (name.into(), id.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> Templates {
        [("login", "100001"), ("blank", "  ")].into_iter().collect()
    }

    #[test]
    fn explicit_id_bypasses_lookup() {
        let id = templates().resolve(Some("999999"), "missing").unwrap();
        assert_eq!(id.as_str(), "999999");
    }

    #[test]
    fn blank_explicit_id_falls_back_to_name() {
        let id = templates().resolve(Some(""), "login").unwrap();
        assert_eq!(id.as_str(), "100001");
    }

    #[test]
    fn unknown_name_is_rejected_with_the_name() {
        let err = templates().resolve(None, "register").unwrap_err();
        assert_eq!(err.name, "register");
        assert_eq!(err.to_string(), "no template id registered for register");
    }

    #[test]
    fn blank_mapping_counts_as_unknown() {
        assert!(templates().resolve(None, "blank").is_err());
    }

    #[test]
    fn deserializes_from_plain_map() {
        let parsed: Templates = serde_json::from_str(r#"{"login":"100001"}"#).unwrap();
        assert_eq!(parsed.get("login"), Some("100001"));
        assert_eq!(parsed.len(), 1);
    }
}
