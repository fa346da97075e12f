use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// A coffee record as stored and served: `{ "id": string, "name": string }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coffee {
    pub id: String,
    pub name: String,
}

/// Request body for create/upsert; `id` may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Fresh, collision-resistant identifier (UUID v4, hyphenated).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn validate_id(id: &str) -> Result<(), ModelError> {
    if id.is_empty() {
        return Err(ModelError::Validation("coffee id must not be empty".into()));
    }
    Ok(())
}

impl Coffee {
    /// New record with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: generate_id(), name: name.into() }
    }

    /// New record with a caller-chosen id, which must be non-empty.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self { id, name: name.into() })
    }
}

impl CoffeeInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self { id: None, name: name.into() }
    }

    /// The supplied id, treating an empty string as absent.
    pub fn supplied_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_non_empty() {
        let a = Coffee::new("Cafe Cereza");
        let b = Coffee::new("Cafe Cereza");
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn with_id_rejects_empty() {
        assert!(matches!(Coffee::with_id("", "x"), Err(ModelError::Validation(_))));
        let c = Coffee::with_id("house-blend", "House").expect("valid id");
        assert_eq!(c.id, "house-blend");
    }

    #[test]
    fn input_id_is_optional_and_empty_means_absent() {
        let input: CoffeeInput = serde_json::from_str(r#"{"name":"Cafe Lareno"}"#).expect("parse");
        assert_eq!(input.supplied_id(), None);

        let input: CoffeeInput = serde_json::from_str(r#"{"id":"","name":"Cafe Lareno"}"#).expect("parse");
        assert_eq!(input.supplied_id(), None);

        let input: CoffeeInput = serde_json::from_str(r#"{"id":"abc","name":"Cafe Lareno"}"#).expect("parse");
        assert_eq!(input.supplied_id(), Some("abc"));
    }

    #[test]
    fn coffee_wire_shape() {
        let c = Coffee { id: "1".into(), name: "Cafe Ganador".into() };
        let v = serde_json::to_value(&c).expect("serialize");
        assert_eq!(v, serde_json::json!({ "id": "1", "name": "Cafe Ganador" }));
    }
}
