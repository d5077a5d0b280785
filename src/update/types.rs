//! NGSI10 update wire types
//!
//! Field names are part of the broker protocol contract. Attribute values
//! are arbitrary JSON.

use serde::{Deserialize, Serialize};

/// NGSI10 update endpoint path
pub const UPDATE_CONTEXT_PATH: &str = "/NGSI10/updateContext";

/// Update action sent on every request
pub const UPDATE_ACTION_APPEND: &str = "APPEND";

/// Attribute name/type/value triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: String,
    pub value: serde_json::Value,
}

impl AttributeValue {
    pub fn new(
        name: impl Into<String>,
        attribute_type: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            attribute_type: attribute_type.into(),
            value,
        }
    }
}

/// Single entity carrying current attribute values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextElement {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(rename = "isPattern")]
    pub is_pattern: String,
    pub id: String,
    pub attributes: Vec<AttributeValue>,
}

/// Full update request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub context_elements: Vec<ContextElement>,
    pub update_action: String,
}

impl UpdateRequest {
    /// Single-entity APPEND update
    pub fn append(id: &str, entity_type: &str, attributes: Vec<AttributeValue>) -> Self {
        Self {
            context_elements: vec![ContextElement {
                entity_type: entity_type.to_string(),
                is_pattern: crate::registration::FLAG_FALSE.to_string(),
                id: id.to_string(),
                attributes,
            }],
            update_action: UPDATE_ACTION_APPEND.to_string(),
        }
    }
}
