//! NGSI9 registration wire types
//!
//! Field names are part of the broker protocol contract and must match
//! byte-for-byte. `isPattern` and `isDomain` are string-typed flags on
//! the wire, not booleans.

use serde::{Deserialize, Serialize};

use crate::device_registry::DeviceEntry;

/// NGSI9 registration endpoint path
pub const REGISTER_CONTEXT_PATH: &str = "/NGSI9/registerContext";

/// Wire value for the `isPattern` / `isDomain` flags
pub const FLAG_FALSE: &str = "false";

/// Entity reference inside a context registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(rename = "isPattern")]
    pub is_pattern: String,
    pub id: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            is_pattern: FLAG_FALSE.to_string(),
            id: id.into(),
        }
    }
}

/// Advertised attribute inside a context registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: String,
    #[serde(rename = "isDomain")]
    pub is_domain: String,
}

impl RegistrationAttribute {
    pub fn new(name: impl Into<String>, attribute_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: attribute_type.into(),
            is_domain: FLAG_FALSE.to_string(),
        }
    }
}

/// One element of the `contextRegistrations` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextRegistration {
    pub entities: Vec<EntityRef>,
    pub attributes: Vec<RegistrationAttribute>,
    pub providing_application: String,
}

impl ContextRegistration {
    /// Placeholder element used by the activation call: empty entity and
    /// attribute lists, provider URL only.
    pub fn placeholder(provider_url: &str) -> Self {
        Self {
            entities: Vec::new(),
            attributes: Vec::new(),
            providing_application: provider_url.to_string(),
        }
    }

    /// Serialize one registry entry: a singleton entity list plus the
    /// advertised attributes, in stored order.
    pub fn from_entry(entry: &DeviceEntry, provider_url: &str) -> Self {
        Self {
            entities: vec![EntityRef::new(
                &entry.identity.id,
                &entry.identity.device_type,
            )],
            attributes: entry
                .attributes
                .iter()
                .map(|a| RegistrationAttribute::new(&a.name, &a.attribute_type))
                .collect(),
            providing_application: provider_url.to_string(),
        }
    }
}

/// Full registration request body.
///
/// `registrationId` is omitted on the placeholder call; every later
/// resync carries it so the broker updates the existing registration
/// instead of creating a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub context_registrations: Vec<ContextRegistration>,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
}

/// Registration response body (success)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(default)]
    pub registration_id: Option<String>,
}
