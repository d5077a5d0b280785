//! DeviceRegistry - devices currently advertised to the broker
//!
//! ## Responsibilities
//!
//! - Insertion-ordered mapping from device identity to its advertised
//!   attribute list
//! - Source of truth for resync payloads: the order of entries here is
//!   the order of `contextRegistrations` elements on the wire
//!
//! Memory-only; the registration service wraps it in a lock and mutates
//! it together with the resync send.

use serde::{Deserialize, Serialize};

/// Natural key of a device: (id, type)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

impl DeviceIdentity {
    pub fn new(id: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            device_type: device_type.into(),
        }
    }
}

/// Advertised (lazy) attribute: name and type, no value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: String,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, attribute_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: attribute_type.into(),
        }
    }
}

/// One registered device. Immutable once stored; re-registering the same
/// identity replaces the entry wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub identity: DeviceIdentity,
    pub attributes: Vec<AttributeSpec>,
}

/// Insertion-ordered device registry
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    entries: Vec<DeviceEntry>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `identity`.
    ///
    /// Replacement keeps the entry's original position so resync payload
    /// order stays deterministic.
    pub fn store_device(&mut self, identity: DeviceIdentity, attributes: Vec<AttributeSpec>) {
        let entry = DeviceEntry {
            identity,
            attributes,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.identity == entry.identity)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove the entry for `identity`. Removing an absent entry is a
    /// no-op success, not an error. Returns whether an entry was removed.
    pub fn remove_device(&mut self, identity: &DeviceIdentity) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.identity != identity);
        self.entries.len() != before
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[DeviceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
