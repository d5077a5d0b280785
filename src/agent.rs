//! IotAgent facade
//!
//! Composes the gateway, session store and services into the library's
//! public surface: activate / deactivate / register / unregister /
//! update_value / registration_id.

use std::sync::Arc;

use crate::device_registry::{AttributeSpec, DeviceEntry, DeviceIdentity};
use crate::error::Result;
use crate::registration::RegistrationService;
use crate::session::{AgentConfig, SessionStore};
use crate::stats_registry::StatsRegistry;
use crate::transport::HttpGateway;
use crate::update::{AttributeValue, UpdateService};

/// IoT agent instance
pub struct IotAgent {
    /// Registration session + device registry + resync
    pub registration: Arc<RegistrationService>,
    /// Independent attribute value updates
    pub update: Arc<UpdateService>,
    /// Operational counters (off the protocol path)
    pub stats: Arc<StatsRegistry>,
    session: Arc<SessionStore>,
}

impl IotAgent {
    /// Create an inactive agent
    pub fn new() -> Self {
        let gateway = Arc::new(HttpGateway::new());
        let session = Arc::new(SessionStore::new());

        Self {
            registration: Arc::new(RegistrationService::new(gateway.clone(), session.clone())),
            update: Arc::new(UpdateService::new(gateway, session.clone())),
            stats: Arc::new(StatsRegistry::new()),
            session,
        }
    }

    /// Activate against the configured context broker
    pub async fn activate(&self, config: AgentConfig) -> Result<()> {
        self.registration.activate(config).await
    }

    /// Deactivate and empty the device registry; idempotent
    pub async fn deactivate(&self) -> Result<()> {
        self.registration.deactivate().await
    }

    /// Register a device as context provider for its attributes
    pub async fn register(
        &self,
        identity: DeviceIdentity,
        attributes: Vec<AttributeSpec>,
    ) -> Result<()> {
        self.registration.register_device(identity, attributes).await
    }

    /// Remove a device and resync the remaining set
    pub async fn unregister(&self, identity: DeviceIdentity) -> Result<()> {
        self.registration.unregister_device(identity).await
    }

    /// Push current attribute values for one entity
    pub async fn update_value(
        &self,
        device_id: &str,
        device_type: &str,
        attributes: Vec<AttributeValue>,
    ) -> Result<serde_json::Value> {
        self.update
            .update_value(device_id, device_type, attributes)
            .await
    }

    /// Registration id of the active session, if any
    pub async fn registration_id(&self) -> Option<String> {
        self.session.registration_id().await
    }

    /// Whether a session is active
    pub async fn is_active(&self) -> bool {
        self.session.is_active().await
    }

    /// Snapshot of the devices currently advertised
    pub async fn devices(&self) -> Vec<DeviceEntry> {
        self.registration.devices().await
    }
}

impl Default for IotAgent {
    fn default() -> Self {
        Self::new()
    }
}
