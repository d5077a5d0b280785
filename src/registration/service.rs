//! RegistrationService
//!
//! ## Responsibilities
//!
//! - Session lifecycle: activation (placeholder registration, id
//!   issuance) and deactivation
//! - Device registry mutation combined with a full-state resync: every
//!   add/remove resends the entire device set under the session's
//!   registration id
//!
//! ## Consistency policy
//!
//! Registry mutation and the resync send happen under one lock, so
//! resyncs observe a consistent registry and leave in mutation order. A
//! failed resync is NOT rolled back: the registry reflects the
//! last-attempted state, and the caller gets the error by kind.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::device_registry::{AttributeSpec, DeviceEntry, DeviceIdentity, DeviceRegistry};
use crate::error::{Error, Result};
use crate::registration::types::{
    ContextRegistration, RegistrationRequest, RegistrationResponse, REGISTER_CONTEXT_PATH,
};
use crate::session::{AgentConfig, Session, SessionStore};
use crate::transport::HttpGateway;

/// RegistrationService instance
pub struct RegistrationService {
    gateway: Arc<HttpGateway>,
    session: Arc<SessionStore>,
    registry: Mutex<DeviceRegistry>,
}

impl RegistrationService {
    /// Create a new RegistrationService
    pub fn new(gateway: Arc<HttpGateway>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            registry: Mutex::new(DeviceRegistry::new()),
        }
    }

    /// Activate the agent against the configured broker.
    ///
    /// Validates the configuration, empties the device registry, then
    /// sends the placeholder registration (empty entity/attribute lists)
    /// to obtain the registration id. Only this call writes the id.
    ///
    /// Any previous session is dropped before the placeholder is sent, so
    /// a failed activation always leaves the agent inactive rather than
    /// holding a stale session.
    pub async fn activate(&self, config: AgentConfig) -> Result<()> {
        config.validate()?;
        let base_url = config.base_url()?;
        let tenant = config.tenant();

        self.session.clear().await;
        {
            let mut registry = self.registry.lock().await;
            registry.clear();
        }

        let request = RegistrationRequest {
            context_registrations: vec![ContextRegistration::placeholder(&config.provider_url)],
            duration: config.device_registration_duration.clone(),
            registration_id: None,
        };

        let url = format!("{}{}", base_url, REGISTER_CONTEXT_PATH);
        tracing::debug!(url = %url, "Sending placeholder registration");

        let (status, body) = self
            .gateway
            .post_json(&url, &request, &tenant.to_headers())
            .await?;

        let body = match (status, body) {
            (200, Some(body)) => body,
            (200, None) => {
                return Err(Error::UnknownResponse(
                    "placeholder registration returned 200 without a body".to_string(),
                ))
            }
            (status, _) => {
                tracing::warn!(status = status, "Placeholder registration rejected");
                return Err(Error::UnknownResponse(format!(
                    "placeholder registration returned status {}",
                    status
                )));
            }
        };

        let response: RegistrationResponse = serde_json::from_value(body).map_err(|_| {
            Error::UnknownResponse("malformed registration response".to_string())
        })?;
        let registration_id = response.registration_id.ok_or_else(|| {
            Error::UnknownResponse("registration response carried no registrationId".to_string())
        })?;

        self.session
            .set(Session {
                broker_base_url: base_url,
                tenant,
                provider_url: config.provider_url.clone(),
                duration: config.device_registration_duration.clone(),
                registration_id: registration_id.clone(),
                activated_at: chrono::Utc::now(),
            })
            .await;

        tracing::info!(
            registration_id = %registration_id,
            broker = %config.base_url().unwrap_or_default(),
            "Agent activated"
        );

        Ok(())
    }

    /// Deactivate the agent: drop the session and empty the registry.
    /// Idempotent; always succeeds.
    pub async fn deactivate(&self) -> Result<()> {
        {
            let mut registry = self.registry.lock().await;
            registry.clear();
        }
        self.session.clear().await;
        tracing::info!("Agent deactivated");
        Ok(())
    }

    /// Register a device: store it in the registry, then resync the full
    /// device set to the broker.
    ///
    /// A broker rejection maps to `Error::Registration`; the registry
    /// entry is kept (last-attempted state).
    pub async fn register_device(
        &self,
        identity: DeviceIdentity,
        attributes: Vec<AttributeSpec>,
    ) -> Result<()> {
        let session = self.session.get().await.ok_or(Error::NotActivated)?;

        let mut registry = self.registry.lock().await;
        registry.store_device(identity.clone(), attributes);

        tracing::debug!(
            device_id = %identity.id,
            device_type = %identity.device_type,
            devices = registry.len(),
            "Device stored, resyncing registrations"
        );

        let (status, body) = self.send_resync(&session, &registry).await?;
        match (status, body) {
            (200, Some(_)) => {
                tracing::info!(device_id = %identity.id, "Device registered");
                Ok(())
            }
            (200, None) => Err(Error::UnknownResponse(
                "registration resync returned 200 without a body".to_string(),
            )),
            (status, _) => {
                tracing::warn!(device_id = %identity.id, status = status, "Registration resync rejected");
                Err(Error::Registration(format!(
                    "context broker returned status {}",
                    status
                )))
            }
        }
    }

    /// Unregister a device: remove it from the registry, then resync the
    /// remaining device set. Removing an absent device still resyncs.
    ///
    /// A broker rejection maps to `Error::Unregistration`; the removal is
    /// kept (last-attempted state).
    pub async fn unregister_device(&self, identity: DeviceIdentity) -> Result<()> {
        let session = self.session.get().await.ok_or(Error::NotActivated)?;

        let mut registry = self.registry.lock().await;
        let removed = registry.remove_device(&identity);

        tracing::debug!(
            device_id = %identity.id,
            removed = removed,
            devices = registry.len(),
            "Device removed, resyncing registrations"
        );

        let (status, body) = self.send_resync(&session, &registry).await?;
        match (status, body) {
            (200, Some(_)) => {
                tracing::info!(device_id = %identity.id, "Device unregistered");
                Ok(())
            }
            (200, None) => Err(Error::UnknownResponse(
                "unregistration resync returned 200 without a body".to_string(),
            )),
            (status, _) => {
                tracing::warn!(device_id = %identity.id, status = status, "Unregistration resync rejected");
                Err(Error::Unregistration(format!(
                    "context broker returned status {}",
                    status
                )))
            }
        }
    }

    /// Registration id of the active session, if any
    pub async fn registration_id(&self) -> Option<String> {
        self.session.registration_id().await
    }

    /// Snapshot of the current registry contents, in insertion order
    pub async fn devices(&self) -> Vec<DeviceEntry> {
        self.registry.lock().await.entries().to_vec()
    }

    /// Serialize the whole registry under the session's registration id
    /// and send it. Transport errors pass through unchanged; status
    /// interpretation is left to the caller.
    async fn send_resync(
        &self,
        session: &Session,
        registry: &DeviceRegistry,
    ) -> Result<(u16, Option<serde_json::Value>)> {
        let request = RegistrationRequest {
            context_registrations: registry
                .entries()
                .iter()
                .map(|entry| ContextRegistration::from_entry(entry, &session.provider_url))
                .collect(),
            duration: session.duration.clone(),
            registration_id: Some(session.registration_id.clone()),
        };

        let url = format!("{}{}", session.broker_base_url, REGISTER_CONTEXT_PATH);
        self.gateway
            .post_json(&url, &request, &session.tenant.to_headers())
            .await
    }
}
