//! UpdateService
//!
//! ## Responsibilities
//!
//! - Push current attribute values for one entity to the broker
//!   (NGSI10 updateContext, APPEND)
//!
//! Updates are independent of the registration flow: no registry
//! mutation, no registration-id involvement. The only requirement is an
//! active session, which supplies the broker endpoint and tenant headers.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::transport::HttpGateway;
use crate::update::types::{AttributeValue, UpdateRequest, UPDATE_CONTEXT_PATH};

/// UpdateService instance
pub struct UpdateService {
    gateway: Arc<HttpGateway>,
    session: Arc<SessionStore>,
}

impl UpdateService {
    /// Create a new UpdateService
    pub fn new(gateway: Arc<HttpGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Send current attribute values for one entity.
    ///
    /// Returns the broker's response body on success. Transport errors
    /// pass through unchanged; a non-200 status or missing body yields
    /// `Error::UnknownResponse`.
    pub async fn update_value(
        &self,
        device_id: &str,
        device_type: &str,
        attributes: Vec<AttributeValue>,
    ) -> Result<serde_json::Value> {
        let session = self.session.get().await.ok_or(Error::NotActivated)?;

        let request = UpdateRequest::append(device_id, device_type, attributes);
        let url = format!("{}{}", session.broker_base_url, UPDATE_CONTEXT_PATH);

        tracing::debug!(device_id = %device_id, device_type = %device_type, "Sending context update");

        let (status, body) = self
            .gateway
            .post_json(&url, &request, &session.tenant.to_headers())
            .await?;

        match (status, body) {
            (200, Some(body)) => {
                tracing::info!(device_id = %device_id, "Context update accepted");
                Ok(body)
            }
            (200, None) => Err(Error::UnknownResponse(
                "context update returned 200 without a body".to_string(),
            )),
            (status, _) => {
                tracing::warn!(device_id = %device_id, status = status, "Context update rejected");
                Err(Error::UnknownResponse(format!(
                    "context update returned status {}",
                    status
                )))
            }
        }
    }
}
