//! Session type definitions
//!
//! ## Tenant headers
//!
//! Every request to the broker carries the `fiware-service` /
//! `fiware-servicepath` header pair. Header names are case-sensitive and
//! part of the protocol contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header name for the tenant service
pub const SERVICE_HEADER: &str = "fiware-service";

/// Header name for the tenant subservice
pub const SERVICE_PATH_HEADER: &str = "fiware-servicepath";

/// Context broker endpoint.
///
/// Either a full `url` (http or https) or a `host`/`port` pair; an
/// explicit `url` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextBroker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

/// Tenant identifiers scoping every broker request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub service: String,
    pub subservice: String,
}

impl Tenant {
    /// Build the header pair sent on every outgoing request
    pub fn to_headers(&self) -> Vec<(String, String)> {
        vec![
            (SERVICE_HEADER.to_string(), self.service.clone()),
            (SERVICE_PATH_HEADER.to_string(), self.subservice.clone()),
        ]
    }
}

/// Agent activation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub context_broker: ContextBroker,
    pub provider_url: String,
    pub device_registration_duration: String,
    pub service: String,
    pub subservice: String,
}

impl AgentConfig {
    /// Validate required fields
    pub fn validate(&self) -> crate::Result<()> {
        if self.base_url().is_err() {
            return Err(crate::Error::Validation(
                "contextBroker requires either url or host+port".to_string(),
            ));
        }
        if self.provider_url.is_empty() {
            return Err(crate::Error::Validation("providerUrl is required".to_string()));
        }
        if self.device_registration_duration.is_empty() {
            return Err(crate::Error::Validation(
                "deviceRegistrationDuration is required".to_string(),
            ));
        }
        if self.service.is_empty() || self.subservice.is_empty() {
            return Err(crate::Error::Validation(
                "service and subservice are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the broker base URL.
    ///
    /// An explicit `contextBroker.url` is used as-is (http or https);
    /// otherwise `http://{host}:{port}`.
    pub fn base_url(&self) -> crate::Result<String> {
        if let Some(url) = &self.context_broker.url {
            if url.starts_with("http://") || url.starts_with("https://") {
                return Ok(url.trim_end_matches('/').to_string());
            }
            return Err(crate::Error::Validation(format!(
                "contextBroker.url must be http(s): {}",
                url
            )));
        }

        match (&self.context_broker.host, &self.context_broker.port) {
            (Some(host), Some(port)) if !host.is_empty() && !port.is_empty() => {
                Ok(format!("http://{}:{}", host, port))
            }
            _ => Err(crate::Error::Validation(
                "contextBroker requires either url or host+port".to_string(),
            )),
        }
    }

    /// Tenant pair carried by this configuration
    pub fn tenant(&self) -> Tenant {
        Tenant {
            service: self.service.clone(),
            subservice: self.subservice.clone(),
        }
    }
}

/// Active registration session.
///
/// Created only by a successful activation; `registration_id` is written
/// exactly once per session.
#[derive(Debug, Clone)]
pub struct Session {
    pub broker_base_url: String,
    pub tenant: Tenant,
    pub provider_url: String,
    pub duration: String,
    pub registration_id: String,
    pub activated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AgentConfig {
        AgentConfig {
            context_broker: ContextBroker {
                url: None,
                host: Some("10.11.128.16".to_string()),
                port: Some("1026".to_string()),
            },
            provider_url: "http://smartGondor.com".to_string(),
            device_registration_duration: "P1M".to_string(),
            service: "smartGondor".to_string(),
            subservice: "gardens".to_string(),
        }
    }

    #[test]
    fn test_base_url_from_host_port() {
        assert_eq!(config().base_url().unwrap(), "http://10.11.128.16:1026");
    }

    #[test]
    fn test_base_url_explicit_https() {
        let mut cfg = config();
        cfg.context_broker = ContextBroker {
            url: Some("https://192.168.1.1:1026".to_string()),
            host: None,
            port: None,
        };
        assert_eq!(cfg.base_url().unwrap(), "https://192.168.1.1:1026");
    }

    #[test]
    fn test_base_url_explicit_url_wins_over_host() {
        let mut cfg = config();
        cfg.context_broker.url = Some("https://broker.example.com".to_string());
        assert_eq!(cfg.base_url().unwrap(), "https://broker.example.com");
    }

    #[test]
    fn test_base_url_rejects_bare_host_url() {
        let mut cfg = config();
        cfg.context_broker = ContextBroker {
            url: Some("broker.example.com:1026".to_string()),
            host: None,
            port: None,
        };
        assert!(cfg.base_url().is_err());
    }

    #[test]
    fn test_validate_missing_provider_url() {
        let mut cfg = config();
        cfg.provider_url = String::new();
        assert!(matches!(cfg.validate(), Err(crate::Error::Validation(_))));
    }

    #[test]
    fn test_validate_missing_broker() {
        let mut cfg = config();
        cfg.context_broker = ContextBroker::default();
        assert!(matches!(cfg.validate(), Err(crate::Error::Validation(_))));
    }

    #[test]
    fn test_tenant_headers() {
        let headers = config().tenant().to_headers();
        assert_eq!(
            headers,
            vec![
                ("fiware-service".to_string(), "smartGondor".to_string()),
                ("fiware-servicepath".to_string(), "gardens".to_string()),
            ]
        );
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let cfg: AgentConfig = serde_json::from_value(serde_json::json!({
            "contextBroker": { "host": "10.11.128.16", "port": "1026" },
            "providerUrl": "http://smartGondor.com",
            "deviceRegistrationDuration": "P1M",
            "service": "smartGondor",
            "subservice": "gardens"
        }))
        .unwrap();
        assert_eq!(cfg.provider_url, "http://smartGondor.com");
        assert_eq!(cfg.device_registration_duration, "P1M");
    }
}
