//! NGSI Agent Library
//!
//! Client-side adapter between a device-management process and an
//! NGSI9/NGSI10 context broker.
//!
//! ## Components
//!
//! 1. HttpGateway - single JSON POST transport, no business logic
//! 2. SessionStore - SSoT for the active registration session
//! 3. DeviceRegistry - insertion-ordered set of advertised devices
//! 4. RegistrationService - placeholder registration + full-state resync
//! 5. UpdateService - NGSI10 attribute value updates (APPEND)
//! 6. StatsRegistry - operational counters, off the protocol path
//! 7. IotAgent - facade composing the above
//!
//! ## Design Principles
//!
//! - SSoT: the SessionStore is the only holder of session state
//! - The registry is the source of truth: every change resends the full
//!   device set under the same registration id
//! - Statistics never block or fail protocol operations

pub mod agent;
pub mod device_registry;
pub mod error;
pub mod registration;
pub mod session;
pub mod stats_registry;
pub mod transport;
pub mod update;

pub use agent::IotAgent;
pub use error::{Error, Result};
