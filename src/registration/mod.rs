//! Registration module
//!
//! NGSI9 context-provider registration: session activation against the
//! broker plus full-state resynchronization of the device registry on
//! every change.
//!
//! ## Module layout
//! - `types`: wire payload types and endpoint path
//! - `service`: session lifecycle and register/unregister operations

pub mod service;
pub mod types;

pub use service::RegistrationService;
pub use types::{
    ContextRegistration, EntityRef, RegistrationAttribute, RegistrationRequest,
    RegistrationResponse, FLAG_FALSE, REGISTER_CONTEXT_PATH,
};
