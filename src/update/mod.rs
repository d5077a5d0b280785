//! Update module
//!
//! NGSI10 attribute value updates, sent independently of the
//! registration flow.

pub mod service;
pub mod types;

pub use service::UpdateService;
pub use types::{
    AttributeValue, ContextElement, UpdateRequest, UPDATE_ACTION_APPEND, UPDATE_CONTEXT_PATH,
};
