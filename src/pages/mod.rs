//! Route components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages compose the auth context, the repository adapter, and the shared
//! components; protected pages install the unauthenticated redirect.

pub mod administration;
pub mod dashboard;
pub mod login;
