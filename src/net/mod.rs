//! Networking modules for the user-management REST boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the wire DTOs shared with the backend; `users` is the
//! repository adapter issuing the actual HTTP calls.

pub mod types;
pub mod users;
