//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! One context per state domain so components can depend on small focused
//! models. Auth is currently the only domain.

pub mod auth;
