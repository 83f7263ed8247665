//! Session/authentication core: token codec, persistent store, evaluator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything authenticated in the app depends on this module. The store
//! persists a minimal user projection plus the raw bearer token under two
//! `localStorage` keys and broadcasts a change notification on every
//! mutation; the evaluator re-reads that state and decides whether a valid
//! session exists. The `state::auth` facade subscribes to the notifications
//! and re-runs the evaluator.

pub mod evaluate;
pub mod store;
pub mod token;

/// Storage key for the JSON-serialized safe user projection.
pub const USER_KEY: &str = "rbac_session_user";

/// Storage key for the raw bearer token string.
pub const TOKEN_KEY: &str = "rbac_session_token";

/// Name of the in-process event dispatched on every store mutation. Cross-tab
/// writes additionally surface through the browser's native `storage` event.
pub const AUTH_EVENT: &str = "auth-change";

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn now_seconds() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            (js_sys::Date::now() / 1000.0) as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
