//! Session validity evaluation.
//!
//! Composes the token codec and the session store to answer "is there a
//! currently valid session, and for whom". Invoked on mount and on every
//! change notification. Idempotent and side-effect-free except that a
//! corrupted or expired session is cleared from the store — that is expected
//! steady-state behavior, not an error surfaced to the user.

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod evaluate_test;

use super::store::{SafeUser, SessionStore};
use super::token::decode_token;

/// Result of one evaluation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub user: Option<SafeUser>,
    pub valid: bool,
}

impl Evaluation {
    fn invalid() -> Self {
        Self { user: None, valid: false }
    }
}

/// Evaluate the persisted session record against `now` (epoch seconds).
///
/// The wall clock is a parameter so callers and tests control it; production
/// passes [`crate::session::now_seconds`]. Always re-reads current store
/// content, so stale change-notification orderings are harmless.
pub fn evaluate_session(store: &SessionStore, now: i64) -> Evaluation {
    let Some(token) = store.token() else {
        log::debug!("session check: no token present");
        return Evaluation::invalid();
    };
    let Some(mut user) = store.load() else {
        log::debug!("session check: no stored user");
        return Evaluation::invalid();
    };

    let Some(claims) = decode_token(&token) else {
        log::warn!("session check: undecodable token, clearing session");
        store.clear();
        return Evaluation::invalid();
    };

    if claims.exp < now {
        log::debug!("session check: token expired at {} (now {now})", claims.exp);
        store.clear();
        return Evaluation::invalid();
    }

    // Some backends omit the identifier from the user payload but embed it
    // in the token; backfill from the claims in that case.
    if user.id.as_deref().is_none_or(str::is_empty) {
        user.id = Some(claims.id);
    }

    Evaluation { user: Some(user), valid: true }
}
