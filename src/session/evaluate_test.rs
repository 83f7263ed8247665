use super::*;

use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::net::types::Role;
use crate::session::store::{MemoryStorage, StorageBackend as _};

const NOW: i64 = 1_700_000_000;

fn make_token(id: &str, exp: i64) -> String {
    let payload = serde_json::json!({
        "id": id,
        "role": "editor",
        "iat": NOW - 60,
        "exp": exp,
    });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.signature")
}

fn memory_store() -> (SessionStore, MemoryStorage) {
    let backend = MemoryStorage::new();
    let store = SessionStore::with_backend(Arc::new(backend.clone()));
    (store, backend)
}

fn user(id: Option<&str>) -> SafeUser {
    SafeUser {
        id: id.map(str::to_owned),
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        role: Role::Editor,
    }
}

#[test]
fn no_session_when_store_is_empty() {
    let (store, _) = memory_store();
    let evaluation = evaluate_session(&store, NOW);
    assert!(!evaluation.valid);
    assert_eq!(evaluation.user, None);
}

#[test]
fn missing_token_is_invalid_without_clearing_the_user() {
    let (store, _) = memory_store();
    store.save(&user(Some("u1")), None);

    let evaluation = evaluate_session(&store, NOW);
    assert!(!evaluation.valid);
    // Absence short-circuits before the corruption-handling paths.
    assert_eq!(store.load(), Some(user(Some("u1"))));
}

#[test]
fn missing_user_is_invalid() {
    let (store, backend) = memory_store();
    backend.set(crate::session::TOKEN_KEY, &make_token("u1", NOW + 3600));

    assert!(!evaluate_session(&store, NOW).valid);
}

#[test]
fn undecodable_token_clears_the_store() {
    let (store, backend) = memory_store();
    store.save(&user(Some("u1")), None);
    backend.set(crate::session::TOKEN_KEY, "not-a-token");

    let evaluation = evaluate_session(&store, NOW);
    assert!(!evaluation.valid);
    assert_eq!(store.load(), None);
    assert_eq!(store.token(), None);
}

#[test]
fn expired_token_is_invalid_and_clears_the_store() {
    let (store, _) = memory_store();
    store.save(&user(Some("u1")), Some(&make_token("u1", NOW - 1)));

    let evaluation = evaluate_session(&store, NOW);
    assert!(!evaluation.valid);
    assert_eq!(store.load(), None);
    assert_eq!(store.token(), None);
}

#[test]
fn future_expiry_is_valid() {
    let (store, _) = memory_store();
    store.save(&user(Some("u1")), Some(&make_token("u1", NOW + 3600)));

    let evaluation = evaluate_session(&store, NOW);
    assert!(evaluation.valid);
    assert_eq!(evaluation.user, Some(user(Some("u1"))));
}

#[test]
fn expiry_exactly_now_is_still_valid() {
    let (store, _) = memory_store();
    store.save(&user(Some("u1")), Some(&make_token("u1", NOW)));

    assert!(evaluate_session(&store, NOW).valid);
}

#[test]
fn backfills_missing_id_from_token_claims() {
    let (store, _) = memory_store();
    store.save(&user(None), Some(&make_token("abc123", NOW + 3600)));

    let evaluation = evaluate_session(&store, NOW);
    assert!(evaluation.valid);
    assert_eq!(
        evaluation.user.expect("user").id.as_deref(),
        Some("abc123")
    );
}

#[test]
fn backfills_empty_string_id_from_token_claims() {
    let (store, _) = memory_store();
    store.save(&user(Some("")), Some(&make_token("abc123", NOW + 3600)));

    let evaluation = evaluate_session(&store, NOW);
    assert_eq!(
        evaluation.user.expect("user").id.as_deref(),
        Some("abc123")
    );
}

#[test]
fn stored_id_wins_over_token_claims() {
    let (store, _) = memory_store();
    store.save(&user(Some("stored-id")), Some(&make_token("claim-id", NOW + 3600)));

    let evaluation = evaluate_session(&store, NOW);
    assert_eq!(
        evaluation.user.expect("user").id.as_deref(),
        Some("stored-id")
    );
}

#[test]
fn evaluation_is_idempotent() {
    let (store, _) = memory_store();
    store.save(&user(Some("u1")), Some(&make_token("u1", NOW + 3600)));

    let first = evaluate_session(&store, NOW);
    let second = evaluate_session(&store, NOW);
    assert_eq!(first, second);
}

#[test]
fn cleared_store_evaluates_invalid() {
    let (store, _) = memory_store();
    store.save(&user(Some("u1")), Some(&make_token("u1", NOW + 3600)));
    store.clear();

    assert!(!evaluate_session(&store, NOW).valid);
}

#[test]
fn write_in_one_context_triggers_reevaluation_in_another() {
    // Two store handles over one shared backend model two tabs on the same
    // origin. The second "tab" subscribes to change notifications and
    // re-evaluates; the first writes. No direct call links the two.
    let backend = MemoryStorage::new();
    let tab_a = SessionStore::with_backend(Arc::new(backend.clone()));
    let tab_b = SessionStore::with_backend(Arc::new(backend.clone()));

    let seen: Arc<Mutex<Vec<Evaluation>>> = Arc::new(Mutex::new(Vec::new()));
    let listener_seen = Arc::clone(&seen);
    backend.subscribe(move || {
        let evaluation = evaluate_session(&tab_b, NOW);
        listener_seen.lock().unwrap().push(evaluation);
    });

    tab_a.save(&user(Some("u1")), Some(&make_token("u1", NOW + 3600)));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].valid);
    assert_eq!(seen[0].user, Some(user(Some("u1"))));
}
