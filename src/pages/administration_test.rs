use super::*;

fn session_user(id: Option<&str>) -> SafeUser {
    SafeUser {
        id: id.map(str::to_owned),
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        role: Role::Admin,
    }
}

fn record(id: &str) -> UserRecord {
    serde_json::from_str(&format!(
        r#"{{"_id":"{id}","name":"Bob","email":"bob@example.com","role":"viewer"}}"#
    ))
    .expect("record json")
}

#[test]
fn own_record_matches_on_primary_id() {
    let user = session_user(Some("u1"));
    assert!(is_own_record(Some(&user), &record("u1")));
}

#[test]
fn other_record_does_not_match() {
    let user = session_user(Some("u1"));
    assert!(!is_own_record(Some(&user), &record("u2")));
}

#[test]
fn no_session_user_never_matches() {
    assert!(!is_own_record(None, &record("u1")));
}

#[test]
fn empty_session_id_never_matches() {
    let user = session_user(Some(""));
    assert!(!is_own_record(Some(&user), &record("")));
    let user = session_user(None);
    assert!(!is_own_record(Some(&user), &record("u1")));
}
