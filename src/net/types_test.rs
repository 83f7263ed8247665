use super::*;

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    assert_eq!(serde_json::to_string(&Role::Viewer).unwrap(), r#""viewer""#);
}

#[test]
fn role_deserializes_known_values() {
    assert_eq!(serde_json::from_str::<Role>(r#""manager""#).unwrap(), Role::Manager);
    assert_eq!(serde_json::from_str::<Role>(r#""editor""#).unwrap(), Role::Editor);
}

#[test]
fn unknown_role_deserializes_to_viewer() {
    assert_eq!(serde_json::from_str::<Role>(r#""superuser""#).unwrap(), Role::Viewer);
    assert_eq!(serde_json::from_str::<Role>(r#""""#).unwrap(), Role::Viewer);
}

#[test]
fn role_parse_defaults_unrecognized_to_viewer() {
    assert_eq!(Role::parse("admin"), Role::Admin);
    assert_eq!(Role::parse("Admin"), Role::Viewer);
    assert_eq!(Role::parse("root"), Role::Viewer);
}

#[test]
fn primary_id_prefers_mongo_id() {
    let record: UserRecord = serde_json::from_str(
        r#"{"_id":"m1","id":"p1","name":"A","email":"a@b.com","role":"admin"}"#,
    )
    .unwrap();
    assert_eq!(record.primary_id(), Some("m1"));
}

#[test]
fn primary_id_falls_back_to_plain_id() {
    let record: UserRecord =
        serde_json::from_str(r#"{"id":"p1","name":"A","email":"a@b.com","role":"admin"}"#).unwrap();
    assert_eq!(record.primary_id(), Some("p1"));
}

#[test]
fn primary_id_treats_empty_strings_as_absent() {
    let record: UserRecord = serde_json::from_str(
        r#"{"_id":"","id":"p1","name":"A","email":"a@b.com","role":"admin"}"#,
    )
    .unwrap();
    assert_eq!(record.primary_id(), Some("p1"));

    let record: UserRecord =
        serde_json::from_str(r#"{"_id":"","id":"","name":"A","email":"a@b.com"}"#).unwrap();
    assert_eq!(record.primary_id(), None);
}

#[test]
fn sparse_record_deserializes_with_defaults() {
    let record: UserRecord = serde_json::from_str(r#"{"_id":"u1"}"#).unwrap();
    assert_eq!(record.name, "");
    assert_eq!(record.email, "");
    assert_eq!(record.role, Role::Viewer);
}

#[test]
fn to_safe_projects_identity_fields_only() {
    let record: UserRecord = serde_json::from_str(
        r#"{"_id":"u1","name":"A","email":"a@b.com","role":"editor","createdAt":"2026-01-01"}"#,
    )
    .unwrap();

    let safe = record.to_safe();
    assert_eq!(safe.id.as_deref(), Some("u1"));
    assert_eq!(safe.name, "A");
    assert_eq!(safe.email, "a@b.com");
    assert_eq!(safe.role, Role::Editor);

    let raw = serde_json::to_string(&safe).unwrap();
    assert!(!raw.contains("createdAt"));
}

#[test]
fn login_response_fields_default_to_none() {
    let response: LoginResponse = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
    assert_eq!(response.message.as_deref(), Some("ok"));
    assert_eq!(response.token, None);
    assert_eq!(response.user, None);
}
