use super::*;

use crate::net::types::Role;
use crate::session::store::SafeUser;

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, authenticated: false, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, authenticated: false, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState {
        user: Some(SafeUser {
            id: Some("u1".to_owned()),
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            role: Role::Admin,
        }),
        authenticated: true,
        loading: false,
    };
    assert!(!should_redirect_unauth(&state));
}
