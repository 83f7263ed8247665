//! User repository adapter over the REST boundary.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the bearer
//! token sourced from the session store on authenticated routes.
//! Server-side (SSR): stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every operation resolves to `Result<_, String>` with one human-readable
//! message per call site; the backend-provided message is preferred over a
//! generic status fallback. Nothing here retries — redirect/retry decisions
//! belong to the UI layer.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

#[cfg(any(test, feature = "hydrate"))]
use super::types::LoginResponse;
use super::types::{Role, UserRecord};
use crate::session::store::{SafeUser, SessionStore};
#[cfg(any(test, feature = "hydrate"))]
use crate::session::token::decode_token;

#[cfg(feature = "hydrate")]
const USERS_ENDPOINT: &str = "/api/users";

#[cfg(any(test, feature = "hydrate"))]
fn user_endpoint(id: &str) -> String {
    format!("/api/users/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Pick the most specific error message from an error response body:
/// the backend `message`, then `error`, then a generic status fallback.
#[cfg(any(test, feature = "hydrate"))]
fn response_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                if !message.trim().is_empty() {
                    return message.to_owned();
                }
            }
        }
    }
    request_failed_message(status)
}

/// Reject an empty identifier before any network activity. An empty id is a
/// caller programming error, not a network condition.
fn validate_user_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err("user id must not be empty".to_owned());
    }
    Ok(())
}

/// Outcome of a successful login: the reconciled projection plus the token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: SafeUser,
    pub token: String,
}

/// Validate a login response body and reconcile the user identifier.
///
/// Precedence: `user._id`, then `user.id`, then the `id` claim decoded from
/// the returned token. A user with no recoverable identifier proceeds with
/// an absent one (logged, not fatal); the session evaluator backfills it on
/// the next check.
#[cfg(any(test, feature = "hydrate"))]
fn reconcile_login(response: LoginResponse) -> Result<LoginOutcome, String> {
    let Some(token) = response.token.filter(|t| !t.is_empty()) else {
        return Err("login response is missing a token".to_owned());
    };
    let Some(record) = response.user else {
        return Err("login response is missing a user".to_owned());
    };

    let mut user = record.to_safe();
    if user.id.as_deref().is_none_or(str::is_empty) {
        match decode_token(&token) {
            Some(claims) => user.id = Some(claims.id),
            None => {
                log::warn!("login: no user id in response and token is undecodable");
                user.id = None;
            }
        }
    }

    Ok(LoginOutcome { user, token })
}

/// Reconcile a login response and write the session through the store.
/// The write happens before the outcome is returned to the caller.
#[cfg(any(test, feature = "hydrate"))]
fn apply_login(store: &SessionStore, response: LoginResponse) -> Result<LoginOutcome, String> {
    let outcome = reconcile_login(response)?;
    store.save(&outcome.user, Some(&outcome.token));
    Ok(outcome)
}

#[cfg(feature = "hydrate")]
#[derive(Debug, serde::Deserialize)]
struct UserEnvelope {
    user: UserRecord,
}

#[cfg(feature = "hydrate")]
fn authorized(
    request: gloo_net::http::RequestBuilder,
    store: &SessionStore,
) -> gloo_net::http::RequestBuilder {
    match store.token() {
        Some(token) => request.header("Authorization", &format!("Bearer {token}")),
        None => request,
    }
}

#[cfg(feature = "hydrate")]
async fn error_from_response(resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    response_error_message(status, &body)
}

/// Register a new account via `POST /api/users/register`.
///
/// # Errors
///
/// Returns a human-readable message when the transport fails or the backend
/// rejects the registration.
pub async fn register(
    name: &str,
    email: &str,
    password: &str,
    role: Option<Role>,
) -> Result<UserRecord, String> {
    #[cfg(feature = "hydrate")]
    {
        let mut payload = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        });
        if let Some(role) = role {
            payload["role"] = serde_json::Value::String(role.as_str().to_owned());
        }
        let resp = gloo_net::http::Request::post(&format!("{USERS_ENDPOINT}/register"))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp).await);
        }
        let body: UserEnvelope = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.user)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, email, password, role);
        Err("not available on server".to_owned())
    }
}

/// Log in with email + password via `POST /api/users/login`.
///
/// On success the reconciled user and token are persisted through `store`
/// before this returns, so the session survives a reload even if the caller
/// does nothing else.
///
/// # Errors
///
/// Distinct messages for transport failure, a response missing its token,
/// and a response missing its user. Nothing is persisted on any error path.
pub async fn login(store: &SessionStore, email: &str, password: &str) -> Result<LoginOutcome, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "password": password });
        let resp = gloo_net::http::Request::post(&format!("{USERS_ENDPOINT}/login"))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp).await);
        }
        let body: LoginResponse = resp.json().await.map_err(|e| e.to_string())?;
        apply_login(store, body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, email, password);
        Err("not available on server".to_owned())
    }
}

/// Fetch all user records via `GET /api/users`.
///
/// # Errors
///
/// Returns a human-readable message when the transport fails or the backend
/// rejects the request.
pub async fn get_all(store: &SessionStore) -> Result<Vec<UserRecord>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::get(USERS_ENDPOINT), store)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp).await);
        }
        resp.json::<Vec<UserRecord>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = store;
        Err("not available on server".to_owned())
    }
}

/// Fetch a single user record via `GET /api/users/{id}`.
///
/// # Errors
///
/// Rejects immediately, without a network call, when `id` is empty;
/// otherwise propagates transport/backend failures.
pub async fn get_by_id(store: &SessionStore, id: &str) -> Result<UserRecord, String> {
    validate_user_id(id)?;
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::get(&user_endpoint(id)), store)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp).await);
        }
        resp.json::<UserRecord>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = store;
        Err("not available on server".to_owned())
    }
}

/// Update a user record via `PUT /api/users/{id}` with partial fields.
///
/// No auth-state side effects: when the updated record is the caller's own
/// session user, the CALLER re-saves the session — this adapter cannot know
/// whose record it just touched.
///
/// # Errors
///
/// Rejects immediately when `id` is empty; otherwise propagates
/// transport/backend failures.
pub async fn update(
    store: &SessionStore,
    id: &str,
    changes: &serde_json::Value,
) -> Result<UserRecord, String> {
    validate_user_id(id)?;
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::put(&user_endpoint(id)), store)
            .json(changes)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp).await);
        }
        let body: UserEnvelope = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.user)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (store, changes);
        Err("not available on server".to_owned())
    }
}

/// Delete a user record via `DELETE /api/users/{id}`.
///
/// # Errors
///
/// Rejects immediately when `id` is empty; otherwise propagates
/// transport/backend failures.
pub async fn delete(store: &SessionStore, id: &str) -> Result<(), String> {
    validate_user_id(id)?;
    #[cfg(feature = "hydrate")]
    {
        let resp = authorized(gloo_net::http::Request::delete(&user_endpoint(id)), store)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = store;
        Err("not available on server".to_owned())
    }
}
