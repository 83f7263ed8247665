//! Process-wide authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AuthContext` is provided from `App`. It runs the session evaluator
//! once synchronously on creation, then re-runs it whenever the session
//! store broadcasts a change: the in-process `auth-change` event covers
//! same-tab mutations, and the browser's native `storage` event covers
//! writes from other tabs. Login and logout update the signal immediately
//! so the UI never waits on the notification round trip.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::session::evaluate::evaluate_session;
use crate::session::now_seconds;
use crate::session::store::{SafeUser, SessionStore};

/// Reactive authentication state consumed by pages and components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SafeUser>,
    pub authenticated: bool,
    /// True only until the first evaluation pass completes; never true
    /// again afterward.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, authenticated: false, loading: true }
    }
}

/// Auth facade: the reactive state plus the actions that mutate it.
#[derive(Clone)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    store: SessionStore,
    checking: Arc<AtomicBool>,
}

impl AuthContext {
    /// Build a context over `store` and run the initial evaluation.
    pub fn new(store: SessionStore) -> Self {
        let ctx = Self {
            state: RwSignal::new(AuthState::default()),
            store,
            checking: Arc::new(AtomicBool::new(false)),
        };
        ctx.check();
        ctx
    }

    /// The session store backing this context, for the repository adapter.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Re-evaluate the persisted session and update the signal.
    ///
    /// Evaluation is cheap and synchronous; a call arriving while another is
    /// in flight is dropped rather than queued, since only the latest store
    /// state matters.
    pub fn check(&self) {
        if self.checking.swap(true, Ordering::Acquire) {
            return;
        }
        let evaluation = evaluate_session(&self.store, now_seconds());
        log::debug!("auth: session check valid={}", evaluation.valid);
        self.state.set(AuthState {
            user: evaluation.user,
            authenticated: evaluation.valid,
            loading: false,
        });
        self.checking.store(false, Ordering::Release);
    }

    /// Persist the session and mark the state authenticated immediately,
    /// without waiting for the change notification the write also fires.
    /// The re-check that notification triggers reads the same stored state,
    /// so the two updates agree and no flicker is visible.
    pub fn login(&self, user: SafeUser, token: &str) {
        self.store.save(&user, Some(token));
        self.state.set(AuthState { user: Some(user), authenticated: true, loading: false });
    }

    /// Clear the session and mark the state unauthenticated immediately.
    pub fn logout(&self) {
        log::debug!("auth: logout");
        self.store.clear();
        self.state.set(AuthState { user: None, authenticated: false, loading: false });
    }
}

/// Provide the auth context and install change-notification listeners.
///
/// Called once from `App`; the listeners are removed when the providing
/// owner is disposed.
pub fn provide_auth(store: SessionStore) -> AuthContext {
    let ctx = AuthContext::new(store);
    provide_context(ctx.clone());
    install_change_listeners(&ctx);
    ctx
}

/// Subscribe `ctx` to the in-process `auth-change` event and the native
/// cross-tab `storage` event. Both funnel into the same evaluator path.
#[cfg(feature = "hydrate")]
fn install_change_listeners(ctx: &AuthContext) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };

    let handler = {
        let ctx = ctx.clone();
        Closure::<dyn Fn()>::new(move || {
            log::debug!("auth: change notification, rechecking");
            ctx.check();
        })
    };
    let callback = handler.as_ref().unchecked_ref::<js_sys::Function>().clone();

    let _ = window.add_event_listener_with_callback(crate::session::AUTH_EVENT, &callback);
    let _ = window.add_event_listener_with_callback("storage", &callback);

    // The closure must outlive the subscriptions; both are torn down when
    // the providing owner is disposed.
    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(crate::session::AUTH_EVENT, &callback);
            let _ = window.remove_event_listener_with_callback("storage", &callback);
        }
        drop(handler);
    });
}

#[cfg(not(feature = "hydrate"))]
fn install_change_listeners(ctx: &AuthContext) {
    let _ = ctx;
}
