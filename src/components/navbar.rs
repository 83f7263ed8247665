//! Top navigation bar with the current user and a logout action.

use leptos::prelude::*;

use crate::state::auth::AuthContext;

/// Navigation bar shown on authenticated pages.
///
/// Logout clears the session through the auth context and sends the browser
/// back to `/login`.
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state;

    let on_logout = move |_| {
        auth.logout();
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">"RBAC Admin"</a>
            <div class="navbar__links">
                <a href="/">"Dashboard"</a>
                <a href="/administration">"Administration"</a>
            </div>
            <div class="navbar__session">
                <span class="navbar__user">
                    {move || state.get().user.map(|u| u.name).unwrap_or_default()}
                </span>
                <button class="btn" on:click=on_logout>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}
