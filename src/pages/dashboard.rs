//! Authenticated landing page showing the current user's profile.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::navbar::Navbar;
use crate::state::auth::AuthContext;
use crate::util::auth::install_unauth_redirect;

/// Dashboard page — profile card for the evaluated session user.
/// Redirects to `/login` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state;
    let navigate = use_navigate();
    install_unauth_redirect(state, navigate);

    view! {
        <div class="dashboard-page">
            <Navbar/>
            <main class="dashboard-page__content">
                <h1>"Dashboard"</h1>
                {move || {
                    state
                        .get()
                        .user
                        .map(|user| {
                            let role = user.role.as_str();
                            view! {
                                <section class="profile-card">
                                    <h2 class="profile-card__name">{user.name.clone()}</h2>
                                    <p class="profile-card__email">{user.email.clone()}</p>
                                    <span class=format!("role-badge role-badge--{role}")>
                                        {role}
                                    </span>
                                </section>
                            }
                        })
                }}
            </main>
        </div>
    }
}
