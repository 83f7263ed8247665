//! Administration page: user table with add, update, and delete dialogs.

#[cfg(test)]
#[path = "administration_test.rs"]
mod administration_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::navbar::Navbar;
use crate::net::types::{Role, UserRecord};
#[cfg(any(test, feature = "hydrate"))]
use crate::session::store::SafeUser;
use crate::state::auth::AuthContext;
use crate::util::auth::install_unauth_redirect;

/// True when `record` is the session user's own account. Used to decide
/// whether an update must be followed by re-saving the session.
#[cfg(any(test, feature = "hydrate"))]
fn is_own_record(session_user: Option<&SafeUser>, record: &UserRecord) -> bool {
    let Some(session_id) = session_user.and_then(|u| u.id.as_deref()).filter(|id| !id.is_empty())
    else {
        return false;
    };
    record.primary_id() == Some(session_id)
}

/// Administration page — lists all users and drives the CRUD dialogs.
/// Redirects to `/login` if the user is not authenticated.
#[component]
pub fn AdministrationPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();
    install_unauth_redirect(auth.state, navigate);

    let store = auth.store().clone();
    let users = LocalResource::new(move || {
        let store = store.clone();
        async move { crate::net::users::get_all(&store).await }
    });

    let show_add = RwSignal::new(false);
    let editing = RwSignal::new(None::<UserRecord>);
    let deleting = RwSignal::new(None::<UserRecord>);

    view! {
        <div class="admin-page">
            <Navbar/>
            <main class="admin-page__content">
                <header class="admin-page__header">
                    <h1>"User Administration"</h1>
                    <button class="btn btn--primary" on:click=move |_| show_add.set(true)>
                        "+ Add User"
                    </button>
                </header>

                <Suspense fallback=move || view! { <p>"Loading users..."</p> }>
                    {move || {
                        users
                            .get()
                            .map(|result| match result {
                                Ok(list) => {
                                    view! {
                                        <table class="user-table">
                                            <thead>
                                                <tr>
                                                    <th>"Name"</th>
                                                    <th>"Email"</th>
                                                    <th>"Role"</th>
                                                    <th></th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {list
                                                    .into_iter()
                                                    .map(|record| {
                                                        let edit_record = record.clone();
                                                        let delete_record = record.clone();
                                                        let role = record.role.as_str();
                                                        view! {
                                                            <tr>
                                                                <td>{record.name.clone()}</td>
                                                                <td>{record.email.clone()}</td>
                                                                <td>
                                                                    <span class=format!("role-badge role-badge--{role}")>
                                                                        {role}
                                                                    </span>
                                                                </td>
                                                                <td class="user-table__actions">
                                                                    <button
                                                                        class="btn"
                                                                        on:click=move |_| editing.set(Some(edit_record.clone()))
                                                                    >
                                                                        "Edit"
                                                                    </button>
                                                                    <button
                                                                        class="btn btn--danger"
                                                                        on:click=move |_| deleting.set(Some(delete_record.clone()))
                                                                    >
                                                                        "Delete"
                                                                    </button>
                                                                </td>
                                                            </tr>
                                                        }
                                                    })
                                                    .collect::<Vec<_>>()}
                                            </tbody>
                                        </table>
                                    }
                                        .into_any()
                                }
                                Err(e) => {
                                    view! {
                                        <p class="admin-page__error">{format!("Failed to load users: {e}")}</p>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>

                <Show when=move || show_add.get()>
                    <AddUserDialog
                        on_close=Callback::new(move |_| show_add.set(false))
                        users=users
                    />
                </Show>
                {move || {
                    editing
                        .get()
                        .map(|record| {
                            view! {
                                <UpdateUserDialog
                                    record=record
                                    on_close=Callback::new(move |_| editing.set(None))
                                    users=users
                                />
                            }
                        })
                }}
                {move || {
                    deleting
                        .get()
                        .map(|record| {
                            view! {
                                <DeleteUserDialog
                                    record=record
                                    on_close=Callback::new(move |_| deleting.set(None))
                                    users=users
                                />
                            }
                        })
                }}
            </main>
        </div>
    }
}

/// Modal dialog for registering a new user account.
#[component]
fn AddUserDialog(
    on_close: Callback<()>,
    users: LocalResource<Result<Vec<UserRecord>, String>>,
) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Viewer);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let name_value = name.get().trim().to_owned();
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if name_value.is_empty() || email_value.is_empty() || password_value.is_empty() {
            error.set("Name, email, and password are required.".to_owned());
            return;
        }
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let role_value = role.get();
            leptos::task::spawn_local(async move {
                match crate::net::users::register(
                    &name_value,
                    &email_value,
                    &password_value,
                    Some(role_value),
                )
                .await
                {
                    Ok(_) => {
                        users.refetch();
                        on_close.run(());
                    }
                    Err(e) => {
                        error.set(format!("Failed to add user: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (name_value, email_value, password_value, &users);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Add User"</h2>
                <label class="dialog__label">
                    "Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Password"
                    <input
                        class="dialog__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Role"
                    <RoleSelect role=role/>
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="dialog__error">{move || error.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || busy.get()
                        on:click=move |_| submit.run(())
                    >
                        "Add"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Modal dialog for editing an existing user's name, email, and role.
///
/// When the edited record is the session user's own account, the session is
/// re-saved after a successful update so the navbar and dashboard reflect
/// the change — the repository adapter deliberately does not do this itself.
#[component]
fn UpdateUserDialog(
    record: UserRecord,
    on_close: Callback<()>,
    users: LocalResource<Result<Vec<UserRecord>, String>>,
) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let id = record.primary_id().unwrap_or_default().to_owned();
    let name = RwSignal::new(record.name.clone());
    let email = RwSignal::new(record.email.clone());
    let role = RwSignal::new(record.role);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let name_value = name.get().trim().to_owned();
        let email_value = email.get().trim().to_owned();
        if name_value.is_empty() || email_value.is_empty() {
            error.set("Name and email are required.".to_owned());
            return;
        }
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            let id = id.clone();
            let role_value = role.get();
            leptos::task::spawn_local(async move {
                let changes = serde_json::json!({
                    "name": name_value,
                    "email": email_value,
                    "role": role_value.as_str(),
                });
                match crate::net::users::update(auth.store(), &id, &changes).await {
                    Ok(updated) => {
                        let session_user = auth.state.get_untracked().user;
                        if is_own_record(session_user.as_ref(), &updated) {
                            auth.store().save(&updated.to_safe(), None);
                        }
                        users.refetch();
                        on_close.run(());
                    }
                    Err(e) => {
                        error.set(format!("Failed to update user: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth, &id, name_value, email_value, &users);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Edit User"</h2>
                <label class="dialog__label">
                    "Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Role"
                    <RoleSelect role=role/>
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="dialog__error">{move || error.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || busy.get()
                        on:click=move |_| submit.run(())
                    >
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Modal confirmation dialog for deleting a user account.
#[component]
fn DeleteUserDialog(
    record: UserRecord,
    on_close: Callback<()>,
    users: LocalResource<Result<Vec<UserRecord>, String>>,
) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let id = record.primary_id().unwrap_or_default().to_owned();
    let name = record.name.clone();
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let auth = auth.clone();
            let id = id.clone();
            leptos::task::spawn_local(async move {
                match crate::net::users::delete(auth.store(), &id).await {
                    Ok(()) => {
                        users.refetch();
                        on_close.run(());
                    }
                    Err(e) => {
                        error.set(format!("Failed to delete user: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&auth, &id, &users);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Delete User"</h2>
                <p>{format!("Delete the account for {name}? This cannot be undone.")}</p>
                <Show when=move || !error.get().is_empty()>
                    <p class="dialog__error">{move || error.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--danger"
                        disabled=move || busy.get()
                        on:click=move |_| submit.run(())
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Role dropdown bound to a `RwSignal<Role>`; unknown values never reach the
/// signal because [`Role::parse`] collapses them to viewer.
#[component]
fn RoleSelect(role: RwSignal<Role>) -> impl IntoView {
    view! {
        <select
            class="dialog__input"
            on:change=move |ev| role.set(Role::parse(&event_target_value(&ev)))
        >
            {Role::ALL
                .into_iter()
                .map(|option| {
                    view! {
                        <option value=option.as_str() selected=move || role.get() == option>
                            {option.as_str()}
                        </option>
                    }
                })
                .collect::<Vec<_>>()}
        </select>
    }
}
