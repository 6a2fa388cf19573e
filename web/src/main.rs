use dioxus::prelude::*;
use tracing::{error, warn};

mod components;
mod config;
mod session;
mod supabase;

use components::{toast, AuthGate, Header, LoadingSpinner, TaskBoard, TaskComposer, Toaster};
use config::AppConfig;
use session::SessionStore;
use supabase::Supabase;
use taskboard_core::task::{reload, Task};

const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

/// Top-level session controller.
///
/// Owns the in-memory task collection and the loading flag, provides the
/// Supabase client and session store through context, and re-runs a full
/// reload whenever the session changes. Every mutation elsewhere in the app
/// reports back here and triggers the same full reload; the collection is
/// never patched locally.
#[component]
fn App() -> Element {
    let supabase = use_context_provider(|| {
        let config = AppConfig::from_build_env()
            .expect("Supabase configuration missing; set SUPABASE_URL and SUPABASE_ANON_KEY when building");
        Supabase::new(&config)
    });
    let mut session = use_context_provider(SessionStore::restore);

    let mut tasks = use_signal(Vec::<Task>::new);
    let mut loading = use_signal(|| true);

    let reload_tasks = use_callback({
        let supabase = supabase.clone();
        move |_: ()| {
            let Some(identity) = session.identity() else {
                tasks.set(Vec::new());
                loading.set(false);
                return;
            };
            let api = supabase.tasks(session.current().as_ref());
            spawn(async move {
                loading.set(true);
                match reload(&api, &identity.id).await {
                    Ok(snapshot) => tasks.set(snapshot),
                    Err(e) => {
                        error!("failed to load tasks: {e}");
                        toast::error("Failed to load tasks");
                    }
                }
                loading.set(false);
            });
        }
    });

    // Session-change subscription: reading the identity here re-runs this
    // effect on every sign-in and sign-out for the life of the app.
    use_effect(move || {
        if session.identity().is_some() {
            reload_tasks.call(());
        } else {
            tasks.set(Vec::new());
            loading.set(false);
        }
    });

    let handle_sign_out = {
        let supabase = supabase.clone();
        move |_| {
            let supabase = supabase.clone();
            spawn(async move {
                if let Some(active) = session.current() {
                    // The provider call can fail; the local session ends
                    // regardless, and the session-change effect clears the
                    // rest of the UI state.
                    if let Err(e) = supabase.sign_out(&active.access_token).await {
                        warn!("sign-out request failed: {e}");
                    }
                }
                session.clear();
            });
        }
    };

    let authenticated = session.identity().is_some();

    rsx! {
        document::Link { rel: "stylesheet", href: TAILWIND_CSS }
        Toaster {}

        if !authenticated {
            AuthGate { on_authenticated: move |_| loading.set(true) }
        } else {
            div { class: "min-h-screen bg-gray-100",
                div { class: "max-w-4xl mx-auto py-8 px-4",
                    Header { on_sign_out: handle_sign_out }

                    div { class: "space-y-8",
                        TaskComposer { on_created: move |_| reload_tasks.call(()) }

                        if loading() {
                            LoadingSpinner { message: "Loading tasks...".to_string() }
                        } else {
                            TaskBoard { tasks: tasks(), on_mutated: move |_| reload_tasks.call(()) }
                        }
                    }
                }
            }
        }
    }
}
