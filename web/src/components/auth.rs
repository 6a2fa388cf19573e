use dioxus::prelude::*;
use tracing::error;

use crate::components::toast;
use crate::session::use_session_store;
use crate::supabase::Supabase;

/// Credential form shown whenever no session is active.
///
/// Toggles between sign-in and sign-up. Success stores the issued session and
/// signals the parent that the session is changing; failure surfaces the
/// provider's message and changes nothing.
#[component]
pub fn AuthGate(on_authenticated: EventHandler<()>) -> Element {
    let supabase = use_context::<Supabase>();
    let mut session = use_session_store();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut sign_up_mode = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let supabase = supabase.clone();
        spawn(async move {
            submitting.set(true);
            if sign_up_mode() {
                match supabase.sign_up(&email(), &password()).await {
                    Ok(new_session) => {
                        toast::success("Account created successfully!");
                        if let Some(issued) = new_session {
                            session.set(issued);
                        }
                        on_authenticated.call(());
                    }
                    Err(e) => {
                        error!("sign-up failed: {e}");
                        toast::error(e.to_string());
                    }
                }
            } else {
                match supabase.sign_in(&email(), &password()).await {
                    Ok(new_session) => {
                        toast::success("Logged in successfully!");
                        session.set(new_session);
                        on_authenticated.call(());
                    }
                    Err(e) => {
                        error!("sign-in failed: {e}");
                        toast::error(e.to_string());
                    }
                }
            }
            submitting.set(false);
        });
    };

    let heading = if sign_up_mode() {
        "Create your account"
    } else {
        "Sign in to your account"
    };
    let submit_label = if submitting() {
        "Processing..."
    } else if sign_up_mode() {
        "Sign Up"
    } else {
        "Sign In"
    };
    let mode_switch_label = if sign_up_mode() {
        "Already have an account? Sign in"
    } else {
        "Don't have an account? Sign up"
    };

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gradient-to-br from-blue-50 to-indigo-50 py-12 px-4",
            div { class: "max-w-md w-full bg-white rounded-lg shadow-md p-8",
                h2 { class: "text-center text-3xl font-extrabold text-gray-900 mb-8", "{heading}" }

                form { class: "space-y-6", onsubmit: handle_submit,
                    div {
                        label { r#for: "email", class: "block text-sm font-medium text-gray-700", "Email address" }
                        input {
                            id: "email",
                            r#type: "email",
                            required: true,
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                            placeholder: "Enter your email",
                            class: "mt-1 w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent",
                        }
                    }
                    div {
                        label { r#for: "password", class: "block text-sm font-medium text-gray-700", "Password" }
                        input {
                            id: "password",
                            r#type: "password",
                            required: true,
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                            placeholder: "Enter your password",
                            class: "mt-1 w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent",
                        }
                    }

                    button {
                        r#type: "submit",
                        disabled: submitting(),
                        class: "w-full bg-blue-600 text-white py-2 px-4 rounded-lg font-medium hover:bg-blue-700 transition-colors disabled:opacity-50",
                        "{submit_label}"
                    }

                    div { class: "text-center",
                        button {
                            r#type: "button",
                            class: "text-sm text-blue-600 hover:text-blue-500",
                            onclick: move |_| sign_up_mode.set(!sign_up_mode()),
                            "{mode_switch_label}"
                        }
                    }
                }
            }
        }
    }
}
