use dioxus::prelude::*;
use taskboard_core::task::{create, TaskDraft};
use tracing::error;

use crate::components::toast;
use crate::session::use_session_store;
use crate::supabase::Supabase;

/// Form for creating a task: title required, description optional.
///
/// Success clears both fields and asks the parent to reload; failure keeps
/// the fields as typed so the user does not lose input.
#[component]
pub fn TaskComposer(on_created: EventHandler<()>) -> Element {
    let supabase = use_context::<Supabase>();
    let session = use_session_store();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        // The required attribute already blocks an empty title in the
        // browser; this is the contract's backstop.
        let draft = match TaskDraft::new(title(), description()) {
            Ok(draft) => draft,
            Err(_) => return,
        };
        let supabase = supabase.clone();
        spawn(async move {
            submitting.set(true);
            let api = supabase.tasks(session.current().as_ref());
            let identity = session.identity();
            match create(&api, identity.as_ref().map(|user| user.id.as_str()), draft).await {
                Ok(()) => {
                    title.set(String::new());
                    description.set(String::new());
                    toast::success("Task created successfully!");
                    on_created.call(());
                }
                Err(e) => {
                    error!("failed to create task: {e}");
                    toast::error("Failed to create task");
                }
            }
            submitting.set(false);
        });
    };

    let submit_label = if submitting() { "Creating..." } else { "Add Task" };

    rsx! {
        form { class: "bg-white rounded-lg shadow-md p-6 space-y-4", onsubmit: handle_submit,
            div {
                label { r#for: "title", class: "block text-sm font-medium text-gray-700", "Task Title" }
                input {
                    id: "title",
                    r#type: "text",
                    required: true,
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                    placeholder: "Enter task title",
                    class: "mt-1 w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent",
                }
            }
            div {
                label { r#for: "description", class: "block text-sm font-medium text-gray-700", "Description (optional)" }
                textarea {
                    id: "description",
                    rows: "3",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                    placeholder: "Enter task description",
                    class: "mt-1 w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent",
                }
            }
            button {
                r#type: "submit",
                disabled: submitting(),
                class: "w-full bg-blue-600 text-white py-2 px-4 rounded-lg font-medium hover:bg-blue-700 transition-colors disabled:opacity-50",
                "{submit_label}"
            }
        }
    }
}
