use dioxus::prelude::*;
use taskboard_core::task::{delete, toggle, Task};
use tracing::error;

use crate::components::toast;
use crate::session::use_session_store;
use crate::supabase::Supabase;

/// Renders the current task collection. The collection is whatever the last
/// reload returned; there is no client-side reordering, filtering or
/// grouping.
#[component]
pub fn TaskBoard(tasks: Vec<Task>, on_mutated: EventHandler<()>) -> Element {
    if tasks.is_empty() {
        return rsx! {
            div { class: "text-center py-8 text-gray-500", "No tasks yet. Start by adding a new task!" }
        };
    }

    rsx! {
        div { class: "space-y-4",
            {tasks.iter().map(|task| rsx! {
                TaskCard { key: "{task.id}", task: task.clone(), on_mutated }
            })}
        }
    }
}

/// One task row with its toggle and delete actions. A failed action leaves
/// the displayed state as-is; it stays stale until the next reload.
#[component]
fn TaskCard(task: Task, on_mutated: EventHandler<()>) -> Element {
    let supabase = use_context::<Supabase>();
    let session = use_session_store();

    let toggle_completed = {
        let supabase = supabase.clone();
        let task = task.clone();
        move |_| {
            let supabase = supabase.clone();
            let task = task.clone();
            spawn(async move {
                let api = supabase.tasks(session.current().as_ref());
                match toggle(&api, &task).await {
                    Ok(()) => {
                        toast::success("Task updated successfully!");
                        on_mutated.call(());
                    }
                    Err(e) => {
                        error!("failed to update task {}: {e}", task.id);
                        toast::error("Failed to update task");
                    }
                }
            });
        }
    };

    let delete_task = {
        let supabase = supabase.clone();
        let id = task.id.clone();
        move |_| {
            let supabase = supabase.clone();
            let id = id.clone();
            spawn(async move {
                let api = supabase.tasks(session.current().as_ref());
                match delete(&api, &id).await {
                    Ok(()) => {
                        toast::success("Task deleted successfully!");
                        on_mutated.call(());
                    }
                    Err(e) => {
                        error!("failed to delete task {id}: {e}");
                        toast::error("Failed to delete task");
                    }
                }
            });
        }
    };

    let card_class = if task.is_completed {
        "bg-white rounded-lg shadow-md p-4 opacity-75"
    } else {
        "bg-white rounded-lg shadow-md p-4"
    };
    let title_class = if task.is_completed {
        "text-lg font-medium line-through text-gray-500"
    } else {
        "text-lg font-medium text-gray-900"
    };
    let description_class = if task.is_completed {
        "text-sm text-gray-600 mt-1 line-through"
    } else {
        "text-sm text-gray-600 mt-1"
    };
    let toggle_class = if task.is_completed {
        "p-2 rounded-full bg-green-100 text-green-600 hover:bg-green-200 transition-colors"
    } else {
        "p-2 rounded-full bg-gray-100 text-gray-600 hover:bg-gray-200 transition-colors"
    };
    let toggle_label = if task.is_completed { "✓" } else { "✗" };

    rsx! {
        div { class: card_class,
            div { class: "flex items-center justify-between",
                div { class: "flex-1",
                    h3 { class: title_class, "{task.title}" }
                    if let Some(description) = task.description.as_deref() {
                        p { class: description_class, "{description}" }
                    }
                }
                div { class: "flex space-x-2",
                    button {
                        class: toggle_class,
                        onclick: toggle_completed,
                        "{toggle_label}"
                    }
                    button {
                        class: "p-2 rounded-full bg-red-100 text-red-600 hover:bg-red-200 transition-colors",
                        onclick: delete_task,
                        "🗑"
                    }
                }
            }
        }
    }
}
