use dioxus::prelude::*;

/// App header with the title and the sign-out action.
#[component]
pub fn Header(on_sign_out: EventHandler<()>) -> Element {
    rsx! {
        div { class: "flex items-center justify-between mb-8",
            div { class: "flex items-center",
                span { class: "text-3xl mr-2", "📋" }
                h1 { class: "text-3xl font-bold text-gray-900", "Task Manager" }
            }
            button {
                class: "px-4 py-2 text-sm font-medium rounded-md text-white bg-red-600 hover:bg-red-700 transition-colors",
                onclick: move |_| on_sign_out.call(()),
                "Sign Out"
            }
        }
    }
}
