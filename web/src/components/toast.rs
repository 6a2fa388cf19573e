//! Transient user-facing notifications, rendered fixed top-right and
//! dismissed automatically after a few seconds.
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use std::sync::atomic::{AtomicU64, Ordering};

const DISMISS_AFTER_MS: u32 = 4_000;

static TOASTS: GlobalSignal<Vec<Toast>> = Signal::global(Vec::new);
static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    message: String,
    kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ToastKind {
    Success,
    Error,
}

pub fn success(message: impl Into<String>) {
    push(ToastKind::Success, message.into());
}

pub fn error(message: impl Into<String>) {
    push(ToastKind::Error, message.into());
}

fn push(kind: ToastKind, message: String) {
    let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
    TOASTS.write().push(Toast { id, message, kind });
    spawn(async move {
        TimeoutFuture::new(DISMISS_AFTER_MS).await;
        TOASTS.write().retain(|toast| toast.id != id);
    });
}

#[component]
pub fn Toaster() -> Element {
    rsx! {
        div { class: "fixed top-4 right-4 z-50 space-y-2",
            {TOASTS().into_iter().map(|toast| {
                let class = match toast.kind {
                    ToastKind::Success => "bg-green-600 text-white px-4 py-2 rounded-lg shadow-md text-sm",
                    ToastKind::Error => "bg-red-600 text-white px-4 py-2 rounded-lg shadow-md text-sm",
                };
                rsx! {
                    div { key: "{toast.id}", class: class, "{toast.message}" }
                }
            })}
        }
    }
}
