use crate::components::Icon;
use crate::config::TOAST_DISMISS_MS;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[cfg(target_arch = "wasm32")]
async fn dismiss_delay(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn dismiss_delay(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// App-wide toast queue, shared through context.
#[derive(Clone, Copy, PartialEq)]
pub struct ToastController {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl ToastController {
    pub fn new(toasts: Signal<Vec<Toast>>, next_id: Signal<u64>) -> Self {
        Self { toasts, next_id }
    }

    pub fn current(&self) -> Vec<Toast> {
        (self.toasts)()
    }

    pub fn success(&mut self, message: String) {
        self.push(ToastKind::Success, message);
    }

    pub fn danger(&mut self, message: String) {
        self.push(ToastKind::Danger, message);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.with_mut(|items| items.retain(|toast| toast.id != id));
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        let id = (self.next_id)();
        self.next_id.set(id + 1);
        self.toasts.with_mut(|items| items.push(Toast { id, kind, message }));

        let mut controller = *self;
        spawn(async move {
            dismiss_delay(TOAST_DISMISS_MS).await;
            controller.dismiss(id);
        });
    }
}

#[component]
pub fn ToastStack() -> Element {
    let controller = use_context::<ToastController>();
    let toasts = controller.current();

    rsx! {
        div { class: "toast-stack", aria_live: "polite",
            for toast in toasts {
                ToastCard { key: "{toast.id}", toast }
            }
        }
    }
}

#[component]
fn ToastCard(toast: Toast) -> Element {
    let mut controller = use_context::<ToastController>();
    let (class, icon) = match toast.kind {
        ToastKind::Success => ("toast toast-success", "check"),
        ToastKind::Danger => ("toast toast-danger", "alert"),
    };
    let id = toast.id;

    rsx! {
        div { class: "{class}", role: "status",
            Icon { name: icon.to_string(), class: "toast-icon".to_string() }
            span { class: "toast-message", "{toast.message}" }
            button {
                class: "toast-close",
                aria_label: "Dismiss",
                onclick: move |_| controller.dismiss(id),
                Icon { name: "x".to_string(), class: "toast-icon".to_string() }
            }
        }
    }
}
