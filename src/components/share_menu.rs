use crate::api::{DashboardId, DashboardState, ServerConfig, SupersetClient};
use crate::components::Icon;
use crate::diagnostics::TracingErrorLog;
use crate::share::{
    BrowserClipboard, BrowserLocation, ShareActions, ShareCapabilities, Toasts,
};
use crate::utils::origin_of;
use dioxus::prelude::*;
use std::rc::Rc;

/// Adapts the menu's toast callbacks to the share-action `Toasts` seam.
struct CallbackToasts {
    success: EventHandler<String>,
    danger: EventHandler<String>,
}

impl Toasts for CallbackToasts {
    fn success(&self, message: String) {
        self.success.call(message);
    }

    fn danger(&self, message: String) {
        self.danger.call(message);
    }
}

/// Origin public links are built on. An explicit page URL wins; desktop
/// builds fall back to the backend since the webview has no useful origin.
fn public_origin(url: Option<&str>, server: &ServerConfig) -> Option<String> {
    if let Some(origin) = url.and_then(origin_of) {
        return Some(origin);
    }
    if cfg!(target_arch = "wasm32") {
        None
    } else {
        origin_of(&server.url)
    }
}

fn is_activation_key(key: &Key) -> bool {
    match key {
        Key::Enter => true,
        Key::Character(text) => text == " ",
        _ => false,
    }
}

/// The three share entries of the dashboard header's Share dropdown.
///
/// Dashboard view state is read from context when an entry is activated,
/// so each link reflects the filters and tabs applied at that moment.
#[component]
pub fn ShareMenuItems(
    url: Option<String>,
    copy_menu_item_title: String,
    copy_public_link_title: String,
    email_menu_item_title: String,
    email_subject: String,
    email_body: String,
    add_danger_toast: EventHandler<String>,
    add_success_toast: EventHandler<String>,
    dashboard_id: DashboardId,
    dashboard_component_id: Option<String>,
) -> Element {
    let dashboard_state = use_context::<Signal<DashboardState>>();
    let server = use_context::<Signal<ServerConfig>>();

    let build_actions = move || {
        let server = server();
        let caps = ShareCapabilities {
            location: Rc::new(BrowserLocation::new(public_origin(url.as_deref(), &server))),
            backend: Rc::new(SupersetClient::new(server)),
            clipboard: Rc::new(BrowserClipboard),
            toasts: Rc::new(CallbackToasts {
                success: add_success_toast,
                danger: add_danger_toast,
            }),
            log: Rc::new(TracingErrorLog),
        };
        ShareActions::new(dashboard_id.clone(), dashboard_state(), caps)
            .with_anchor(dashboard_component_id.clone())
            .with_email(email_subject.clone(), email_body.clone())
    };

    let on_share_public = {
        let build_actions = build_actions.clone();
        move |_: ()| {
            let actions = build_actions();
            spawn(async move {
                actions.on_share_public().await;
            });
        }
    };

    let on_copy_link = {
        let build_actions = build_actions.clone();
        move |_: ()| {
            let actions = build_actions();
            spawn(async move {
                actions.on_copy_link().await;
            });
        }
    };

    let on_share_by_email = move |_: ()| {
        let actions = build_actions();
        spawn(async move {
            actions.on_share_by_email().await;
        });
    };

    rsx! {
        ul { class: "share-menu", role: "menu",
            ShareMenuEntry {
                item_key: "copy-public-url",
                icon: "globe",
                label: copy_public_link_title,
                on_activate: on_share_public,
            }
            ShareMenuEntry {
                item_key: "copy-url",
                icon: "link",
                label: copy_menu_item_title,
                on_activate: on_copy_link,
            }
            ShareMenuEntry {
                item_key: "share-by-email",
                icon: "mail",
                label: email_menu_item_title,
                on_activate: on_share_by_email,
            }
        }
    }
}

#[component]
fn ShareMenuEntry(
    item_key: String,
    icon: String,
    label: String,
    on_activate: EventHandler<()>,
) -> Element {
    rsx! {
        li { class: "share-menu-item", role: "none", "data-menu-key": "{item_key}",
            div {
                class: "share-menu-action",
                role: "button",
                tabindex: "0",
                onclick: move |_| on_activate.call(()),
                onkeydown: move |evt: KeyboardEvent| {
                    if is_activation_key(&evt.key()) {
                        evt.prevent_default();
                        on_activate.call(());
                    }
                },
                Icon { name: icon, class: "share-menu-icon".to_string() }
                span { "{label}" }
            }
        }
    }
}
