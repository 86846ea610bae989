use crate::api::DashboardId;
use crate::components::{Icon, ShareMenuItems, ToastController};
use crate::config::ShareMenuText;
use dioxus::prelude::*;

/// Title bar with the Share dropdown.
///
/// The menu stays mounted while hidden: share flows run as tasks of the
/// menu's scope and would be dropped if it unmounted mid-flight.
#[component]
pub fn DashboardHeader(dashboard_id: DashboardId, title: String, menu: ShareMenuText) -> Element {
    let mut toasts = use_context::<ToastController>();
    let mut menu_open = use_signal(|| false);
    let is_open = menu_open();

    rsx! {
        header { class: "dashboard-header",
            h1 { class: "dashboard-title", "{title}" }
            div {
                class: "share-dropdown",
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Escape {
                        menu_open.set(false);
                    }
                },
                button {
                    class: if is_open { "share-trigger active" } else { "share-trigger" },
                    aria_haspopup: "menu",
                    aria_expanded: "{is_open}",
                    onclick: move |_| menu_open.set(!is_open),
                    Icon { name: "share".to_string(), class: "share-trigger-icon".to_string() }
                    span { "Share" }
                }
                div {
                    class: "share-dropdown-panel",
                    hidden: !is_open,
                    onclick: move |_| menu_open.set(false),
                    ShareMenuItems {
                        copy_menu_item_title: menu.copy_menu_item_title.clone(),
                        copy_public_link_title: menu.copy_public_link_title.clone(),
                        email_menu_item_title: menu.email_menu_item_title.clone(),
                        email_subject: menu.email_subject.clone(),
                        email_body: menu.email_body.clone(),
                        add_danger_toast: move |message: String| toasts.danger(message),
                        add_success_toast: move |message: String| toasts.success(message),
                        dashboard_id: dashboard_id.clone(),
                    }
                }
            }
        }
    }
}
