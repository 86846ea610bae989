use crate::api::{DashboardState, ServerConfig};
use crate::components::{DashboardHeader, Icon, Toast, ToastController, ToastStack};
use crate::config::AppConfig;
use crate::share::format_filter;
use dioxus::prelude::*;

#[component]
pub fn AppShell(config: AppConfig) -> Element {
    let server = use_signal(|| config.server.clone());
    let dashboard_state = use_signal(|| config.dashboard.state.clone());
    let toasts = use_signal(Vec::<Toast>::new);
    let next_toast_id = use_signal(|| 0u64);
    let toast_controller = ToastController::new(toasts, next_toast_id);

    // Provide state via context
    use_context_provider(|| server);
    use_context_provider(|| dashboard_state);
    use_context_provider(|| toast_controller);

    rsx! {
        div { class: "app-shell",
            DashboardHeader {
                dashboard_id: config.dashboard.id.clone(),
                title: config.dashboard.title.clone(),
                menu: config.menu.clone(),
            }
            main { class: "dashboard-body",
                AppliedFilters {}
            }
            ToastStack {}
        }
    }
}

/// Read-out of the view state share links will encode.
#[component]
fn AppliedFilters() -> Element {
    let mut dashboard_state = use_context::<Signal<DashboardState>>();
    let server = use_context::<Signal<ServerConfig>>();
    let state = dashboard_state();

    let clauses: Vec<(String, String)> = state
        .data_mask
        .iter()
        .flat_map(|(key, entry)| {
            entry
                .filters()
                .unwrap_or_default()
                .iter()
                .filter_map(move |filter| format_filter(filter).map(|clause| (key.clone(), clause)))
        })
        .collect();
    let has_filters = !clauses.is_empty();
    let tabs = state.active_tabs.join(", ");
    let backend = server().url;

    rsx! {
        section { class: "applied-filters",
            div { class: "applied-filters-header",
                Icon { name: "filter".to_string(), class: "applied-filters-icon".to_string() }
                h2 { "Applied filters" }
                if has_filters {
                    button {
                        class: "clear-filters",
                        onclick: move |_| dashboard_state.with_mut(|s| s.data_mask.clear()),
                        "Clear all"
                    }
                }
            }
            if has_filters {
                ul { class: "filter-list",
                    for (key, clause) in clauses {
                        li { key: "{key}-{clause}", class: "filter-clause",
                            code { "{clause}" }
                        }
                    }
                }
            } else {
                p { class: "empty-hint", "No filters applied" }
            }
            if !tabs.is_empty() {
                p { class: "active-tabs", "Active tabs: {tabs}" }
            }
            p { class: "backend-hint", "Backend: {backend}" }
        }
    }
}
