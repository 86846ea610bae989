use dioxus::prelude::*;
use once_cell::sync::Lazy;

mod api;
mod components;
mod config;
mod diagnostics;
mod share;
mod utils;

use components::AppShell;
use config::AppConfig;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

static CONFIG: Lazy<AppConfig> = Lazy::new(config::load_config);

fn main() {
    diagnostics::init_logging(config::log_level());
    tracing::info!(
        dashboard = %CONFIG.dashboard.id,
        backend = %CONFIG.server.url,
        "starting DashShare"
    );
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let title = CONFIG.dashboard.title.clone();

    rsx! {
        document::Meta { name: "theme-color", content: "#20a7c9" }
        document::Title { "{title}" }
        document::Stylesheet { href: APP_CSS }

        AppShell { config: CONFIG.clone() }
    }
}
