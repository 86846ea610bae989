//! The components module contains all shared components for our app.

mod app;
mod dashboard_header;
mod icons;
mod share_menu;
mod toasts;

pub use app::*;
pub use dashboard_header::*;
pub use icons::*;
pub use share_menu::*;
pub use toasts::*;
