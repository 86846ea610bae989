//! Share actions for a dashboard view: copy a permalink, copy a public
//! guest-token link, or hand a permalink to the mail client.
//!
//! Every side effect goes through an injected capability so the flows can
//! run outside the UI runtime.

mod browser;
mod clipboard;
mod error;
mod filters;
mod links;

pub use browser::*;
pub use clipboard::*;
pub use error::*;
pub use filters::*;
pub use links::*;

use crate::api::{DashboardId, DashboardState, GuestTokenRequest, PermalinkRequest};
use crate::diagnostics::{log_perf, PerfTimer};
use async_trait::async_trait;
use std::rc::Rc;

pub const COPIED_MESSAGE: &str = "Copied to clipboard!";
pub const FAILURE_MESSAGE: &str = "Sorry, something went wrong. Try again later.";

/// Backend services that mint share links.
#[async_trait(?Send)]
pub trait ShareBackend {
    /// Store the view state and return the permalink URL for it.
    async fn dashboard_permalink(
        &self,
        dashboard_id: &DashboardId,
        request: &PermalinkRequest,
    ) -> Result<String, ShareError>;

    /// Issue a guest token scoped to the requested resources and rls rules.
    async fn guest_token(&self, request: &GuestTokenRequest) -> Result<String, ShareError>;
}

#[async_trait(?Send)]
pub trait Location {
    fn origin(&self) -> String;
    async fn navigate(&self, url: &str) -> Result<(), ShareError>;
}

/// Fire-and-forget user notifications.
pub trait Toasts {
    fn success(&self, message: String);
    fn danger(&self, message: String);
}

/// Diagnostic sink for failures hidden from the user.
pub trait ErrorLog {
    fn log_error(&self, action: ShareAction, error: &ShareError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAction {
    CopyLink,
    SharePublic,
    ShareByEmail,
}

impl ShareAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ShareAction::CopyLink => "copy_link",
            ShareAction::SharePublic => "share_public",
            ShareAction::ShareByEmail => "share_by_email",
        }
    }
}

#[derive(Clone)]
pub struct ShareCapabilities {
    pub backend: Rc<dyn ShareBackend>,
    pub clipboard: Rc<dyn Clipboard>,
    pub location: Rc<dyn Location>,
    pub toasts: Rc<dyn Toasts>,
    pub log: Rc<dyn ErrorLog>,
}

/// One-shot share flows bound to a dashboard and a snapshot of its state.
///
/// Handlers never fail outward: each ends in exactly one success toast or
/// one danger toast, except email sharing which is silent on success.
#[derive(Clone)]
pub struct ShareActions {
    dashboard_id: DashboardId,
    anchor: Option<String>,
    email_subject: String,
    email_body: String,
    state: DashboardState,
    caps: ShareCapabilities,
}

impl ShareActions {
    pub fn new(dashboard_id: DashboardId, state: DashboardState, caps: ShareCapabilities) -> Self {
        Self {
            dashboard_id,
            anchor: None,
            email_subject: String::new(),
            email_body: String::new(),
            state,
            caps,
        }
    }

    pub fn with_anchor(mut self, anchor: Option<String>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_email(mut self, subject: impl Into<String>, body: impl Into<String>) -> Self {
        self.email_subject = subject.into();
        self.email_body = body.into();
        self
    }

    pub async fn generate_url(&self) -> Result<String, ShareError> {
        let request = PermalinkRequest {
            data_mask: self.state.data_mask.clone(),
            active_tabs: self.state.active_tabs.clone(),
            anchor: self.anchor.clone(),
        };
        self.caps
            .backend
            .dashboard_permalink(&self.dashboard_id, &request)
            .await
    }

    pub async fn generate_public_url(&self) -> Result<String, ShareError> {
        let request = GuestTokenRequest {
            user: guest_user(),
            resources: dashboard_resources(&self.dashboard_id),
            rls: rls_clauses(&self.state.data_mask),
        };
        let token = self.caps.backend.guest_token(&request).await?;
        Ok(public_dashboard_url(
            &self.caps.location.origin(),
            &self.dashboard_id,
            &token,
        ))
    }

    pub async fn on_copy_link(&self) {
        let started_at = PerfTimer::start();
        let outcome = copy_text_to_clipboard(&*self.caps.clipboard, self.generate_url()).await;
        self.report(ShareAction::CopyLink, started_at, outcome.map(|_| ()), true);
    }

    pub async fn on_share_public(&self) {
        let started_at = PerfTimer::start();
        let outcome =
            copy_text_to_clipboard(&*self.caps.clipboard, self.generate_public_url()).await;
        self.report(ShareAction::SharePublic, started_at, outcome.map(|_| ()), true);
    }

    /// Silent on success: the mail client opening is the feedback.
    pub async fn on_share_by_email(&self) {
        let started_at = PerfTimer::start();
        let outcome = self.share_by_email().await;
        self.report(ShareAction::ShareByEmail, started_at, outcome, false);
    }

    async fn share_by_email(&self) -> Result<(), ShareError> {
        let link = self.generate_url().await?;
        let url = mailto_url(&self.email_subject, &self.email_body, &link);
        self.caps.location.navigate(&url).await?;
        tracing::debug!(dashboard = %self.dashboard_id, "opened mail client");
        Ok(())
    }

    fn report(
        &self,
        action: ShareAction,
        started_at: PerfTimer,
        outcome: Result<(), ShareError>,
        toast_on_success: bool,
    ) {
        let label = match &outcome {
            Ok(()) => "ok",
            Err(_) => "failed",
        };
        match outcome {
            Ok(()) if toast_on_success => self.caps.toasts.success(COPIED_MESSAGE.to_string()),
            Ok(()) => {}
            Err(err) => {
                self.caps.log.log_error(action, &err);
                self.caps.toasts.danger(FAILURE_MESSAGE.to_string());
            }
        }
        log_perf(
            &format!("share.{}", action.as_str()),
            started_at,
            &format!("dashboard={} outcome={label}", self.dashboard_id),
        );
    }
}
