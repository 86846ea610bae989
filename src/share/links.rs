use crate::api::{DashboardId, GuestResource, GuestUser};
use crate::utils::encode_uri_component;

const GUEST_NAME: &str = "guest";
const PUBLIC_UI_CONFIG: u8 = 1;
const PUBLIC_STANDALONE: bool = true;

/// Fixed identity every public link is issued for.
pub fn guest_user() -> GuestUser {
    GuestUser {
        username: GUEST_NAME.to_string(),
        first_name: GUEST_NAME.to_string(),
    }
}

/// The single resource a public link grants access to.
pub fn dashboard_resources(dashboard_id: &DashboardId) -> Vec<GuestResource> {
    vec![GuestResource {
        kind: "dashboard".to_string(),
        id: dashboard_id.to_string(),
    }]
}

/// `{origin}/dashboard/{id}/public?uiConfig=1&standalone=true&guest_token={token}`
///
/// The token is appended as issued; guest tokens are URL-safe JWTs.
pub fn public_dashboard_url(origin: &str, dashboard_id: &DashboardId, token: &str) -> String {
    format!(
        "{}/dashboard/{}/public?uiConfig={}&standalone={}&guest_token={}",
        origin.trim_end_matches('/'),
        dashboard_id,
        PUBLIC_UI_CONFIG,
        PUBLIC_STANDALONE,
        token
    )
}

/// Build the `mailto:` URI that opens a draft with the link appended to the body.
///
/// The `%20` after the subject is part of the wire format mail clients
/// have always received from this menu.
pub fn mailto_url(subject: &str, body: &str, link: &str) -> String {
    let encoded_body = encode_uri_component(format!("{body}{link}"));
    let encoded_subject = encode_uri_component(subject);
    format!("mailto:?Subject={encoded_subject}%20&Body={encoded_body}")
}
