use crate::api::models::*;
use crate::share::{ShareBackend, ShareError};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const GUEST_TOKEN_ENDPOINT: &str = "/api/v1/security/guest_token/";

pub struct SupersetClient {
    pub server: ServerConfig,
}

impl SupersetClient {
    pub fn new(server: ServerConfig) -> Self {
        Self { server }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server.url.trim_end_matches('/'), path)
    }

    fn permalink_endpoint(dashboard_id: &DashboardId) -> String {
        format!(
            "/api/v1/dashboard/{}/permalink",
            urlencoding::encode(&dashboard_id.to_string())
        )
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ShareError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = HTTP_CLIENT.post(self.endpoint(path)).json(body);
        if let Some(token) = &self.server.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(csrf) = &self.server.csrf_token {
            request = request.header("X-CSRFToken", csrf);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ShareError::Decode(e.to_string()))
    }

    pub async fn create_permalink(
        &self,
        dashboard_id: &DashboardId,
        request: &PermalinkRequest,
    ) -> Result<String, ShareError> {
        let path = Self::permalink_endpoint(dashboard_id);
        let json: PermalinkResponse = self.post_json(&path, request).await?;
        json.url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ShareError::MissingField("url"))
    }

    pub async fn fetch_guest_token(&self, request: &GuestTokenRequest) -> Result<String, ShareError> {
        let json: GuestTokenResponse = self.post_json(GUEST_TOKEN_ENDPOINT, request).await?;
        json.token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ShareError::MissingField("token"))
    }
}

#[async_trait(?Send)]
impl ShareBackend for SupersetClient {
    async fn dashboard_permalink(
        &self,
        dashboard_id: &DashboardId,
        request: &PermalinkRequest,
    ) -> Result<String, ShareError> {
        self.create_permalink(dashboard_id, request).await
    }

    async fn guest_token(&self, request: &GuestTokenRequest) -> Result<String, ShareError> {
        self.fetch_guest_token(request).await
    }
}

fn status_error(status: u16, body: &str) -> ShareError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message_text())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        });
    ShareError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slash() {
        let client = SupersetClient::new(ServerConfig {
            url: "http://bi.local:8088/".to_string(),
            access_token: None,
            csrf_token: None,
        });
        assert_eq!(
            client.endpoint(GUEST_TOKEN_ENDPOINT),
            "http://bi.local:8088/api/v1/security/guest_token/"
        );
        assert_eq!(
            client.endpoint(&SupersetClient::permalink_endpoint(&DashboardId::from(42))),
            "http://bi.local:8088/api/v1/dashboard/42/permalink"
        );
    }

    #[test]
    fn slug_ids_are_escaped_in_paths() {
        assert_eq!(
            SupersetClient::permalink_endpoint(&DashboardId::from("q1 sales")),
            "/api/v1/dashboard/q1%20sales/permalink"
        );
    }

    #[test]
    fn status_error_prefers_backend_message() {
        assert_eq!(
            status_error(403, r#"{"message": "Forbidden"}"#),
            ShareError::Status {
                status: 403,
                message: "Forbidden".to_string()
            }
        );
        assert_eq!(
            status_error(502, "<html>Bad Gateway</html>\n"),
            ShareError::Status {
                status: 502,
                message: "<html>Bad Gateway</html>".to_string()
            }
        );
        assert_eq!(
            status_error(500, ""),
            ShareError::Status {
                status: 500,
                message: "Unknown error".to_string()
            }
        );
    }

    #[test]
    fn permalink_payload_uses_camel_case_and_omits_missing_anchor() {
        let request = PermalinkRequest {
            data_mask: DataMask::new(),
            active_tabs: vec!["TAB-1".to_string()],
            anchor: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "dataMask": {}, "activeTabs": ["TAB-1"] })
        );
    }
}
