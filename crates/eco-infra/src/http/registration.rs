use async_trait::async_trait;
use eco_core::config::ApiConfig;
use eco_core::ports::{GatewayError, RegistrationPort};
use eco_core::signup::RegistrationRequest;

use super::ApiClient;

/// Posts the merged registration request to the configured register path.
pub struct HttpRegistrationGateway {
    client: ApiClient,
    path: String,
}

impl HttpRegistrationGateway {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn from_config(api: &ApiConfig) -> anyhow::Result<Self> {
        Ok(Self::new(ApiClient::new(api)?, api.register_path.clone()))
    }
}

#[async_trait]
impl RegistrationPort for HttpRegistrationGateway {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError> {
        self.client.post_json(&self.path, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            role: "organizer".to_string(),
            fields: [
                ("email".to_string(), "omar@eco.example".to_string()),
                ("firstName".to_string(), "Omar".to_string()),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn api(base_url: String) -> ApiConfig {
        ApiConfig {
            base_url,
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn register_posts_flat_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/auth/register")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "role": "organizer",
                "email": "omar@eco.example",
                "firstName": "Omar",
            })))
            .with_status(201)
            .create_async()
            .await;

        let gateway = HttpRegistrationGateway::from_config(&api(server.url())).unwrap();
        gateway.register(&request()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn register_maps_conflict_to_rejection_with_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/register")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Email already exists"}"#)
            .create_async()
            .await;

        let gateway = HttpRegistrationGateway::from_config(&api(server.url())).unwrap();
        let err = gateway.register(&request()).await.unwrap_err();

        assert_eq!(
            err,
            GatewayError::Rejected {
                status: 409,
                message: Some("Email already exists".to_string()),
            }
        );
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_retryable_transport_error() {
        let gateway =
            HttpRegistrationGateway::from_config(&api("http://127.0.0.1:1".to_string())).unwrap();
        let err = gateway.register(&request()).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
