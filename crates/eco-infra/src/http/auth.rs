use async_trait::async_trait;
use eco_core::config::ApiConfig;
use eco_core::ports::{AuthPort, GatewayError};
use eco_core::signup::Credentials;
use serde::Serialize;

use super::ApiClient;

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Credential sign-in against the configured sign-in path.
pub struct HttpAuthGateway {
    client: ApiClient,
    path: String,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
        }
    }

    pub fn from_config(api: &ApiConfig) -> anyhow::Result<Self> {
        Ok(Self::new(ApiClient::new(api)?, api.sign_in_path.clone()))
    }
}

#[async_trait]
impl AuthPort for HttpAuthGateway {
    async fn sign_in(&self, credentials: &Credentials) -> Result<(), GatewayError> {
        let body = SignInBody {
            email: &credentials.email,
            password: credentials.password.expose(),
        };
        self.client.post_json(&self.path, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn sign_in_posts_email_and_password() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/auth/callback/credentials")
            .match_body(Matcher::Json(json!({
                "email": "mona@eco.example",
                "password": "Passw0rd!",
            })))
            .with_status(200)
            .create_async()
            .await;

        let gateway = HttpAuthGateway::from_config(&ApiConfig {
            base_url: server.url(),
            ..ApiConfig::default()
        })
        .unwrap();
        gateway
            .sign_in(&Credentials::new("mona@eco.example", "Passw0rd!"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_in_rejection_without_body_has_no_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/callback/credentials")
            .with_status(401)
            .create_async()
            .await;

        let gateway = HttpAuthGateway::from_config(&ApiConfig {
            base_url: server.url(),
            ..ApiConfig::default()
        })
        .unwrap();
        let err = gateway
            .sign_in(&Credentials::new("mona@eco.example", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Rejected {
                status: 401,
                message: None
            }
        );
    }
}
