//! HTTP client for the cloud REST API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use cumulus_api::{
    Network, NetworkResponse, Server, ServerDetails, ServerDetailsResponse, ServerGroup,
    ServerGroupListResponse, ServerListResponse,
};

use crate::credentials::Credentials;
use crate::error::{ClientError, Result};
use crate::traits::CloudApi;

/// Default API endpoint root
pub const DEFAULT_API_ROOT: &str = "https://api.cumulus.cloud/1.0/";

/// Environment variable overriding the API endpoint root
///
/// Useful for pointing the client at a mock during testing.
pub const API_ROOT_ENV: &str = "CUMULUS_API_ROOT";

/// HTTP client for the cloud API
///
/// Authenticates with a bearer token when one is configured, falling back to
/// HTTP basic auth. Does not retry; every failure is surfaced to the caller.
#[derive(Debug, Clone)]
pub struct HttpCloudClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl HttpCloudClient {
    /// Create a client against the default API root, honoring the
    /// `CUMULUS_API_ROOT` environment override.
    ///
    /// # Errors
    /// Returns an error if the API root is not a valid URL.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let root = std::env::var(API_ROOT_ENV).unwrap_or_else(|_| DEFAULT_API_ROOT.to_string());
        Self::with_api_root(credentials, &root)
    }

    /// Create a client against an explicit API root.
    ///
    /// # Errors
    /// Returns an error if `api_root` is not a valid URL.
    pub fn with_api_root(credentials: Credentials, api_root: &str) -> Result<Self> {
        // Trailing slash matters for Url::join.
        let normalized = if api_root.ends_with('/') {
            api_root.to_string()
        } else {
            format!("{api_root}/")
        };
        let base_url = Url::parse(&normalized)?;
        let client = Client::builder()
            .user_agent(concat!("cumulus-inventory/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Perform an authenticated GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let mut request = self.client.get(url);
        if let Some(token) = &self.credentials.token {
            request = request.bearer_auth(token);
        } else if let Some(username) = &self.credentials.username {
            request = request.basic_auth(username, self.credentials.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::UNAUTHORIZED {
            Err(ClientError::Unauthorized)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl CloudApi for HttpCloudClient {
    async fn authenticate(&self) -> Result<()> {
        // The account endpoint is the cheapest credential probe.
        let _: serde_json::Value = self.get("account").await?;
        Ok(())
    }

    async fn list_servers(&self) -> Result<Vec<Server>> {
        let response: ServerListResponse = self.get("server").await?;
        Ok(response.servers)
    }

    async fn get_server(&self, uuid: &str) -> Result<ServerDetails> {
        let response: ServerDetailsResponse = self.get(&format!("server/{uuid}")).await?;
        Ok(response.server)
    }

    async fn get_network(&self, id_or_name: &str) -> Result<Network> {
        // The endpoint accepts either the UUID or the unique network name.
        let response: NetworkResponse = self.get(&format!("network/{id_or_name}")).await?;
        Ok(response.network)
    }

    async fn list_server_groups(&self) -> Result<Vec<ServerGroup>> {
        let response: ServerGroupListResponse = self.get("server-group").await?;
        Ok(response.server_groups)
    }

    fn supports_token_auth(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_gets_trailing_slash() {
        let client =
            HttpCloudClient::with_api_root(Credentials::default(), "http://localhost:8080/1.0")
                .unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:8080/1.0/");
    }

    #[test]
    fn invalid_api_root_is_rejected() {
        let result = HttpCloudClient::with_api_root(Credentials::default(), "not a url");
        assert!(matches!(result, Err(ClientError::Url(_))));
    }

    #[test]
    fn paths_join_under_the_root() {
        let client =
            HttpCloudClient::with_api_root(Credentials::default(), "http://localhost:8080/1.0/")
                .unwrap();
        let url = client.url("server/abc").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/1.0/server/abc");
    }
}
