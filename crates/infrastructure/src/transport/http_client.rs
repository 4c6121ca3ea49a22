use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use application::endpoint::{
    AddNodeRequest, AddRegionRequest, AddUserRequest, AuthUserRequest, DeleteNodeRequest,
    DeleteUserRequest, GetNodeRequest, GetUserRequest, ListNodesRequest, ListRegionsRequest,
    ListUserRequest, UpdateNodeRequest, UpdateUserRequest,
};
use application::{Endpoint, Endpoints, Operation, TransportError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Where and how an operation travels over HTTP.
pub trait HttpOperation: Operation + Serialize + Sync {
    fn method() -> Method;

    /// Path below the target, one entry per segment. Entries are escaped.
    fn path_segments(&self) -> Vec<&str>;
}

/// Body of every non-200 reply.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Remote registry reached over HTTP+JSON.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    target: Url,
}

impl HttpClient {
    /// `instance` is a base URL; `http://` is assumed when the scheme is missing.
    pub fn new(instance: &str, timeout: Option<Duration>) -> Result<Self> {
        let target = if instance.contains("://") {
            instance.to_string()
        } else {
            format!("http://{}", instance)
        };
        let target =
            Url::parse(&target).with_context(|| format!("invalid registry address {}", instance))?;
        if target.cannot_be_a_base() {
            anyhow::bail!("registry address {} cannot carry a path", instance);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("building http client")?;

        Ok(Self { client, target })
    }

    /// Endpoints bundle whose every operation goes through this client.
    pub fn endpoints(self) -> Endpoints {
        Endpoints::new(Arc::new(self))
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.target.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl<R> Endpoint<R> for HttpClient
where
    R: HttpOperation,
    R::Response: DeserializeOwned,
{
    async fn call(&self, request: R) -> Result<R::Response, TransportError> {
        let segments = request.path_segments();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TransportError::Encode(format!(
                "{} needs a non-empty id",
                R::NAME
            )));
        }
        let url = self.url_for(&segments);
        let body =
            serde_json::to_vec(&request).map_err(|e| TransportError::Encode(e.to_string()))?;

        tracing::debug!(operation = R::NAME, method = %R::method(), url = %url, "sending request");

        let response = self
            .client
            .request(R::method(), url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if status != StatusCode::OK {
            let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).map_err(|e| {
                TransportError::Decode(format!("error reply with status {}: {}", status, e))
            })?;
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: envelope.error,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

impl HttpOperation for AuthUserRequest {
    fn method() -> Method {
        Method::GET
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["auth", self.id.as_str()]
    }
}

impl HttpOperation for GetUserRequest {
    fn method() -> Method {
        Method::GET
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["users", self.id.as_str()]
    }
}

impl HttpOperation for AddUserRequest {
    fn method() -> Method {
        Method::POST
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["users"]
    }
}

impl HttpOperation for ListUserRequest {
    fn method() -> Method {
        Method::GET
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["users"]
    }
}

impl HttpOperation for DeleteUserRequest {
    fn method() -> Method {
        Method::DELETE
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["users", self.id.as_str()]
    }
}

impl HttpOperation for UpdateUserRequest {
    fn method() -> Method {
        Method::PATCH
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["users", self.id.as_str()]
    }
}

impl HttpOperation for AddRegionRequest {
    fn method() -> Method {
        Method::POST
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["regions"]
    }
}

impl HttpOperation for ListRegionsRequest {
    fn method() -> Method {
        Method::GET
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["regions"]
    }
}

impl HttpOperation for GetNodeRequest {
    fn method() -> Method {
        Method::GET
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["nodes", self.id.as_str()]
    }
}

impl HttpOperation for AddNodeRequest {
    fn method() -> Method {
        Method::POST
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["nodes"]
    }
}

impl HttpOperation for ListNodesRequest {
    fn method() -> Method {
        Method::GET
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["nodes"]
    }
}

impl HttpOperation for DeleteNodeRequest {
    fn method() -> Method {
        Method::DELETE
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["nodes", self.id.as_str()]
    }
}

impl HttpOperation for UpdateNodeRequest {
    fn method() -> Method {
        Method::PATCH
    }
    fn path_segments(&self) -> Vec<&str> {
        vec!["nodes", self.id.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_added_when_missing() {
        let client = HttpClient::new("localhost:8080", None).unwrap();
        assert_eq!(client.target().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_ids_are_escaped_as_one_segment() {
        let client = HttpClient::new("http://localhost:8080", None).unwrap();
        let request = GetUserRequest {
            id: "a/b c".into(),
        };
        let url = client.url_for(&request.path_segments());
        assert_eq!(url.as_str(), "http://localhost:8080/users/a%2Fb%20c");
    }

    #[test]
    fn test_target_path_prefix_is_kept() {
        let client = HttpClient::new("http://gateway/registry/", None).unwrap();
        let url = client.url_for(&ListNodesRequest {}.path_segments());
        assert_eq!(url.as_str(), "http://gateway/registry/nodes");
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        assert!(HttpClient::new("http://exa mple.com", None).is_err());
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_before_sending() {
        // Nothing listens on port 9, so reaching the network would be a Request error.
        let endpoints = HttpClient::new("127.0.0.1:9", None).unwrap().endpoints();

        let err = endpoints.get_user("").await.unwrap_err();
        assert!(matches!(
            err,
            application::CallError::Transport(TransportError::Encode(_))
        ));

        let err = endpoints.delete_node("").await.unwrap_err();
        assert!(matches!(
            err,
            application::CallError::Transport(TransportError::Encode(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        // Port 9 (discard) is not served on loopback in test environments.
        let client = HttpClient::new("127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = client.endpoints().list_users().await.unwrap_err();
        assert!(matches!(
            err,
            application::CallError::Transport(TransportError::Request(_))
        ));
    }
}
