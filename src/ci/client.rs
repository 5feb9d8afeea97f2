//! CircleCI REST API client.
//!
//! Talks to the v1.1 project API. The authentication token is injected
//! at construction (read once at process start), never from a global.

use serde::Serialize;

use super::api::BuildApi;
use super::build::{Build, BuildRef, LogEntry};
use super::error::CiApiError;

/// Default base URL of the CircleCI REST API.
pub const DEFAULT_API_BASE: &str = "https://circleci.com/api/v1.1";

/// A CircleCI API client.
#[derive(Clone)]
pub struct CircleCiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CircleCiClient {
    /// Creates a client authenticating with the given API token.
    pub fn new(token: impl Into<String>) -> Self {
        CircleCiClient {
            http: reqwest::Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            token: token.into(),
        }
    }

    /// Overrides the API base URL. Intended for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for CircleCiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircleCiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct TokenQuery<'a> {
    #[serde(rename = "circle-token")]
    token: &'a str,
}

impl BuildApi for CircleCiClient {
    async fn build(&self, build: &BuildRef) -> Result<Build, CiApiError> {
        let url = format!(
            "{}/project/github/{}/{}/{}",
            self.base_url, build.account, build.project, build.build_num
        );

        let response = self
            .http
            .get(&url)
            .query(&TokenQuery { token: &self.token })
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn action_output(&self, output_url: &str) -> Result<Vec<LogEntry>, CiApiError> {
        let response = self
            .http
            .get(output_url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn build_fetches_step_action_tree() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/github/org/project/42"))
            .and(query_param("circle-token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "build_num": 42,
                "steps": [
                    { "actions": [ { "failed": null, "output_url": "https://logs.example.com/1" } ] },
                    { "actions": [ { "failed": true, "output_url": "https://logs.example.com/2" } ] }
                ]
            })))
            .mount(&server)
            .await;

        let client = CircleCiClient::new("test-token").with_base_url(server.uri());
        let build_ref = BuildRef {
            account: "org".to_string(),
            project: "project".to_string(),
            build_num: 42,
        };

        let build = client.build(&build_ref).await.unwrap();
        assert_eq!(build.steps.len(), 2);
        assert!(!build.steps[0].actions[0].is_failed());
        assert!(build.steps[1].actions[0].is_failed());
    }

    #[tokio::test]
    async fn build_propagates_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = CircleCiClient::new("test-token").with_base_url(server.uri());
        let build_ref = BuildRef {
            account: "org".to_string(),
            project: "project".to_string(),
            build_num: 7,
        };

        assert!(client.build(&build_ref).await.is_err());
    }

    #[tokio::test]
    async fn action_output_parses_log_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/output/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "message": "first " },
                { "message": "second" }
            ])))
            .mount(&server)
            .await;

        let client = CircleCiClient::new("test-token").with_base_url(server.uri());
        let url = format!("{}/output/7", server.uri());

        let entries = client.action_output(&url).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first ");
        assert_eq!(entries[1].message, "second");
    }
}
