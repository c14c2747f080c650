use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::LabelSource;
use crate::config::LabelServiceConfig;
use crate::models::label::{LabelQuery, LabelRecord, LabelSearchResponse};

#[derive(Clone)]
pub struct OpenFdaClient {
    client: Client,
    base: String,
    api_key: Option<String>,
    name_limit: u32,
    generic_limit: u32,
}

impl OpenFdaClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &LabelServiceConfig) -> Self {
        Self {
            client,
            base: config.base_url.clone(),
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            name_limit: config.name_limit,
            generic_limit: config.generic_limit,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Escapes a value for use inside a quoted Lucene phrase.
    fn escape_phrase(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            if matches!(ch, '\\' | '"') {
                out.push('\\');
            }
            out.push(ch);
        }
        out
    }

    fn search_expression(query: &LabelQuery) -> String {
        match query {
            LabelQuery::ByName(name) => {
                let name = Self::escape_phrase(name);
                format!("openfda.brand_name:\"{name}\" OR openfda.generic_name:\"{name}\"")
            }
            LabelQuery::ByGeneric(name) => {
                format!("openfda.generic_name:\"{}\"", Self::escape_phrase(name))
            }
        }
    }

    fn limit_for(&self, query: &LabelQuery) -> u32 {
        match query {
            LabelQuery::ByName(_) => self.name_limit,
            LabelQuery::ByGeneric(_) => self.generic_limit,
        }
    }
}

#[async_trait]
impl LabelSource for OpenFdaClient {
    async fn search_labels(&self, query: &LabelQuery) -> Result<Vec<LabelRecord>> {
        let search = Self::search_expression(query);
        let limit = self.limit_for(query).to_string();

        let mut req = self
            .client
            .get(self.endpoint("drug/label.json"))
            .query(&[("search", search.as_str()), ("limit", limit.as_str())]);
        if let Some(key) = self.api_key.as_deref() {
            req = req.query(&[("api_key", key)]);
        }

        let response = req.send().await.context("openFDA request failed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!(term = query.term(), "openFDA returned no matches");
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("openFDA API error: {} - {}", status, body));
        }

        let response: LabelSearchResponse = response
            .json()
            .await
            .context("Failed to decode openFDA label response")?;

        Ok(response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base: String, api_key: Option<&str>) -> OpenFdaClient {
        let config = LabelServiceConfig {
            base_url: base,
            api_key: api_key.map(String::from),
            ..LabelServiceConfig::default()
        };
        OpenFdaClient::with_shared_client(Client::new(), &config)
    }

    #[test]
    fn test_search_expression() {
        assert_eq!(
            OpenFdaClient::search_expression(&LabelQuery::ByName("tylenol".into())),
            r#"openfda.brand_name:"tylenol" OR openfda.generic_name:"tylenol""#
        );
        assert_eq!(
            OpenFdaClient::search_expression(&LabelQuery::ByGeneric(r#"a "b""#.into())),
            r#"openfda.generic_name:"a \"b\"""#
        );
    }

    #[tokio::test]
    async fn test_name_search_sends_limit_and_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .and(query_param("limit", "50"))
            .and(query_param("api_key", "test-key"))
            .and(query_param(
                "search",
                r#"openfda.brand_name:"advil" OR openfda.generic_name:"advil""#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "meta": {"results": {"skip": 0, "limit": 50, "total": 1}},
                "results": [{
                    "openfda": {"brand_name": ["Advil"], "generic_name": ["IBUPROFEN"]},
                    "purpose": ["Pain reliever"]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(server.uri(), Some("test-key"));
        let labels = client
            .search_labels(&LabelQuery::ByName("advil".into()))
            .await
            .unwrap();

        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].first_generic_name(), Some("IBUPROFEN"));
    }

    #[tokio::test]
    async fn test_generic_search_uses_generic_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .and(query_param("limit", "20"))
            .and(query_param("search", r#"openfda.generic_name:"acetaminophen""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(server.uri(), None);
        let labels = client
            .search_labels(&LabelQuery::ByGeneric("acetaminophen".into()))
            .await
            .unwrap();
        assert!(labels.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_means_no_matches() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"code": "NOT_FOUND", "message": "No matches found!"}
            })))
            .mount(&server)
            .await;

        let client = client_for(server.uri(), None);
        let labels = client
            .search_labels(&LabelQuery::ByName("nothing".into()))
            .await
            .unwrap();
        assert!(labels.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(server.uri(), None);
        let result = client
            .search_labels(&LabelQuery::ByName("advil".into()))
            .await;
        assert!(result.is_err());
    }
}
