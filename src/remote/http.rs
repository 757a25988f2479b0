//! HTTP client for the hosted document store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::error::StoreError;
use super::query::Query;
use super::RecordStore;
use crate::config::{Config, CredentialStatus, SecureString, StoreConfig};
use crate::record::{strip_system_fields, NewRecord, Record, RecordPatch, RECORD_TYPE};

/// Resolved URLs for one dataset.
#[derive(Debug, Clone)]
struct Endpoint {
    read_base: String,
    write_base: String,
    api_version: String,
    dataset: String,
}

impl Endpoint {
    fn from_config(store: &StoreConfig) -> Result<Self, String> {
        let (read_base, write_base) = match (&store.api_host, store.project_id.as_deref()) {
            (Some(host), _) => {
                let host = host.trim_end_matches('/').to_string();
                (host.clone(), host)
            }
            (None, Some(project)) if !project.trim().is_empty() => {
                let project = project.trim();
                let api = format!("https://{project}.api.sanity.io");
                let read = if store.use_cdn {
                    format!("https://{project}.apicdn.sanity.io")
                } else {
                    api.clone()
                };
                (read, api)
            }
            _ => return Err("store.project_id is not set".to_string()),
        };

        Ok(Self {
            read_base,
            write_base,
            api_version: store.api_version.clone(),
            dataset: store.dataset.clone(),
        })
    }

    fn query_url(&self) -> String {
        format!(
            "{}/v{}/data/query/{}",
            self.read_base, self.api_version, self.dataset
        )
    }

    fn mutate_url(&self) -> String {
        format!(
            "{}/v{}/data/mutate/{}",
            self.write_base, self.api_version, self.dataset
        )
    }
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

#[derive(Deserialize)]
struct MutationResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Deserialize)]
struct MutationResult {
    #[serde(default)]
    document: Option<Value>,
}

/// [`RecordStore`] backed by the store's query and mutation HTTP API.
///
/// Built once at startup from [`Config`]; the underlying connection pool is
/// shared by every call.
pub struct HttpStore {
    client: Client,
    endpoint: Result<Endpoint, String>,
    token: Option<SecureString>,
}

impl HttpStore {
    /// Builds the client.
    ///
    /// A missing project id does not fail here: reads and writes then fail
    /// individually with [`StoreError::Configuration`].
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(
                config.defaults.connect_timeout_seconds.into(),
            ))
            .timeout(Duration::from_secs(config.defaults.timeout_seconds.into()))
            .build()
            .map_err(|e| StoreError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        let token = match config.store.write_credential() {
            CredentialStatus::Configured(token) => Some(token),
            CredentialStatus::Unconfigured { .. } => None,
        };

        Ok(Self {
            client,
            endpoint: Endpoint::from_config(&config.store),
            token,
        })
    }

    pub fn can_write(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self) -> Result<&Endpoint, StoreError> {
        self.endpoint
            .as_ref()
            .map_err(|message| StoreError::Configuration {
                message: message.clone(),
            })
    }

    fn write_token(&self, operation: &'static str) -> Result<&SecureString, StoreError> {
        self.token.as_ref().ok_or_else(|| {
            tracing::error!(operation, "Write refused: no token configured");
            StoreError::Authorization { operation }
        })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<T, StoreError> {
        let endpoint = self.endpoint()?;
        let params = std::iter::once(("query".to_string(), query.groq().to_string()))
            .chain(query.params());
        let url = Url::parse_with_params(&endpoint.query_url(), params).map_err(|e| {
            StoreError::Configuration {
                message: format!("invalid store URL: {e}"),
            }
        })?;

        tracing::debug!(query = query.groq(), "Querying store");

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|source| StoreError::Connection { source })?;
        let body = read_body(response, None).await?;
        let decoded: QueryResponse<T> = decode(&body)?;
        Ok(decoded.result)
    }

    async fn mutate(
        &self,
        operation: &'static str,
        target: Option<&str>,
        mutation: Value,
    ) -> Result<Vec<MutationResult>, StoreError> {
        let token = self.write_token(operation)?;
        let endpoint = self.endpoint()?;
        let url = Url::parse_with_params(
            &endpoint.mutate_url(),
            &[("returnDocuments", "true"), ("visibility", "sync")],
        )
        .map_err(|e| StoreError::Configuration {
            message: format!("invalid store URL: {e}"),
        })?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token.expose())
            .json(&json!({ "mutations": [mutation] }))
            .send()
            .await
            .map_err(|source| StoreError::Connection { source })?;
        let body = read_body(response, target).await?;
        let decoded: MutationResponse = decode(&body)?;
        Ok(decoded.results)
    }
}

#[async_trait]
impl RecordStore for HttpStore {
    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let documents = self.fetch(&Query::All).await?;
        Ok(decode_records(documents))
    }

    async fn get_by_id(&self, id: &str) -> Result<Record, StoreError> {
        let record: Option<Record> = self.fetch(&Query::ById(id.to_string())).await?;
        record.ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Record>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let documents = self.fetch(&Query::ByIds(ids.to_vec())).await?;
        Ok(decode_records(documents))
    }

    async fn search(&self, text: &str) -> Result<Vec<Record>, StoreError> {
        let documents = self.fetch(&Query::Search(text.to_string())).await?;
        Ok(decode_records(documents))
    }

    async fn create(&self, payload: &NewRecord) -> Result<Record, StoreError> {
        let result: Result<Record, StoreError> = async {
            let mut document = to_document(payload)?;
            document.insert("_type".to_string(), Value::from(RECORD_TYPE));
            let results = self
                .mutate("create", None, json!({ "create": document }))
                .await?;
            returned_record(results, None)
        }
        .await;

        match &result {
            Ok(record) => tracing::info!(id = %record.id, sku = %record.sku, "Record created"),
            Err(e) => tracing::error!(error = %e, kind = e.error_type(), "Failed to create record"),
        }
        result
    }

    async fn update(&self, id: &str, patch: &RecordPatch) -> Result<Record, StoreError> {
        let result: Result<Record, StoreError> = async {
            let (set, unset) = patch.set_and_unset();
            let mut body = Map::new();
            body.insert("id".to_string(), Value::from(id));
            if !set.is_empty() {
                body.insert("set".to_string(), Value::Object(set));
            }
            if !unset.is_empty() {
                body.insert("unset".to_string(), Value::from(unset));
            }
            let results = self
                .mutate("update", Some(id), json!({ "patch": body }))
                .await?;
            returned_record(results, Some(id))
        }
        .await;

        match &result {
            Ok(_) => tracing::info!(id, "Record updated"),
            Err(e) => tracing::error!(id, error = %e, kind = e.error_type(), "Failed to update record"),
        }
        result
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result: Result<(), StoreError> = async {
            let results = self
                .mutate("delete", Some(id), json!({ "delete": { "id": id } }))
                .await?;
            if results.is_empty() {
                return Err(StoreError::NotFound { id: id.to_string() });
            }
            Ok(())
        }
        .await;

        match &result {
            Ok(()) => tracing::info!(id, "Record deleted"),
            Err(e) => tracing::error!(id, error = %e, kind = e.error_type(), "Failed to delete record"),
        }
        result
    }
}

fn to_document<T: Serialize>(payload: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(mut document)) => {
            strip_system_fields(&mut document);
            Ok(document)
        }
        Ok(_) => Err(StoreError::Validation {
            message: "payload is not an object".to_string(),
        }),
        Err(e) => Err(StoreError::Validation {
            message: e.to_string(),
        }),
    }
}

fn returned_record(
    results: Vec<MutationResult>,
    target: Option<&str>,
) -> Result<Record, StoreError> {
    let document = results
        .into_iter()
        .find_map(|r| r.document)
        .ok_or_else(|| match target {
            Some(id) => StoreError::NotFound { id: id.to_string() },
            None => StoreError::Decode("mutation returned no document".to_string()),
        })?;
    serde_json::from_value(document).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Decodes a list one document at a time. A document that does not fit the
/// schema is logged and left out; the rest of the list is kept.
fn decode_records(documents: Vec<Value>) -> Vec<Record> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or("<no id>")
                .to_string();
            serde_json::from_value::<Record>(document)
                .inspect_err(|e| {
                    tracing::warn!(id = %id, error = %e, "Skipping record that does not decode")
                })
                .ok()
        })
        .collect()
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

async fn read_body(response: Response, target: Option<&str>) -> Result<String, StoreError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| StoreError::Connection { source })?;
    if status.is_success() {
        return Ok(text);
    }

    let message = error_message(&text).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });
    Err(classify(status, message, target))
}

/// Maps an error status to a [`StoreError`]. `target` is the record a write
/// was aimed at.
fn classify(status: StatusCode, message: String, target: Option<&str>) -> StoreError {
    match (status, target) {
        (StatusCode::NOT_FOUND, Some(id)) => StoreError::NotFound { id: id.to_string() },
        (StatusCode::CONFLICT, Some(id)) if message.to_lowercase().contains("not found") => {
            StoreError::NotFound { id: id.to_string() }
        }
        (StatusCode::BAD_REQUEST, _) => StoreError::Validation { message },
        _ => StoreError::Remote {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pulls a readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    let error = value.get("error");
    error
        .and_then(|e| e.get("description"))
        .and_then(Value::as_str)
        .or_else(|| value.get("message").and_then(Value::as_str))
        .or_else(|| error.and_then(Value::as_str))
        .map(str::to_string)
}
