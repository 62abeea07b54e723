use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Map, Value};
use tracing::{debug, error};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::store::{into_object, Document, DocumentStore, Filter, StoreError};

/// Document store behind a PostgREST endpoint. Each collection is a table with
/// an `id text` primary key, a `doc jsonb` body and a `created_at` default;
/// field filters run against `doc->>field`.
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct Row {
    id: String,
    doc: Map<String, Value>,
}

impl From<Row> for Document {
    fn from(row: Row) -> Self {
        Document { id: row.id, body: row.doc }
    }
}

impl RestDocumentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_url.trim_end_matches('/').to_string(),
            api_key: config.database_api_key.clone(),
        }
    }

    fn get_headers(&self, return_rows: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !self.api_key.is_empty() {
            if let Ok(key) = HeaderValue::from_str(&self.api_key) {
                headers.insert("apikey", key);
            }
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
                headers.insert(AUTHORIZATION, bearer);
            }
        }

        if return_rows {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        headers
    }

    fn table_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    async fn request<T>(
        &self,
        method: Method,
        collection: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = self.table_url(collection);
        debug!("Making {} request to {}", method, url);

        let return_rows = method != Method::GET;
        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers(return_rows))
            .query(&query);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Document store error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::CONFLICT => StoreError::Conflict(error_text),
                _ => StoreError::Api { status: status.as_u16(), message: error_text },
            });
        }

        Ok(response.json::<T>().await?)
    }

    fn select_query(filter: &Filter) -> Vec<(String, String)> {
        let mut query = vec![
            ("select".to_string(), "id,doc".to_string()),
            ("order".to_string(), "created_at.asc".to_string()),
        ];
        query.extend(
            filter
                .conditions()
                .iter()
                .map(|(field, value)| (format!("doc->>{}", field), format!("eq.{}", value))),
        );
        query
    }

    fn id_query(id: &str) -> Vec<(String, String)> {
        vec![
            ("select".to_string(), "id,doc".to_string()),
            ("id".to_string(), format!("eq.{}", id)),
        ]
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn insert(&self, collection: &str, body: Value) -> Result<Document, StoreError> {
        let doc = into_object(body)?;
        let id = Uuid::new_v4().to_string();

        let rows: Vec<Row> = self
            .request(
                Method::POST,
                collection,
                Vec::new(),
                Some(json!({ "id": id, "doc": doc })),
            )
            .await?;

        rows.into_iter()
            .next()
            .map(Document::from)
            .ok_or_else(|| StoreError::EmptyResponse(collection.to_string()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<Row> = self
            .request(Method::GET, collection, Self::select_query(filter), None)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let rows: Vec<Row> = self
            .request(Method::GET, collection, Self::id_query(id), None)
            .await?;
        Ok(rows.into_iter().next().map(Document::from))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let rows: Vec<Row> = self
            .request(Method::DELETE, collection, Self::id_query(id), None)
            .await?;
        Ok(!rows.is_empty())
    }
}
