//! PostgREST client for the hosted row store.
//!
//! Every request carries the anon key twice, as `apikey` and as a bearer
//! token. Upserts merge on the collection's key column.

use crate::shared::config::StoreConfig;
use async_trait::async_trait;
use contracts::store::{Collection, RowQuery, RowStore, StoreError};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PostgrestStore {
    base_url: String,
    anon_key: String,
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
    }
}

/// `<base>/<collection>?k=v&...` with every key and value percent-encoded.
pub fn collection_url(base_url: &str, collection: Collection, pairs: &[(String, String)]) -> String {
    let mut url = format!("{}/{}", base_url, collection.name());
    for (i, (key, value)) in pairs.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

#[derive(Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

/// Prefers the `message` field of a PostgREST error body, then the raw body.
fn http_error(status: u16, status_text: &str, body: &str) -> StoreError {
    let message = serde_json::from_str::<PostgrestErrorBody>(body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status_text.to_string());
    StoreError::Http { status, message }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    Err(http_error(status, &status_text, &body))
}

#[async_trait(?Send)]
impl RowStore for PostgrestStore {
    async fn read_rows(&self, query: &RowQuery) -> Result<Vec<Value>, StoreError> {
        let url = collection_url(&self.base_url, query.collection, &query.to_query_pairs());
        log::debug!("GET {url}");

        let response = self
            .authorized(Request::get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response)
            .await?
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn upsert_row(
        &self,
        collection: Collection,
        key_column: &str,
        record: Value,
    ) -> Result<(), StoreError> {
        let pairs = [("on_conflict".to_string(), key_column.to_string())];
        let url = collection_url(&self.base_url, collection, &pairs);
        log::debug!("POST {url}");

        let request = self
            .authorized(Request::post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&record)
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        check_status(response).await?;
        Ok(())
    }
}

/// Shared read-only handle to the row store, provided through context.
#[derive(Clone)]
pub struct StoreHandle(Arc<dyn RowStore + Send + Sync>);

impl StoreHandle {
    pub fn new(store: impl RowStore + Send + Sync + 'static) -> Self {
        Self(Arc::new(store))
    }

    pub fn store(&self) -> &dyn RowStore {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list_query::SortDirection;

    #[test]
    fn test_collection_url_encodes_filters() {
        let query = RowQuery::new(Collection::Rfps)
            .select(&["id", "client"])
            .search(&["id", "client"], "ntpc")
            .order("due_date", SortDirection::Asc);
        let url = collection_url("https://x.co/rest/v1", query.collection, &query.to_query_pairs());
        assert_eq!(
            url,
            "https://x.co/rest/v1/rfps?select=id%2Cclient\
             &or=%28id.ilike.%2Antpc%2A%2Cclient.ilike.%2Antpc%2A%29\
             &order=due_date.asc"
        );
    }

    #[test]
    fn test_bare_collection_url() {
        assert_eq!(
            collection_url("http://store", Collection::Inventory, &[]),
            "http://store/inventory"
        );
    }

    #[test]
    fn test_http_error_prefers_postgrest_message() {
        let err = http_error(400, "Bad Request", r#"{"code":"PGRST100","message":"bad filter"}"#);
        assert_eq!(
            err,
            StoreError::Http {
                status: 400,
                message: "bad filter".into()
            }
        );

        let err = http_error(503, "Service Unavailable", "");
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }
}
