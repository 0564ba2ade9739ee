use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, Response,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store authentication error: {0}")]
    Unauthorized(String),

    #[error("Store error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            other => AppError::Database(other.to_string()),
        }
    }
}

/// Thin REST client over the document store. Collections live under
/// `/rest/v1/<collection>` and are queried with equality filters
/// (`field=eq.value`). One instance is created at process start and shared
/// by every request.
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.store_url.clone(),
            api_key: config.store_api_key.clone(),
        }
    }

    fn headers(&self, prefer: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.api_key).unwrap());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(prefer) = prefer {
            headers.insert("Prefer", HeaderValue::from_str(prefer).unwrap());
        }

        headers
    }

    async fn send<B>(
        &self,
        method: Method,
        collection: &str,
        query: &[(String, String)],
        prefer: Option<&str>,
        body: Option<&B>,
    ) -> Result<Response, StoreError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/rest/v1/{}", self.base_url, collection);
        debug!("Store request: {} {} {:?}", method, url, query);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(prefer))
            .query(query);

        if let Some(body_data) = body {
            req = req.json(body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => StoreError::Unauthorized(error_text),
                404 => StoreError::NotFound(error_text),
                409 => StoreError::Conflict(error_text),
                code => StoreError::Api {
                    status: code,
                    message: error_text,
                },
            });
        }

        Ok(response)
    }

    fn eq_filters(filters: &[(&str, &str)]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|(field, value)| (field.to_string(), format!("eq.{}", value)))
            .collect()
    }

    /// All records of `collection` matching the equality filters. An empty
    /// filter slice returns the whole collection.
    pub async fn find<T>(
        &self,
        collection: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let query = Self::eq_filters(filters);
        let response = self
            .send::<()>(Method::GET, collection, &query, None, None)
            .await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    /// First record matching the filters, if any.
    pub async fn find_one<T>(
        &self,
        collection: &str,
        filters: &[(&str, &str)],
    ) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let records = self.find::<T>(collection, filters).await?;
        Ok(records.into_iter().next())
    }

    /// Insert a record and return the stored representation. A unique-index
    /// violation surfaces as `StoreError::Conflict`.
    pub async fn insert<T, B>(&self, collection: &str, record: &B) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .send(
                Method::POST,
                collection,
                &[],
                Some("return=representation"),
                Some(record),
            )
            .await?;

        let mut rows = response.json::<Vec<T>>().await?;
        if rows.is_empty() {
            return Err(StoreError::Api {
                status: 200,
                message: format!("insert into {} returned no representation", collection),
            });
        }
        Ok(rows.remove(0))
    }

    /// Insert-or-merge keyed by `conflict_key`, returning the stored record.
    pub async fn upsert<T, B>(
        &self,
        collection: &str,
        conflict_key: &str,
        record: &B,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let query = vec![("on_conflict".to_string(), conflict_key.to_string())];
        let response = self
            .send(
                Method::POST,
                collection,
                &query,
                Some("resolution=merge-duplicates,return=representation"),
                Some(record),
            )
            .await?;

        let mut rows = response.json::<Vec<T>>().await?;
        if rows.is_empty() {
            return Err(StoreError::Api {
                status: 200,
                message: format!("upsert into {} returned no representation", collection),
            });
        }
        Ok(rows.remove(0))
    }

    /// Patch every record matching the filters, returning the updated rows
    /// (empty when nothing matched).
    pub async fn update<T, B>(
        &self,
        collection: &str,
        filters: &[(&str, &str)],
        patch: &B,
    ) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let query = Self::eq_filters(filters);
        let response = self
            .send(
                Method::PATCH,
                collection,
                &query,
                Some("return=representation"),
                Some(patch),
            )
            .await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    /// Delete every record matching the filters.
    pub async fn delete(
        &self,
        collection: &str,
        filters: &[(&str, &str)],
    ) -> Result<(), StoreError> {
        let query = Self::eq_filters(filters);
        self.send::<()>(Method::DELETE, collection, &query, None, None)
            .await?;
        Ok(())
    }
}
