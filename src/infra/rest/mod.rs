//! Hosted table API backend.
//!
//! Speaks the PostgREST dialect: one resource per table, horizontal
//! filtering via query parameters (`id=eq.<uuid>`), ordering via
//! `order=<column>.desc`, and `Prefer: return=representation` on writes so
//! inserted and updated rows come back in the response body. Deletes use
//! filter semantics, so removing rows that no longer exist succeeds with
//! an empty result rather than an error.

mod case_studies;
mod insights;
mod projects;
mod proposals;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::application::stores::StoreError;
use crate::config::StoreSettings;

use super::error::InfraError;

const PREFER_REPRESENTATION: &str = "return=representation";

/// Client for all entity tables of one hosted deployment.
pub struct RestTables {
    client: Client,
    base: Url,
    service_key: String,
}

impl RestTables {
    pub fn from_settings(store: &StoreSettings) -> Result<Self, InfraError> {
        let base = store
            .base_url
            .clone()
            .ok_or_else(|| InfraError::configuration("store.base_url is required"))?;
        let service_key = store
            .service_key
            .clone()
            .ok_or_else(|| InfraError::configuration("store.service_key is required"))?;

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(store.timeout)
            .build()
            .map_err(|err| InfraError::backend(err.to_string()))?;

        Ok(Self {
            client,
            base,
            service_key,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("prospecta/", env!("CARGO_PKG_VERSION"))
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base
            .join(table)
            .map_err(StoreError::from_transport)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.service_key),
            )
    }

    /// GET a whole table, ordered by `order` (e.g. `updated_at.desc`).
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        order: &str,
    ) -> Result<Vec<T>, StoreError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("order", order);
        self.read_rows(table, url).await
    }

    /// GET rows matching one equality filter, ordered by `order`.
    async fn fetch_rows_eq<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: Uuid,
        order: &str,
    ) -> Result<Vec<T>, StoreError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair(column, &format!("eq.{value}"))
            .append_pair("order", order);
        self.read_rows(table, url).await
    }

    async fn read_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        url: Url,
    ) -> Result<Vec<T>, StoreError> {
        debug!(table, "fetching rows");
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response).await?;
        response.json().await.map_err(map_reqwest_error)
    }

    /// Find one row by primary key.
    async fn find_row<T: DeserializeOwned>(
        &self,
        table: &str,
        id: Uuid,
    ) -> Result<Option<T>, StoreError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let mut rows: Vec<T> = self.read_rows(table, url).await?;
        Ok((!rows.is_empty()).then(|| rows.swap_remove(0)))
    }

    /// POST one row and return the stored representation.
    async fn insert_row<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let url = self.table_url(table)?;
        debug!(table, "inserting row");
        let response = self
            .request(Method::POST, url)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response).await?;
        exactly_one(response.json().await.map_err(map_reqwest_error)?)
    }

    /// PATCH one row by primary key and return the stored representation.
    /// An empty result set means no row matched the id.
    async fn update_row<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: Uuid,
        body: &B,
    ) -> Result<T, StoreError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        debug!(table, row = %id, "updating row");
        let response = self
            .request(Method::PATCH, url)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response).await?;
        exactly_one(response.json().await.map_err(map_reqwest_error)?)
    }

    /// DELETE rows matching one equality filter. Matching nothing is fine.
    async fn delete_rows(
        &self,
        table: &str,
        column: &str,
        value: Uuid,
    ) -> Result<(), StoreError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair(column, &format!("eq.{value}"));
        debug!(table, column, value = %value, "deleting rows");
        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}

fn exactly_one<T>(mut rows: Vec<T>) -> Result<T, StoreError> {
    match rows.len() {
        0 => Err(StoreError::NotFound),
        1 => Ok(rows.swap_remove(0)),
        n => Err(StoreError::rejected(format!(
            "expected one row in write response, got {n}"
        ))),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::from_transport(err)
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound);
    }
    if status.is_client_error() {
        return Err(StoreError::rejected(format!("status {status}: {body}")));
    }
    Err(StoreError::Transport(format!("status {status}: {body}")))
}
