//! Reqwest-backed user directory adapter.
//!
//! This adapter owns transport details only: URL building, headers, status
//! mapping, and JSON decoding into domain records. It never retries.

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::{SingleUserDto, UserPageDto};
use super::transport::{HttpEndpoint, Transport, body_preview, transport_message};
use crate::domain::ports::{DirectoryPage, UserDirectory, UserDirectoryError};
use crate::domain::{PageNumber, UserId, UserPatch, UserRecord};

/// Directory adapter speaking the `/api/users` REST surface.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    transport: Transport,
}

impl HttpUserDirectory {
    /// Build an adapter for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: HttpEndpoint) -> Result<Self, reqwest::Error> {
        Ok(Self {
            transport: Transport::new(endpoint)?,
        })
    }

    fn url(&self, path: &str) -> Result<Url, UserDirectoryError> {
        self.transport
            .url(path)
            .map_err(|error| UserDirectoryError::network(format!("invalid request URL: {error}")))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&UserPatch>,
    ) -> Result<(StatusCode, Vec<u8>), UserDirectoryError> {
        debug!(%method, %url, "directory request");
        let mut request = self.transport.request(method.clone(), url.clone());
        if let Some(patch) = body {
            request = request.json(patch);
        }
        let response = request.send().await.map_err(|error| {
            warn!(%method, %url, %error, "directory request failed");
            UserDirectoryError::network(transport_message(&error))
        })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| UserDirectoryError::network(transport_message(&error)))?;
        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "directory returned error status");
        }
        Ok((status, bytes.to_vec()))
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_page(&self, page: PageNumber) -> Result<DirectoryPage, UserDirectoryError> {
        let mut url = self.url("api/users")?;
        url.query_pairs_mut()
            .append_pair("page", &page.get().to_string());
        let (status, body) = self.send(Method::GET, url, None).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        parse_page(&body)
    }

    async fn fetch_one(&self, id: UserId) -> Result<UserRecord, UserDirectoryError> {
        let url = self.url(&format!("api/users/{id}"))?;
        let (status, body) = self.send(Method::GET, url, None).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(UserDirectoryError::not_found(id.get()));
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        parse_single(&body)
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<(), UserDirectoryError> {
        let url = self.url(&format!("api/users/{id}"))?;
        let (status, body) = self.send(Method::PUT, url, Some(patch)).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserDirectoryError> {
        let url = self.url(&format!("api/users/{id}"))?;
        let (status, body) = self.send(Method::DELETE, url, None).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(())
    }
}

fn parse_page(body: &[u8]) -> Result<DirectoryPage, UserDirectoryError> {
    let decoded: UserPageDto = serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid user page payload: {error}"))
    })?;
    let (records, total_pages) = decoded
        .into_domain()
        .map_err(UserDirectoryError::decode)?;
    Ok(DirectoryPage {
        records,
        total_pages,
    })
}

fn parse_single(body: &[u8]) -> Result<UserRecord, UserDirectoryError> {
    let decoded: SingleUserDto = serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid user payload: {error}"))
    })?;
    decoded
        .data
        .into_domain()
        .map_err(UserDirectoryError::decode)
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    UserDirectoryError::server(status.as_u16(), message)
}
