//! Reqwest-backed login adapter for `POST /api/login`.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

use super::dto::{LoginRequestDto, LoginResponseDto};
use super::transport::{HttpEndpoint, Transport, body_preview, transport_message};
use crate::domain::ports::{LoginService, LoginServiceError};
use crate::domain::{Credential, LoginCredentials};

/// Login adapter exchanging email and password for a token.
#[derive(Debug, Clone)]
pub struct HttpLoginService {
    transport: Transport,
}

impl HttpLoginService {
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
}

#[async_trait]
impl LoginService for HttpLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Credential, LoginServiceError> {
        let url = self
            .transport
            .url("api/login")
            .map_err(|error| LoginServiceError::network(format!("invalid request URL: {error}")))?;
        debug!(%url, email = credentials.email(), "login request");
        let payload = LoginRequestDto {
            email: credentials.email(),
            password: credentials.password(),
        };
        let response = self
            .transport
            .request(Method::POST, url)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "login request failed");
                LoginServiceError::network(transport_message(&error))
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| LoginServiceError::network(transport_message(&error)))?;
        interpret_login_response(status, &body)
    }
}

fn interpret_login_response(status: StatusCode, body: &[u8]) -> Result<Credential, LoginServiceError> {
    let decoded = serde_json::from_slice::<LoginResponseDto>(body).unwrap_or_default();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
            let reason = decoded.error.unwrap_or_else(|| body_preview(body));
            Err(LoginServiceError::rejected(reason))
        }
        _ if !status.is_success() => Err(LoginServiceError::server(format!(
            "status {}: {}",
            status.as_u16(),
            body_preview(body)
        ))),
        _ => {
            let token = decoded
                .token
                .ok_or_else(|| LoginServiceError::server("login response carried no token"))?;
            Credential::new(token)
                .map_err(|error| LoginServiceError::server(error.to_string()))
        }
    }
}
