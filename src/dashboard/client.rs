use std::fmt::Display;

use async_trait::async_trait;
use awc::Client;
use serde::Deserialize;

use crate::campaign::{CampaignBody, CreateCampaignBody, CAMPAIGNS_PATH};
use crate::error::Error;

/// Everything the dashboard needs from the campaign service.
#[async_trait(?Send)]
pub trait CampaignClient {
    async fn list_campaigns(&self) -> Result<Vec<CampaignBody>, ClientError>;

    async fn create_campaign(&self, body: &CreateCampaignBody)
        -> Result<CampaignBody, ClientError>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClientError {
    /// The service answered with a non-success status.
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// The request never got an answer.
    Transport(String),
    /// The service answered with something that isn't the expected json.
    InvalidResponse(String),
}

impl ClientError {
    /// The message the service gave for rejecting the request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            ClientError::Rejected {
                status,
                message: Some(message),
            } => write!(f, "request rejected with {}: {}", status, message),
            ClientError::Rejected {
                status,
                message: None,
            } => write!(f, "request rejected with {}", status),
            ClientError::Transport(err) => write!(f, "request failed: {}", err),
            ClientError::InvalidResponse(err) => write!(f, "invalid response: {}", err),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for Error {
    fn from(error: ClientError) -> Error {
        Error::FailedRequest(error.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct HttpCampaignClient {
    client: Client,
    base_url: String,
}

impl HttpCampaignClient {
    pub fn new(base_url: &str) -> HttpCampaignClient {
        HttpCampaignClient {
            client: Client::builder().disable_timeout().finish(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, CAMPAIGNS_PATH)
    }
}

#[async_trait(?Send)]
impl CampaignClient for HttpCampaignClient {
    #[tracing::instrument(skip(self))]
    async fn list_campaigns(&self) -> Result<Vec<CampaignBody>, ClientError> {
        let mut response = self
            .client
            .get(self.url())
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<CampaignBody>>()
            .await
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn create_campaign(
        &self,
        body: &CreateCampaignBody,
    ) -> Result<CampaignBody, ClientError> {
        let mut response = self
            .client
            .post(self.url())
            .send_json(body)
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<CampaignBody>()
            .await
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))
    }
}
