use std::convert::TryFrom;
use std::fmt::Display;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::campaign::{CampaignBody, CampaignStatus, CreateCampaignBody, NewCampaign};

pub mod client;
pub mod render;

pub use client::{CampaignClient, ClientError, HttpCampaignClient};

pub const SUBMIT_FAILED: &str = "Failed to add campaign.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Status(CampaignStatus),
}

impl Filter {
    pub fn matches(&self, campaign: &CampaignBody) -> bool {
        match self {
            Filter::All => true,
            Filter::Status(status) => campaign.status.to_lowercase() == status.as_str(),
        }
    }
}

impl Default for Filter {
    fn default() -> Filter {
        Filter::All
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Status(status) => Display::fmt(status, f),
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Filter, String> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }

        s.parse().map(Filter::Status)
    }
}

/// The values currently typed into the "add campaign" form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignForm {
    pub name: String,
    pub budget: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl CampaignForm {
    pub fn to_body(&self) -> CreateCampaignBody {
        CreateCampaignBody {
            name: Some(self.name.clone()),
            budget: Some(self.budget.as_str().into()),
            start_date: Some(self.start_date.clone()),
            end_date: Some(self.end_date.clone()),
            status: Some(self.status.clone()),
        }
    }
}

/// Client-side view of the campaign service: a cached campaign list, the
/// selected filter, the add form and the last error to show.
pub struct Dashboard<C> {
    client: C,
    campaigns: Vec<CampaignBody>,
    filter: Filter,
    form: CampaignForm,
    error: String,
}

impl<C: CampaignClient> Dashboard<C> {
    pub fn new(client: C) -> Dashboard<C> {
        Dashboard {
            client,
            campaigns: vec![],
            filter: Filter::All,
            form: CampaignForm::default(),
            error: String::new(),
        }
    }

    /// Replaces the cached campaigns with whatever the service has now.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let campaigns = self.client.list_campaigns().await?;
        debug!(count = campaigns.len(), "loaded campaigns");
        self.campaigns = campaigns;

        Ok(())
    }

    pub fn apply_filter(&mut self, filter: Filter) -> Vec<&CampaignBody> {
        self.filter = filter;
        self.visible()
    }

    pub fn visible(&self) -> Vec<&CampaignBody> {
        self.campaigns
            .iter()
            .filter(|campaign| self.filter.matches(campaign))
            .collect()
    }

    /// Validates the form locally and, if it passes, sends it to the service.
    /// Returns the created campaign on success; on failure the reason is
    /// left in [`Dashboard::error`].
    #[tracing::instrument(skip(self))]
    pub async fn submit(&mut self, form: CampaignForm) -> Option<CampaignBody> {
        self.error.clear();
        self.form = form;

        let body = self.form.to_body();
        if let Err(err) = NewCampaign::try_from(body.clone()) {
            self.error = err.error_message().to_owned();
            return None;
        }

        let campaign = match self.client.create_campaign(&body).await {
            Ok(campaign) => campaign,
            Err(err) => {
                warn!(error = %err, "failed to add campaign");
                self.error = err.server_message().unwrap_or(SUBMIT_FAILED).to_owned();
                return None;
            }
        };

        self.form = CampaignForm::default();
        if let Err(err) = self.load().await {
            warn!(error = %err, "failed to reload campaigns");
        }

        Some(campaign)
    }

    pub fn campaigns(&self) -> &[CampaignBody] {
        &self.campaigns
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn form(&self) -> &CampaignForm {
        &self.form
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn render(&self) -> String {
        render::render_dashboard(self.filter, &self.visible(), &self.error)
    }
}
