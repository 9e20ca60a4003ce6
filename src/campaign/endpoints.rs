use std::convert::TryFrom;

use actix_web::web::{self, Data, Json, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Campaign, CampaignId, CreateCampaignBody, NewCampaign};

pub const CAMPAIGNS_PATH: &str = "/api/campaigns";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBody {
    pub id: CampaignId,
    pub name: String,
    pub budget: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            name: campaign.name,
            budget: campaign.budget,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            status: campaign.status,
        }
    }
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        web::resource(CAMPAIGNS_PATH)
            .route(web::get().to(get_campaigns))
            .route(web::post().to(create_campaign))
            .default_service(web::to(method_not_allowed)),
    );
}

#[tracing::instrument(skip(db))]
async fn create_campaign(
    db: Data<Box<dyn Database>>,
    body: Json<CreateCampaignBody>,
) -> Result<HttpResponse, Error> {
    let new_campaign = NewCampaign::try_from(body.into_inner())?;

    let campaign = manager::create_campaign(&***db, new_campaign).await?;

    Ok(HttpResponse::Created().json(CampaignBody::render(campaign)))
}

#[tracing::instrument(skip(db))]
async fn get_campaigns(db: Data<Box<dyn Database>>) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_campaigns(&***db).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, Error> {
    Err(Error::MethodNotAllowed {
        method: req.method().to_string(),
    })
}
