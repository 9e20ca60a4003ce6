use chrono::{SubsecRound, Utc};

use crate::database::Database;
use crate::error::Error;

use super::{Campaign, NewCampaign};

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &dyn Database, new: NewCampaign) -> Result<Campaign, Error> {
    let id = db.campaigns().next_campaign_id().await?;

    // bson datetimes only hold milliseconds
    let campaign = Campaign {
        id,
        name: new.name,
        budget: new.budget,
        start_date: new.start_date.trunc_subsecs(3),
        end_date: new.end_date.trunc_subsecs(3),
        status: new.status.as_str().to_owned(),
        created_at: Utc::now().trunc_subsecs(3),
    };

    db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}
