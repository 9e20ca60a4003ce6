use tracing::info;

use crate::campaign::{manager, parse_date, CampaignStatus, NewCampaign};
use crate::database::Database;
use crate::error::Error;

fn sample(
    name: &str,
    budget: f64,
    start: &str,
    end: &str,
    status: CampaignStatus,
) -> Result<NewCampaign, Error> {
    let date = |value: &str| {
        parse_date(value)
            .ok_or_else(|| Error::ExistentialState(format!("invalid seed date: {}", value)))
    };

    Ok(NewCampaign {
        name: name.to_owned(),
        budget,
        start_date: date(start)?,
        end_date: date(end)?,
        status,
    })
}

/// Fills an empty store with a few campaigns so the dashboard has something
/// to show. A store that already has campaigns is left alone.
pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    if !manager::get_campaigns(db).await?.is_empty() {
        info!("store already has campaigns, skipping seed");
        return Ok(());
    }

    let campaigns = vec![
        sample(
            "Spring Sale",
            1500.0,
            "2024-03-01",
            "2024-03-31",
            CampaignStatus::Completed,
        )?,
        sample(
            "Summer Launch",
            4200.5,
            "2024-06-01",
            "2024-08-31",
            CampaignStatus::Active,
        )?,
        sample(
            "Holiday Promo",
            9800.0,
            "2024-11-15",
            "2024-12-31",
            CampaignStatus::Upcoming,
        )?,
    ];

    for campaign in campaigns {
        let campaign = manager::create_campaign(db, campaign).await?;
        info!(id = %campaign.id, name = %campaign.name, "seeded campaign");
    }

    Ok(())
}
