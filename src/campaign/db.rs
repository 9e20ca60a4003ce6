use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};

use crate::database::MongoCampaignStore;
use crate::error::Error;

use super::{Campaign, CampaignId};

const CAMPAIGNS: &str = "campaigns";

#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Reserves the next identifier. Ids are never reused, even if the
    /// insert that reserved one ends up failing.
    async fn next_campaign_id(&self) -> Result<CampaignId, Error>;

    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error>;

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;
}

#[async_trait]
impl CampaignStore for MongoCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn next_campaign_id(&self) -> Result<CampaignId, Error> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter: Option<Document> = self
            .counters
            .find_one_and_update(
                bson::doc! { "_id": CAMPAIGNS },
                bson::doc! { "$inc": { "seq": 1i64 } },
                options,
            )
            .await?;

        let seq = counter
            .and_then(|counter| counter.get_i64("seq").ok())
            .ok_or_else(|| Error::ExistentialState("campaign id counter is missing".into()))?;

        Ok(CampaignId::from_raw(seq))
    }

    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        self.campaigns.insert_one(campaign, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let options = FindOptions::builder().sort(bson::doc! { "_id": 1 }).build();

        let campaigns: Vec<Campaign> = self
            .campaigns
            .find(bson::doc! {}, options)
            .await?
            .try_collect()
            .await?;

        Ok(campaigns)
    }
}
