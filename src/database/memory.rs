use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::campaign::db::CampaignStore;
use crate::campaign::{Campaign, CampaignId};
use crate::error::Error;

use super::Database;

/// Keeps campaigns in process memory. Everything is lost on shutdown.
#[derive(Debug, Default)]
pub struct MemoryCampaignStore {
    campaigns: Mutex<Vec<Campaign>>,
    last_id: AtomicI64,
}

impl MemoryCampaignStore {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Campaign>>, Error> {
        self.campaigns
            .lock()
            .map_err(|_| Error::ExistentialState("campaign store lock was poisoned".into()))
    }
}

#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn next_campaign_id(&self) -> Result<CampaignId, Error> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(CampaignId::from_raw(id))
    }

    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        self.lock()?.push(campaign.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let campaigns = self.lock()?.clone();

        Ok(campaigns)
    }
}

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    campaigns: MemoryCampaignStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

impl Database for MemoryDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}
