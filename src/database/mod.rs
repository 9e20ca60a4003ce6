use mongodb::bson::{self, Document};
use mongodb::{Client, Collection};
use tracing::info;

use crate::campaign::db::CampaignStore;
use crate::campaign::Campaign;
use crate::error::Error;

mod memory;

pub use memory::{MemoryCampaignStore, MemoryDatabase};

/// Handle to whatever persists campaigns. Constructed once at startup and
/// shared by every request.
pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
}

#[derive(Debug, Clone)]
pub struct MongoCampaignStore {
    pub(crate) campaigns: Collection<Campaign>,
    pub(crate) counters: Collection<Document>,
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    campaigns: MongoCampaignStore,
}

impl MongoDatabase {
    pub fn new(db: mongodb::Database) -> MongoDatabase {
        MongoDatabase {
            campaigns: MongoCampaignStore {
                campaigns: db.collection("campaigns"),
                counters: db.collection("counters"),
            },
        }
    }

    pub async fn connect(uri: &str, name: &str) -> Result<MongoDatabase, Error> {
        info!("connecting to db: {}", uri);
        let db = Client::with_uri_str(uri).await?.database(name);

        // ping the database to ensure connection is established
        db.run_command(bson::doc! { "ping": 1 }, None).await?;

        Ok(MongoDatabase::new(db))
    }
}

impl Database for MongoDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}
