use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use tracing::debug;

use super::{DatabaseClient, DatabaseError};
use crate::types::params::DatabaseArgs;
use crate::types::store::{Listing, VestingRecipientRecord};

const LISTINGS_COLLECTION: &str = "listings";
const VESTING_RECIPIENTS_COLLECTION: &str = "vesting_recipients";

/// MongoDB implementation of the off-chain store.
pub struct MongoDbClient {
    database: Database,
}

impl MongoDbClient {
    pub async fn new(args: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&args.connection_uri).await?;
        let database = client.database(&args.database_name);
        Ok(Self { database })
    }

    fn listings(&self) -> Collection<Listing> {
        self.database.collection(LISTINGS_COLLECTION)
    }

    fn vesting_recipients(&self) -> Collection<VestingRecipientRecord> {
        self.database.collection(VESTING_RECIPIENTS_COLLECTION)
    }
}

#[async_trait]
impl DatabaseClient for MongoDbClient {
    async fn create_listing(&self, mut listing: Listing) -> Result<Listing, DatabaseError> {
        listing.created_at = Some(Utc::now().round_subsecs(0));
        self.listings().insert_one(&listing, None).await?;
        debug!(marketplace = %listing.marketplace, listing_index = listing.listing_index, "stored listing");
        Ok(listing)
    }

    async fn get_listings(&self, marketplace: &str) -> Result<Vec<Listing>, DatabaseError> {
        let cursor = self.listings().find(doc! { "marketplace": marketplace }, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn create_vesting_recipient(
        &self,
        mut record: VestingRecipientRecord,
    ) -> Result<VestingRecipientRecord, DatabaseError> {
        record.created_at = Some(Utc::now().round_subsecs(0));
        self.vesting_recipients().insert_one(&record, None).await?;
        debug!(contract = %record.v_contract, index = record.v_index, "stored vesting recipient");
        Ok(record)
    }

    async fn get_vesting_recipients(&self, contract: &str) -> Result<Vec<VestingRecipientRecord>, DatabaseError> {
        let cursor = self.vesting_recipients().find(doc! { "v_contract": contract }, None).await?;
        Ok(cursor.try_collect().await?)
    }
}
