pub mod mongodb;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::store::{Listing, VestingRecipientRecord};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("mongodb driver error: {0}")]
    Driver(#[from] ::mongodb::error::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] ::mongodb::bson::ser::Error),
}

/// The off-chain store. Plain inserts and filtered finds; the caller
/// enforces whatever shape invariants it needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    async fn create_listing(&self, listing: Listing) -> Result<Listing, DatabaseError>;

    async fn get_listings(&self, marketplace: &str) -> Result<Vec<Listing>, DatabaseError>;

    async fn create_vesting_recipient(
        &self,
        record: VestingRecipientRecord,
    ) -> Result<VestingRecipientRecord, DatabaseError>;

    async fn get_vesting_recipients(&self, contract: &str) -> Result<Vec<VestingRecipientRecord>, DatabaseError>;
}
