use axum::response::Response;
use serde::{Deserialize, Serialize};

use super::error::RouteError;

/// Standardized API response envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self { success: false, data: None, message: Some(message) }
    }
}

impl<T> ApiResponse<T> {
    pub fn success_with_data(data: T) -> Self {
        Self { success: true, data: Some(data), message: None }
    }

    pub fn success(message: Option<String>) -> Self {
        Self { success: true, data: None, message }
    }
}

pub type RouteResult = Result<Response<axum::body::Body>, RouteError>;

/// `?contract_hash=` query shared by most read endpoints.
#[derive(Debug, Deserialize)]
pub struct ContractQuery {
    pub contract_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    pub contract_hash: String,
    #[serde(default)]
    pub full: bool,
}

#[derive(Debug, Deserialize)]
pub struct IndexedQuery {
    pub contract_hash: String,
    pub index: u64,
}

#[derive(Debug, Deserialize)]
pub struct StakePoolQuery {
    pub contract_hash: String,
    pub account: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountQuery {
    pub account_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct MarketplaceQuery {
    pub marketplace: String,
}

#[derive(Debug, Deserialize)]
pub struct VestingContractQuery {
    pub contract: String,
}
