//! Library branch and stock models

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Branch record as stored (coordinates are NUMERIC(9,6))
#[derive(Debug, Clone, FromRow)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub phone: Option<String>,
}

/// Branch as exposed to map clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BranchInfo {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
}

impl From<Branch> for BranchInfo {
    fn from(b: Branch) -> Self {
        BranchInfo {
            id: b.id,
            name: b.name,
            address: b.address,
            latitude: b.latitude.and_then(|d| d.to_f64()),
            longitude: b.longitude.and_then(|d| d.to_f64()),
            phone: b.phone,
        }
    }
}

/// A branch holding copies of a given book
#[derive(Debug, Clone, FromRow)]
pub struct BranchStock {
    pub branch_id: i32,
    pub branch_name: String,
    pub address: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub phone: Option<String>,
    pub count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BranchStockInfo {
    pub branch_id: i32,
    pub branch_name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub count: i32,
}

impl From<BranchStock> for BranchStockInfo {
    fn from(s: BranchStock) -> Self {
        BranchStockInfo {
            branch_id: s.branch_id,
            branch_name: s.branch_name,
            address: s.address,
            latitude: s.latitude.and_then(|d| d.to_f64()),
            longitude: s.longitude.and_then(|d| d.to_f64()),
            phone: s.phone,
            count: s.count,
        }
    }
}

/// Create branch request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBranch {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[validate(length(max = 512))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

/// Stock row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Stock {
    pub id: i32,
    pub book_id: i32,
    pub branch_id: i32,
    pub count: i32,
}

/// Set the number of copies of a book held at a branch
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetStock {
    pub book_id: i32,
    pub branch_id: i32,
    #[validate(range(min = 0, message = "Count cannot be negative"))]
    pub count: i32,
}
