//! Branch and stock domain methods on Repository

use rust_decimal::Decimal;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::branch::{Branch, BranchStock, CreateBranch, Stock},
};

/// Round a coordinate to the six decimal places stored by NUMERIC(9,6)
fn coordinate(value: Option<f64>) -> AppResult<Option<Decimal>> {
    value
        .map(|v| {
            Decimal::from_f64_retain(v)
                .map(|d| d.round_dp(6))
                .ok_or_else(|| AppError::Validation(format!("Invalid coordinate {}", v)))
        })
        .transpose()
}

impl Repository {
    /// List all branches
    pub async fn branches_list(&self) -> AppResult<Vec<Branch>> {
        let rows = sqlx::query_as::<_, Branch>(
            "SELECT id, name, address, latitude, longitude, phone FROM branches ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a branch
    pub async fn branches_create(&self, data: &CreateBranch) -> AppResult<Branch> {
        let row = sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (name, address, latitude, longitude, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, address, latitude, longitude, phone
            "#,
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(coordinate(data.latitude)?)
        .bind(coordinate(data.longitude)?)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Branches holding at least one copy of the book
    pub async fn branches_with_stock(&self, book_id: i32) -> AppResult<Vec<BranchStock>> {
        let rows = sqlx::query_as::<_, BranchStock>(
            r#"
            SELECT b.id AS branch_id, b.name AS branch_name, b.address,
                   b.latitude, b.longitude, b.phone, s.count
            FROM stock s
            JOIN branches b ON b.id = s.branch_id
            WHERE s.book_id = $1 AND s.count > 0
            ORDER BY b.name, b.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create or replace the stock count for (book, branch)
    pub async fn stock_upsert(&self, book_id: i32, branch_id: i32, count: i32) -> AppResult<Stock> {
        let row = sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stock (book_id, branch_id, count)
            VALUES ($1, $2, $3)
            ON CONFLICT (book_id, branch_id) DO UPDATE SET count = EXCLUDED.count
            RETURNING id, book_id, branch_id, count
            "#,
        )
        .bind(book_id)
        .bind(branch_id)
        .bind(count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::NotFound("Book or branch not found".to_string())
            }
            other => AppError::Database(other),
        })?;
        Ok(row)
    }
}
