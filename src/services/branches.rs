//! Branches and stock availability

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        branch::{BranchInfo, BranchStockInfo, CreateBranch, SetStock, Stock},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BranchesService {
    repository: Repository,
}

impl BranchesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BranchInfo>> {
        let branches = self.repository.branches_list().await?;
        Ok(branches.into_iter().map(BranchInfo::from).collect())
    }

    pub async fn create(&self, data: &CreateBranch) -> AppResult<BranchInfo> {
        data.validate()?;
        let branch = self.repository.branches_create(data).await?;
        Ok(branch.into())
    }

    /// The book and the branches currently holding copies of it
    pub async fn availability(&self, book_id: i32) -> AppResult<(Book, Vec<BranchStockInfo>)> {
        let book = self.repository.books_get_by_id(book_id).await?;
        let stock = self.repository.branches_with_stock(book_id).await?;
        Ok((book, stock.into_iter().map(BranchStockInfo::from).collect()))
    }

    pub async fn set_stock(&self, data: &SetStock) -> AppResult<Stock> {
        data.validate()?;
        self.repository
            .stock_upsert(data.book_id, data.branch_id, data.count)
            .await
    }
}
