//! Data models for Shelfmark

pub mod book;
pub mod branch;
pub mod enums;
pub mod review;
pub mod translation;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use branch::{BranchInfo, BranchStockInfo};
pub use enums::Language;
pub use review::Review;
pub use translation::{CachedTranslation, LanguagePreference};
pub use user::{User, UserClaims};
