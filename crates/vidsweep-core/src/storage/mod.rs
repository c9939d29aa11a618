mod database;
mod page_repo;

pub use database::Database;
pub use page_repo::{PageRepository, PageStore};
