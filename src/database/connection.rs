use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::database::{DocumentStore, MemoryStore, MongoStore};
use crate::error::AppResult;

pub type DbHandle = Arc<dyn DocumentStore>;

/// 按 `config.url` 打开文档存储
pub async fn create_store(config: &DatabaseConfig) -> AppResult<DbHandle> {
    if config.is_memory() {
        log::warn!("Using in-memory document store, data is lost on restart");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = MongoStore::connect(config).await?;
    Ok(Arc::new(store))
}
