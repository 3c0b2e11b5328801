pub mod storage;

use async_trait::async_trait;
use std::rc::Rc;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService {
    /// Writes `body` at `path`, relative to the storage root
    async fn save_pic(&self, path: &str, body: Vec<u8>) -> anyhow::Result<()>;

    /// Removes the file at `path`, missing files are not an error
    async fn delete_pic(&self, path: &str) -> anyhow::Result<()>;
}

pub type ImplStorageService = Rc<dyn StorageService>;
