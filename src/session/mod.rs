pub mod storage;
pub mod store;

pub use storage::{Change, FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::SessionStore;
