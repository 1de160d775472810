mod drive;
mod in_memory;
mod object_store;
mod relay;

pub use drive::DriveStore;
pub use in_memory::{InMemoryStore, StoredEntry};
pub use object_store::{ObjectStore, StoreError};
pub use relay::UploadRelay;
