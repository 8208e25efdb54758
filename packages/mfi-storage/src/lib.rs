pub mod cache;
pub mod transient;

mod error;

pub use cache::{CACHE_GROUP, ResultCache, sanitize_key};
pub use error::{Error, Result};
pub use transient::{MemoryStore, Transient, TransientStore};
