pub mod hit;
pub mod native;
pub mod normalize;
pub mod query;
pub mod result;

pub use hit::ExternalHit;
pub use native::{NativeProduct, NativeResultSet, ProductId};
pub use normalize::normalize;
pub use query::{QueryError, SearchQuery};
pub use result::{NormalizedResult, Provenance};
