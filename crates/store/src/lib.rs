pub mod actor;
pub mod error;
pub mod search;

pub use actor::{spawn, StoreHandle};
pub use error::StoreError;
pub use search::{evaluate, FilterValue, SearchRequest, DEFAULT_LIMIT};
