use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store task is gone and can no longer accept requests.
    #[error("document store is closed")]
    Closed,
}
