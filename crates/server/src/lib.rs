pub mod api;
pub mod router;
pub mod state;
pub mod wal;

pub use router::router;
pub use state::AppState;
