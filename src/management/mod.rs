mod auth;
mod lock;
mod tracker;

pub use auth::TokenManager;
pub use lock::RunLock;
pub use tracker::TrackerStateManager;
