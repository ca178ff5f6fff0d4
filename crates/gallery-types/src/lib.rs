pub mod api;
pub mod models;

pub use api::{Message, RecentQuery, Validation};
pub use models::Picture;
