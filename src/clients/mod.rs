pub mod chat;
pub mod mock;
pub mod models;

pub use chat::*;
pub use mock::*;
pub use models::*;
