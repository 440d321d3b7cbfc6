pub mod group;
pub mod store;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An alert recipient tied to one free-text place name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    pub location: String,
    pub verified: bool,
}
