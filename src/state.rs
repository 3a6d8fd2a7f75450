use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::{
    db::{DbPool, OrmConn},
    domain::dates::local_today,
    storage::BlobStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub utc_offset: FixedOffset,
    pub blobs: Arc<dyn BlobStore>,
    pub default_currency: String,
}

impl AppState {
    /// The property's current calendar date.
    pub fn today(&self) -> NaiveDate {
        local_today(Utc::now(), self.utc_offset)
    }
}
