use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{DbPool, OrmConn};
use crate::feed::FeedClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub feed: FeedClient,
    /// Serializes feed imports so a manual trigger cannot overlap a
    /// scheduled run.
    pub import_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, feed: FeedClient) -> Self {
        Self {
            pool,
            orm,
            feed,
            import_lock: Arc::new(Mutex::new(())),
        }
    }
}
