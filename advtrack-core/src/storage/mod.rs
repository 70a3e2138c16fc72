//! Storage trait and libSQL implementation for tracker data.
//!
//! [`AdvancementStore`] is the database-client handle the HTTP layer holds.
//! Every method opens its own connection, so connection lifetime is scoped
//! to one call. Mutations that change completion state re-run the full
//! recomputation inside the same transaction.

mod error;
mod turso;

pub use error::{Result, StoreError};
pub use turso::TursoStore;

use async_trait::async_trait;

use crate::calculator::Recomputation;
use crate::model::{Advancement, NewAdvancement, NewTab, NewUser, ParentLink, Tab, World};

#[async_trait]
pub trait AdvancementStore: Send + Sync {
    /// All advancements, ascending id.
    async fn list_advancements(&self) -> Result<Vec<Advancement>>;

    /// Case-insensitive substring match on name, description or rewards,
    /// ascending id. An empty query matches every row.
    async fn search_advancements(&self, query: &str) -> Result<Vec<Advancement>>;

    async fn get_advancement(&self, id: i64) -> Result<Option<Advancement>>;

    /// All worlds, ascending id.
    async fn list_worlds(&self) -> Result<Vec<World>>;

    /// All tabs, ascending id.
    async fn list_tabs(&self) -> Result<Vec<Tab>>;

    /// Every advancement joined with its parent's name.
    async fn parent_links(&self) -> Result<Vec<ParentLink>>;

    /// Flip the completion flag and recompute, atomically.
    ///
    /// Returns the new flag, or `None` when the advancement does not exist.
    async fn toggle_advancement(&self, id: i64) -> Result<Option<bool>>;

    /// Recompute and persist every derived percentage and availability flag.
    async fn recompute(&self) -> Result<Recomputation>;

    async fn add_world(&self, name: &str) -> Result<World>;

    /// Returns whether a row was deleted.
    async fn delete_world(&self, id: i64) -> Result<bool>;

    /// Register an account. Fails with [`StoreError::UserExists`] when the
    /// email is already taken.
    async fn create_user(&self, user: &NewUser) -> Result<i64>;

    /// Insert advancements in one transaction, then recompute.
    async fn import_advancements(&self, rows: &[NewAdvancement]) -> Result<Recomputation>;

    /// Insert tabs, skipping ids that already exist. Returns the number inserted.
    async fn insert_tabs(&self, tabs: &[NewTab]) -> Result<u64>;
}
