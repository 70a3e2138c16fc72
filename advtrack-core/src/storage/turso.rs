//! Turso/libSQL implementation of tracker storage.
//!
//! It can connect to:
//! - Remote Turso database (cloud)
//! - Local embedded SQLite file

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database, Transaction, TransactionBehavior};
use tracing::{debug, info, instrument};

use super::{AdvancementStore, Result, StoreError};
use crate::calculator::{self, AdvancementState, Recomputation};
use crate::model::{Advancement, NewAdvancement, NewTab, NewUser, ParentLink, Tab, World};

/// SQL schema for the advancements table.
///
/// `parent_advancement_id` carries no foreign key: a dangling parent is
/// tolerated and resolves to "unavailable".
const SCHEMA_ADVANCEMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS Advancements (
    advancement_id INTEGER PRIMARY KEY,
    advancement_name TEXT NOT NULL,
    tab_id INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    completion_percentage REAL NOT NULL DEFAULT 0.0,
    is_completed INTEGER NOT NULL DEFAULT 0,
    is_available INTEGER NOT NULL DEFAULT 1,
    parent_advancement_id INTEGER,
    rewards TEXT,
    resource_path TEXT
)
"#;

/// SQL schema for the worlds table.
const SCHEMA_WORLDS: &str = r#"
CREATE TABLE IF NOT EXISTS Worlds (
    world_id INTEGER PRIMARY KEY AUTOINCREMENT,
    world_name TEXT NOT NULL,
    completion_percentage REAL NOT NULL DEFAULT 0.0,
    created_at TEXT NOT NULL
)
"#;

/// SQL schema for the tabs table.
const SCHEMA_TABS: &str = r#"
CREATE TABLE IF NOT EXISTS Tabs (
    tab_id INTEGER PRIMARY KEY,
    world_id INTEGER NOT NULL,
    tab_name TEXT NOT NULL,
    completion_percentage REAL NOT NULL DEFAULT 0.0
)
"#;

/// SQL schema for the user account table.
const SCHEMA_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS Users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name TEXT NOT NULL,
    user_email TEXT NOT NULL UNIQUE,
    user_password TEXT NOT NULL
)
"#;

/// How long a local connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_ADVANCEMENTS: &str = "SELECT advancement_id, advancement_name, tab_id, description, completion_percentage, is_completed, is_available, parent_advancement_id, rewards, resource_path FROM Advancements";

/// Turso-backed tracker storage.
#[derive(Clone)]
pub struct TursoStore {
    db: Arc<Database>,
    /// Set for embedded files; remote connections queue writes server-side.
    busy_timeout: Option<Duration>,
}

impl TursoStore {
    /// Open (or create) a local embedded database file.
    pub async fn new_local(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Builder::new_local(path).build().await?;
        let store = Self {
            db: Arc::new(db),
            busy_timeout: Some(BUSY_TIMEOUT),
        };
        store.enable_wal().await?;
        store.ensure_schema().await?;
        info!(path = %path.display(), "opened local database");
        Ok(store)
    }

    /// Connect to a remote Turso database.
    pub async fn new_remote(url: &str, token: &str) -> Result<Self> {
        let db = Builder::new_remote(url.to_string(), token.to_string())
            .build()
            .await?;
        let store = Self {
            db: Arc::new(db),
            busy_timeout: None,
        };
        store.ensure_schema().await?;
        info!(url, "connected to remote database");
        Ok(store)
    }

    /// Get a database connection.
    fn conn(&self) -> Result<Connection> {
        let conn = self.db.connect()?;
        if let Some(timeout) = self.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        Ok(conn)
    }

    /// Open a write transaction holding the write lock from its first statement.
    ///
    /// Every read-then-write pass goes through here so concurrent writers
    /// queue on the lock instead of failing a deferred upgrade.
    async fn write_transaction(conn: &Connection) -> Result<Transaction> {
        Ok(conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Switch a local file to write-ahead logging so readers never block
    /// behind a writer. The mode is persistent in the file.
    async fn enable_wal(&self) -> Result<()> {
        let conn = self.conn()?;
        let mut rows = conn.query("PRAGMA journal_mode=WAL", ()).await?;
        if let Some(row) = rows.next().await? {
            let mode: String = row.get(0)?;
            debug!(mode, "journal mode");
        }
        Ok(())
    }

    /// Ensure the database schema exists.
    async fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(SCHEMA_ADVANCEMENTS, ()).await?;
        conn.execute(SCHEMA_WORLDS, ()).await?;
        conn.execute(SCHEMA_TABS, ()).await?;
        conn.execute(SCHEMA_USERS, ()).await?;
        Ok(())
    }

    /// Parse an advancement from a `SELECT_ADVANCEMENTS` row.
    fn parse_advancement(row: &libsql::Row) -> Result<Advancement> {
        let is_completed: i64 = row.get(5)?;
        let is_available: i64 = row.get(6)?;

        Ok(Advancement {
            id: row.get(0)?,
            name: row.get(1)?,
            tab_id: row.get(2)?,
            description: row.get(3)?,
            completion_percentage: row.get(4)?,
            is_completed: is_completed != 0,
            is_available: is_available != 0,
            parent_id: row.get(7)?,
            rewards: row.get(8)?,
            resource_path: row.get(9)?,
        })
    }

    fn parse_world(row: &libsql::Row) -> Result<World> {
        let created_at: String = row.get(3)?;
        Ok(World {
            id: row.get(0)?,
            name: row.get(1)?,
            completion_percentage: row.get(2)?,
            created_at: parse_datetime(&created_at)?,
        })
    }

    async fn collect_advancements(mut rows: libsql::Rows) -> Result<Vec<Advancement>> {
        let mut advancements = Vec::new();
        while let Some(row) = rows.next().await? {
            advancements.push(Self::parse_advancement(&row)?);
        }
        Ok(advancements)
    }

    /// Read every advancement's calculator columns on `conn`.
    async fn load_states(conn: &Connection) -> Result<Vec<AdvancementState>> {
        let rows = conn
            .query(
                &format!("{SELECT_ADVANCEMENTS} ORDER BY advancement_id ASC"),
                (),
            )
            .await?;

        let advancements = Self::collect_advancements(rows).await?;
        Ok(advancements.iter().map(Advancement::state).collect())
    }

    /// Full recomputation pass on an open transaction.
    async fn apply_recompute(conn: &Connection) -> Result<Recomputation> {
        let states = Self::load_states(conn).await?;
        let result = calculator::recompute(&states);

        conn.execute(
            "UPDATE Worlds SET completion_percentage = ?",
            [result.percentages.world],
        )
        .await?;

        for (tab_id, percentage) in result.percentages.tabs() {
            conn.execute(
                "UPDATE Tabs SET completion_percentage = ? WHERE tab_id = ?",
                libsql::params![percentage, tab_id],
            )
            .await?;
        }

        for (id, available) in &result.availability {
            conn.execute(
                "UPDATE Advancements SET is_available = ? WHERE advancement_id = ?",
                libsql::params![i64::from(*available), *id],
            )
            .await?;
        }

        debug!(
            world = result.percentages.world,
            rows = states.len(),
            "recomputed completion"
        );
        Ok(result)
    }
}

/// Commit on success, roll back on failure.
async fn finish<T>(tx: Transaction, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!("rollback failed: {}", rollback);
            }
            Err(e)
        }
    }
}

#[async_trait]
impl AdvancementStore for TursoStore {
    #[instrument(skip(self), level = "debug")]
    async fn list_advancements(&self) -> Result<Vec<Advancement>> {
        let conn = self.conn()?;
        let rows = conn
            .query(
                &format!("{SELECT_ADVANCEMENTS} ORDER BY advancement_id ASC"),
                (),
            )
            .await?;
        Self::collect_advancements(rows).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn search_advancements(&self, query: &str) -> Result<Vec<Advancement>> {
        let conn = self.conn()?;
        let pattern = like_pattern(query);
        let rows = conn
            .query(
                &format!(
                    "{SELECT_ADVANCEMENTS} WHERE advancement_name LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\' OR rewards LIKE ?1 ESCAPE '\\' ORDER BY advancement_id ASC"
                ),
                [pattern],
            )
            .await?;
        Self::collect_advancements(rows).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_advancement(&self, id: i64) -> Result<Option<Advancement>> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                &format!("{SELECT_ADVANCEMENTS} WHERE advancement_id = ?"),
                [id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::parse_advancement(&row)?))
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_worlds(&self) -> Result<Vec<World>> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT world_id, world_name, completion_percentage, created_at FROM Worlds ORDER BY world_id ASC",
                (),
            )
            .await?;

        let mut worlds = Vec::new();
        while let Some(row) = rows.next().await? {
            worlds.push(Self::parse_world(&row)?);
        }
        Ok(worlds)
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_tabs(&self) -> Result<Vec<Tab>> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT tab_id, world_id, tab_name, completion_percentage FROM Tabs ORDER BY tab_id ASC",
                (),
            )
            .await?;

        let mut tabs = Vec::new();
        while let Some(row) = rows.next().await? {
            tabs.push(Tab {
                id: row.get(0)?,
                world_id: row.get(1)?,
                name: row.get(2)?,
                completion_percentage: row.get(3)?,
            });
        }
        Ok(tabs)
    }

    #[instrument(skip(self), level = "debug")]
    async fn parent_links(&self) -> Result<Vec<ParentLink>> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                r#"
                SELECT a.advancement_id, a.parent_advancement_id, b.advancement_name
                FROM Advancements a
                LEFT JOIN Advancements b ON b.advancement_id = a.parent_advancement_id
                ORDER BY a.advancement_id ASC
                "#,
                (),
            )
            .await?;

        let mut links = Vec::new();
        while let Some(row) = rows.next().await? {
            links.push(ParentLink {
                advancement_id: row.get(0)?,
                parent_id: row.get(1)?,
                parent_name: row.get(2)?,
            });
        }
        Ok(links)
    }

    #[instrument(skip(self), level = "debug")]
    async fn toggle_advancement(&self, id: i64) -> Result<Option<bool>> {
        let conn = self.conn()?;
        let tx = Self::write_transaction(&conn).await?;

        let outcome: Result<Option<bool>> = async {
            let changed = tx
                .execute(
                    "UPDATE Advancements SET is_completed = NOT is_completed WHERE advancement_id = ?",
                    [id],
                )
                .await?;
            if changed == 0 {
                return Ok(None);
            }

            let mut rows = tx
                .query(
                    "SELECT is_completed FROM Advancements WHERE advancement_id = ?",
                    [id],
                )
                .await?;
            let completed = match rows.next().await? {
                Some(row) => row.get::<i64>(0)? != 0,
                None => {
                    return Err(StoreError::InvalidData(format!(
                        "advancement {} vanished during toggle",
                        id
                    )));
                }
            };
            drop(rows);

            Self::apply_recompute(&tx).await?;
            Ok(Some(completed))
        }
        .await;

        let result = finish(tx, outcome).await?;
        debug!(id, ?result, "toggled advancement");
        Ok(result)
    }

    #[instrument(skip(self), level = "debug")]
    async fn recompute(&self) -> Result<Recomputation> {
        let conn = self.conn()?;
        let tx = Self::write_transaction(&conn).await?;
        let outcome = Self::apply_recompute(&tx).await;
        finish(tx, outcome).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn add_world(&self, name: &str) -> Result<World> {
        let conn = self.conn()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO Worlds (world_name, created_at) VALUES (?, ?)",
            libsql::params![name, format_datetime(created_at)],
        )
        .await?;

        let world = World {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            completion_percentage: 0.0,
            created_at,
        };
        debug!(id = world.id, name, "added world");
        Ok(world)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_world(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn
            .execute("DELETE FROM Worlds WHERE world_id = ?", [id])
            .await?;
        Ok(deleted > 0)
    }

    #[instrument(skip(self, user), fields(email = %user.email), level = "debug")]
    async fn create_user(&self, user: &NewUser) -> Result<i64> {
        let conn = self.conn()?;
        let tx = Self::write_transaction(&conn).await?;

        let outcome: Result<i64> = async {
            let mut rows = tx
                .query(
                    "SELECT user_id FROM Users WHERE user_email = ?",
                    [user.email.as_str()],
                )
                .await?;
            let exists = rows.next().await?.is_some();
            drop(rows);
            if exists {
                return Err(StoreError::UserExists(user.email.clone()));
            }

            tx.execute(
                "INSERT INTO Users (user_name, user_email, user_password) VALUES (?, ?, ?)",
                libsql::params![
                    user.name.as_str(),
                    user.email.as_str(),
                    user.password_hash.as_str()
                ],
            )
            .await?;
            Ok(tx.last_insert_rowid())
        }
        .await;

        finish(tx, outcome).await
    }

    #[instrument(skip(self, rows), fields(count = rows.len()), level = "debug")]
    async fn import_advancements(&self, rows: &[NewAdvancement]) -> Result<Recomputation> {
        let conn = self.conn()?;
        let tx = Self::write_transaction(&conn).await?;

        let outcome: Result<Recomputation> = async {
            for row in rows {
                tx.execute(
                    "INSERT INTO Advancements (advancement_id, advancement_name, tab_id, description, is_completed, parent_advancement_id, rewards, resource_path) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                    libsql::params![
                        row.id,
                        row.name.as_str(),
                        row.tab_id,
                        row.description.as_str(),
                        i64::from(row.completed),
                        row.parent_id,
                        row.rewards.clone(),
                        row.resource_path.clone()
                    ],
                )
                .await?;
            }
            Self::apply_recompute(&tx).await
        }
        .await;

        finish(tx, outcome).await
    }

    #[instrument(skip(self, tabs), level = "debug")]
    async fn insert_tabs(&self, tabs: &[NewTab]) -> Result<u64> {
        let conn = self.conn()?;
        let mut inserted = 0;
        for tab in tabs {
            inserted += conn
                .execute(
                    "INSERT OR IGNORE INTO Tabs (tab_id, world_id, tab_name) VALUES (?, ?, ?)",
                    libsql::params![tab.id, tab.world_id, tab.name.as_str()],
                )
                .await?;
        }
        Ok(inserted)
    }
}

/// Build a `LIKE` pattern that matches `query` literally anywhere.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Format a datetime for storage.
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse a datetime from storage.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidData(format!("invalid datetime: {}", s)))
}
