use super::IReminderRepo;
use futures::stream::{self, BoxStream, StreamExt};
use remindme_domain::{date, Reminder, ID};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::error;

pub struct SqliteReminderRepo {
    pool: SqlitePool,
    changes: broadcast::Sender<()>,
}

impl SqliteReminderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self { pool, changes }
    }

    /// Opens (and creates, if missing) the database at the given
    /// connection string and prepares the schema.
    pub async fn connect(connection_string: &str) -> anyhow::Result<Self> {
        let options =
            SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);
        let pool = pool_options().connect_with(options).await?;
        let repo = Self::new(pool);
        repo.migrate().await?;
        Ok(repo)
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reminders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                fire_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn notify_changed(&self) {
        let _ = self.changes.send(());
    }
}

/// An in-memory sqlite database exists per connection, so the pool is
/// pinned to exactly one connection that is never reaped. The idle and
/// lifetime reapers must stay off: replacing the connection would
/// silently swap in a fresh empty database.
fn pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    id: i64,
    title: String,
    description: String,
    /// Epoch milliseconds, resolved against the local zone at the
    /// storage boundary
    fire_at: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: ID::try_from(raw.id)?,
            title: raw.title,
            description: raw.description,
            fire_at: date::from_epoch_millis(raw.fire_at),
        })
    }
}

async fn find_row(pool: &SqlitePool, reminder_id: ID) -> Option<Reminder> {
    let row = sqlx::query_as::<_, ReminderRaw>(
        r#"
        SELECT id, title, description, fire_at FROM reminders
        WHERE id = ?1
        "#,
    )
    .bind(reminder_id.inner())
    .fetch_optional(pool)
    .await;
    match row {
        Ok(raw) => raw.and_then(|raw| raw.try_into().ok()),
        Err(e) => {
            error!("Failed to query reminder {}: {:?}", reminder_id, e);
            None
        }
    }
}

async fn find_all_rows(pool: &SqlitePool) -> Vec<Reminder> {
    let rows = sqlx::query_as::<_, ReminderRaw>(
        r#"
        SELECT id, title, description, fire_at FROM reminders
        "#,
    )
    .fetch_all(pool)
    .await;
    match rows {
        Ok(raws) => raws
            .into_iter()
            .filter_map(|raw| raw.try_into().ok())
            .collect(),
        Err(e) => {
            error!("Failed to query reminders: {:?}", e);
            Vec::new()
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for SqliteReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<ID> {
        let res = sqlx::query(
            r#"
            INSERT INTO reminders
            (title, description, fire_at)
            VALUES(?1, ?2, ?3)
            "#,
        )
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(date::to_epoch_millis(&reminder.fire_at))
        .execute(&self.pool)
        .await?;
        let id = ID::try_from(res.last_insert_rowid())?;
        self.notify_changed();
        Ok(id)
    }

    async fn find(&self, reminder_id: ID) -> Option<Reminder> {
        find_row(&self.pool, reminder_id).await
    }

    async fn find_all(&self) -> Vec<Reminder> {
        find_all_rows(&self.pool).await
    }

    async fn delete(&self, reminder_id: ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE id = ?1
            "#,
        )
        .bind(reminder_id.inner())
        .execute(&self.pool)
        .await?;
        self.notify_changed();
        Ok(())
    }

    fn watch(&self, reminder_id: ID) -> BoxStream<'static, Option<Reminder>> {
        let pool = self.pool.clone();
        let rx = self.changes.subscribe();
        stream::unfold((rx, true), move |(mut rx, first)| {
            let pool = pool.clone();
            async move {
                if !first {
                    match rx.recv().await {
                        Ok(()) | Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => return None,
                    }
                }
                Some((find_row(&pool, reminder_id).await, (rx, false)))
            }
        })
        .boxed()
    }

    fn watch_all(&self) -> BoxStream<'static, Vec<Reminder>> {
        let pool = self.pool.clone();
        let rx = self.changes.subscribe();
        stream::unfold((rx, true), move |(mut rx, first)| {
            let pool = pool.clone();
            async move {
                if !first {
                    match rx.recv().await {
                        Ok(()) | Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => return None,
                    }
                }
                Some((find_all_rows(&pool).await, (rx, false)))
            }
        })
        .boxed()
    }
}
