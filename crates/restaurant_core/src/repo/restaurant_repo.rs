//! Restaurant record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist whole restaurant payloads keyed by `restaurant_id`.
//! - Keep SQL and document encoding inside the persistence boundary.
//!
//! # Invariants
//! - `save` is create-or-replace; `update` only replaces an existing row and
//!   never inserts one.
//! - The stored key always equals the payload identifier.
//! - `delete` is idempotent.
//! - Error messages embed the restaurant identifier.

use crate::db::DbError;
use crate::model::restaurant::{Restaurant, RestaurantId};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const RESTAURANT_SELECT_SQL: &str = "SELECT
    restaurant_id,
    restaurant,
    updated
FROM restaurants";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure for restaurant persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// Save/update was given a restaurant without a usable identifier.
    MissingId,
    Save { id: RestaurantId, source: DbError },
    Get { id: RestaurantId, source: DbError },
    Update { id: RestaurantId, source: DbError },
    Delete { id: RestaurantId, source: DbError },
    /// Conditional update found no existing record for the key.
    ConditionFailed(RestaurantId),
    /// Payload could not be encoded or a persisted row is unreadable.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "restaurant id is required for storage"),
            Self::Save { id, source } => {
                write!(f, "error saving restaurant {id:?} in store: {source}")
            }
            Self::Get { id, source } => {
                write!(f, "error getting restaurant {id:?} in store: {source}")
            }
            Self::Update { id, source } => {
                write!(f, "error updating restaurant {id:?} in store: {source}")
            }
            Self::Delete { id, source } => {
                write!(f, "error deleting restaurant {id:?} from store: {source}")
            }
            Self::ConditionFailed(id) => write!(
                f,
                "error updating restaurant {id:?} in store: conditional check failed, restaurant does not exist"
            ),
            Self::InvalidData(message) => write!(f, "invalid restaurant data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Save { source, .. }
            | Self::Get { source, .. }
            | Self::Update { source, .. }
            | Self::Delete { source, .. } => Some(source),
            Self::MissingId | Self::ConditionFailed(_) | Self::InvalidData(_) => None,
        }
    }
}

/// Persisted wrapper around a restaurant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRestaurant {
    pub restaurant_id: RestaurantId,
    pub restaurant: Restaurant,
    /// Last write time in epoch milliseconds. Observability only.
    pub updated: i64,
}

/// Record store interface for restaurant CRUD operations.
pub trait RestaurantStore {
    /// Unconditionally writes (create-or-replace) the restaurant.
    fn save(&self, restaurant: &Restaurant) -> StoreResult<()>;
    /// Loads a restaurant; `Ok(None)` when no record exists for `id`.
    fn get(&self, id: &str) -> StoreResult<Option<Restaurant>>;
    /// Replaces an existing restaurant; fails when no record exists.
    fn update(&self, restaurant: &Restaurant) -> StoreResult<()>;
    /// Removes a restaurant. Missing records are not an error.
    fn delete(&self, id: &str) -> StoreResult<()>;
}

impl<T: RestaurantStore + ?Sized> RestaurantStore for &T {
    fn save(&self, restaurant: &Restaurant) -> StoreResult<()> {
        (**self).save(restaurant)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        (**self).get(id)
    }

    fn update(&self, restaurant: &Restaurant) -> StoreResult<()> {
        (**self).update(restaurant)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        (**self).delete(id)
    }
}

/// SQLite-backed restaurant store.
pub struct SqliteRestaurantStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRestaurantStore<'conn> {
    /// Wraps a connection returned by `db::open_db`/`db::open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Loads the full stored wrapper, including the last-modified timestamp.
    pub fn get_record(&self, id: &str) -> StoreResult<Option<StoredRestaurant>> {
        let row = self
            .conn
            .query_row(
                &format!("{RESTAURANT_SELECT_SQL} WHERE restaurant_id = ?1;"),
                [id],
                |row| {
                    Ok((
                        row.get::<_, String>("restaurant_id")?,
                        row.get::<_, String>("restaurant")?,
                        row.get::<_, i64>("updated")?,
                    ))
                },
            )
            .optional()
            .map_err(|err| StoreError::Get {
                id: id.to_string(),
                source: db_error("get", id, err),
            })?;

        row.map(|(restaurant_id, document, updated)| {
            parse_stored_row(restaurant_id, &document, updated)
        })
        .transpose()
    }
}

impl RestaurantStore for SqliteRestaurantStore<'_> {
    fn save(&self, restaurant: &Restaurant) -> StoreResult<()> {
        let id = require_key(restaurant)?;
        debug!("event=restaurant_save module=repo restaurant_id={id}");

        let document = encode_restaurant(id, restaurant)?;
        self.conn
            .execute(
                "INSERT INTO restaurants (restaurant_id, restaurant, updated)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(restaurant_id) DO UPDATE SET
                    restaurant = excluded.restaurant,
                    updated = excluded.updated;",
                params![id, document, now_epoch_ms()],
            )
            .map_err(|err| StoreError::Save {
                id: id.to_string(),
                source: db_error("save", id, err),
            })?;

        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        debug!("event=restaurant_get module=repo restaurant_id={id}");
        Ok(self.get_record(id)?.map(|record| record.restaurant))
    }

    fn update(&self, restaurant: &Restaurant) -> StoreResult<()> {
        let id = require_key(restaurant)?;
        debug!("event=restaurant_update module=repo restaurant_id={id}");

        let document = encode_restaurant(id, restaurant)?;
        let changed = self
            .conn
            .execute(
                "UPDATE restaurants
                 SET
                    restaurant = ?1,
                    updated = ?2
                 WHERE restaurant_id = ?3;",
                params![document, now_epoch_ms(), id],
            )
            .map_err(|err| StoreError::Update {
                id: id.to_string(),
                source: db_error("update", id, err),
            })?;

        if changed == 0 {
            warn!(
                "event=restaurant_update module=repo status=condition_failed restaurant_id={id}"
            );
            return Err(StoreError::ConditionFailed(id.to_string()));
        }

        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        debug!("event=restaurant_delete module=repo restaurant_id={id}");

        self.conn
            .execute("DELETE FROM restaurants WHERE restaurant_id = ?1;", [id])
            .map_err(|err| StoreError::Delete {
                id: id.to_string(),
                source: db_error("delete", id, err),
            })?;

        Ok(())
    }
}

fn db_error(operation: &str, id: &str, err: rusqlite::Error) -> DbError {
    let err = DbError::from(err);
    if err.is_busy() {
        warn!("event=restaurant_{operation} module=repo status=busy restaurant_id={id}");
    }
    err
}

fn require_key(restaurant: &Restaurant) -> StoreResult<&str> {
    restaurant.key().ok_or(StoreError::MissingId)
}

fn encode_restaurant(id: &str, restaurant: &Restaurant) -> StoreResult<String> {
    serde_json::to_string(restaurant).map_err(|err| encode_error(id, &err))
}

fn encode_error(id: &str, err: &serde_json::Error) -> StoreError {
    StoreError::InvalidData(format!("error marshalling restaurant {id:?}: {err}"))
}

fn parse_stored_row(
    restaurant_id: String,
    document: &str,
    updated: i64,
) -> StoreResult<StoredRestaurant> {
    let restaurant: Restaurant = serde_json::from_str(document).map_err(|err| {
        StoreError::InvalidData(format!(
            "error unmarshalling restaurant {restaurant_id:?}: {err}"
        ))
    })?;

    if restaurant.key() != Some(restaurant_id.as_str()) {
        return Err(StoreError::InvalidData(format!(
            "restaurant {restaurant_id:?} payload carries id {:?}",
            restaurant.id
        )));
    }

    Ok(StoredRestaurant {
        restaurant_id,
        restaurant,
        updated,
    })
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
