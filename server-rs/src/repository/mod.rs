//! Storage abstraction shared by every record type.

use std::fmt::{Debug, Display};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, AppResult};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::{PgEntity, PgRepository};

/// Primary-key type of an entity.
pub trait EntityKey: Clone + Debug + Display + FromStr + Ord + Send + Sync + 'static {
    /// True when storage generates the key; false for caller-supplied keys.
    const SURROGATE: bool;

    /// Key for the `seq`th generated row, if this key type is generated.
    fn from_sequence(seq: i64) -> Option<Self>;
}

impl EntityKey for i64 {
    const SURROGATE: bool = true;

    fn from_sequence(seq: i64) -> Option<Self> {
        Some(seq)
    }
}

impl EntityKey for String {
    const SURROGATE: bool = false;

    fn from_sequence(_seq: i64) -> Option<Self> {
        None
    }
}

/// A persisted record with a primary key and scalar fields.
pub trait Entity:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    type Key: EntityKey;

    /// Name used in error and confirmation messages.
    const NAME: &'static str;

    /// The key, or `None` if storage has not assigned one yet.
    fn key(&self) -> Option<Self::Key>;

    fn with_key(self, key: Self::Key) -> Self;
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<E>>;

    async fn find_by_id(&self, key: &E::Key) -> AppResult<Option<E>>;

    /// Inserts when the key is unassigned, replaces the stored row otherwise.
    async fn save(&self, entity: E) -> AppResult<E>;

    async fn delete(&self, key: &E::Key) -> AppResult<()>;
}

pub type Repo<E> = Arc<dyn Repository<E>>;

pub(crate) fn missing_key<E: Entity>() -> AppError {
    AppError::BadRequest(format!("{} requires a caller-supplied key", E::NAME))
}
