use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{missing_key, Entity, EntityKey, Repository};
use crate::error::AppResult;

/// Process-local store; rows are returned in key order.
#[derive(Clone)]
pub struct MemoryRepository<E: Entity> {
    inner: Arc<RwLock<Table<E>>>,
}

struct Table<E: Entity> {
    rows: BTreeMap<E::Key, E>,
    next_seq: i64,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_seq: 1,
            })),
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self) -> AppResult<Vec<E>> {
        let table = self.inner.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, key: &E::Key) -> AppResult<Option<E>> {
        let table = self.inner.read().await;
        Ok(table.rows.get(key).cloned())
    }

    async fn save(&self, entity: E) -> AppResult<E> {
        let mut table = self.inner.write().await;
        let (key, entity) = match entity.key() {
            Some(key) => (key, entity),
            None => {
                let key = E::Key::from_sequence(table.next_seq).ok_or_else(missing_key::<E>)?;
                table.next_seq += 1;
                (key.clone(), entity.with_key(key))
            }
        };
        table.rows.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> AppResult<()> {
        let mut table = self.inner.write().await;
        table.rows.remove(key);
        Ok(())
    }
}
