use std::{ffi::OsString, hash::Hash, path::{Path, PathBuf}, sync::Arc};

use indexmap::IndexMap;
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists an insertion-ordered `IndexMap<K, V>` to a JSON file after every
/// mutation. Intended for lightweight state where a database is overkill.
///
/// Mutations run on a copy of the map under the write lock; the copy replaces
/// the live map only after it has been written, so memory never runs ahead of
/// the file. Files are replaced via write-to-temp + rename.
pub struct JsonMapStore<K, V> {
    inner: RwLock<IndexMap<K, V>>,
    file_path: PathBuf,
}

/// `<path><suffix>`, e.g. `coffees.json` -> `coffees.json.tmp`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

async fn write_atomic(path: &Path, data: &[u8]) -> Result<(), ServiceError> {
    let tmp = sibling(path, ".tmp");
    fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(ServiceError::storage(e));
    }
    Ok(())
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    ///
    /// A file that cannot be parsed is moved aside to `<path>.corrupt` and the
    /// store starts empty.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: IndexMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    let backup = sibling(&file_path, ".corrupt");
                    warn!(
                        path = %file_path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "unreadable json store; moving it aside and starting empty"
                    );
                    fs::rename(&file_path, &backup).await.map_err(ServiceError::storage)?;
                    Self::write_empty(&file_path).await?
                }
            },
            Err(_) => Self::write_empty(&file_path).await?,
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    async fn write_empty(file_path: &Path) -> Result<IndexMap<K, V>, ServiceError> {
        let empty: IndexMap<K, V> = IndexMap::new();
        write_atomic(file_path, &serde_json::to_vec(&empty).map_err(ServiceError::storage)?).await?;
        Ok(empty)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn persist(&self, map: &IndexMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(map).map_err(ServiceError::storage)?;
        write_atomic(&self.file_path, &data).await
    }

    /// All values in insertion order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Remove a key, keeping the order of the rest, and persist; returns whether it existed.
    /// Nothing is written when the key was absent. On a write error the key stays.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        if !map.contains_key(key) {
            return Ok(false);
        }
        let mut next = map.clone();
        next.shift_remove(key);
        self.persist(&next).await?;
        *map = next;
        Ok(true)
    }

    /// Apply a mutation and persist it, all under the write lock.
    /// If `f` or the write fails, the live map is left as it was and the
    /// error is returned.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut IndexMap<K, V>) -> Result<T, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        let out = f(&mut next)?;
        self.persist(&next).await?;
        *map = next;
        Ok(out)
    }
}
