//! 按讚清單：記憶體內的集合是唯一的真實來源，持久化只是盡力而為。
//!
//! 儲存格式（鍵 `gaehwa.likes.v1`）：
//!
//! ```json
//! {"state":{"likedIds":["f1","f2"]},"version":1}
//! ```
//!
//! 載入時也接受單純的字串陣列 `["f1","f2"]`。

use crate::core::Storage;
use crate::domain::model::Identified;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const LIKES_KEY: &str = "gaehwa.likes.v1";
pub const LIKES_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedLikes {
    state: LikesState,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikesState {
    liked_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredLikes {
    Envelope(PersistedLikes),
    Bare(Vec<String>),
}

fn decode(raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<StoredLikes>(raw) {
        Ok(StoredLikes::Bare(ids)) => Some(ids),
        Ok(StoredLikes::Envelope(persisted)) if persisted.version <= LIKES_SCHEMA_VERSION => {
            Some(persisted.state.liked_ids)
        }
        Ok(StoredLikes::Envelope(persisted)) => {
            tracing::warn!(
                "Stored likes use schema version {} (supported: {}), ignoring",
                persisted.version,
                LIKES_SCHEMA_VERSION
            );
            None
        }
        Err(e) => {
            tracing::warn!("Stored likes are unreadable, starting empty: {}", e);
            None
        }
    }
}

pub struct LikesStore<S: Storage> {
    storage: S,
    liked_ids: Vec<String>,
}

impl<S: Storage> LikesStore<S> {
    pub fn empty(storage: S) -> Self {
        Self {
            storage,
            liked_ids: Vec::new(),
        }
    }

    /// 從儲存區載入；任何讀取或解析失敗都會得到空集合
    pub async fn load(storage: S) -> Self {
        let mut store = Self::empty(storage);

        let raw = match store.storage.read_item(LIKES_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not read stored likes: {}", e);
                None
            }
        };

        if let Some(ids) = raw.as_deref().and_then(decode) {
            for id in ids {
                if !store.liked_ids.contains(&id) {
                    store.liked_ids.push(id);
                }
            }
        }

        tracing::debug!("Loaded {} liked ids", store.liked_ids.len());
        store
    }

    pub fn toggle_like(&mut self, id: &str) {
        if let Some(pos) = self.liked_ids.iter().position(|x| x == id) {
            self.liked_ids.remove(pos);
        } else {
            self.liked_ids.push(id.to_string());
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked_ids.iter().any(|x| x == id)
    }

    /// Keeps the caller's order.
    pub fn liked_from_collection<'a, T: Identified>(&self, all: &'a [T]) -> Vec<&'a T> {
        all.iter().filter(|item| self.is_liked(item.id())).collect()
    }

    pub fn liked_ids(&self) -> &[String] {
        &self.liked_ids
    }

    pub fn len(&self) -> usize {
        self.liked_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked_ids.is_empty()
    }

    pub async fn try_save(&self) -> Result<()> {
        let persisted = PersistedLikes {
            state: LikesState {
                liked_ids: self.liked_ids.clone(),
            },
            version: LIKES_SCHEMA_VERSION,
        };
        let raw = serde_json::to_string(&persisted)?;
        self.storage.write_item(LIKES_KEY, &raw).await
    }

    /// 寫入失敗只記錄警告
    pub async fn save(&self) {
        if let Err(e) = self.try_save().await {
            tracing::warn!("Failed to persist likes (kept in memory): {}", e);
        }
    }

    pub async fn toggle_and_save(&mut self, id: &str) {
        self.toggle_like(id);
        self.save().await;
    }
}
