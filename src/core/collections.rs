use crate::core::Storage;
use crate::domain::model::{Florist, Identified, Review};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

pub const FLORISTS_KEY: &str = "likes:florists";
pub const REVIEWS_KEY: &str = "likes:reviews";

/// 保存完整紀錄的按讚清單，最新的在最前面
pub struct LikedCollection<S, T> {
    storage: S,
    key: &'static str,
    items: Vec<T>,
}

pub type LikedFlorists<S> = LikedCollection<S, Florist>;
pub type LikedReviews<S> = LikedCollection<S, Review>;

impl<S, T> LikedCollection<S, T>
where
    S: Storage,
    T: Identified + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub async fn load(storage: S, key: &'static str) -> Self {
        let mut collection = Self {
            storage,
            key,
            items: Vec::new(),
        };
        collection.reload().await;
        collection
    }

    /// 重新讀取儲存區；讀不到時保留目前的清單
    pub async fn reload(&mut self) {
        match self.storage.read_item(self.key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => self.items = items,
                Err(e) => tracing::warn!("Unreadable data under '{}': {}", self.key, e),
            },
            Ok(None) => self.items.clear(),
            Err(e) => tracing::warn!("Could not read '{}': {}", self.key, e),
        }
    }

    pub async fn toggle(&mut self, item: T) {
        if let Some(pos) = self.position(item.id()) {
            self.items.remove(pos);
        } else {
            self.items.insert(0, item);
        }
        self.persist().await;
    }

    /// 編輯模式下一次移除多筆，回傳實際移除的數量
    pub async fn remove_selected(&mut self, ids: &[String]) -> usize {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.items.len();
        self.items.retain(|item| !targets.contains(item.id()));
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist().await;
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|x| x.id() == id)
    }

    async fn persist(&self) {
        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not serialize '{}': {}", self.key, e);
                return;
            }
        };
        if let Err(e) = self.storage.write_item(self.key, &raw).await {
            tracing::warn!("Failed to persist '{}' (kept in memory): {}", self.key, e);
        }
    }
}
