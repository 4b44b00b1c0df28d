use crate::core::collections::{LikedFlorists, LikedReviews, FLORISTS_KEY, REVIEWS_KEY};
use crate::core::likes::LikesStore;
use crate::core::Storage;

/// 應用程式根部持有的狀態；各畫面透過參照取得，而不是全域單例
pub struct AppState<S: Storage + Clone> {
    pub likes: LikesStore<S>,
    pub liked_florists: LikedFlorists<S>,
    pub liked_reviews: LikedReviews<S>,
    storage: S,
}

impl<S: Storage + Clone> AppState<S> {
    pub async fn load(storage: S) -> Self {
        let likes = LikesStore::load(storage.clone()).await;
        let liked_florists = LikedFlorists::load(storage.clone(), FLORISTS_KEY).await;
        let liked_reviews = LikedReviews::load(storage.clone(), REVIEWS_KEY).await;

        tracing::debug!(
            "App state loaded: {} liked ids, {} florists, {} reviews",
            likes.len(),
            liked_florists.items().len(),
            liked_reviews.items().len()
        );

        Self {
            likes,
            liked_florists,
            liked_reviews,
            storage,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
