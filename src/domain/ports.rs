use crate::domain::model::{Florist, RecommendRequest, Session};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 裝置上的鍵值儲存（對應 AsyncStorage / SecureStore）
pub trait Storage: Send + Sync {
    fn read_item(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn write_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_item(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn backend_url(&self) -> &str;
    fn storage_dir(&self) -> &str;
    fn secure_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// 推薦後端。`Err` 代表傳輸層失敗；非成功狀態或空結果回傳空清單
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_florists(&self, request: &RecommendRequest) -> Result<Vec<Florist>>;
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange(&self, id_token: &str) -> Result<Session>;
}
