use crate::core::{IdentityProvider, Storage};
use crate::domain::model::Session;
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const FULL_NAME_KEY: &str = "user_full_name";
pub const AVATAR_KEY: &str = "user_avatar";

/// 登入流程：交換權杖後寫入安全儲存區。失敗直接回傳，不重試
pub struct Authenticator<P: IdentityProvider, S: Storage> {
    provider: P,
    secure: S,
}

impl<P: IdentityProvider, S: Storage> Authenticator<P, S> {
    pub fn new(provider: P, secure: S) -> Self {
        Self { provider, secure }
    }

    pub async fn login(&self, id_token: &str) -> Result<Session> {
        validate_non_empty_string("id_token", id_token)?;

        let session = self.provider.exchange(id_token).await?;

        if let Err(e) = self.store_session(&session).await {
            // 寫到一半失敗時清掉已寫入的鍵，避免留下不完整的工作階段
            if let Err(cleanup) = self.logout().await {
                tracing::warn!("Could not clear partial session: {}", cleanup);
            }
            return Err(e);
        }

        tracing::info!("Signed in as {}", session.display_name);
        Ok(session)
    }

    /// access_token 最後寫入：有它就代表整個工作階段都已保存
    async fn store_session(&self, session: &Session) -> Result<()> {
        match &session.refresh_token {
            Some(token) => self.secure.write_item(REFRESH_TOKEN_KEY, token).await?,
            None => self.secure.remove_item(REFRESH_TOKEN_KEY).await?,
        }
        self.secure
            .write_item(FULL_NAME_KEY, &session.display_name)
            .await?;
        match &session.avatar_url {
            Some(avatar) => self.secure.write_item(AVATAR_KEY, avatar).await?,
            None => self.secure.remove_item(AVATAR_KEY).await?,
        }
        self.secure
            .write_item(ACCESS_TOKEN_KEY, &session.access_token)
            .await
    }

    pub async fn logout(&self) -> Result<()> {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, FULL_NAME_KEY, AVATAR_KEY] {
            self.secure.remove_item(key).await?;
        }
        tracing::info!("Signed out");
        Ok(())
    }

    pub async fn is_signed_in(&self) -> bool {
        matches!(self.secure.read_item(ACCESS_TOKEN_KEY).await, Ok(Some(ref t)) if !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::utils::error::GaehwaError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 第 N 次寫入失敗的儲存區
    struct FailingOnWrite {
        inner: MemoryStorage,
        fail_on: usize,
        writes: AtomicUsize,
    }

    impl Storage for FailingOnWrite {
        async fn read_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.read_item(key).await
        }

        async fn write_item(&self, key: &str, value: &str) -> Result<()> {
            let n = self.writes.fetch_add(1, Ordering::SeqCst) + 1;
            if n == self.fail_on {
                return Err(GaehwaError::StorageError {
                    key: key.to_string(),
                    message: "disk full".to_string(),
                });
            }
            self.inner.write_item(key, value).await
        }

        async fn remove_item(&self, key: &str) -> Result<()> {
            self.inner.remove_item(key).await
        }
    }

    struct FakeProvider {
        accept: bool,
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        async fn exchange(&self, id_token: &str) -> Result<Session> {
            if !self.accept {
                return Err(GaehwaError::AuthError {
                    message: "auth server answered 401 Unauthorized".to_string(),
                });
            }
            Ok(Session {
                access_token: format!("access-{}", id_token),
                refresh_token: Some("refresh".to_string()),
                display_name: "홍길동".to_string(),
                avatar_url: None,
            })
        }
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let secure = MemoryStorage::new();
        let auth = Authenticator::new(FakeProvider { accept: true }, secure.clone());

        let session = auth.login("google-token").await.unwrap();

        assert_eq!(session.access_token, "access-google-token");
        assert_eq!(secure.get(ACCESS_TOKEN_KEY).as_deref(), Some("access-google-token"));
        assert_eq!(secure.get(REFRESH_TOKEN_KEY).as_deref(), Some("refresh"));
        assert_eq!(secure.get(FULL_NAME_KEY).as_deref(), Some("홍길동"));
        assert_eq!(secure.get(AVATAR_KEY), None);
        assert!(auth.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_storage_untouched() {
        let secure = MemoryStorage::new();
        let auth = Authenticator::new(FakeProvider { accept: false }, secure.clone());

        let err = auth.login("bad").await.unwrap_err();

        assert!(matches!(err, GaehwaError::AuthError { .. }));
        assert_eq!(secure.get(ACCESS_TOKEN_KEY), None);
        assert!(!auth.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_blank_token_is_rejected_before_exchange() {
        let auth = Authenticator::new(FakeProvider { accept: true }, MemoryStorage::new());
        assert!(matches!(
            auth.login("  ").await,
            Err(GaehwaError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_partial_session() {
        for fail_on in 1..=3 {
            let inner = MemoryStorage::new();
            let secure = FailingOnWrite {
                inner: inner.clone(),
                fail_on,
                writes: AtomicUsize::new(0),
            };
            let auth = Authenticator::new(FakeProvider { accept: true }, secure);

            let err = auth.login("token").await.unwrap_err();

            assert!(matches!(err, GaehwaError::StorageError { .. }));
            assert!(!auth.is_signed_in().await);
            for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, FULL_NAME_KEY, AVATAR_KEY] {
                assert_eq!(inner.get(key), None, "write {} left '{}' behind", fail_on, key);
            }
        }
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let secure = MemoryStorage::new();
        let auth = Authenticator::new(FakeProvider { accept: true }, secure.clone());
        auth.login("token").await.unwrap();

        auth.logout().await.unwrap();

        assert_eq!(secure.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(secure.get(FULL_NAME_KEY), None);
        assert!(!auth.is_signed_in().await);
    }
}
