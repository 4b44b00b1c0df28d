use crate::core::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_storage_key;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;

/// 每個鍵一個檔案的本機儲存
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
    owner_only: bool,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self {
            base_path,
            owner_only: false,
        }
    }

    /// 權杖等敏感資料用：目錄與檔案只允許擁有者存取
    pub fn secure(base_path: String) -> Self {
        Self {
            base_path,
            owner_only: true,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key(key)?;
        Ok(Path::new(&self.base_path).join(key))
    }

    async fn ensure_base_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        #[cfg(unix)]
        if self.owner_only {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.base_path, std::fs::Permissions::from_mode(0o700))
                .await?;
        }
        Ok(())
    }

    async fn write_temp(&self, tmp_path: &Path, value: &str) -> Result<()> {
        let mut file = tokio::fs::File::create(tmp_path).await?;
        #[cfg(unix)]
        if self.owner_only {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await?;
        }
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }
}

impl Storage for LocalStorage {
    async fn read_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        self.ensure_base_dir().await?;

        // 先寫暫存檔再 rename，寫到一半失敗不會留下半個檔案
        let tmp_path = path.with_file_name(format!("{}.tmp", key));
        if let Err(e) = self.write_temp(&tmp_path, value).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 記憶體內儲存，clone 之後共用同一份資料
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // 沒有任何路徑會在持有鎖時 panic，poison 時直接取回資料
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    async fn read_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn write_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}
