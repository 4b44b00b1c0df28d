use crate::core::auth::{AVATAR_KEY, FULL_NAME_KEY};
use crate::core::Storage;

pub const DEFAULT_NAME: &str = "000";

/// 有空白時取第一段；否則去掉第一個字（姓氏）
pub fn first_name(full: &str) -> String {
    if full.contains(' ') {
        return full.split_whitespace().next().unwrap_or_default().to_string();
    }
    if full.chars().count() >= 2 {
        return full.chars().skip(1).collect();
    }
    full.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl Profile {
    pub async fn load<S: Storage>(secure: &S) -> Self {
        let full_name = match secure.read_item(FULL_NAME_KEY).await {
            Ok(Some(name)) if !name.is_empty() => name,
            Ok(_) => DEFAULT_NAME.to_string(),
            Err(e) => {
                tracing::warn!("Could not read stored name: {}", e);
                DEFAULT_NAME.to_string()
            }
        };
        let avatar_url = secure.read_item(AVATAR_KEY).await.unwrap_or_else(|e| {
            tracing::warn!("Could not read stored avatar: {}", e);
            None
        });

        Self {
            full_name,
            avatar_url,
        }
    }

    pub fn first_name(&self) -> String {
        first_name(&self.full_name)
    }

    pub fn greeting(&self) -> String {
        format!("{} 님, 오늘도 환영합니다.", self.first_name())
    }
}
