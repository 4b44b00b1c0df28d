use crate::core::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Months, NaiveDate, Utc};
use std::fmt;

pub const ANNIVERSARY_KEY: &str = "gaehwa.anniversary";

/// 以日為單位的 D-day，`days` 為負代表已經過了
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DDay {
    pub days: i64,
}

impl DDay {
    pub fn is_past(&self) -> bool {
        self.days < 0
    }
}

impl fmt::Display for DDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_past() {
            write!(f, "D + {}", self.days.unsigned_abs())
        } else {
            write!(f, "D - {}", self.days)
        }
    }
}

pub fn dday(today: NaiveDate, target: NaiveDate) -> DDay {
    DDay {
        days: target.signed_duration_since(today).num_days(),
    }
}

/// `YYYY-MM-DD` 形式的參數優先，否則取今天起一個月後。
///
/// 日期不存在時對齊到月底（1/31 → 2/28），不像 JS `setMonth` 會進位到 3/3
pub fn resolve_anniversary(param: Option<&str>, today: NaiveDate) -> NaiveDate {
    param
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .or_else(|| today.checked_add_months(Months::new(1)))
        .unwrap_or(today)
}

pub async fn load_anniversary<S: Storage>(storage: &S) -> Option<NaiveDate> {
    match storage.read_item(ANNIVERSARY_KEY).await {
        Ok(raw) => raw.and_then(|r| NaiveDate::parse_from_str(r.trim(), "%Y-%m-%d").ok()),
        Err(e) => {
            tracing::warn!("Could not read anniversary: {}", e);
            None
        }
    }
}

pub async fn save_anniversary<S: Storage>(storage: &S, date: NaiveDate) -> Result<()> {
    storage
        .write_item(ANNIVERSARY_KEY, &date.format("%Y-%m-%d").to_string())
        .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elapsed::JustNow => f.write_str("방금 전"),
            Elapsed::Minutes(m) => write!(f, "{}분 전", m),
            Elapsed::Hours(h) => write!(f, "{}시간 전", h),
            Elapsed::Days(d) => write!(f, "{}일 전", d),
        }
    }
}

/// 채팅 목록의 마지막 메시지 시각 표시용
pub fn time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> Elapsed {
    let minutes = now.signed_duration_since(then).num_minutes().max(0);
    if minutes < 1 {
        return Elapsed::JustNow;
    }
    if minutes < 60 {
        return Elapsed::Minutes(minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return Elapsed::Hours(hours);
    }
    Elapsed::Days(hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dday_future_today_and_past() {
        let today = date(2025, 3, 1);

        let future = dday(today, date(2025, 3, 11));
        assert_eq!(future.days, 10);
        assert!(!future.is_past());
        assert_eq!(future.to_string(), "D - 10");

        assert_eq!(dday(today, today).to_string(), "D - 0");

        let past = dday(today, date(2025, 2, 27));
        assert!(past.is_past());
        assert_eq!(past.to_string(), "D + 2");
    }

    #[test]
    fn test_dday_across_year_boundary() {
        assert_eq!(dday(date(2024, 12, 31), date(2025, 1, 1)).days, 1);
        assert_eq!(dday(date(2024, 2, 28), date(2024, 3, 1)).days, 2);
    }

    #[test]
    fn test_resolve_anniversary() {
        let today = date(2025, 1, 31);
        assert_eq!(resolve_anniversary(Some("2025-05-05"), today), date(2025, 5, 5));
        // 月底會對齊到下個月的最後一天
        assert_eq!(resolve_anniversary(None, today), date(2025, 2, 28));
        assert_eq!(resolve_anniversary(Some("05/05/2025"), today), date(2025, 2, 28));
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now, now - Duration::seconds(30)), Elapsed::JustNow);
        assert_eq!(time_ago(now, now - Duration::minutes(10)).to_string(), "10분 전");
        assert_eq!(time_ago(now, now - Duration::hours(1)).to_string(), "1시간 전");
        assert_eq!(time_ago(now, now - Duration::hours(50)).to_string(), "2일 전");
        assert_eq!(time_ago(now, now + Duration::minutes(5)), Elapsed::JustNow);
    }

    #[tokio::test]
    async fn test_anniversary_persistence() {
        let storage = MemoryStorage::new();
        assert_eq!(load_anniversary(&storage).await, None);

        save_anniversary(&storage, date(2025, 10, 3)).await.unwrap();
        assert_eq!(storage.get(ANNIVERSARY_KEY).as_deref(), Some("2025-10-03"));
        assert_eq!(load_anniversary(&storage).await, Some(date(2025, 10, 3)));
    }
}
