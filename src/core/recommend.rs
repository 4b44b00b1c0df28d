use crate::core::RecommendationSource;
use crate::domain::model::{AgeBracket, Emotion, Florist, Gender, RecommendRequest};
use crate::utils::error::{GaehwaError, Result};

pub const FALLBACK_NOTICE: &str = "임시 추천 목록을 보여드릴게요.";

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOrigin {
    Live,
    /// 伺服器回應失敗或為空；`notice` 只在連線失敗或本文無法解析時出現
    Fallback { notice: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub florists: Vec<Florist>,
    pub origin: RecommendationOrigin,
}

impl Recommendation {
    pub fn notice(&self) -> Option<&str> {
        match &self.origin {
            RecommendationOrigin::Fallback { notice } => notice.as_deref(),
            RecommendationOrigin::Live => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, RecommendationOrigin::Fallback { .. })
    }
}

/// 推薦失敗時顯示的固定清單
pub fn fallback_florists() -> Vec<Florist> {
    let demo = |id: &str, name: &str, tags: [&str; 3], seed: &str| Florist {
        id: id.to_string(),
        name: name.to_string(),
        rating: Some(if id == "d1" { 4.9 } else { 4.8 }),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image_url: Some(format!("https://picsum.photos/seed/{}/1200/800", seed)),
    };

    vec![
        demo("d1", "로즈가든 스튜디오", ["클래식", "장미", "기념일"], "r1"),
        demo("d2", "바닐라블룸", ["파스텔", "생신", "위로"], "r2"),
        demo("d3", "그린앤화이트", ["화이트톤", "웨딩", "감성"], "r3"),
    ]
}

/// 收件人資訊表單，三項都選好才能送出
#[derive(Debug, Clone, Default)]
pub struct RecipientForm {
    pub gender: Option<Gender>,
    pub age: Option<AgeBracket>,
    pub emotion: Option<Emotion>,
}

impl RecipientForm {
    pub fn can_submit(&self) -> bool {
        self.gender.is_some() && self.age.is_some() && self.emotion.is_some()
    }

    pub fn to_request(&self) -> Result<RecommendRequest> {
        match (self.gender, self.age, self.emotion) {
            (Some(recipient_gender), Some(recipient_age), Some(emotion)) => Ok(RecommendRequest {
                recipient_gender,
                recipient_age,
                emotion,
            }),
            _ => Err(GaehwaError::ValidationError {
                message: "gender, age and emotion must all be chosen".to_string(),
            }),
        }
    }
}

pub struct Recommender<R: RecommendationSource> {
    source: R,
}

impl<R: RecommendationSource> Recommender<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// 永遠回傳可顯示的清單；只有表單未完成時才是錯誤
    pub async fn recommend(&self, form: &RecipientForm) -> Result<Recommendation> {
        let request = form.to_request()?;

        match self.source.fetch_florists(&request).await {
            Ok(florists) if !florists.is_empty() => {
                tracing::info!("Received {} recommended florists", florists.len());
                Ok(Recommendation {
                    florists,
                    origin: RecommendationOrigin::Live,
                })
            }
            Ok(_) => {
                tracing::warn!("No recommendations from server, using sample florists");
                Ok(Recommendation {
                    florists: fallback_florists(),
                    origin: RecommendationOrigin::Fallback { notice: None },
                })
            }
            Err(e) => {
                tracing::warn!("Recommendation request failed, using sample florists: {}", e);
                Ok(Recommendation {
                    florists: fallback_florists(),
                    origin: RecommendationOrigin::Fallback {
                        notice: Some(FALLBACK_NOTICE.to_string()),
                    },
                })
            }
        }
    }
}
