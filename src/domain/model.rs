use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::GaehwaError;

/// 有唯一識別碼的實體，可放進按讚集合
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Florist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Identified for Florist {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub thumbnail: String,
}

impl Identified for Review {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 登入後保存在安全儲存區的工作階段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남")]
    Male,
    #[serde(rename = "여")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "남",
            Gender::Female => "여",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GaehwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "남" | "male" | "m" => Ok(Gender::Male),
            "여" | "female" | "f" => Ok(Gender::Female),
            other => Err(GaehwaError::ValidationError {
                message: format!("unknown gender '{}', expected 남 or 여", other),
            }),
        }
    }
}

/// 10대 ~ 90대
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AgeBracket(u8);

impl AgeBracket {
    pub const ALL_DECADES: [u8; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

    pub fn new(decade: u8) -> Result<Self, GaehwaError> {
        if Self::ALL_DECADES.contains(&decade) {
            Ok(Self(decade))
        } else {
            Err(GaehwaError::ValidationError {
                message: format!("age bracket must be one of 10..=90 in steps of 10, got {}", decade),
            })
        }
    }

    pub fn decade(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}대", self.0)
    }
}

impl FromStr for AgeBracket {
    type Err = GaehwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches('대');
        let decade = digits.parse::<u8>().map_err(|_| GaehwaError::ValidationError {
            message: format!("invalid age bracket '{}'", s),
        })?;
        Self::new(decade)
    }
}

impl Serialize for AgeBracket {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AgeBracket {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    #[serde(rename = "축하")]
    Congratulation,
    #[serde(rename = "기쁨")]
    Joy,
    #[serde(rename = "위로")]
    Comfort,
    #[serde(rename = "슬픔")]
    Sadness,
    #[serde(rename = "허무")]
    Emptiness,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Congratulation,
        Emotion::Joy,
        Emotion::Comfort,
        Emotion::Sadness,
        Emotion::Emptiness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Congratulation => "축하",
            Emotion::Joy => "기쁨",
            Emotion::Comfort => "위로",
            Emotion::Sadness => "슬픔",
            Emotion::Emptiness => "허무",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = GaehwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| GaehwaError::ValidationError {
                message: format!(
                    "unknown emotion '{}', expected one of {}",
                    s,
                    Emotion::ALL.map(|e| e.as_str()).join(", ")
                ),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub recipient_gender: Gender,
    pub recipient_age: AgeBracket,
    pub emotion: Emotion,
}
