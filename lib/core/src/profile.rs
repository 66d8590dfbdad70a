use serde::{Deserialize, Serialize};
use crate::vector::Vector;
use crate::{Error, Result};

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Categorical gender attribute used as a hard filter.
/// Compared exactly as stored, e.g. `"F"` and `"f"` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gender(String);

impl Gender {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A stored user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub gender: Gender,
    #[serde(default)]
    pub transcript: String,
    /// Absent embeddings make the profile invisible to matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vector>,
}

impl UserProfile {
    #[must_use]
    pub fn new(user_id: impl Into<UserId>, gender: impl Into<Gender>, transcript: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            gender: gender.into(),
            transcript: transcript.into(),
            embedding: None,
        }
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: impl Into<Vector>) -> Self {
        self.embedding = Some(embedding.into());
        self
    }

    /// Boundary checks applied before a profile is stored
    pub fn validate(&self) -> Result<()> {
        if self.user_id.as_str().is_empty() {
            return Err(Error::InvalidProfile("user_id must not be empty".to_string()));
        }
        if self.user_id.as_str().chars().any(char::is_control) {
            return Err(Error::InvalidProfile(format!(
                "user_id {:?} contains control characters",
                self.user_id.as_str()
            )));
        }
        if self.gender.as_str().is_empty() {
            return Err(Error::InvalidProfile(format!(
                "profile {} has an empty gender",
                self.user_id
            )));
        }
        if let Some(embedding) = &self.embedding {
            if embedding.is_empty() {
                return Err(Error::InvalidProfile(format!(
                    "profile {} has a zero-length embedding",
                    self.user_id
                )));
            }
            if !embedding.is_finite() {
                return Err(Error::InvalidProfile(format!(
                    "profile {} has non-finite embedding components",
                    self.user_id
                )));
            }
        }
        Ok(())
    }
}

/// A successful match, in the shape returned to API callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub user_id: UserId,
    pub your_transcript: String,
    pub matched_user_id: UserId,
    pub matched_transcript: String,
    pub similarity_score: f32,
    pub matched_on: Vec<String>,
    pub match_reason: String,
    pub mutual_match: bool,
}
