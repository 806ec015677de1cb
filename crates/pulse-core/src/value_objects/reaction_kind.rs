//! Reaction kinds and the per-kind counter mapping kept on each post.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of reaction kinds a user can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Haha,
    Wow,
    Sad,
    Angry,
}

impl ReactionKind {
    /// All kinds, in canonical order
    pub const ALL: [ReactionKind; 6] = [
        Self::Like,
        Self::Love,
        Self::Haha,
        Self::Wow,
        Self::Sad,
        Self::Angry,
    ];

    /// Wire/database name of this kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Haha => "haha",
            Self::Wow => "wow",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }

    /// Parse a wire/database name back to a kind
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "love" => Some(Self::Love),
            "haha" => Some(Self::Haha),
            "wow" => Some(Self::Wow),
            "sad" => Some(Self::Sad),
            "angry" => Some(Self::Angry),
            _ => None,
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_opt(s)
            .ok_or_else(|| crate::error::DomainError::InvalidReactionKind(s.to_string()))
    }
}

/// Per-kind reaction counters for a post.
///
/// A typed mapping keyed by the closed [`ReactionKind`] set; counters are
/// clamped at zero by every mutation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionCounts {
    #[serde(default)]
    pub like: i32,
    #[serde(default)]
    pub love: i32,
    #[serde(default)]
    pub haha: i32,
    #[serde(default)]
    pub wow: i32,
    #[serde(default)]
    pub sad: i32,
    #[serde(default)]
    pub angry: i32,
}

impl ReactionCounts {
    /// Get the bucket for a kind
    #[must_use]
    pub const fn get(&self, kind: ReactionKind) -> i32 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Haha => self.haha,
            ReactionKind::Wow => self.wow,
            ReactionKind::Sad => self.sad,
            ReactionKind::Angry => self.angry,
        }
    }

    fn bucket_mut(&mut self, kind: ReactionKind) -> &mut i32 {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Love => &mut self.love,
            ReactionKind::Haha => &mut self.haha,
            ReactionKind::Wow => &mut self.wow,
            ReactionKind::Sad => &mut self.sad,
            ReactionKind::Angry => &mut self.angry,
        }
    }

    /// Increment a bucket
    pub fn increment(&mut self, kind: ReactionKind) {
        *self.bucket_mut(kind) += 1;
    }

    /// Decrement a bucket, clamped at zero
    pub fn decrement(&mut self, kind: ReactionKind) {
        let bucket = self.bucket_mut(kind);
        *bucket = (*bucket - 1).max(0);
    }

    /// Sum of all buckets; the canonical definition of a post's total
    /// reaction count
    #[must_use]
    pub const fn total(&self) -> i32 {
        self.like + self.love + self.haha + self.wow + self.sad + self.angry
    }

    /// Iterate (kind, count) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, i32)> + '_ {
        ReactionKind::ALL.iter().map(|&kind| (kind, self.get(kind)))
    }
}
