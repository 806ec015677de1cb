//! Reaction entity <-> model mapper

use pulse_core::entities::Reaction;
use pulse_core::value_objects::{ReactionKind, Snowflake};

use crate::models::ReactionModel;

/// Parse a stored kind string back to the enum
///
/// The column carries a CHECK constraint over the closed set; the fallback
/// only matters for rows edited outside the application.
fn parse_kind(kind: &str) -> ReactionKind {
    ReactionKind::from_str_opt(kind).unwrap_or(ReactionKind::Like)
}

/// Counter column on the posts table for a reaction kind
pub fn bucket_column(kind: ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Like => "reactions_like",
        ReactionKind::Love => "reactions_love",
        ReactionKind::Haha => "reactions_haha",
        ReactionKind::Wow => "reactions_wow",
        ReactionKind::Sad => "reactions_sad",
        ReactionKind::Angry => "reactions_angry",
    }
}

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            kind: parse_kind(&model.kind),
            created_at: model.created_at,
        }
    }
}
