//! Reaction entity - one fact per (post, user) pair - and the pure
//! state-transition planning that the storage layer executes atomically.

use chrono::{DateTime, Utc};

use crate::value_objects::{ReactionKind, Snowflake};

/// Reaction entity
///
/// At most one Reaction exists per (post, user); switching kind mutates the
/// fact in place, toggling the same kind off deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(post_id: Snowflake, user_id: Snowflake, kind: ReactionKind) -> Self {
        Self {
            post_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// The three-way branch at the heart of the reaction engine.
///
/// Given the caller's current fact (if any) and the requested kind, decides
/// what the transaction must do. Re-requesting the current kind is a
/// toggle-off, not a repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTransition {
    /// No prior fact: insert it, bucket[kind] += 1, total += 1
    Create,
    /// Prior fact with a different kind: relabel in place,
    /// bucket[from] -= 1, bucket[kind] += 1, total unchanged
    Switch { from: ReactionKind },
    /// Prior fact with the same kind: delete it, bucket[kind] -= 1
    /// (clamped), total recomputed from the buckets
    Remove,
}

impl ReactionTransition {
    /// Plan the transition for a requested kind against the current fact
    #[must_use]
    pub fn plan(current: Option<ReactionKind>, requested: ReactionKind) -> Self {
        match current {
            None => Self::Create,
            Some(kind) if kind == requested => Self::Remove,
            Some(kind) => Self::Switch { from: kind },
        }
    }

    /// Whether the caller still holds a reaction after this transition
    #[must_use]
    pub const fn leaves_fact(self) -> bool {
        !matches!(self, Self::Remove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reaction_creates() {
        let transition = ReactionTransition::plan(None, ReactionKind::Like);
        assert_eq!(transition, ReactionTransition::Create);
        assert!(transition.leaves_fact());
    }

    #[test]
    fn test_different_kind_switches() {
        let transition = ReactionTransition::plan(Some(ReactionKind::Like), ReactionKind::Love);
        assert_eq!(
            transition,
            ReactionTransition::Switch {
                from: ReactionKind::Like
            }
        );
        assert!(transition.leaves_fact());
    }

    #[test]
    fn test_same_kind_toggles_off() {
        let transition = ReactionTransition::plan(Some(ReactionKind::Love), ReactionKind::Love);
        assert_eq!(transition, ReactionTransition::Remove);
        assert!(!transition.leaves_fact());
    }

    #[test]
    fn test_plan_covers_every_kind_pair() {
        for current in ReactionKind::ALL {
            for requested in ReactionKind::ALL {
                let transition = ReactionTransition::plan(Some(current), requested);
                if current == requested {
                    assert_eq!(transition, ReactionTransition::Remove);
                } else {
                    assert_eq!(transition, ReactionTransition::Switch { from: current });
                }
            }
        }
    }
}
