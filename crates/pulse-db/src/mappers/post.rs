//! Post entity <-> model mapper

use pulse_core::entities::{Post, PostAggregate};
use pulse_core::value_objects::{ReactionCounts, Snowflake};

use crate::models::{PostAggregateModel, PostModel};

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            media: model.media,
            reactions: ReactionCounts {
                like: model.reactions_like,
                love: model.reactions_love,
                haha: model.reactions_haha,
                wow: model.reactions_wow,
                sad: model.reactions_sad,
                angry: model.reactions_angry,
            },
            likes_count: model.likes_count,
            comments_count: model.comments_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert PostAggregateModel to PostAggregate snapshot
impl From<PostAggregateModel> for PostAggregate {
    fn from(model: PostAggregateModel) -> Self {
        PostAggregate {
            post_id: Snowflake::new(model.id),
            reactions: ReactionCounts {
                like: model.reactions_like,
                love: model.reactions_love,
                haha: model.reactions_haha,
                wow: model.reactions_wow,
                sad: model.reactions_sad,
                angry: model.reactions_angry,
            },
            likes_count: model.likes_count,
            comments_count: model.comments_count,
        }
    }
}
