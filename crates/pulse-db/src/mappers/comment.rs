//! Comment entity <-> model mapper

use pulse_core::entities::{Comment, User};
use pulse_core::value_objects::Snowflake;

use crate::models::{CommentModel, CommentWithAuthorModel};

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            media: model.media,
            parent_id: model.parent_id.map(Snowflake::new),
            likes_count: model.likes_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Split a joined row into the comment and its author
pub fn split_comment_author(model: CommentWithAuthorModel) -> (Comment, User) {
    let comment = Comment {
        id: Snowflake::new(model.id),
        post_id: Snowflake::new(model.post_id),
        author_id: Snowflake::new(model.author_id),
        content: model.content,
        media: model.media,
        parent_id: model.parent_id.map(Snowflake::new),
        likes_count: model.likes_count,
        created_at: model.created_at,
        updated_at: model.updated_at,
    };
    let author = User {
        id: Snowflake::new(model.author_id),
        username: model.author_username,
        avatar: model.author_avatar,
        created_at: model.author_created_at,
        updated_at: model.author_updated_at,
    };
    (comment, author)
}
