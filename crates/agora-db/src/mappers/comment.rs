//! Comment entity <-> model mapper

use agora_core::entities::Comment;
use agora_core::value_objects::Snowflake;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            parent_id: model.parent_id.map(Snowflake::new),
            created_at: model.created_at,
        }
    }
}
