//! Post entity <-> model mapper

use agora_core::entities::Post;
use agora_core::value_objects::Snowflake;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            title: model.title,
            content: model.content,
            author_id: Snowflake::new(model.author_id),
            group_id: model.group_id.map(Snowflake::new),
            published: model.published,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
