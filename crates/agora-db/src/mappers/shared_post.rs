//! SharedPost entity <-> model mapper

use agora_core::entities::SharedPost;
use agora_core::value_objects::Snowflake;

use crate::models::SharedPostModel;

impl From<SharedPostModel> for SharedPost {
    fn from(model: SharedPostModel) -> Self {
        SharedPost {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            sharer_id: Snowflake::new(model.sharer_id),
            receiver_id: Snowflake::new(model.receiver_id),
            message: model.message,
            created_at: model.created_at,
        }
    }
}
