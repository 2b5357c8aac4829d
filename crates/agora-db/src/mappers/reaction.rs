//! Reaction entity <-> model mapper

use agora_core::entities::Reaction;
use agora_core::value_objects::Snowflake;

use crate::models::ReactionModel;

impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            kind: model.kind,
            created_at: model.created_at,
        }
    }
}
