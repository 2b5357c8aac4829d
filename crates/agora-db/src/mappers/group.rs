//! Group entity <-> model mapper

use agora_core::entities::Group;
use agora_core::value_objects::Snowflake;

use crate::models::GroupModel;

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: Snowflake::new(model.id),
            name: model.name,
            slug: model.slug,
            description: model.description,
            is_private: model.is_private,
            owner_id: Snowflake::new(model.owner_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
