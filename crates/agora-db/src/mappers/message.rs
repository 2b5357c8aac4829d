//! Message entity <-> model mapper

use agora_core::entities::Message;
use agora_core::value_objects::Snowflake;

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            receiver_id: Snowflake::new(model.receiver_id),
            content: model.content,
            read: model.read,
            shared_post_id: model.shared_post_id.map(Snowflake::new),
            created_at: model.created_at,
        }
    }
}
