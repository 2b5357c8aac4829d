//! Message service
//!
//! Direct messaging. There is no thread entity: conversations are derived
//! at read time by grouping the caller's messages by counterpart, keeping
//! the latest message and counting unread ones.

use std::collections::HashMap;

use agora_core::entities::User;
use agora_core::value_objects::Snowflake;
use tracing::{info, instrument};

use crate::dto::{ConversationResponse, MarkReadResponse, MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::parse_id;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's conversations, most recently active first
    #[instrument(skip(self))]
    pub async fn conversations(&self, user_id: Snowflake) -> ServiceResult<Vec<ConversationResponse>> {
        let messages = self.ctx.message_repo().find_involving(user_id).await?;

        // Messages arrive newest first, so the first message seen for a
        // counterpart carries the conversation's latest content.
        let mut order: Vec<Snowflake> = Vec::new();
        let mut conversations: HashMap<Snowflake, (String, chrono::DateTime<chrono::Utc>, i64)> =
            HashMap::new();

        for message in &messages {
            let other = message.counterpart(user_id);
            let unread = i64::from(message.is_unread_for(user_id));

            match conversations.get_mut(&other) {
                Some((_, _, unread_count)) => *unread_count += unread,
                None => {
                    order.push(other);
                    conversations.insert(
                        other,
                        (message.content.clone(), message.created_at, unread),
                    );
                }
            }
        }

        let mut responses = Vec::with_capacity(order.len());
        for other in order {
            let user = self.get_user(other).await?;
            let (last_message, last_message_at, unread_count) = conversations
                .remove(&other)
                .unwrap_or_else(|| (String::new(), chrono::Utc::now(), 0));

            responses.push(ConversationResponse {
                user_id: other.to_string(),
                name: user.name,
                image: user.image,
                last_message,
                last_message_at,
                unread_count,
            });
        }

        Ok(responses)
    }

    /// The full two-party thread, oldest first
    #[instrument(skip(self))]
    pub async fn thread(
        &self,
        user_id: Snowflake,
        other_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let other = self.get_user(other_id).await?;
        let caller = self.get_user(user_id).await?;

        let messages = self.ctx.message_repo().find_thread(user_id, other_id).await?;

        Ok(messages
            .iter()
            .map(|message| {
                let (sender, receiver) = if message.sender_id == user_id {
                    (&caller, &other)
                } else {
                    (&other, &caller)
                };
                MessageResponse::from_parts(message, sender, receiver)
            })
            .collect())
    }

    /// Send a direct message
    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        sender_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let receiver_id = parse_id(&request.receiver_id)?;
        let receiver = self.get_user(receiver_id).await?;
        let sender = self.get_user(sender_id).await?;

        let message = agora_core::entities::Message::new(
            self.ctx.generate_id(),
            sender_id,
            receiver_id,
            request.content,
        );
        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message.id, sender_id = %sender_id, receiver_id = %receiver_id, "Message sent");

        Ok(MessageResponse::from_parts(&message, &sender, &receiver))
    }

    /// Mark all unread messages from a sender to the caller as read
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        user_id: Snowflake,
        sender_id: Snowflake,
    ) -> ServiceResult<MarkReadResponse> {
        let updated = self
            .ctx
            .message_repo()
            .mark_read_from(sender_id, user_id)
            .await?;

        Ok(MarkReadResponse { updated })
    }

    async fn get_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    // Covered end-to-end by the integration test suite
}
