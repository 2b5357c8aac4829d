//! JoinRequest entity <-> model mapper

use agora_core::entities::{JoinRequest, User};
use agora_core::error::DomainError;
use agora_core::value_objects::Snowflake;

use crate::models::{JoinRequestModel, JoinRequestWithUserModel};

/// Convert a join-request row, validating the status column
pub fn join_request_from_model(model: JoinRequestModel) -> Result<JoinRequest, DomainError> {
    Ok(JoinRequest {
        group_id: Snowflake::new(model.group_id),
        user_id: Snowflake::new(model.user_id),
        status: model
            .status
            .parse()
            .map_err(|_| DomainError::DatabaseError(format!("invalid status column: {}", model.status)))?,
        created_at: model.created_at,
        decided_at: model.decided_at,
        decided_by: model.decided_by.map(Snowflake::new),
    })
}

/// Convert a joined request+user row into its entity pair
pub fn join_request_with_user(
    model: JoinRequestWithUserModel,
) -> Result<(JoinRequest, User), DomainError> {
    let request = join_request_from_model(JoinRequestModel {
        group_id: model.group_id,
        user_id: model.user_id,
        status: model.status,
        created_at: model.created_at,
        decided_at: model.decided_at,
        decided_by: model.decided_by,
    })?;
    let user = User {
        id: Snowflake::new(model.user_id),
        name: model.name,
        email: model.email,
        image: model.image,
        email_verified: model.email_verified,
        created_at: model.user_created_at,
        updated_at: model.user_updated_at,
    };
    Ok((request, user))
}
