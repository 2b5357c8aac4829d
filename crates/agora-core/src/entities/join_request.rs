//! JoinRequest entity - pending approval for private groups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Lifecycle of a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for JoinRequestStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(StatusParseError),
        }
    }
}

/// Error when parsing a status from its string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown join request status")]
pub struct StatusParseError;

/// A user's request to join a private group
///
/// Identified by (group_id, user_id). Only PENDING requests are open for
/// review; a decided request keeps who decided it and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub group_id: Snowflake,
    pub user_id: Snowflake,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decided_by: Option<Snowflake>,
}

impl JoinRequest {
    /// Create a pending request
    pub fn pending(group_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            group_id,
            user_id,
            status: JoinRequestStatus::Pending,
            created_at: Utc::now(),
            decided_at: None,
            decided_by: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == JoinRequestStatus::Pending
    }

    /// Record a decision on this request
    pub fn decide(&mut self, status: JoinRequestStatus, decided_by: Snowflake) {
        self.status = status;
        self.decided_at = Some(Utc::now());
        self.decided_by = Some(decided_by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_request() {
        let request = JoinRequest::pending(Snowflake::new(1), Snowflake::new(2));
        assert!(request.is_pending());
        assert!(request.decided_at.is_none());
    }

    #[test]
    fn test_decide() {
        let mut request = JoinRequest::pending(Snowflake::new(1), Snowflake::new(2));
        request.decide(JoinRequestStatus::Approved, Snowflake::new(9));
        assert!(!request.is_pending());
        assert_eq!(request.status, JoinRequestStatus::Approved);
        assert_eq!(request.decided_by, Some(Snowflake::new(9)));
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            JoinRequestStatus::Pending,
            JoinRequestStatus::Approved,
            JoinRequestStatus::Rejected,
        ] {
            assert_eq!(
                status.as_str().parse::<JoinRequestStatus>().unwrap(),
                status
            );
        }
    }
}
