use thiserror::Error;

/// Failure reported by a storage backend.
///
/// Both backends (in-memory and DynamoDB) translate their native errors into
/// this enum, so handlers never see a backend-specific type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The addressed record does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// Duplicate id, duplicate unique key (email), or a taken turn slot.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    /// The backend could not be reached at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A stored or submitted record broke a data rule.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// HTTP status for this failure. The server and auth crates both answer
    /// storage errors through this, so an outage reads 503 on every route.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::AlreadyExists { .. } => 409,
            Self::ConnectionFailed(_) => 503,
            Self::InvalidData(_) => 400,
            Self::QueryFailed(_) | Self::Serialization(_) => 500,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_assistant() -> RepositoryError {
        RepositoryError::NotFound {
            entity_type: "Assistant",
            id: "abc-123".to_string(),
        }
    }

    #[test]
    fn messages_name_the_entity() {
        assert_eq!(missing_assistant().to_string(), "Assistant not found: abc-123");

        let taken = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "keeper@zoo.test".to_string(),
        };
        assert_eq!(taken.to_string(), "User already exists: keeper@zoo.test");
    }

    #[test]
    fn messages_carry_backend_detail() {
        let down = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(down.to_string(), "Connection failed: timeout after 30s");

        let bad = RepositoryError::InvalidData("turn index out of range".to_string());
        assert_eq!(bad.to_string(), "Invalid data: turn index out of range");
    }

    #[test]
    fn client_mistakes_are_4xx() {
        assert_eq!(missing_assistant().status_code(), 404);

        let turn_taken = RepositoryError::AlreadyExists {
            entity_type: "ConversationTurn",
            id: "convo-1/3".to_string(),
        };
        assert_eq!(turn_taken.status_code(), 409);
        assert_eq!(RepositoryError::InvalidData("no PK".into()).status_code(), 400);
    }

    #[test]
    fn backend_failures_are_5xx() {
        let outage = RepositoryError::ConnectionFailed("dispatch failure".into());
        assert_eq!(outage.status_code(), 503);

        for err in [
            RepositoryError::QueryFailed("validation exception".into()),
            RepositoryError::Serialization("bad JSON".into()),
        ] {
            assert_eq!(err.status_code(), 500, "{err}");
        }
    }
}
