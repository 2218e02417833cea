use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::ConversationTurn;

/// Body of `POST /api/convo_turn`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvoTurnRequest {
    pub assistant_id: Uuid,
    /// Omit to start a new conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvoTurnResponse {
    pub conversation_id: Uuid,
    pub turn: ConversationTurn,
}

/// Query string of `GET`/`DELETE /api/convo_history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvoHistoryQuery {
    pub conversation_id: Uuid,
    /// Return only the last `limit` turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvoHistoryResponse {
    pub conversation_id: Uuid,
    pub turns: Vec<ConversationTurn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_request_without_conversation() {
        let aid = Uuid::new_v4();
        let request: ConvoTurnRequest =
            serde_json::from_str(&format!(r#"{{"assistant_id": "{aid}", "message": "hi"}}"#))
                .unwrap();
        assert_eq!(request.assistant_id, aid);
        assert_eq!(request.conversation_id, None);

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("conversation_id"));
    }
}
