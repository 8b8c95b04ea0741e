use lousa_ledger::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// Event types broadcast to connected pages
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum BroadcastEvent {
    /// A name was accepted - drives the one-shot welcome animation
    #[serde(rename = "atualizar_lousa")]
    NewArrival { nome: String },

    /// Full stats snapshot - drives the aggregate panels
    #[serde(rename = "stats_update")]
    StatsUpdate(StatsSnapshot),
}

impl BroadcastEvent {
    /// Event name as seen on the wire
    pub fn name(&self) -> &'static str {
        match self {
            BroadcastEvent::NewArrival { .. } => "atualizar_lousa",
            BroadcastEvent::StatsUpdate(_) => "stats_update",
        }
    }

    /// Convert event to a JSON text frame
    pub fn to_json_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload of `novo_responsavel`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub nome: String,
}

/// Messages accepted from pages
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// A guardian submitted a name
    Submit { nome: String },
    /// Anything else; ignored by the server
    Unknown(String),
}

#[derive(Deserialize)]
struct RawFrame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl ClientMessage {
    /// Parse a JSON text frame.
    ///
    /// A `novo_responsavel` frame with a missing, null or non-string `nome`
    /// parses as a blank submission, which the ledger then ignores.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let frame: RawFrame = serde_json::from_str(text)?;

        match frame.event.as_str() {
            "novo_responsavel" => {
                let payload: SubmissionPayload =
                    serde_json::from_value(frame.data).unwrap_or_default();
                Ok(ClientMessage::Submit { nome: payload.nome })
            }
            _ => Ok(ClientMessage::Unknown(frame.event)),
        }
    }
}
