use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: i64,
    #[serde(rename = "evento")]
    pub event_name: String,
    #[serde(rename = "locale")]
    pub venue_name: String,
    #[serde(rename = "data_ora")]
    pub date_time: String,
    #[serde(rename = "quantita")]
    pub quantity: i64,
    #[serde(rename = "annullato", default)]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowDateRecord {
    pub id: i64,
    #[serde(rename = "data_ora")]
    pub date_time: String,
    /// Can go negative when the server oversells a show-date.
    #[serde(rename = "posti_disponibili")]
    pub available_seats: i64,
    #[serde(rename = "annullato", default)]
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    #[serde(rename = "nome_evento")]
    pub event_name: String,
    #[serde(rename = "locale")]
    pub venue_name: String,
    #[serde(rename = "luogo")]
    pub location: String,
    #[serde(rename = "repliche", default)]
    pub show_dates: Vec<ShowDateRecord>,
}

/// Body sent to the shared mutation endpoint, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum MutationRequest {
    Create {
        replica_id: i64,
        quantita: i64,
    },
    /// `quantita` is forwarded exactly as typed into the quantity input.
    Update {
        prenotazione_id: i64,
        quantita: String,
    },
    Delete {
        prenotazione_id: i64,
    },
}

impl MutationRequest {
    pub fn action(&self) -> &'static str {
        match self {
            MutationRequest::Create { .. } => "create",
            MutationRequest::Update { .. } => "update",
            MutationRequest::Delete { .. } => "delete",
        }
    }
}

/// Decoded answer of the mutation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "OutcomeBody")]
pub enum MutationOutcome {
    Accepted(String),
    Rejected(String),
}

impl MutationOutcome {
    pub fn into_result(self) -> Result<String, String> {
        match self {
            MutationOutcome::Accepted(message) => Ok(message),
            MutationOutcome::Rejected(reason) => Err(reason),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutcomeBody {
    Message { message: String },
    Error { error: String },
}

impl From<OutcomeBody> for MutationOutcome {
    fn from(body: OutcomeBody) -> Self {
        match body {
            OutcomeBody::Message { message } => MutationOutcome::Accepted(message),
            OutcomeBody::Error { error } => MutationOutcome::Rejected(error),
        }
    }
}
