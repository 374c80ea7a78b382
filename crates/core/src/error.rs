#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed JSON document: {0}")]
    MalformedDocument(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedDocument(e.to_string())
    }
}
