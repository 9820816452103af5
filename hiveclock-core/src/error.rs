use tokio_tungstenite::tungstenite;

/// An inbound frame that could not be parsed as a structured record.
///
/// Recoverable: the receive loop reports it and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("payload is valid JSON but not a record (found {found})")]
    NotARecord { found: &'static str },
}

/// A connection-level fault. Fatal: ends the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("websocket transport failed")]
    Transport(#[from] tungstenite::Error),

    #[error("connection closed by remote")]
    ConnectionClosed,

    #[error("failed to encode outbound message")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported endpoint scheme `{0}`, expected ws or wss")]
    UnsupportedScheme(String),
}
