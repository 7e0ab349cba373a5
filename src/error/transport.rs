use thiserror::Error;

/// Failures talking to the market bot through the relay or the gateway feed.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The relay answered with a non-success status.
    #[error("Market relay rejected {operation} with status {status}: {body}")]
    RelayRejected {
        /// Relay operation that was attempted
        operation: &'static str,
        /// HTTP status code returned by the relay
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The relay could not be reached or returned an unreadable body.
    #[error("Market relay request failed: {0}")]
    Relay(#[from] reqwest::Error),

    /// The relay answered with a body that does not describe a posted message.
    #[error("Market relay returned an invalid response: {0}")]
    InvalidResponse(String),

    /// The market feed was closed before a reply arrived.
    #[error("Market feed closed")]
    FeedClosed,
}
