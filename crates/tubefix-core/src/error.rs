use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No channel found for the authenticated account")]
    NoChannel,

    #[error("HTTP error {status} from {endpoint}: {message}")]
    Http {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Request error: {0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, Error>;
