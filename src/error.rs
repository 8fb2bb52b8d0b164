use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend error: status={status} body={body}")]
    Backend { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("missing `{0}` in payment response")]
    MissingField(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
