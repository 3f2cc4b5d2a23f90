use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("Malformed fragment: {0}")]
    MalformedFragment(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpliceError>;
