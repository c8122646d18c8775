use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Advisory request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Advisory API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },
}

impl AdvisorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, AdvisorError::Http(err) if err.is_timeout())
    }
}
