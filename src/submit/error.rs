/// Failure to get a usable answer from the save endpoint
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] std::io::Error),

    #[error("submission task failed: {0}")]
    Task(String),
}

impl SubmitError {
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => SubmitError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(transport) => SubmitError::Transport {
                url: url.to_string(),
                source: Box::new(transport),
            },
        }
    }
}
