use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavigatorError>;

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("No context is listening on the channel")]
    ContextDetached,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
