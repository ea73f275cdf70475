use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotebotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Empty content")]
    EmptyContent,

    #[error("External service error: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, NotebotError>;
