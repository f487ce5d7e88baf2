use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("configuration error: {0}")] Config(String),
    #[error("provider error: {0}")] Provider(String),
    #[error("invalid response: {0}")] Response(String),
    #[error("store error: {0}")] Store(String),
    #[error("{0}")] Precondition(String),
}
