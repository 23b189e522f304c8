//! Error and Result types for the dummyserial crate.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("port already open")]
    AlreadyOpen,

    #[error("port already closed")]
    AlreadyClosed,

    #[error("port not open")]
    NotOpen,
}

pub type Result<T> = std::result::Result<T, Error>;
