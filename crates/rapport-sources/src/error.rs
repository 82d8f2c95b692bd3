use thiserror::Error;

use crate::catalog::ConnectorId;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unknown connector: {0}")]
    UnknownConnector(String),

    #[error("{0} is fed by file upload and cannot be connected")]
    UploadOnly(ConnectorId),

    #[error("{0} is not connected")]
    NotConnected(ConnectorId),

    #[error("{0} is already connected")]
    AlreadyConnected(ConnectorId),

    #[error("{0} is still connecting")]
    Busy(ConnectorId),

    #[error("{0} was disconnected")]
    Disconnected(ConnectorId),

    #[error("{connector}: {message}")]
    Failed {
        connector: ConnectorId,
        message: String,
    },
}
