use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum PreviewReason {
    #[error("data format error")]
    DataFormat,
    #[error("invalid timestamp field")]
    InvalidField,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for PreviewReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::DataFormat => 1201,
            Self::InvalidField => 1202,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type PreviewError = StructError<PreviewReason>;
pub type PreviewResult<T> = Result<T, PreviewError>;
