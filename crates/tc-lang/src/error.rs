use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum LangReason {
    #[error("incomplete condition clause")]
    IncompleteClause,
    #[error("invalid script token")]
    ScriptToken,
    #[error("malformed query predicate")]
    Predicate,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for LangReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::IncompleteClause => 1101,
            Self::ScriptToken => 1102,
            Self::Predicate => 1103,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type LangError = StructError<LangReason>;
pub type LangResult<T> = Result<T, LangError>;
