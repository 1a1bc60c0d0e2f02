//! Two-variant outcome returned by every source operation.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Either the mapped value or a human-readable failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Response<T> {
    Success(T),
    Failure(String),
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        match self {
            Response::Success(value) => Response::Success(f(value)),
            Response::Failure(message) => Response::Failure(message),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Response::Success(value) => Some(value),
            Response::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Failure(message) => Some(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Response::Success(value) => Ok(value),
            Response::Failure(message) => Err(message),
        }
    }
}

impl<T> From<Result<T, SourceError>> for Response<T> {
    fn from(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Response::Success(value),
            Err(err) => Response::Failure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_errors_to_failure_messages() {
        let r: Response<u32> = Err(SourceError::missing("cover")).into();
        assert!(r.is_failure());
        assert_eq!(r.failure(), Some("Missing field 'cover' in payload"));
    }

    #[test]
    fn map_keeps_failure() {
        let ok: Response<u32> = Response::Success(2);
        assert_eq!(ok.map(|n| n * 2), Response::Success(4));
        let err: Response<u32> = Response::Failure("nope".to_string());
        assert_eq!(err.map(|n| n * 2), Response::Failure("nope".to_string()));
    }

    #[test]
    fn serializes_with_status_tag() {
        let r: Response<&str> = Response::Success("x");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], "x");
    }
}
