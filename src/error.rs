use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::JsonPayloadError;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use mongodb::error::Error as DatabaseError;
use serde::Serialize;

pub const ALLOWED_METHODS: &str = "GET, POST";

#[derive(Debug, Derivative)]
#[derivative(PartialEq)]
pub enum Error {
    // 400
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    MissingFields,
    BudgetNotANumber,
    BudgetIsNegative,
    InvalidDate,
    UnknownStatus { status: String },

    // 404
    PathNotFound,

    // 405
    MethodNotAllowed { method: String },

    // 500
    ExistentialState(String),
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    IoError(#[derivative(PartialEq = "ignore")] IoError),
    FailedRequest(String),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::MissingFields => "E4001001",
            Error::BudgetNotANumber => "E4001002",
            Error::BudgetIsNegative => "E4001003",
            Error::InvalidDate => "E4001004",
            Error::UnknownStatus { .. } => "E4001005",
            Error::PathNotFound => "E4041000",
            Error::MethodNotAllowed { .. } => "E4051000",
            Error::ExistentialState(_) => "E5001000",
            Error::FailedDatabaseCall(_) => "E5001001",
            Error::IoError(_) => "E5001002",
            Error::FailedRequest(_) => "E5001003",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::MissingFields => "All fields are required.",
            Error::BudgetNotANumber => "Budget must be a number.",
            Error::BudgetIsNegative => "Budget must not be negative.",
            Error::InvalidDate => "Start date and end date must be valid dates.",
            Error::UnknownStatus { .. } => "Status must be one of: active, upcoming, completed.",
            Error::PathNotFound => "The requested path was not found",
            Error::MethodNotAllowed { .. } => "The requested method is not allowed",
            Error::ExistentialState(_) => "The server detected an invalid state",
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database"
            }
            Error::IoError(_) => "An error occurred during an I/O operation",
            Error::FailedRequest(_) => "An error occurred when calling the campaign service",
        }
    }

    /// The message that is safe to hand to a client. Internal failures are
    /// collapsed into one generic message.
    pub fn public_message(&self) -> &'static str {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error"
        } else {
            self.error_message()
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::MissingFields => StatusCode::BAD_REQUEST,
            Error::BudgetNotANumber => StatusCode::BAD_REQUEST,
            Error::BudgetIsNegative => StatusCode::BAD_REQUEST,
            Error::InvalidDate => StatusCode::BAD_REQUEST,
            Error::UnknownStatus { .. } => StatusCode::BAD_REQUEST,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Error::ExistentialState(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy {
            error_code: &'static str,
            message: &'static str,
        }

        if let Error::MethodNotAllowed { method } = self {
            return HttpResponse::build(self.status_code())
                .insert_header((header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS)))
                .content_type("text/plain; charset=utf-8")
                .body(format!("Method {} Not Allowed", method));
        }

        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            error_code: self.error_code(),
            message: self.public_message(),
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn validation_errors_carry_their_message() {
        let response = Error::BudgetNotANumber.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Budget must be a number.");
        assert_eq!(body["error_code"], "E4001002");
    }

    #[actix_web::test]
    async fn internal_errors_are_masked() {
        let response = Error::ExistentialState("store lock was poisoned".into()).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("poisoned"));
    }

    #[test]
    fn internal_errors_have_distinct_codes() {
        let errors = vec![
            Error::ExistentialState("state".into()),
            Error::FailedDatabaseCall(DatabaseError::custom("driver")),
            Error::IoError(IoError::new(std::io::ErrorKind::Other, "io")),
            Error::FailedRequest("request".into()),
        ];

        let codes: Vec<&str> = errors.iter().map(|error| error.error_code()).collect();
        assert_eq!(codes, vec!["E5001000", "E5001001", "E5001002", "E5001003"]);
        for error in &errors {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(error.public_message(), "Internal server error");
        }
    }

    #[actix_web::test]
    async fn method_not_allowed_lists_supported_methods() {
        let response = Error::MethodNotAllowed {
            method: "DELETE".into(),
        }
        .error_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET, POST");

        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], b"Method DELETE Not Allowed");
    }
}
