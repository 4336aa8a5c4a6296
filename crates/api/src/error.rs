use actix_web::{http::StatusCode, HttpResponse};
use planner_api_structs::ErrorResponse;
use planner_domain::nlp::ParseFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("The request could not be understood. Error message: `{message}`")]
    UnprocessableEntity {
        message: String,
        remainder: Option<String>,
    },
}

impl From<ParseFailure> for PlannerError {
    fn from(e: ParseFailure) -> Self {
        Self::UnprocessableEntity {
            remainder: Some(e.remainder().to_string()),
            message: e.to_string(),
        }
    }
}

impl actix_web::error::ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let remainder = match self {
            Self::UnprocessableEntity { remainder, .. } => remainder.clone(),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.to_string(),
            remainder,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{body::to_bytes, ResponseError};

    #[actix_web::test]
    async fn parse_failures_carry_the_remainder() {
        let err = PlannerError::from(ParseFailure::NoTemporalPhrase {
            remainder: "lunch".into(),
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.remainder.as_deref(), Some("lunch"));
    }
}
