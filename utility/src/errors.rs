use axum::{
	http::{header, HeaderValue, StatusCode},
	Json,
	response::{IntoResponse, Response},
};
use color_eyre::eyre::Result as EyreResult;
use derive_more::{Display, Error};
use eyre::ErrReport;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

pub type AppResult<T> = EyreResult<T, AppError>;

/// Body of every rejected call, sent as plain text
pub const INVALID_PARAMETERS_MESSAGE: &str = "One or more parameter values are invalid";

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

#[derive(Deserialize, Serialize)]
pub struct AppErrorMessage {
	pub code: u16,
	pub message: String,
}

#[derive(Debug)]
pub enum AppErrorCode {
	InternalError,
	InvalidParameters,
	UnprocessableEntity,
	Timeout,
	MethodNotAllowed,
}

#[derive(Display, Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum AppError {
	#[display(fmt = "{message}")]
	ConfigError { message: String },

	#[display(fmt = "{message}")]
	InternalError { message: String },

	#[display(fmt = "{message}")]
	UnprocessableEntity { message: String },

	#[display(fmt = "{}", INVALID_PARAMETERS_MESSAGE)]
	InvalidParameters,

	#[display(fmt = "Request Timeout")]
	Timeout,

	#[display(fmt = "Method Not Allowed")]
	MethodNotAllowed,
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let status = match self {
			AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
			AppError::InvalidParameters => StatusCode::BAD_REQUEST,
			AppError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
			AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
			AppError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};

		// Rejected parameters always get the same plain text body
		if self == AppError::InvalidParameters {
			return (
				status,
				[(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF_8))],
				INVALID_PARAMETERS_MESSAGE,
			).into_response();
		}

		let body = Json(json!(AppErrorMessage {
            code: status.as_u16(),
            message: self.to_string(),
        }));

		(status, body).into_response()
	}
}

impl From<ErrReport> for AppError {
	fn from(value: ErrReport) -> Self {
		error!("[E100] {:?}",&value);
		Self::InternalError {
			message: format!("[E100]{:?}",value)
		}
	}
}

impl From<std::io::Error> for AppError {
	fn from(value: std::io::Error) -> Self {
		error!("[E100] {:?}",&value);
		Self::InternalError {
			message: format!("[E100] {:?}",value)
		}
	}
}

impl From<std::net::AddrParseError> for AppError {
	fn from(value: std::net::AddrParseError) -> Self {
		error!("[E101] {:?}",&value);
		Self::ConfigError {
			message: format!("[E101] {:?}",value)
		}
	}
}

impl From<config::ConfigError> for AppError {
	fn from(value: config::ConfigError) -> Self {
		error!("[E102] {:?}",&value);
		Self::ConfigError {
			message: format!("[E102] {:?}",value)
		}
	}
}

impl From<hyper::Error> for AppError {
	fn from(value: hyper::Error) -> Self {
		error!("[E200] {:?}",&value);
		Self::InternalError {
			message: format!("[E200] {:?}",value)
		}
	}
}


#[macro_export]
macro_rules! app_error {
    ( $error:expr ) => {
        match $error {
            AppErrorCode::Timeout => AppError::Timeout,
            AppErrorCode::MethodNotAllowed => AppError::MethodNotAllowed,
            AppErrorCode::InvalidParameters => AppError::InvalidParameters,
            AppErrorCode::InternalError => AppError::InternalError {
                message: String::from("Internal Server Error"),
            },
            AppErrorCode::UnprocessableEntity => AppError::UnprocessableEntity {
                message: String::from("Unprocessable Entity"),
            },
        }
    };

    ( $error:expr, $message:expr ) => {
        match $error {
            AppErrorCode::Timeout => AppError::Timeout,
            AppErrorCode::MethodNotAllowed => AppError::MethodNotAllowed,
            AppErrorCode::InvalidParameters => AppError::InvalidParameters,
            AppErrorCode::InternalError => {
                error!("{}", $message);
                AppError::InternalError {
                    message: $message.to_string(),
                }
            }
            AppErrorCode::UnprocessableEntity => AppError::UnprocessableEntity {
                message: $message.to_string(),
            },
        }
    };

    ( $error:expr, $message:expr, $details:expr ) => {
        match $error {
            AppErrorCode::Timeout => AppError::Timeout,
            AppErrorCode::MethodNotAllowed => AppError::MethodNotAllowed,
            AppErrorCode::InvalidParameters => AppError::InvalidParameters,
            AppErrorCode::InternalError => {
                error!("{}", $details);
                AppError::InternalError {
                    message: $message.to_string(),
                }
            }
            AppErrorCode::UnprocessableEntity => AppError::UnprocessableEntity {
                message: $message.to_string(),
            },
        }
    };
}
