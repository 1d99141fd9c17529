use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;

/// Everything that can stop a contact submission. The `Display` string is the
/// exact message returned to the client; upstream detail stays in the logs.
#[derive(Debug, Display)]
pub enum ContactError {
    #[display("Faltan campos")]
    MissingFields,

    #[display("Nombre inválido")]
    InvalidName,

    #[display("Email inválido")]
    InvalidEmail,

    #[display("Mensaje inválido")]
    InvalidMessage,

    #[display("Contenido inválido")]
    ForbiddenContent,

    #[display("Demasiadas solicitudes, inténtalo de nuevo más tarde.")]
    RateLimited,

    #[display("Validación de seguridad requerida")]
    CaptchaRequired,

    #[display("No se pudo verificar la solicitud")]
    CaptchaRejected,

    /// No delivery channel is configured; message comes localized from the
    /// dictionary.
    #[display("{message}")]
    FormDisabled { message: String },

    /// Primary email provider rejected the send; message comes localized from
    /// the dictionary.
    #[display("{message}")]
    ServiceUnavailable { message: String },

    #[display("{_0}")]
    DeliveryFailed(String),
}

impl ResponseError for ContactError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(serde_json::json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::MissingFields
            | ContactError::InvalidName
            | ContactError::InvalidEmail
            | ContactError::InvalidMessage
            | ContactError::ForbiddenContent
            | ContactError::CaptchaRequired
            | ContactError::CaptchaRejected => StatusCode::BAD_REQUEST,
            ContactError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ContactError::FormDisabled { .. } | ContactError::ServiceUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ContactError::DeliveryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        for error in [
            ContactError::MissingFields,
            ContactError::InvalidName,
            ContactError::InvalidEmail,
            ContactError::InvalidMessage,
            ContactError::ForbiddenContent,
            ContactError::CaptchaRequired,
            ContactError::CaptchaRejected,
        ] {
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn abuse_and_availability_codes() {
        assert_eq!(
            ContactError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ContactError::FormDisabled { message: "x".into() }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ContactError::ServiceUnavailable { message: "x".into() }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ContactError::DeliveryFailed("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_carries_the_user_message() {
        assert_eq!(ContactError::MissingFields.to_string(), "Faltan campos");
        assert_eq!(
            ContactError::ServiceUnavailable {
                message: "Servicio no disponible".into()
            }
            .to_string(),
            "Servicio no disponible"
        );
    }
}
