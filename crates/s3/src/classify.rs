//! Error classification
//!
//! Maps AWS SDK failures onto the engine taxonomy before they cross the
//! crate boundary. Service errors classify by error code first, then by
//! HTTP status; SDK-level failures (dispatch, timeout, response decoding)
//! are transport problems unless the request never left the process.

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;
use scout_core::Error;

/// Classify one failed SDK call
///
/// `operation` and `location` ("bucket/key" or "bucket/prefix") only feed
/// the error message; the variant is decided by the failure itself.
pub(crate) fn classify<E>(operation: &str, location: &str, err: &SdkError<E>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err {
        SdkError::ServiceError(ctx) => classify_service(
            operation,
            location,
            ctx.err().code(),
            ctx.err().message(),
            ctx.raw().status().as_u16(),
        ),
        // The request was never sent; retrying cannot help.
        SdkError::ConstructionFailure(_) => Error::InvalidArgument(format!(
            "{operation} {location}: {}",
            DisplayErrorContext(err)
        )),
        SdkError::DispatchFailure(failure) => {
            let text = format!("{operation} {location}: {}", DisplayErrorContext(err));
            if failure.as_connector_error().is_some_and(|c| c.is_user()) {
                Error::InvalidArgument(text)
            } else {
                Error::Transport(text)
            }
        }
        _ => Error::Transport(format!(
            "{operation} {location}: {}",
            DisplayErrorContext(err)
        )),
    }
}

/// Classify a service-level error from its code and HTTP status
fn classify_service(
    operation: &str,
    location: &str,
    code: Option<&str>,
    message: Option<&str>,
    status: u16,
) -> Error {
    let detail = match (code, message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => format!("http status {status}"),
    };
    let text = format!("{operation} {location}: {detail}");

    match code {
        Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => Error::NotFound(text),
        Some(
            "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken"
            | "Forbidden",
        ) => Error::AccessDenied(text),
        Some("InvalidRange") => Error::RangeNotSatisfiable(text),
        Some("InvalidBucketName" | "InvalidArgument" | "KeyTooLongError") => {
            Error::InvalidArgument(text)
        }
        Some("SlowDown" | "InternalError" | "ServiceUnavailable" | "RequestTimeout") => {
            Error::Transport(text)
        }
        // Head responses carry no body, so 404/403/416 often arrive
        // without a code at all.
        _ if status >= 500 || status == 429 => Error::Transport(text),
        _ if status == 404 => Error::NotFound(text),
        _ if status == 403 => Error::AccessDenied(text),
        _ if status == 416 => Error::RangeNotSatisfiable(text),
        _ => Error::InvalidArgument(text),
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::get_object::GetObjectError;

    use super::*;

    fn service(code: Option<&str>, status: u16) -> Error {
        classify_service("read", "data/key", code, None, status)
    }

    #[test]
    fn test_absence_codes_are_not_found() {
        assert!(matches!(service(Some("NoSuchKey"), 404), Error::NotFound(_)));
        assert!(matches!(
            service(Some("NoSuchBucket"), 404),
            Error::NotFound(_)
        ));
        assert!(matches!(service(Some("NotFound"), 404), Error::NotFound(_)));
    }

    #[test]
    fn test_authorization_codes_are_access_denied() {
        for code in [
            "AccessDenied",
            "InvalidAccessKeyId",
            "SignatureDoesNotMatch",
            "ExpiredToken",
        ] {
            assert!(
                matches!(service(Some(code), 403), Error::AccessDenied(_)),
                "code {code}"
            );
        }
    }

    #[test]
    fn test_invalid_range_is_unsatisfiable() {
        assert!(matches!(
            service(Some("InvalidRange"), 416),
            Error::RangeNotSatisfiable(_)
        ));
    }

    #[test]
    fn test_caller_bugs_are_invalid_argument() {
        assert!(matches!(
            service(Some("InvalidBucketName"), 400),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            service(Some("KeyTooLongError"), 400),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_throttling_and_server_faults_are_transport() {
        for code in ["SlowDown", "InternalError", "ServiceUnavailable"] {
            let err = service(Some(code), 503);
            assert!(err.is_retryable(), "code {code}");
        }
    }

    #[test]
    fn test_codeless_statuses_fall_back() {
        assert!(matches!(service(None, 404), Error::NotFound(_)));
        assert!(matches!(service(None, 403), Error::AccessDenied(_)));
        assert!(matches!(service(None, 416), Error::RangeNotSatisfiable(_)));
        assert!(service(None, 500).is_retryable());
        assert!(service(None, 429).is_retryable());
    }

    #[test]
    fn test_unknown_codes_follow_status() {
        assert!(service(Some("Mystery"), 503).is_retryable());
        assert!(matches!(
            service(Some("Mystery"), 400),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_message_lands_in_error_text() {
        let err = classify_service(
            "head",
            "data/missing.txt",
            Some("NoSuchKey"),
            Some("The specified key does not exist."),
            404,
        );
        let text = err.to_string();
        assert!(text.contains("head data/missing.txt"));
        assert!(text.contains("NoSuchKey"));
    }

    #[test]
    fn test_sdk_timeout_is_retryable() {
        let err = SdkError::<GetObjectError>::timeout_error("deadline elapsed");
        assert!(classify("read", "data/key", &err).is_retryable());
    }

    #[test]
    fn test_sdk_construction_failure_is_invalid_argument() {
        let err = SdkError::<GetObjectError>::construction_failure("bad request parts");
        assert!(matches!(
            classify("read", "data/key", &err),
            Error::InvalidArgument(_)
        ));
    }
}
