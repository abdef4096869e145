/*!
 * Tests for error types and conversions
 */

use egrul_resolver::errors::{AppError, ExtractError, RegistryError};

/// Test registry error display formatting
#[test]
fn test_registry_error_display_withApiError_shouldIncludeStatusAndMessage() {
    let error = RegistryError::ApiError {
        status_code: 502,
        message: "bad gateway".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Registry responded with error: 502 - bad gateway"
    );
}

/// Test the poll timeout error carries the attempt budget
#[test]
fn test_registry_error_display_withPollTimeout_shouldIncludeAttempts() {
    let error = RegistryError::PollTimeout { attempts: 60 };
    assert!(error.to_string().contains("60 poll attempts"));
}

/// Test wrapping a registry error into the application error
#[test]
fn test_app_error_from_registry_error_shouldWrapMessage() {
    let app_error: AppError = RegistryError::Protocol("empty result".to_string()).into();
    assert!(matches!(app_error, AppError::Registry(_)));
    assert!(app_error.to_string().contains("empty result"));
}

/// Test wrapping an extract error into the application error
#[test]
fn test_app_error_from_extract_error_shouldWrapMessage() {
    let app_error: AppError = ExtractError::Unreadable("bad header".to_string()).into();
    assert!(matches!(app_error, AppError::Extract(_)));
    assert!(app_error.to_string().contains("bad header"));
}

/// Test conversion from anyhow errors
#[test]
fn test_app_error_from_anyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(_)));
}
