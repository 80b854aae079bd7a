/*!
 * Tests for error types and conversions
 */

use tikkun::errors::{AppError, ConfigError, DocumentError, TraditionError};
use tikkun::text::document::{Document, Tradition};

#[test]
fn test_documentError_malformed_shouldDisplayIdAndReason() {
    let error = DocumentError::Malformed {
        id: "noach".to_string(),
        reason: "no verse groups and no verse list".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("noach"));
    assert!(display.contains("no verse groups"));
}

#[test]
fn test_documentError_fromSerdeError_shouldBeParse() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: DocumentError = serde_error.into();
    assert!(matches!(error, DocumentError::Parse(_)));
    assert!(format!("{}", error).contains("Failed to parse document"));
}

#[test]
fn test_traditionError_unknown_shouldNameKnownTraditions() {
    let error = "ashkenazi".parse::<Tradition>().unwrap_err();
    let display = format!("{}", error);
    assert!(display.contains("ashkenazi"));
    assert!(display.contains("standard"));
    assert!(display.contains("yemenite"));
}

#[test]
fn test_configError_invalidPageSize_shouldDisplayValue() {
    let error = ConfigError::InvalidPageSize(0);
    assert!(format!("{}", error).contains("Invalid page size: 0"));
}

#[test]
fn test_appError_fromDocumentError_shouldWrapCorrectly() {
    let document_error = Document::from_json_str(r#"{"id": "x"}"#, "x").unwrap_err();
    let app_error: AppError = document_error.into();

    assert!(matches!(app_error, AppError::Document(DocumentError::Malformed { .. })));
    assert!(format!("{}", app_error).starts_with("Document error:"));
}

#[test]
fn test_appError_fromTraditionError_shouldWrapCorrectly() {
    let app_error: AppError = TraditionError::Unknown("x".to_string()).into();
    assert!(matches!(app_error, AppError::Tradition(TraditionError::Unknown(_))));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing conf.json");
    let app_error: AppError = io_error.into();

    assert!(matches!(app_error, AppError::File(_)));
    assert!(format!("{}", app_error).contains("missing conf.json"));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(_)));
}
