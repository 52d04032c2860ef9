//! Common utilities for contract upload handlers

use axum::extract::Multipart;
use bytes::Bytes;
use pactscan_core::AppError;

/// A parsed contract upload: the PDF bytes plus any text fields the form
/// carried alongside the file.
#[derive(Debug)]
pub struct ContractUpload {
    pub data: Bytes,
    pub filename: Option<String>,
    pub contract_type: Option<String>,
}

/// Extract the contract file (and optional "contractType" text field) from a
/// multipart form. Exactly one file part named "contract" is accepted; a
/// repeated "contract" part or a file part under any other name is rejected.
pub async fn extract_contract_upload(mut multipart: Multipart) -> Result<ContractUpload, AppError> {
    let mut file_data: Option<Bytes> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut contract_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "contract" => {
                if file_data.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'contract'"
                            .to_string(),
                    ));
                }
                filename = field.file_name().map(|s: &str| s.to_string());
                content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data);
            }
            "contractType" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read contractType field: {}", e))
                })?;
                let value = value.trim().to_string();
                if !value.is_empty() {
                    contract_type = Some(value);
                }
            }
            other => {
                if field.file_name().is_some() {
                    return Err(AppError::InvalidInput(format!(
                        "Unexpected file field '{}'; send exactly one file field named 'contract'",
                        other
                    )));
                }
            }
        }
    }

    let data = file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());
    validate_content_type(&content_type)?;

    Ok(ContractUpload {
        data,
        filename,
        contract_type,
    })
}

/// Validate file size against the configured ceiling.
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "application/pdf; charset=utf-8" -> "application/pdf").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Only PDF contracts are accepted. Compares the normalized MIME type so
/// parameters cannot bypass the check.
fn validate_content_type(content_type: &str) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if normalized != "application/pdf" {
        return Err(AppError::UnsupportedMediaType(
            "Only PDF files are supported".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header::CONTENT_TYPE, Request};

    const BOUNDARY: &str = "XBOUNDARY";

    fn part(name: &str, filename: Option<&str>, content_type: Option<&str>, body: &str) -> String {
        let mut part = format!("--{}\r\nContent-Disposition: form-data; name=\"{}\"", BOUNDARY, name);
        if let Some(filename) = filename {
            part.push_str(&format!("; filename=\"{}\"", filename));
        }
        part.push_str("\r\n");
        if let Some(content_type) = content_type {
            part.push_str(&format!("Content-Type: {}\r\n", content_type));
        }
        part.push_str(&format!("\r\n{}\r\n", body));
        part
    }

    async fn parse(parts: &[String]) -> Result<ContractUpload, AppError> {
        let body = format!("{}--{}--\r\n", parts.concat(), BOUNDARY);
        let request = Request::builder()
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        let multipart = Multipart::from_request(request, &()).await.unwrap();
        extract_contract_upload(multipart).await
    }

    fn pdf_part() -> String {
        part(
            "contract",
            Some("lease.pdf"),
            Some("application/pdf"),
            "%PDF-1.4 payload",
        )
    }

    #[tokio::test]
    async fn test_contract_and_type_fields_are_parsed() {
        let upload = parse(&[pdf_part(), part("contractType", None, None, "Lease")])
            .await
            .unwrap();
        assert_eq!(upload.data.as_ref(), b"%PDF-1.4 payload");
        assert_eq!(upload.filename.as_deref(), Some("lease.pdf"));
        assert_eq!(upload.contract_type.as_deref(), Some("Lease"));
    }

    #[tokio::test]
    async fn test_missing_file_is_rejected() {
        let err = parse(&[part("contractType", None, None, "Lease")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_repeated_contract_field_is_rejected() {
        let err = parse(&[pdf_part(), pdf_part()]).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_file_under_another_field_name_is_rejected() {
        // Exactly one file part, and it must be named "contract".
        let stray = part(
            "attachment",
            Some("extra.pdf"),
            Some("application/pdf"),
            "%PDF-1.4 stray",
        );
        let err = parse(&[pdf_part(), stray]).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let png = part("contract", Some("scan.png"), Some("image/png"), "not pdf");
        let err = parse(&[png]).await.unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_pdf_content_type_is_accepted() {
        assert!(validate_content_type("application/pdf").is_ok());
        assert!(validate_content_type("Application/PDF").is_ok());
        assert!(validate_content_type("application/pdf; charset=binary").is_ok());
    }

    #[test]
    fn test_non_pdf_content_type_is_rejected() {
        let err = validate_content_type("image/png").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
        assert!(validate_content_type("application/octet-stream").is_err());
    }

    #[test]
    fn test_file_size_ceiling() {
        assert!(validate_file_size(10, 100).is_ok());
        assert!(validate_file_size(100, 100).is_ok());
        let err = validate_file_size(101, 100).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }
}
