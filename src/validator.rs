use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use blogmesh_core::AppError;

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", path))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, &path, out);
                }
            }
        }
    }
}

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.sort();
    messages.join(", ")
}

/// JSON body extractor that also runs the `Validate` rules.
///
/// Shape problems (missing field, wrong type, bad content type) answer 400;
/// rule violations answer 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::new(
                        StatusCode::BAD_REQUEST,
                        anyhow!("{} is required", field),
                    );
                }

                if error_msg.contains("invalid type") {
                    return AppError::new(
                        StatusCode::BAD_REQUEST,
                        anyhow!("Invalid field type in request"),
                    );
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::new(
                        StatusCode::BAD_REQUEST,
                        anyhow!("Missing 'Content-Type: application/json' header"),
                    );
                }

                AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid request body"))
            })?;

        value.validate().map_err(|errors| {
            AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!("{}", format_errors(&errors)),
            )
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Path extractor whose rejection uses the JSON error body.
///
/// A segment that does not parse (e.g. a malformed id) answers 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| match rejection {
                PathRejection::FailedToDeserializePathParams(_) => {
                    AppError::bad_request(anyhow!("Invalid id"))
                }
                other => AppError::internal(anyhow!("{}", other.body_text())),
            })?;

        Ok(ValidatedPath(value))
    }
}
