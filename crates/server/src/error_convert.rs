use shared_types::AppError;

/// Friendly messages for unique constraints, keyed by constraint name.
const UNIQUE_MESSAGES: &[(&str, &str)] = &[
    ("users_email_key", "An account with this email already exists"),
    (
        "lawyers_bar_license_no_key",
        "A lawyer with this bar license number already exists",
    ),
    ("_user_id_key", "Profile already exists for this user"),
    ("court_access_pkey", "Court already has access to this case"),
    ("case_lawyer_access_pkey", "Lawyer is already assigned to this case"),
    ("judge_access_pkey", "Judge is already assigned to this case"),
    (
        "case_participant_access_pkey",
        "Participant is already linked to this case",
    ),
    ("judge_works_in_pkey", "Judge already works in this court"),
    (
        "prosecutor_assign_pkey",
        "Prosecutor is already assigned to this court",
    ),
];

fn unique_violation_message(constraint: Option<&str>) -> &'static str {
    constraint
        .and_then(|name| {
            UNIQUE_MESSAGES
                .iter()
                .find(|(suffix, _)| name.ends_with(suffix))
                .map(|(_, msg)| *msg)
        })
        .unwrap_or("A record with this value already exists")
}

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // unique_violation
            Some("23505") => AppError::conflict(unique_violation_message(db_err.constraint())),
            // foreign_key_violation
            Some("23503") => AppError::not_found("Referenced record does not exist"),
            // check_violation
            Some("23514") => {
                let mut field_errors = std::collections::HashMap::new();
                if let Some(constraint) = db_err.constraint() {
                    field_errors.insert(
                        constraint.to_string(),
                        "value violates a check constraint".to_string(),
                    );
                }
                AppError::validation("Invalid field value", field_errors)
            }
            _ => AppError::database(err.to_string()),
        },
        _ => AppError::database(err.to_string()),
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
