use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::is_blank;
use crate::AppError;

/// Accepted payment modes. Stored using [`PaymentMode::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum PaymentMode {
    Cash,
    Card,
    OnlineTransfer,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::OnlineTransfer => "OnlineTransfer",
        }
    }

    /// Lenient parse of client input. Accepts the canonical names plus the
    /// labels shown on the payment form ("Credit/Debit card", "Online Transfer").
    pub fn parse(input: &str) -> Option<PaymentMode> {
        let key: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .flat_map(|c| c.to_lowercase())
            .collect();
        match key.as_str() {
            "cash" => Some(PaymentMode::Cash),
            "card" | "creditcard" | "debitcard" | "creditdebitcard" => Some(PaymentMode::Card),
            "onlinetransfer" | "online" | "banktransfer" => Some(PaymentMode::OnlineTransfer),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMode::parse(s).ok_or_else(|| {
            let mut field_errors = std::collections::HashMap::new();
            field_errors.insert(
                "mode".to_string(),
                "mode must be one of Cash, Card, OnlineTransfer".to_string(),
            );
            AppError::validation(format!("Invalid payment mode '{s}'"), field_errors)
        })
    }
}

/// A payment joined with its case title. Case, court and lawyer references
/// become `NULL` when the referenced row is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct PaymentRecord {
    pub id: i64,
    pub case_id: Option<i64>,
    pub court_id: Option<i64>,
    pub lawyer_id: Option<i64>,
    pub casename: Option<String>,
    pub purpose: Option<String>,
    pub balance: f64,
    pub mode: String,
    pub paymenttype: Option<String>,
    pub paymentdate: NaiveDate,
}

/// Body for `POST /api/payments`. The case is identified by `case_id` or,
/// for older clients, by its exact title in `casename`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub case_id: Option<i64>,
    #[serde(default)]
    pub casename: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "purpose is required"), length(min = 1, max = 255))
    )]
    pub purpose: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(
            required(message = "balance is required"),
            range(
                min = 0.0,
                max = 99_999_999.99,
                message = "balance must be between 0 and 99999999.99"
            )
        )
    )]
    pub balance: Option<f64>,
    #[cfg_attr(feature = "validation", validate(required(message = "mode is required")))]
    pub mode: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "paymenttype is required"), length(min = 1, max = 255))
    )]
    pub paymenttype: Option<String>,
    /// Defaults to today.
    #[serde(default)]
    pub paymentdate: Option<NaiveDate>,
}

/// How a payment names its case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseRef {
    Id(i64),
    Title(String),
}

impl CreatePaymentRequest {
    pub fn case_ref(&self) -> Result<CaseRef, AppError> {
        let title = self
            .casename
            .as_deref()
            .filter(|t| !is_blank(Some(t)))
            .map(|t| t.trim().to_string());
        match (self.case_id, title) {
            (Some(id), None) => Ok(CaseRef::Id(id)),
            (None, Some(title)) => Ok(CaseRef::Title(title)),
            (None, None) => Err(AppError::missing_fields(&["case_id"])),
            (Some(_), Some(_)) => Err(AppError::bad_request(
                "Provide either case_id or casename, not both",
            )),
        }
    }

    pub fn payment_mode(&self) -> Result<PaymentMode, AppError> {
        match self.mode.as_deref() {
            Some(mode) => mode.parse(),
            None => Err(AppError::missing_fields(&["mode"])),
        }
    }
}
