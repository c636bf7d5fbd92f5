use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ProcessingError;

pub const SUCCESS_STATUS_CODE: u16 = 200;
pub const FAILURE_STATUS_CODE: u16 = 500;

/// Query-string parameters of the triggering request. Accepted but unused.
pub type QueryParameters = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpreadsheetSummary {
    /// Sheet names in workbook order, joined with `,`.
    pub pages: String,
}

impl SpreadsheetSummary {
    pub fn from_sheet_names<S: AsRef<str>>(names: &[S]) -> Self {
        let pages = names
            .iter()
            .map(|name| name.as_ref())
            .collect::<Vec<&str>>()
            .join(",");
        Self { pages }
    }
}

/// Lambda proxy response. Exactly one of `body` or `errorMessage` is present.
///
/// The status code follows from the variant: 200 for success, 500 for failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "ProxyResponse", try_from = "ProxyResponse")]
pub enum ApiResponse {
    Success { body: String },
    Failure { error_message: String },
}

/// Wire shape of [`ApiResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProxyResponse {
    #[serde(rename = "statusCode")]
    status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(
        rename = "errorMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    error_message: Option<String>,
}

impl ApiResponse {
    pub fn success(summary: &SpreadsheetSummary) -> Result<Self, ProcessingError> {
        Ok(Self::Success {
            body: serde_json::to_string(summary)?,
        })
    }

    pub fn failure(error: &ProcessingError) -> Self {
        Self::Failure {
            error_message: error.message().to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { .. } => SUCCESS_STATUS_CODE,
            Self::Failure { .. } => FAILURE_STATUS_CODE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<ApiResponse> for ProxyResponse {
    fn from(response: ApiResponse) -> Self {
        let status_code = response.status_code();
        match response {
            ApiResponse::Success { body } => Self {
                status_code,
                body: Some(body),
                error_message: None,
            },
            ApiResponse::Failure { error_message } => Self {
                status_code,
                body: None,
                error_message: Some(error_message),
            },
        }
    }
}

impl TryFrom<ProxyResponse> for ApiResponse {
    type Error = String;

    fn try_from(wire: ProxyResponse) -> Result<Self, Self::Error> {
        match (wire.status_code, wire.body, wire.error_message) {
            (SUCCESS_STATUS_CODE, Some(body), None) => Ok(Self::Success { body }),
            (FAILURE_STATUS_CODE, None, Some(error_message)) => Ok(Self::Failure { error_message }),
            (status_code, _, _) => Err(format!(
                "statusCode {status_code} does not match the response fields"
            )),
        }
    }
}

impl From<Result<SpreadsheetSummary, ProcessingError>> for ApiResponse {
    fn from(result: Result<SpreadsheetSummary, ProcessingError>) -> Self {
        match result.and_then(|summary| Self::success(&summary)) {
            Ok(response) => response,
            Err(error) => Self::failure(&error),
        }
    }
}
