//! Request and response bodies of the `/api/v1` endpoints.
//!
//! Requests follow the egov convention of carrying the caller's
//! `RequestInfo` envelope in the body next to the payload.

use serde::{Deserialize, Serialize};

use crate::domain::application::BpaApplication;
use crate::domain::inbox::InboxPage;
use crate::domain::types::{ApplicationNumber, EdcrNumber, TenantId};
use crate::domain::user::RequestInfo;
use crate::forms::application::WorkflowActionForm;
use crate::forms::inbox::InboxSearchForm;
use crate::pagination::PageWindow;

/// Body of `POST /api/v1/inbox/_search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxSearchRequest {
    #[serde(rename = "RequestInfo", default)]
    pub request_info: RequestInfo,
    pub tenant_id: TenantId,
    #[serde(default)]
    pub filters: InboxSearchForm,
}

/// Body of `POST /api/v1/scrutiny/_report`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrutinyReportRequest {
    #[serde(rename = "RequestInfo", default)]
    pub request_info: RequestInfo,
    pub tenant_id: TenantId,
    pub edcr_number: EdcrNumber,
}

/// Body of `POST /api/v1/applications/_details`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailsRequest {
    #[serde(rename = "RequestInfo", default)]
    pub request_info: RequestInfo,
    pub tenant_id: TenantId,
    pub application_no: ApplicationNumber,
}

/// Body of `POST /api/v1/applications/_action`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowActionRequest {
    #[serde(rename = "RequestInfo", default)]
    pub request_info: RequestInfo,
    pub tenant_id: TenantId,
    pub workflow: WorkflowActionForm,
}

/// Inbox page together with its position in the full result set.
#[derive(Debug, Serialize)]
pub struct InboxResponse {
    #[serde(flatten)]
    pub page: InboxPage,
    pub window: PageWindow,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    #[serde(rename = "BPA")]
    pub application: BpaApplication,
}

/// Single entry of the egov error envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
}

/// `{"Errors": [...]}` body returned on failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Errors")]
    pub errors: Vec<ApiError>,
}

impl ErrorResponse {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ApiError {
                code,
                message: message.into(),
            }],
        }
    }
}
