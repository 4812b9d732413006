//! egov backend client built on `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::application::BpaApplication;
use crate::domain::edcr::ScrutinyDetails;
use crate::domain::inbox::{RawInboxPage, SearchCriteria};
use crate::domain::lenient::LenientVec;
use crate::domain::types::{ApplicationNumber, EdcrNumber, TenantId};
use crate::domain::user::{RequestInfo, Tenant};
use crate::models::config::ServerConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ApplicationReader, ApplicationWriter, InboxSearcher, ScrutinyDetailReader, TenantReader,
};

const API_ID: &str = "Rainmaker";
const INBOX_SEARCH_PATH: &str = "/inbox/v1/_search";
const SCRUTINY_DETAILS_PATH: &str = "/edcr/rest/dcr/scrutinydetails";
const MDMS_SEARCH_PATH: &str = "/egov-mdms-service/v1/_search";
const BPA_SEARCH_PATH: &str = "/bpa-services/v1/bpa/_search";
const BPA_UPDATE_PATH: &str = "/bpa-services/v1/bpa/_update";

#[derive(Deserialize)]
struct MdmsResponse {
    #[serde(rename = "MdmsRes", default)]
    mdms_res: MdmsTenantModule,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct MdmsTenantModule {
    tenant: MdmsTenants,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct MdmsTenants {
    tenants: LenientVec<Tenant>,
}

#[derive(Deserialize)]
struct BpaResponse {
    #[serde(rename = "BPA", default)]
    applications: LenientVec<BpaApplication>,
}

#[derive(Serialize)]
struct BpaRequest<'a> {
    #[serde(rename = "RequestInfo")]
    request_info: RequestInfo,
    #[serde(rename = "BPA")]
    application: &'a BpaApplication,
}

/// HTTP implementation of every backend collaborator.
#[derive(Clone)]
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
    state_tenant_id: String,
}

impl HttpRepository {
    pub fn new(config: &ServerConfig) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            state_tenant_id: config.state_tenant_id.clone(),
        })
    }

    /// Stamps the caller's envelope with a fresh message id.
    fn envelope(&self, request: &RequestInfo) -> RequestInfo {
        let ts = Utc::now().timestamp_millis();
        RequestInfo {
            api_id: request.api_id.clone().or_else(|| Some(API_ID.to_string())),
            ts: Some(ts),
            msg_id: Some(format!("{ts}|{}", Uuid::new_v4())),
            ..request.clone()
        }
    }

    async fn post<B, T>(&self, path: &str, query: &[(&str, &str)], body: &B) -> RepositoryResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {url}");

        let response = self.client.post(&url).query(query).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Backend call to {path} failed with {status}");
            return Err(RepositoryError::from_backend_body(status.as_u16(), &body));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl InboxSearcher for HttpRepository {
    async fn search_inbox(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        criteria: &SearchCriteria,
    ) -> RepositoryResult<RawInboxPage> {
        let body = json!({
            "RequestInfo": self.envelope(request),
            "inbox": criteria,
        });
        self.post(INBOX_SEARCH_PATH, &[("tenantId", tenant_id.as_str())], &body)
            .await
    }
}

#[async_trait]
impl ScrutinyDetailReader for HttpRepository {
    async fn get_scrutiny_details(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        edcr_number: &EdcrNumber,
    ) -> RepositoryResult<ScrutinyDetails> {
        let body = json!({ "RequestInfo": self.envelope(request) });
        self.post(
            SCRUTINY_DETAILS_PATH,
            &[
                ("tenantId", tenant_id.as_str()),
                ("edcrNumber", edcr_number.as_str()),
            ],
            &body,
        )
        .await
    }
}

#[async_trait]
impl TenantReader for HttpRepository {
    async fn get_tenant(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
    ) -> RepositoryResult<Option<Tenant>> {
        let body = json!({
            "RequestInfo": self.envelope(request),
            "MdmsCriteria": {
                "tenantId": self.state_tenant_id,
                "moduleDetails": [{
                    "moduleName": "tenant",
                    "masterDetails": [{"name": "tenants"}],
                }],
            },
        });
        let response: MdmsResponse = self.post(MDMS_SEARCH_PATH, &[], &body).await?;

        Ok(response
            .mdms_res
            .tenant
            .tenants
            .0
            .into_iter()
            .find(|tenant| tenant.code.text() == tenant_id.as_str()))
    }
}

#[async_trait]
impl ApplicationReader for HttpRepository {
    async fn get_application(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        application_no: &ApplicationNumber,
    ) -> RepositoryResult<Option<BpaApplication>> {
        let body = json!({ "RequestInfo": self.envelope(request) });
        let response: BpaResponse = self
            .post(
                BPA_SEARCH_PATH,
                &[
                    ("tenantId", tenant_id.as_str()),
                    ("applicationNo", application_no.as_str()),
                ],
                &body,
            )
            .await?;

        Ok(response.applications.0.into_iter().next())
    }
}

#[async_trait]
impl ApplicationWriter for HttpRepository {
    async fn update_application(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        application: &BpaApplication,
    ) -> RepositoryResult<BpaApplication> {
        let body = BpaRequest {
            request_info: self.envelope(request),
            application,
        };
        let response: BpaResponse = self
            .post(BPA_UPDATE_PATH, &[("tenantId", tenant_id.as_str())], &body)
            .await?;

        response
            .applications
            .0
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::Unexpected("update returned no application".into()))
    }
}
