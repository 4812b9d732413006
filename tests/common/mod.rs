//! Canned backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use obps_portal::domain::application::BpaApplication;
use obps_portal::domain::edcr::ScrutinyDetails;
use obps_portal::domain::inbox::{RawInboxPage, SearchCriteria};
use obps_portal::domain::types::{ApplicationNumber, EdcrNumber, TenantId};
use obps_portal::domain::user::{RequestInfo, Tenant};
use obps_portal::repository::errors::{RepositoryError, RepositoryResult};
use obps_portal::repository::{
    ApplicationReader, ApplicationWriter, InboxSearcher, ScrutinyDetailReader, TenantReader,
};

pub const EDCR_FIXTURE: &str = include_str!("../fixtures/edcr_detail.json");

/// Backend answering from fixed JSON documents and recording what it was
/// asked.
pub struct StubBackend {
    pub inbox: Value,
    pub scrutiny: Value,
    pub tenant: Option<Value>,
    pub application: Option<Value>,
    pub update_error: Option<(u16, String)>,
    pub searches: Mutex<Vec<SearchCriteria>>,
    pub updates: Mutex<Vec<BpaApplication>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            inbox: json!({"items": [], "totalCount": 0}),
            scrutiny: serde_json::from_str(EDCR_FIXTURE).expect("fixture is valid JSON"),
            tenant: None,
            application: None,
            update_error: None,
            searches: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
        }
    }
}

impl StubBackend {
    pub fn recorded_searches(&self) -> Vec<SearchCriteria> {
        self.searches.lock().unwrap().clone()
    }

    pub fn recorded_updates(&self) -> Vec<BpaApplication> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl InboxSearcher for StubBackend {
    async fn search_inbox(
        &self,
        _request: &RequestInfo,
        _tenant_id: &TenantId,
        criteria: &SearchCriteria,
    ) -> RepositoryResult<RawInboxPage> {
        self.searches.lock().unwrap().push(criteria.clone());
        Ok(serde_json::from_value(self.inbox.clone())?)
    }
}

#[async_trait]
impl ScrutinyDetailReader for StubBackend {
    async fn get_scrutiny_details(
        &self,
        _request: &RequestInfo,
        _tenant_id: &TenantId,
        _edcr_number: &EdcrNumber,
    ) -> RepositoryResult<ScrutinyDetails> {
        Ok(serde_json::from_value(self.scrutiny.clone())?)
    }
}

#[async_trait]
impl TenantReader for StubBackend {
    async fn get_tenant(
        &self,
        _request: &RequestInfo,
        _tenant_id: &TenantId,
    ) -> RepositoryResult<Option<Tenant>> {
        self.tenant
            .clone()
            .map(serde_json::from_value::<Tenant>)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl ApplicationReader for StubBackend {
    async fn get_application(
        &self,
        _request: &RequestInfo,
        _tenant_id: &TenantId,
        _application_no: &ApplicationNumber,
    ) -> RepositoryResult<Option<BpaApplication>> {
        self.application
            .clone()
            .map(serde_json::from_value::<BpaApplication>)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl ApplicationWriter for StubBackend {
    async fn update_application(
        &self,
        _request: &RequestInfo,
        _tenant_id: &TenantId,
        application: &BpaApplication,
    ) -> RepositoryResult<BpaApplication> {
        if let Some((status, message)) = &self.update_error {
            return Err(RepositoryError::Backend {
                status: *status,
                message: message.clone(),
            });
        }
        self.updates.lock().unwrap().push(application.clone());
        Ok(application.clone())
    }
}

/// `RequestInfo` JSON for an employee holding `roles`.
pub fn employee_request(roles: &[&str]) -> Value {
    json!({
        "apiId": "Rainmaker",
        "authToken": "token",
        "userInfo": {
            "type": "EMPLOYEE",
            "uuid": "emp-uuid",
            "roles": roles.iter().map(|code| json!({"code": code})).collect::<Vec<_>>()
        }
    })
}

/// `RequestInfo` JSON for a citizen.
pub fn citizen_request() -> Value {
    json!({
        "apiId": "Rainmaker",
        "userInfo": {"type": "CITIZEN", "uuid": "citizen-uuid", "roles": [{"code": "CITIZEN"}]}
    })
}
