//! Collaborator seams for the backend services this portal reads from.
//!
//! Services are generic over these traits so the projections can be tested
//! without a network; [`http::HttpRepository`] is the production
//! implementation.

use async_trait::async_trait;

use crate::domain::application::BpaApplication;
use crate::domain::edcr::ScrutinyDetails;
use crate::domain::inbox::{RawInboxPage, SearchCriteria};
use crate::domain::types::{ApplicationNumber, EdcrNumber, TenantId};
use crate::domain::user::{RequestInfo, Tenant};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[async_trait]
pub trait InboxSearcher: Send + Sync {
    async fn search_inbox(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        criteria: &SearchCriteria,
    ) -> RepositoryResult<RawInboxPage>;
}

#[async_trait]
pub trait ScrutinyDetailReader: Send + Sync {
    async fn get_scrutiny_details(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        edcr_number: &EdcrNumber,
    ) -> RepositoryResult<ScrutinyDetails>;
}

#[async_trait]
pub trait TenantReader: Send + Sync {
    async fn get_tenant(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
    ) -> RepositoryResult<Option<Tenant>>;
}

#[async_trait]
pub trait ApplicationReader: Send + Sync {
    async fn get_application(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        application_no: &ApplicationNumber,
    ) -> RepositoryResult<Option<BpaApplication>>;
}

#[async_trait]
pub trait ApplicationWriter: Send + Sync {
    async fn update_application(
        &self,
        request: &RequestInfo,
        tenant_id: &TenantId,
        application: &BpaApplication,
    ) -> RepositoryResult<BpaApplication>;
}

/// Every collaborator the HTTP routes need, as one object-safe bundle.
pub trait Backend:
    InboxSearcher + ScrutinyDetailReader + TenantReader + ApplicationReader + ApplicationWriter
{
}

impl<T> Backend for T where
    T: InboxSearcher + ScrutinyDetailReader + TenantReader + ApplicationReader + ApplicationWriter
{
}
