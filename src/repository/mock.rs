//! Mock backend implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::application::BpaApplication;
use crate::domain::edcr::ScrutinyDetails;
use crate::domain::inbox::{RawInboxPage, SearchCriteria};
use crate::domain::types::{ApplicationNumber, EdcrNumber, TenantId};
use crate::domain::user::{RequestInfo, Tenant};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ApplicationReader, ApplicationWriter, InboxSearcher, ScrutinyDetailReader, TenantReader,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl InboxSearcher for Repository {
        async fn search_inbox(
            &self,
            request: &RequestInfo,
            tenant_id: &TenantId,
            criteria: &SearchCriteria,
        ) -> RepositoryResult<RawInboxPage>;
    }

    #[async_trait]
    impl ScrutinyDetailReader for Repository {
        async fn get_scrutiny_details(
            &self,
            request: &RequestInfo,
            tenant_id: &TenantId,
            edcr_number: &EdcrNumber,
        ) -> RepositoryResult<ScrutinyDetails>;
    }

    #[async_trait]
    impl TenantReader for Repository {
        async fn get_tenant(
            &self,
            request: &RequestInfo,
            tenant_id: &TenantId,
        ) -> RepositoryResult<Option<Tenant>>;
    }

    #[async_trait]
    impl ApplicationReader for Repository {
        async fn get_application(
            &self,
            request: &RequestInfo,
            tenant_id: &TenantId,
            application_no: &ApplicationNumber,
        ) -> RepositoryResult<Option<BpaApplication>>;
    }

    #[async_trait]
    impl ApplicationWriter for Repository {
        async fn update_application(
            &self,
            request: &RequestInfo,
            tenant_id: &TenantId,
            application: &BpaApplication,
        ) -> RepositoryResult<BpaApplication>;
    }
}
