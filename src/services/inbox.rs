//! Inbox query normalization and result projection.

use crate::domain::inbox::{
    DEFAULT_SORT_BY, FilterState, INBOX_BUSINESS_SERVICES, INBOX_MODULE_NAME, InboxPage,
    InboxRecord, InboxRow, ModuleSearchCriteria, ProcessSearchCriteria, RawInboxPage,
    SearchCriteria,
};
use crate::domain::lenient::Scalar;
use crate::domain::types::TenantId;
use crate::domain::user::{CurrentUser, RequestInfo, Tenant};
use crate::repository::{InboxSearcher, TenantReader};
use crate::services::{ServiceError, ServiceResult};

/// Tenants of development authorities carry this suffix.
const DEVELOPMENT_AUTHORITY_TENANT_SUFFIX: &str = "da";
/// Roles scoped to a development authority carry this suffix.
const DEVELOPMENT_AUTHORITY_ROLE_SUFFIX: &str = "_DA";

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_empty_codes(codes: &[String]) -> Vec<String> {
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether searches by this user on this tenant are scoped to a planning
/// area.
pub fn is_planning_area_scoped(tenant_id: &TenantId, user: &CurrentUser) -> bool {
    tenant_id.ends_with(DEVELOPMENT_AUTHORITY_TENANT_SUFFIX)
        && user.has_role_suffix(DEVELOPMENT_AUTHORITY_ROLE_SUFFIX)
        && user.is_staff()
}

/// Builds the backend search criteria from the inbox UI state.
pub fn normalize_inbox_query(
    tenant_id: &TenantId,
    filters: &FilterState,
    user: &CurrentUser,
    tenant: Option<&Tenant>,
) -> SearchCriteria {
    let search = &filters.search_form;
    let table = &filters.table_form;
    let application_no = non_empty(&search.application_no);

    let assignee = if user.is_staff() {
        String::new()
    } else {
        user.uuid.clone()
    };

    let planning_area_code = if is_planning_area_scoped(tenant_id, user) {
        tenant.and_then(Tenant::planning_area_code)
    } else {
        None
    };

    // Searching by application number is never paginated.
    let offset = if application_no.is_some() {
        None
    } else {
        table.offset
    };

    SearchCriteria {
        tenant_id: tenant_id.to_string(),
        process_search_criteria: ProcessSearchCriteria {
            assignee,
            module_name: INBOX_MODULE_NAME.to_string(),
            business_service: INBOX_BUSINESS_SERVICES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        module_search_criteria: ModuleSearchCriteria {
            mobile_number: non_empty(&search.mobile_number),
            name: non_empty(&search.name),
            application_no,
            sort_order: table.sort_order.unwrap_or_default(),
            sort_by: non_empty(&table.sort_by).unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
            application_type: non_empty(&filters.filter_form.application_type),
            district: non_empty_codes(&filters.filter_form.district),
            status: non_empty_codes(&filters.filter_form.application_status),
        },
        limit: table.limit,
        offset,
        planning_area_code,
    }
}

fn count(value: &Scalar) -> Option<u64> {
    value.as_i64().and_then(|n| u64::try_from(n).ok())
}

/// Projects a raw backend page into flat inbox rows.
pub fn project_inbox_page(raw: RawInboxPage) -> InboxPage {
    let table = raw
        .items
        .0
        .into_iter()
        .map(InboxRecord::from)
        .map(|record| InboxRow::from(&record))
        .collect();

    InboxPage {
        statuses: raw.status_map,
        table,
        total_count: count(&raw.total_count),
        nearing_sla_count: count(&raw.nearing_sla_count),
    }
}

/// Runs an inbox search for the user carried by `request`.
pub async fn load_inbox<R>(
    repo: &R,
    request: &RequestInfo,
    tenant_id: &TenantId,
    filters: &FilterState,
) -> ServiceResult<InboxPage>
where
    R: InboxSearcher + TenantReader + ?Sized,
{
    let Some(user) = request.user_info.as_ref() else {
        return Err(ServiceError::Unauthorized);
    };

    let tenant = if is_planning_area_scoped(tenant_id, user) {
        repo.get_tenant(request, tenant_id).await.map_err(|err| {
            log::error!("Failed to load tenant {tenant_id}: {err}");
            err
        })?
    } else {
        None
    };

    let criteria = normalize_inbox_query(tenant_id, filters, user, tenant.as_ref());

    let raw = repo
        .search_inbox(request, tenant_id, &criteria)
        .await
        .map_err(|err| {
            log::error!("Failed to search inbox for {tenant_id}: {err}");
            err
        })?;

    Ok(project_inbox_page(raw))
}
