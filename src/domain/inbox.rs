//! Inbox filter state, backend search criteria and projected inbox rows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::lenient::{Lenient, LenientVec, Scalar};

/// Workflow module queried by the inbox.
pub const INBOX_MODULE_NAME: &str = "bpa-services";
/// Business services whose applications appear in the inbox.
pub const INBOX_BUSINESS_SERVICES: [&str; 3] = ["BPA_DA_MB", "BPA_DA_GP", "BPA_GMDA_GMC"];
pub const DEFAULT_SORT_BY: &str = "createdTime";
/// Placeholder shown for any row field the backend did not provide.
pub const NOT_AVAILABLE: &str = "NA";

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Multi-select filter panel selections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterForm {
    pub application_status: Vec<String>,
    pub district: Vec<String>,
    pub application_type: Option<String>,
}

/// Free-text search panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchForm {
    pub mobile_number: Option<String>,
    pub application_no: Option<String>,
    pub name: Option<String>,
}

/// Table sorting and pagination controls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableForm {
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Complete inbox UI state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub filter_form: FilterForm,
    pub search_form: SearchForm,
    pub table_form: TableForm,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSearchCriteria {
    pub assignee: String,
    pub module_name: String,
    pub business_service: Vec<String>,
}

/// Module-specific filters. Optional keys are omitted rather than sent empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_no: Option<String>,
    pub sort_order: SortOrder,
    pub sort_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub district: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
}

/// Criteria object posted to the inbox search backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub tenant_id: String,
    pub process_search_criteria: ProcessSearchCriteria,
    pub module_search_criteria: ModuleSearchCriteria,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning_area_code: Option<String>,
}

/// Page returned by the inbox search backend.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInboxPage {
    pub items: LenientVec<RawInboxItem>,
    pub status_map: Value,
    pub total_count: Scalar,
    pub nearing_sla_count: Scalar,
}

/// One backend record before it is classified.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawInboxItem {
    pub business_object: Lenient<Option<BusinessObject>>,
    #[serde(rename = "ProcessInstance")]
    pub process_instance: Lenient<Option<ProcessInstance>>,
}

/// Finalised application record.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessObject {
    pub application_no: Scalar,
    pub tenant_id: Scalar,
    pub status: Scalar,
    pub land_info: Lenient<LandInfo>,
    pub area_mapping: Lenient<Option<AreaMapping>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandInfo {
    pub owners: LenientVec<Owner>,
    pub owner_addresses: LenientVec<OwnerAddress>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Owner {
    pub name: Scalar,
    pub father_or_husband_name: Scalar,
    pub mobile_number: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OwnerAddress {
    pub locality: Scalar,
}

/// Administrative placement of the plot. Unknown keys are kept for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaMapping {
    #[serde(skip_serializing_if = "Scalar::is_missing")]
    pub ward: Scalar,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// In-flight workflow record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessInstance {
    #[serde(skip_serializing_if = "Scalar::is_missing")]
    pub business_id: Scalar,
    #[serde(skip_serializing_if = "Scalar::is_missing")]
    pub tenant_id: Scalar,
    #[serde(skip_serializing_if = "state_is_absent")]
    pub state: Lenient<Option<WorkflowState>>,
    /// Remaining SLA in milliseconds; the backend spells the key with three s.
    #[serde(
        rename = "businesssServiceSla",
        skip_serializing_if = "Scalar::is_missing"
    )]
    pub business_service_sla: Scalar,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn state_is_absent(state: &Lenient<Option<WorkflowState>>) -> bool {
    state.0.is_none()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowState {
    #[serde(skip_serializing_if = "Scalar::is_missing")]
    pub application_status: Scalar,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A backend inbox record, classified by which shape it carries.
#[derive(Clone, Debug, PartialEq)]
pub enum InboxRecord {
    /// Workflow processing produced a canonical business object. The process
    /// instance, when present, still supplies SLA and next actions.
    Final {
        business: BusinessObject,
        process: Option<ProcessInstance>,
    },
    /// Only the workflow record exists so far.
    InFlight(ProcessInstance),
    /// Neither shape was present.
    Unknown,
}

impl From<RawInboxItem> for InboxRecord {
    fn from(item: RawInboxItem) -> Self {
        match (item.business_object.0, item.process_instance.0) {
            (Some(business), process) => InboxRecord::Final { business, process },
            (None, Some(process)) => InboxRecord::InFlight(process),
            (None, None) => InboxRecord::Unknown,
        }
    }
}

impl InboxRecord {
    pub fn business(&self) -> Option<&BusinessObject> {
        match self {
            InboxRecord::Final { business, .. } => Some(business),
            _ => None,
        }
    }

    pub fn process(&self) -> Option<&ProcessInstance> {
        match self {
            InboxRecord::Final { process, .. } => process.as_ref(),
            InboxRecord::InFlight(process) => Some(process),
            InboxRecord::Unknown => None,
        }
    }

    fn first_owner(&self) -> Option<&Owner> {
        self.business().and_then(|b| b.land_info.owners.first())
    }

    /// Tries the business object first, then the process instance.
    fn resolve(
        &self,
        from_business: impl Fn(&BusinessObject) -> Option<String>,
        from_process: impl Fn(&ProcessInstance) -> Option<String>,
    ) -> Option<String> {
        self.business()
            .and_then(from_business)
            .or_else(|| self.process().and_then(from_process))
    }

    pub fn application_id(&self) -> String {
        self.resolve(
            |b| b.application_no.truthy_text(),
            |p| p.business_id.truthy_text(),
        )
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn owner_name(&self) -> String {
        self.first_owner()
            .map(|o| o.name.text_or(NOT_AVAILABLE))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn father_or_husband_name(&self) -> String {
        self.first_owner()
            .map(|o| o.father_or_husband_name.text_or(NOT_AVAILABLE))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn mobile_number(&self) -> String {
        self.first_owner()
            .map(|o| o.mobile_number.text_or(NOT_AVAILABLE))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn locality(&self) -> String {
        self.business()
            .and_then(|b| b.land_info.owner_addresses.first())
            .map(|a| a.locality.text_or(NOT_AVAILABLE))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn ward_no(&self) -> String {
        self.area_mapping()
            .map(|m| m.ward.text_or(NOT_AVAILABLE))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn status(&self) -> String {
        self.resolve(
            |b| b.status.truthy_text(),
            |p| {
                p.state
                    .0
                    .as_ref()
                    .and_then(|s| s.application_status.truthy_text())
            },
        )
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Remaining SLA in whole days, rounded half up.
    pub fn sla_days(&self) -> i64 {
        self.process()
            .and_then(|p| p.business_service_sla.as_f64())
            .filter(|ms| *ms != 0.0 && !ms.is_nan())
            .map(|ms| (ms / MILLIS_PER_DAY + 0.5).floor() as i64)
            .unwrap_or(0)
    }

    pub fn tenant_id(&self) -> Option<String> {
        self.resolve(|b| b.tenant_id.truthy_text(), |p| p.tenant_id.truthy_text())
    }

    pub fn area_mapping(&self) -> Option<&AreaMapping> {
        self.business().and_then(|b| b.area_mapping.0.as_ref())
    }
}

/// Flat row shown in the inbox table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxRow {
    pub application_id: String,
    pub name: String,
    pub father_or_husband_name: String,
    pub mobile_number: String,
    pub locality: String,
    pub ward_no: String,
    pub status: String,
    pub next_actions: Option<ProcessInstance>,
    pub sla: i64,
    pub tenant_id: Option<String>,
    pub area_mapping: Option<AreaMapping>,
}

impl From<&InboxRecord> for InboxRow {
    fn from(record: &InboxRecord) -> Self {
        Self {
            application_id: record.application_id(),
            name: record.owner_name(),
            father_or_husband_name: record.father_or_husband_name(),
            mobile_number: record.mobile_number(),
            locality: record.locality(),
            ward_no: record.ward_no(),
            status: record.status(),
            next_actions: record.process().cloned(),
            sla: record.sla_days(),
            tenant_id: record.tenant_id(),
            area_mapping: record.area_mapping().cloned(),
        }
    }
}

/// Projected inbox page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxPage {
    pub statuses: Value,
    pub table: Vec<InboxRow>,
    pub total_count: Option<u64>,
    pub nearing_sla_count: Option<u64>,
}
