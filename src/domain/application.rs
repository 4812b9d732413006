//! Building permit application records and workflow transitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::lenient::{Lenient, Scalar};

/// BPA application as stored by the permit service. Only the keys this
/// service touches are typed; everything else is carried through unchanged
/// so an update never drops data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BpaApplication {
    #[serde(skip_serializing_if = "Scalar::is_missing")]
    pub application_no: Scalar,
    #[serde(skip_serializing_if = "Scalar::is_missing")]
    pub tenant_id: Scalar,
    #[serde(skip_serializing_if = "Scalar::is_missing")]
    pub status: Scalar,
    #[serde(skip_serializing_if = "workflow_is_absent")]
    pub workflow: Lenient<Option<Workflow>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn workflow_is_absent(workflow: &Lenient<Option<Workflow>>) -> bool {
    workflow.0.is_none()
}

/// Transition requested on an application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workflow {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Assignee uuids; the backend spells the key `assignes`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignes: Vec<String>,
}

impl BpaApplication {
    pub fn with_workflow(mut self, workflow: Workflow) -> Self {
        self.workflow = Lenient(Some(workflow));
        self
    }
}
