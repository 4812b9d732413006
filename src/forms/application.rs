//! Workflow action form for a single application.

use serde::Deserialize;
use validator::Validate;

use crate::domain::application::Workflow;
use crate::domain::types::ApplicationNumber;
use crate::forms::{FormError, trimmed};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
/// Transition requested by a reviewer or the applicant.
pub struct WorkflowActionForm {
    /// Application the action applies to.
    pub application_no: String,
    /// Workflow action code, e.g. `FORWARD` or `APPROVE`.
    #[validate(length(min = 1, max = 64))]
    pub action: String,
    #[validate(length(max = 1024))]
    pub comment: Option<String>,
    /// Uuids of the employees the application is assigned to next.
    #[validate(length(max = 16))]
    pub assignees: Vec<String>,
}

/// Validated workflow action.
#[derive(Debug, PartialEq)]
pub struct WorkflowActionPayload {
    pub application_no: ApplicationNumber,
    pub workflow: Workflow,
}

impl TryFrom<WorkflowActionForm> for WorkflowActionPayload {
    type Error = FormError;

    fn try_from(form: WorkflowActionForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let application_no = ApplicationNumber::new(form.application_no)
            .map_err(|_| FormError::InvalidApplicationNumber)?;
        let action = trimmed(Some(form.action))
            .filter(|action| !action.contains(char::is_whitespace))
            .ok_or(FormError::InvalidAction)?;

        Ok(Self {
            application_no,
            workflow: Workflow {
                action,
                comments: trimmed(form.comment),
                assignes: form
                    .assignees
                    .into_iter()
                    .filter_map(|uuid| trimmed(Some(uuid)))
                    .collect(),
            },
        })
    }
}
