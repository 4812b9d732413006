use crate::domain::application::BpaApplication;
use crate::domain::types::{ApplicationNumber, TenantId};
use crate::domain::user::RequestInfo;
use crate::forms::application::{WorkflowActionForm, WorkflowActionPayload};
use crate::repository::{ApplicationReader, ApplicationWriter};
use crate::services::{ServiceError, ServiceResult};

fn ensure_user(request: &RequestInfo) -> ServiceResult<()> {
    match request.user_info {
        Some(_) => Ok(()),
        None => Err(ServiceError::Unauthorized),
    }
}

/// Loads a single BPA application for the details page.
pub async fn load_application<R>(
    repo: &R,
    request: &RequestInfo,
    tenant_id: &TenantId,
    application_no: &ApplicationNumber,
) -> ServiceResult<BpaApplication>
where
    R: ApplicationReader + ?Sized,
{
    ensure_user(request)?;

    repo.get_application(request, tenant_id, application_no)
        .await
        .map_err(|err| {
            log::error!("Failed to load application {application_no}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Attaches the requested workflow transition to the application and submits
/// the update.
pub async fn apply_workflow_action<R>(
    repo: &R,
    request: &RequestInfo,
    tenant_id: &TenantId,
    form: WorkflowActionForm,
) -> ServiceResult<BpaApplication>
where
    R: ApplicationReader + ApplicationWriter + ?Sized,
{
    ensure_user(request)?;

    let payload = WorkflowActionPayload::try_from(form)?;

    let application = load_application(repo, request, tenant_id, &payload.application_no).await?;
    let action = payload.workflow.action.clone();
    let application = application.with_workflow(payload.workflow);

    let updated = repo
        .update_application(request, tenant_id, &application)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to apply {action} to application {}: {err}",
                payload.application_no
            );
            err
        })?;

    log::info!("Applied {action} to application {}", payload.application_no);

    Ok(updated)
}
