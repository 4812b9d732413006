//! Caller identity and tenant metadata supplied by upstream collaborators.

use serde::{Deserialize, Serialize};

use crate::domain::lenient::{Lenient, Scalar};

/// Kind of account issuing a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "EMPLOYEE")]
    Employee,
    #[serde(rename = "CITIZEN")]
    Citizen,
    #[serde(untagged)]
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl Role {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            tenant_id: None,
        }
    }
}

/// The authenticated user as reported by the identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub uuid: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl CurrentUser {
    /// Staff accounts see every application within their scope.
    pub fn is_staff(&self) -> bool {
        self.user_type == UserType::Employee
    }

    pub fn has_role_suffix(&self, suffix: &str) -> bool {
        self.roles.iter().any(|role| role.code.ends_with(suffix))
    }
}

/// Request envelope shared by every backend call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<CurrentUser>,
}

impl RequestInfo {
    pub fn for_user(user: CurrentUser) -> Self {
        Self {
            user_info: Some(user),
            ..Self::default()
        }
    }
}

/// Tenant master record; only the fields this service reads are typed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tenant {
    pub code: Scalar,
    pub city: Lenient<Option<City>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct City {
    pub planning_area_code: Scalar,
}

impl Tenant {
    pub fn planning_area_code(&self) -> Option<String> {
        self.city
            .0
            .as_ref()
            .and_then(|city| city.planning_area_code.truthy_text())
    }
}
