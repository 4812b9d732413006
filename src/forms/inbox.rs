//! Inbox search form posted by the portal.

use serde::Deserialize;
use validator::Validate;

use crate::domain::inbox::{FilterForm, FilterState, SearchForm, SortOrder, TableForm};
use crate::domain::types::MobileNumber;
use crate::forms::{FormError, trimmed};

/// Largest page the inbox may request.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct InboxSearchForm {
    #[validate(nested)]
    pub filter_form: InboxFilterFields,
    #[validate(nested)]
    pub search_form: InboxSearchFields,
    #[validate(nested)]
    pub table_form: InboxTableFields,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct InboxFilterFields {
    #[validate(length(max = 32))]
    pub application_status: Vec<String>,
    #[validate(length(max = 64))]
    pub district: Vec<String>,
    #[validate(length(max = 64))]
    pub application_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct InboxSearchFields {
    pub mobile_number: Option<String>,
    #[validate(length(max = 64))]
    pub application_no: Option<String>,
    #[validate(length(max = 128))]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct InboxTableFields {
    #[validate(length(max = 64))]
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub offset: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

fn non_empty_codes(codes: Vec<String>) -> Vec<String> {
    codes
        .into_iter()
        .filter_map(|code| trimmed(Some(code)))
        .collect()
}

impl TryFrom<InboxSearchForm> for FilterState {
    type Error = FormError;

    fn try_from(form: InboxSearchForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let InboxSearchForm {
            filter_form,
            search_form,
            table_form,
        } = form;

        let mobile_number = trimmed(search_form.mobile_number)
            .map(|number| {
                MobileNumber::new(number)
                    .map(MobileNumber::into_inner)
                    .map_err(|_| FormError::InvalidMobileNumber)
            })
            .transpose()?;

        Ok(FilterState {
            filter_form: FilterForm {
                application_status: non_empty_codes(filter_form.application_status),
                district: non_empty_codes(filter_form.district),
                application_type: trimmed(filter_form.application_type),
            },
            search_form: SearchForm {
                mobile_number,
                application_no: trimmed(search_form.application_no),
                name: trimmed(search_form.name),
            },
            table_form: TableForm {
                sort_by: trimmed(table_form.sort_by),
                sort_order: table_form.sort_order,
                offset: table_form.offset,
                limit: table_form.limit,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form(value: serde_json::Value) -> InboxSearchForm {
        serde_json::from_value(value).expect("form should deserialize")
    }

    #[test]
    fn empty_body_gives_default_state() {
        let state = FilterState::try_from(form(json!({}))).unwrap();

        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn search_fields_are_trimmed() {
        let state = FilterState::try_from(form(json!({
            "searchForm": {
                "mobileNumber": " 9876543210 ",
                "applicationNo": "  BPA-1 ",
                "name": " Ram Das "
            },
            "filterForm": {"applicationStatus": ["INPROGRESS", " "], "applicationType": ""},
            "tableForm": {"sortOrder": "ASC", "limit": 10, "offset": 20}
        })))
        .unwrap();

        assert_eq!(state.search_form.mobile_number.as_deref(), Some("9876543210"));
        assert_eq!(state.search_form.application_no.as_deref(), Some("BPA-1"));
        assert_eq!(state.search_form.name.as_deref(), Some("Ram Das"));
        assert_eq!(state.filter_form.application_status, vec!["INPROGRESS"]);
        assert_eq!(state.filter_form.application_type, None);
        assert_eq!(state.table_form.sort_order, Some(SortOrder::Asc));
        assert_eq!(state.table_form.limit, Some(10));
    }

    #[test]
    fn owner_name_is_sent_verbatim() {
        for name in ["Das & Sons", "A<B Builders", "<b>Ram</b>"] {
            let state = FilterState::try_from(form(json!({
                "searchForm": {"name": format!("  {name} ")}
            })))
            .unwrap();

            assert_eq!(state.search_form.name.as_deref(), Some(name));
        }
    }

    #[test]
    fn short_mobile_number_is_rejected() {
        let result = FilterState::try_from(form(json!({
            "searchForm": {"mobileNumber": "98765"}
        })));

        assert!(matches!(result, Err(FormError::InvalidMobileNumber)));
    }

    #[test]
    fn blank_mobile_number_is_ignored() {
        let state = FilterState::try_from(form(json!({
            "searchForm": {"mobileNumber": "   "}
        })))
        .unwrap();

        assert_eq!(state.search_form.mobile_number, None);
    }

    #[test]
    fn page_size_is_bounded() {
        for limit in [0, MAX_PAGE_SIZE + 1] {
            let result = FilterState::try_from(form(json!({"tableForm": {"limit": limit}})));
            assert!(matches!(result, Err(FormError::Validation(_))), "limit {limit}");
        }
        assert!(FilterState::try_from(form(json!({"tableForm": {"limit": MAX_PAGE_SIZE}}))).is_ok());
    }
}
