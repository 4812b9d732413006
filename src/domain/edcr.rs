//! EDCR scrutiny detail document as returned by the scrutiny service.
//!
//! Only the paths the report forms read are typed. Every field is optional
//! and every container tolerates the wrong JSON shape, so deserialization of
//! a well-formed JSON document never fails.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::lenient::{Lenient, LenientVec, Scalar};

/// Response of the scrutiny detail lookup.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrutinyDetails {
    /// `null` or malformed records stay `None`, distinct from an empty `{}`.
    pub edcr_detail: LenientVec<Option<EdcrDetail>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdcrDetail {
    pub plan_detail: Lenient<PlanDetail>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanDetail {
    pub plan_information: Lenient<PlanInformation>,
    pub plan_info_properties: Lenient<HashMap<String, Scalar>>,
    pub blocks: LenientVec<Block>,
    pub existing_plinth_area: Scalar,
    pub mezzanine_floor_area: Scalar,
    pub coverage: Scalar,
    pub far_details: Lenient<FarDetails>,
    pub electric_line: LenientVec<ElectricLine>,
    pub report_output: Lenient<ReportOutput>,
    pub no_of_inhabitants: Scalar,
    pub water_source: Scalar,
    pub distance_from_sewer: Scalar,
    pub materials: Scalar,
    pub architect_name: Scalar,
    pub registration_number: Scalar,
    pub architect_address: Scalar,
    pub dwelling_unit_size: Scalar,
    pub construction_valid_upto: Scalar,
    pub lease_extension_upto: Scalar,
    pub total_urinals: Scalar,
    pub total_bathrooms: Scalar,
    pub total_latrines: Scalar,
    pub total_kitchens: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanInformation {
    pub plot_area: Scalar,
    pub occupancy: Scalar,
    pub road_width: Scalar,
    pub revenue_village: Scalar,
    pub mouza: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FarDetails {
    pub provided_far: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Block {
    pub building: Lenient<Building>,
    pub set_backs: LenientVec<SetBack>,
    pub plinth_height: LenientVec<Scalar>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Building {
    pub floors: LenientVec<Floor>,
    pub total_area: LenientVec<TotalArea>,
    pub coverage_area: Scalar,
    pub total_floor_area: Scalar,
    pub building_height: Scalar,
    pub ducts: LenientVec<Duct>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Floor {
    pub number: Scalar,
    pub name: Scalar,
    pub existing_floor_area: Scalar,
    pub occupancies: LenientVec<Occupancy>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Occupancy {
    pub built_up_area: Scalar,
    pub floor_area: Scalar,
    pub proposed: Scalar,
    pub total: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TotalArea {
    pub deduction: Scalar,
    pub existing_deduction: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Duct {
    pub no: Scalar,
    pub area: Scalar,
    pub width: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SetBack {
    pub building_foot_print: Lenient<Yard>,
    pub front_yard: Lenient<Yard>,
    pub rear_yard: Lenient<Yard>,
    #[serde(rename = "sideYard1")]
    pub side_yard1: Lenient<Yard>,
    #[serde(rename = "sideYard2")]
    pub side_yard2: Lenient<Yard>,
}

/// Any measured region carrying an area.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Yard {
    pub area: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElectricLine {
    pub nature: Scalar,
    pub vertical_distance: Scalar,
    pub horizontal_distance: Scalar,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportOutput {
    pub scrutiny_details: LenientVec<ScrutinyDetail>,
}

/// One rule section of the scrutiny report, e.g. `Common_Parking`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrutinyDetail {
    pub key: Scalar,
    pub detail: LenientVec<RuleDetail>,
}

/// A single rule row. The scrutiny service uses capitalised keys here.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuleDetail {
    #[serde(rename = "Description")]
    pub description: Scalar,
    #[serde(rename = "Provided")]
    pub provided: Scalar,
    #[serde(rename = "Required")]
    pub required: Scalar,
}

impl PlanDetail {
    /// The report forms only describe the first block.
    pub fn first_block(&self) -> Option<&Block> {
        self.blocks.first()
    }

    pub fn floors(&self) -> &[Floor] {
        self.first_block()
            .map(|block| block.building.floors.0.as_slice())
            .unwrap_or(&[])
    }

    /// Details of the scrutiny section with the given key.
    pub fn scrutiny_section(&self, key: &str) -> Option<&ScrutinyDetail> {
        self.report_output
            .scrutiny_details
            .iter()
            .find(|section| section.key.text() == key)
    }
}

impl Floor {
    pub fn first_occupancy(&self) -> Option<&Occupancy> {
        self.occupancies.first()
    }
}
