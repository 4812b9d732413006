//! Flat report forms derived from an EDCR document.

use serde::Serialize;

use crate::domain::lenient::Scalar;

/// Area, coverage and FAR statement.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form22 {
    pub plot_area: String,
    pub existing_plinth_area: String,
    pub proposed_plinth_area: String,
    pub floor_area_calculation: Vec<FloorAreaRow>,
    pub mezzanine_floor_area: String,
    pub deduction_calculation: f64,
    pub total_floor_area_after_deduction: Vec<FloorTotalRow>,
    pub total_floor_area_before_deduction: Vec<FloorTotalRow>,
    pub coverage: String,
    pub floor_area_ratio: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorAreaRow {
    pub floor: String,
    pub built_up_area: String,
    pub existing_floor_area: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FloorTotalRow {
    pub floor: String,
    pub area: String,
}

/// Classification, fees, setbacks and parking statement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form23A {
    pub classification_of_proposal: String,
    pub revenue_village: String,
    pub mouza: String,
    pub dag_no: String,
    pub patta_no: String,
    pub site_plan_area: String,
    pub land_document_area: String,
    pub building_height: String,
    #[serde(rename = "heightofPlinth")]
    pub height_of_plinth: String,
    pub permit_fee: String,
    pub city_infrastructure_charges: String,
    pub additional_floor_space_charges: String,
    pub peripheral_charges: String,
    pub other_charges: String,
    pub total_amount: String,
    pub receipt_no: String,
    pub date_value: String,
    pub road_facing_plot: Vec<RoadFacingRow>,
    pub principal_bylaws: Vec<BylawRow>,
    pub setbacks: Vec<SetbackRow>,
    pub ducts: Vec<DuctRow>,
    pub electric_line: Vec<ElectricLineRow>,
    pub parking_provided: Vec<ParkingProvidedRow>,
    pub parking_required: Vec<ParkingRequiredRow>,
    pub visitors_parking: Vec<VisitorsParkingRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadFacingRow {
    pub existing_width: String,
    pub proposed_width: String,
    pub remarks: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BylawRow {
    pub desc: String,
    pub proposed: String,
    #[serde(rename = "use")]
    pub usage: String,
    pub permissible: String,
    pub carpet_area: String,
    pub remarks: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetbackRow {
    pub side: String,
    pub clear: String,
    pub cantilever: String,
    pub req_clear: String,
    pub req_cantilever: String,
    pub remarks: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DuctRow {
    pub no: String,
    pub area: String,
    pub width: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricLineRow {
    pub nature: String,
    pub vertical_distance: String,
    pub horizontal_distance: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParkingProvidedRow {
    pub open: String,
    pub stilt: String,
    pub basement: String,
    pub total: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParkingRequiredRow {
    #[serde(rename = "type")]
    pub kind: String,
    pub car: String,
    pub scooter: String,
    pub remarks: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VisitorsParkingRow {
    #[serde(rename = "type")]
    pub kind: String,
    pub car: String,
    pub scooter: String,
}

/// Purpose, utilities and sanitary statement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form23B {
    pub purpose: String,
    pub no_of_inhabitants: String,
    pub water_source: String,
    pub distance_from_sewer: String,
    pub materials: String,
    pub architect_name: String,
    pub registration_number: String,
    pub architect_address: String,
    pub dwelling_unit_size: String,
    pub construction_valid_upto: Option<String>,
    pub lease_extension_upto: Option<String>,
    pub floors: Vec<FloorListingRow>,
    pub sanitary_details: Vec<SanitaryRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FloorListingRow {
    pub label: String,
    pub existing: String,
    pub proposed: String,
    pub total: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SanitaryRow {
    pub description: String,
    /// Count exactly as the scrutiny document reports it; absent counts are 0.
    pub total: Scalar,
}

/// The three forms derived from one EDCR document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScrutinyReport {
    pub form22: Form22,
    #[serde(rename = "form23A")]
    pub form23a: Form23A,
    #[serde(rename = "form23B")]
    pub form23b: Form23B,
}
