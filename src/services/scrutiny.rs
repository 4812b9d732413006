//! Scrutiny report projection and its fetch lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::domain::edcr::{
    Block, Building, Floor, Occupancy, PlanDetail, RuleDetail, ScrutinyDetails, SetBack,
};
use crate::domain::lenient::Scalar;
use crate::domain::scrutiny::{
    BylawRow, DuctRow, ElectricLineRow, FloorAreaRow, FloorListingRow, FloorTotalRow, Form22,
    Form23A, Form23B, ParkingProvidedRow, ParkingRequiredRow, RoadFacingRow, SanitaryRow,
    ScrutinyReport, SetbackRow, VisitorsParkingRow,
};
use crate::domain::types::{EdcrNumber, TenantId};
use crate::domain::user::RequestInfo;
use crate::repository::ScrutinyDetailReader;
use crate::services::{ServiceError, ServiceResult};

const PARKING_SECTION_KEY: &str = "Common_Parking";
const OPEN_PARKING: &str = "open parking";
const CAR_PARKING: &str = "car parking";
const DAG_NUMBER_PROPERTY: &str = "DAG NO";
const RESIDENTIAL: &str = "Residential";

/// The scrutiny service returned no detail record for the EDCR number.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("scrutiny details contain no EDCR record")]
pub struct MissingDetail;

impl From<MissingDetail> for ServiceError {
    fn from(_: MissingDetail) -> Self {
        ServiceError::NotFound
    }
}

/// Projects the first EDCR record of `details` into the three report forms.
pub fn project_scrutiny_report(details: &ScrutinyDetails) -> Result<ScrutinyReport, MissingDetail> {
    let detail = details
        .edcr_detail
        .first()
        .and_then(Option::as_ref)
        .ok_or(MissingDetail)?;
    let plan = &*detail.plan_detail;

    Ok(ScrutinyReport {
        form22: project_form22(plan),
        form23a: project_form23a(plan),
        form23b: project_form23b(plan),
    })
}

fn first_block(plan: &PlanDetail) -> Block {
    plan.first_block().cloned().unwrap_or_default()
}

fn first_setback(block: &Block) -> SetBack {
    block.set_backs.first().cloned().unwrap_or_default()
}

fn first_occupancy_text(floor: &Floor, read: impl Fn(&Occupancy) -> &Scalar) -> String {
    floor
        .first_occupancy()
        .map(|occupancy| read(occupancy).text())
        .unwrap_or_default()
}

/// Positional label used by Form22.
fn positional_label(index: usize) -> String {
    format!("Floor {}", index + 1)
}

/// Deduction and existing deduction of the first total-area entry, each
/// read as zero when absent.
fn deduction(building: &Building) -> f64 {
    building
        .total_area
        .first()
        .map(|total| {
            total.deduction.as_f64().unwrap_or(0.0)
                + total.existing_deduction.as_f64().unwrap_or(0.0)
        })
        .unwrap_or(0.0)
}

pub fn project_form22(plan: &PlanDetail) -> Form22 {
    let block = first_block(plan);
    let building = &*block.building;
    let floors = plan.floors();

    let floor_area_calculation = floors
        .iter()
        .enumerate()
        .map(|(i, floor)| FloorAreaRow {
            floor: positional_label(i),
            built_up_area: first_occupancy_text(floor, |o| &o.built_up_area),
            existing_floor_area: floor.existing_floor_area.text(),
        })
        .collect();

    let total_floor_area_before_deduction = floors
        .iter()
        .enumerate()
        .map(|(i, floor)| FloorTotalRow {
            floor: positional_label(i),
            area: first_occupancy_text(floor, |o| &o.built_up_area),
        })
        .collect();

    let total_floor_area_after_deduction = floors
        .iter()
        .enumerate()
        .map(|(i, floor)| FloorTotalRow {
            floor: positional_label(i),
            area: first_occupancy_text(floor, |o| &o.floor_area),
        })
        .collect();

    Form22 {
        plot_area: plan.plan_information.plot_area.text(),
        existing_plinth_area: plan.existing_plinth_area.text(),
        proposed_plinth_area: first_setback(&block).building_foot_print.area.text(),
        floor_area_calculation,
        mezzanine_floor_area: plan.mezzanine_floor_area.text(),
        deduction_calculation: deduction(building),
        total_floor_area_after_deduction,
        total_floor_area_before_deduction,
        coverage: plan.coverage.text(),
        floor_area_ratio: plan.far_details.provided_far.text(),
    }
}

fn bylaw(desc: impl Into<String>, proposed: String, usage: String) -> BylawRow {
    BylawRow {
        desc: desc.into(),
        proposed,
        usage,
        ..BylawRow::default()
    }
}

fn principal_bylaws(plan: &PlanDetail, building: &Building) -> Vec<BylawRow> {
    let occupancy = plan.plan_information.occupancy.text();

    let mut rows = vec![bylaw(
        "Max Ground Coverage",
        building.coverage_area.text(),
        occupancy.clone(),
    )];
    rows.extend(plan.floors().iter().enumerate().map(|(i, floor)| {
        let number = floor
            .number
            .present_text()
            .unwrap_or_else(|| (i + 1).to_string());
        bylaw(
            format!("Floor {number}"),
            first_occupancy_text(floor, |o| &o.built_up_area),
            occupancy.clone(),
        )
    }));
    rows.push(bylaw(
        "Total floor area",
        building.total_floor_area.text(),
        occupancy,
    ));
    rows.push(bylaw(
        "Floor Area Ratio",
        plan.far_details.provided_far.text(),
        String::new(),
    ));
    rows.push(bylaw("No. of Dwelling units", String::new(), String::new()));
    rows
}

fn setbacks(setback: &SetBack) -> Vec<SetbackRow> {
    [
        ("Front", &setback.front_yard),
        ("Rear", &setback.rear_yard),
        ("Left", &setback.side_yard1),
        ("Right", &setback.side_yard2),
    ]
    .into_iter()
    .map(|(side, yard)| SetbackRow {
        side: side.to_string(),
        clear: yard.area.text(),
        ..SetbackRow::default()
    })
    .collect()
}

/// Returns `rows`, or a single default row when there are none.
fn or_placeholder<T: Default>(rows: Vec<T>) -> Vec<T> {
    if rows.is_empty() {
        vec![T::default()]
    } else {
        rows
    }
}

fn parking_rows<T: Default>(
    plan: &PlanDetail,
    description: &str,
    build: impl Fn(&RuleDetail) -> T,
) -> Vec<T> {
    let rows: Vec<T> = plan
        .scrutiny_section(PARKING_SECTION_KEY)
        .map(|section| {
            section
                .detail
                .iter()
                .filter(|d| d.description.text().to_lowercase().contains(description))
                .map(&build)
                .collect()
        })
        .unwrap_or_default();
    or_placeholder(rows)
}

pub fn project_form23a(plan: &PlanDetail) -> Form23A {
    let block = first_block(plan);
    let building = &*block.building;
    let info = &*plan.plan_information;

    let ducts = building
        .ducts
        .iter()
        .map(|duct| DuctRow {
            no: duct.no.text(),
            area: duct.area.text(),
            width: duct.width.text(),
        })
        .collect();

    let electric_line = plan
        .electric_line
        .iter()
        .map(|line| ElectricLineRow {
            nature: line.nature.text(),
            vertical_distance: line.vertical_distance.text(),
            horizontal_distance: line.horizontal_distance.text(),
        })
        .collect();

    let parking_provided = parking_rows(plan, OPEN_PARKING, |d| ParkingProvidedRow {
        open: d.provided.text(),
        ..ParkingProvidedRow::default()
    });

    let parking_required = parking_rows(plan, CAR_PARKING, |d| ParkingRequiredRow {
        kind: RESIDENTIAL.to_string(),
        car: d.required.text(),
        ..ParkingRequiredRow::default()
    });

    Form23A {
        revenue_village: info.revenue_village.text(),
        mouza: info.mouza.text(),
        dag_no: plan
            .plan_info_properties
            .get(DAG_NUMBER_PROPERTY)
            .map(Scalar::text)
            .unwrap_or_default(),
        site_plan_area: info.plot_area.text(),
        building_height: building.building_height.text(),
        height_of_plinth: block
            .plinth_height
            .first()
            .map(Scalar::text)
            .unwrap_or_default(),
        road_facing_plot: vec![RoadFacingRow {
            existing_width: info.road_width.text(),
            ..RoadFacingRow::default()
        }],
        principal_bylaws: principal_bylaws(plan, building),
        setbacks: setbacks(&first_setback(&block)),
        ducts: or_placeholder(ducts),
        electric_line: or_placeholder(electric_line),
        parking_provided,
        parking_required,
        visitors_parking: vec![VisitorsParkingRow::default()],
        ..Form23A::default()
    }
}

/// Listing label: the floor name, else its source number, else position.
fn listing_label(index: usize, floor: &Floor) -> String {
    floor.name.truthy_text().unwrap_or_else(|| {
        let number = floor
            .number
            .present_text()
            .unwrap_or_else(|| (index + 1).to_string());
        format!("Floor {number}")
    })
}

fn sanitary(description: &str, total: &Scalar) -> SanitaryRow {
    SanitaryRow {
        description: description.to_string(),
        total: if total.is_missing() {
            Scalar::new(0)
        } else {
            total.clone()
        },
    }
}

pub fn project_form23b(plan: &PlanDetail) -> Form23B {
    let floors = plan
        .floors()
        .iter()
        .enumerate()
        .map(|(i, floor)| {
            let occupancy = floor.first_occupancy().cloned().unwrap_or_default();
            FloorListingRow {
                label: listing_label(i, floor),
                existing: occupancy.built_up_area.text(),
                proposed: occupancy.proposed.text(),
                total: occupancy.total.text(),
            }
        })
        .collect();

    Form23B {
        purpose: plan.plan_information.occupancy.text(),
        no_of_inhabitants: plan.no_of_inhabitants.text(),
        water_source: plan.water_source.text(),
        distance_from_sewer: plan.distance_from_sewer.text(),
        materials: plan.materials.text(),
        architect_name: plan.architect_name.text(),
        registration_number: plan.registration_number.text(),
        architect_address: plan.architect_address.text(),
        dwelling_unit_size: plan.dwelling_unit_size.text(),
        construction_valid_upto: plan.construction_valid_upto.truthy_text(),
        lease_extension_upto: plan.lease_extension_upto.truthy_text(),
        floors,
        sanitary_details: vec![
            sanitary("NUMBER OF URINALS", &plan.total_urinals),
            sanitary("NUMBER OF BATHROOMS", &plan.total_bathrooms),
            sanitary("NUMBER OF LATRINES", &plan.total_latrines),
            sanitary("NUMBER OF KITCHENS", &plan.total_kitchens),
        ],
    }
}

/// Fetches the scrutiny details for `edcr_number` and projects them.
pub async fn load_scrutiny_report<R>(
    repo: &R,
    request: &RequestInfo,
    tenant_id: &TenantId,
    edcr_number: &EdcrNumber,
) -> ServiceResult<ScrutinyReport>
where
    R: ScrutinyDetailReader + ?Sized,
{
    let details = repo
        .get_scrutiny_details(request, tenant_id, edcr_number)
        .await
        .map_err(|err| {
            log::error!("Failed to fetch scrutiny details for {edcr_number}: {err}");
            err
        })?;

    project_scrutiny_report(&details).map_err(|err| {
        log::warn!("Scrutiny details for {edcr_number} have no EDCR record");
        ServiceError::from(err)
    })
}

/// Why the latest scrutiny load produced no report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrutinyFailure {
    /// The backend call failed.
    Fetch(String),
    /// The backend answered without an EDCR record.
    MissingDetail,
}

/// Observable state of a [`ScrutinyReportLoader`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrutinyState {
    pub loading: bool,
    pub error: Option<ScrutinyFailure>,
    pub report: Option<ScrutinyReport>,
}

/// Holds the latest scrutiny report for one view.
///
/// Every call to [`load`](Self::load) or [`invalidate`](Self::invalidate)
/// supersedes the fetches already in flight: their results are dropped and
/// never reach the state.
#[derive(Debug, Default)]
pub struct ScrutinyReportLoader {
    generation: AtomicU64,
    state: Mutex<ScrutinyState>,
}

impl ScrutinyReportLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScrutinyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ScrutinyState {
        self.lock().clone()
    }

    /// Marks every in-flight fetch stale, e.g. when the inputs change or the
    /// view goes away.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.lock().loading = false;
    }

    /// Loads the report and applies it unless superseded meanwhile.
    /// Returns whether the result was applied.
    pub async fn load<R>(
        &self,
        repo: &R,
        request: &RequestInfo,
        tenant_id: &TenantId,
        edcr_number: &EdcrNumber,
    ) -> bool
    where
        R: ScrutinyDetailReader + ?Sized,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock().loading = true;

        let fetched = repo.get_scrutiny_details(request, tenant_id, edcr_number).await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("Discarding stale scrutiny details for {edcr_number}");
            return false;
        }

        match fetched {
            Ok(details) => match project_scrutiny_report(&details) {
                Ok(report) => {
                    state.report = Some(report);
                    state.error = None;
                }
                Err(MissingDetail) => {
                    log::warn!("Scrutiny details for {edcr_number} have no EDCR record");
                    state.error = Some(ScrutinyFailure::MissingDetail);
                }
            },
            Err(err) => {
                log::error!("Failed to fetch scrutiny details for {edcr_number}: {err}");
                state.error = Some(ScrutinyFailure::Fetch(err.to_string()));
            }
        }
        state.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use serde_json::{Value, json};

    use super::*;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::MockRepository;

    fn details(value: Value) -> ScrutinyDetails {
        serde_json::from_value(value).expect("details should deserialize")
    }

    fn sample() -> ScrutinyDetails {
        details(json!({
            "edcrDetail": [{
                "planDetail": {
                    "planInformation": {
                        "plotArea": 250.5,
                        "occupancy": "Residential",
                        "roadWidth": 6,
                        "revenueVillage": "Beltola",
                        "mouza": "Beltola"
                    },
                    "planInfoProperties": {"DAG NO": "123"},
                    "existingPlinthArea": 0,
                    "coverage": 48.2,
                    "farDetails": {"providedFar": 1.25},
                    "blocks": [{
                        "building": {
                            "coverageArea": 120.0,
                            "totalFloorArea": 240,
                            "buildingHeight": 7.5,
                            "totalArea": [{"deduction": 4.5, "existingDeduction": null}],
                            "floors": [
                                {"number": 0, "name": "Ground Floor", "existingFloorArea": 0,
                                 "occupancies": [{"builtUpArea": 120, "floorArea": 115.5,
                                                  "proposed": 120, "total": 120}]},
                                {"number": 1,
                                 "occupancies": [{"builtUpArea": 120, "floorArea": 120}]}
                            ]
                        },
                        "setBacks": [{
                            "buildingFootPrint": {"area": 120},
                            "frontYard": {"area": 3},
                            "rearYard": {"area": 1.5},
                            "sideYard1": {"area": 1},
                            "sideYard2": null
                        }],
                        "plinthHeight": [0.45]
                    }],
                    "reportOutput": {"scrutinyDetails": [
                        {"key": "Common_Parking", "detail": [
                            {"Description": "Open Parking", "Provided": "27.50", "Required": "25"},
                            {"Description": "Car parking", "Provided": "2", "Required": "1"}
                        ]}
                    ]},
                    "totalUrinals": 2,
                    "totalKitchens": "1",
                    "architectName": "A. Das",
                    "constructionValidUpto": ""
                }
            }]
        }))
    }

    fn request() -> RequestInfo {
        RequestInfo::default()
    }

    fn tenant() -> TenantId {
        TenantId::new("as.guwahati").unwrap()
    }

    fn edcr() -> EdcrNumber {
        EdcrNumber::new("EDCR-2024-1").unwrap()
    }

    #[test]
    fn missing_detail_record_is_an_error() {
        assert_eq!(
            project_scrutiny_report(&details(json!({}))),
            Err(MissingDetail)
        );
        assert_eq!(
            project_scrutiny_report(&details(json!({"edcrDetail": "nope"}))),
            Err(MissingDetail)
        );
        assert_eq!(
            project_scrutiny_report(&details(json!({"edcrDetail": [null, {}]}))),
            Err(MissingDetail)
        );
    }

    #[test]
    fn empty_detail_record_projects_blank_forms() {
        let report = project_scrutiny_report(&details(json!({"edcrDetail": [{}]}))).unwrap();

        assert_eq!(report.form22.plot_area, "");
        assert!(report.form22.floor_area_calculation.is_empty());
    }

    #[test]
    fn form22_reads_areas_and_floors() {
        let report = project_scrutiny_report(&sample()).unwrap();
        let form = report.form22;

        assert_eq!(form.plot_area, "250.5");
        assert_eq!(form.existing_plinth_area, "");
        assert_eq!(form.proposed_plinth_area, "120");
        assert_eq!(form.deduction_calculation, 4.5);
        assert_eq!(form.floor_area_ratio, "1.25");
        assert_eq!(
            form.floor_area_calculation[0],
            FloorAreaRow {
                floor: "Floor 1".to_string(),
                built_up_area: "120".to_string(),
                existing_floor_area: String::new(),
            }
        );
        assert_eq!(form.total_floor_area_after_deduction[0].area, "115.5");
        assert_eq!(form.total_floor_area_before_deduction[1].floor, "Floor 2");
    }

    #[test]
    fn form23a_lists_bylaws_setbacks_and_parking() {
        let form = project_scrutiny_report(&sample()).unwrap().form23a;

        assert_eq!(form.dag_no, "123");
        assert_eq!(form.height_of_plinth, "0.45");
        assert_eq!(form.road_facing_plot[0].existing_width, "6");

        let descriptions: Vec<_> = form.principal_bylaws.iter().map(|r| r.desc.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Max Ground Coverage",
                "Floor 0",
                "Floor 1",
                "Total floor area",
                "Floor Area Ratio",
                "No. of Dwelling units",
            ]
        );
        assert_eq!(form.principal_bylaws[0].usage, "Residential");
        assert_eq!(form.principal_bylaws[4].usage, "");

        let clear: Vec<_> = form.setbacks.iter().map(|r| r.clear.as_str()).collect();
        assert_eq!(clear, vec!["3", "1.5", "1", ""]);

        assert_eq!(form.parking_provided.len(), 1);
        assert_eq!(form.parking_provided[0].open, "27.50");
        assert_eq!(form.parking_required[0].kind, "Residential");
        assert_eq!(form.parking_required[0].car, "1");
        assert_eq!(form.ducts, vec![DuctRow::default()]);
        assert_eq!(form.electric_line, vec![ElectricLineRow::default()]);
        assert_eq!(form.visitors_parking, vec![VisitorsParkingRow::default()]);
    }

    #[test]
    fn form23b_labels_floors_by_name_then_number() {
        let form = project_scrutiny_report(&sample()).unwrap().form23b;

        let labels: Vec<_> = form.floors.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Ground Floor", "Floor 1"]);
        assert_eq!(form.floors[1].proposed, "");
        assert_eq!(form.purpose, "Residential");
        assert_eq!(form.construction_valid_upto, None);
        let totals: Vec<_> = form
            .sanitary_details
            .iter()
            .map(|r| r.total.as_value().clone())
            .collect();
        assert_eq!(totals, vec![json!(2), json!(0), json!(0), json!("1")]);
    }

    #[test]
    fn sanitary_counts_are_not_truncated() {
        let form = project_scrutiny_report(&details(json!({
            "edcrDetail": [{"planDetail": {"totalUrinals": 2.5, "totalBathrooms": 0, "totalLatrines": null}}]
        })))
        .unwrap()
        .form23b;

        let totals: Vec<_> = form
            .sanitary_details
            .iter()
            .map(|r| r.total.as_value().clone())
            .collect();
        assert_eq!(totals, vec![json!(2.5), json!(0), json!(0), json!(0)]);
    }

    #[test]
    fn zero_floors_give_empty_floor_lists() {
        let report = project_scrutiny_report(&details(json!({
            "edcrDetail": [{"planDetail": {"blocks": [{"building": {"floors": []}}]}}]
        })))
        .unwrap();

        assert!(report.form22.floor_area_calculation.is_empty());
        assert!(report.form22.total_floor_area_after_deduction.is_empty());
        assert!(report.form22.total_floor_area_before_deduction.is_empty());
        assert!(report.form23b.floors.is_empty());
        assert_eq!(report.form23a.principal_bylaws.len(), 4);
    }

    #[test]
    fn missing_parking_section_yields_one_placeholder_each() {
        let report = project_scrutiny_report(&details(json!({
            "edcrDetail": [{"planDetail": {}}]
        })))
        .unwrap();

        assert_eq!(report.form23a.parking_provided, vec![ParkingProvidedRow::default()]);
        assert_eq!(report.form23a.parking_required, vec![ParkingRequiredRow::default()]);
        assert_eq!(report.form22.deduction_calculation, 0.0);
    }

    #[test]
    fn unmatched_parking_rows_yield_placeholders() {
        let report = project_scrutiny_report(&details(json!({
            "edcrDetail": [{"planDetail": {"reportOutput": {"scrutinyDetails": [
                {"key": "Common_Parking", "detail": [{"Description": "Two wheeler"}]}
            ]}}}]
        })))
        .unwrap();

        assert_eq!(report.form23a.parking_provided, vec![ParkingProvidedRow::default()]);
        assert_eq!(report.form23a.parking_required, vec![ParkingRequiredRow::default()]);
    }

    #[test]
    fn projection_is_deterministic() {
        let document = sample();

        assert_eq!(
            project_scrutiny_report(&document),
            project_scrutiny_report(&document)
        );
    }

    #[test]
    fn load_maps_missing_detail_to_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_scrutiny_details()
            .times(1)
            .returning(|_, _, _| Ok(ScrutinyDetails::default()));

        let result = block_on(load_scrutiny_report(&repo, &request(), &tenant(), &edcr()));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_projects_fetched_details() {
        let mut repo = MockRepository::new();
        repo.expect_get_scrutiny_details()
            .withf(|_, _, edcr_number| edcr_number.as_str() == "EDCR-2024-1")
            .returning(|_, _, _| Ok(sample()));

        let report = block_on(load_scrutiny_report(&repo, &request(), &tenant(), &edcr()))
            .expect("report should load");

        assert_eq!(report.form23a.mouza, "Beltola");
    }

    /// Answers each fetch with the next queued channel.
    struct GatedReader {
        pending: Mutex<VecDeque<oneshot::Receiver<RepositoryResult<ScrutinyDetails>>>>,
    }

    impl GatedReader {
        fn new(count: usize) -> (Self, Vec<oneshot::Sender<RepositoryResult<ScrutinyDetails>>>) {
            let (senders, receivers): (Vec<_>, VecDeque<_>) =
                (0..count).map(|_| oneshot::channel()).unzip();
            let reader = Self {
                pending: Mutex::new(receivers),
            };
            (reader, senders)
        }
    }

    #[async_trait]
    impl ScrutinyDetailReader for GatedReader {
        async fn get_scrutiny_details(
            &self,
            _request: &RequestInfo,
            _tenant_id: &TenantId,
            _edcr_number: &EdcrNumber,
        ) -> RepositoryResult<ScrutinyDetails> {
            let receiver = self
                .pending
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch");
            receiver
                .await
                .unwrap_or_else(|_| Err(RepositoryError::ConnectionError("dropped".into())))
        }
    }

    #[test]
    fn loader_discards_superseded_fetches() {
        let (reader, mut senders) = GatedReader::new(2);
        let second = senders.pop().unwrap();
        let first = senders.pop().unwrap();
        let loader = ScrutinyReportLoader::new();
        let (request, tenant, edcr) = (request(), tenant(), edcr());

        let (first_applied, second_applied, ()) = block_on(async {
            futures::join!(
                loader.load(&reader, &request, &tenant, &edcr),
                loader.load(&reader, &request, &tenant, &edcr),
                async {
                    second.send(Ok(sample())).unwrap();
                    first
                        .send(Err(RepositoryError::ConnectionError("late".into())))
                        .unwrap();
                },
            )
        });

        assert!(!first_applied);
        assert!(second_applied);
        let state = loader.state();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert!(state.report.is_some());
    }

    #[test]
    fn invalidated_fetch_never_updates_state() {
        let (reader, mut senders) = GatedReader::new(1);
        let sender = senders.pop().unwrap();
        let loader = ScrutinyReportLoader::new();
        let (request, tenant, edcr) = (request(), tenant(), edcr());

        let (applied, ()) = block_on(async {
            futures::join!(loader.load(&reader, &request, &tenant, &edcr), async {
                assert!(loader.state().loading);
                loader.invalidate();
                sender.send(Ok(sample())).unwrap();
            })
        });

        assert!(!applied);
        assert_eq!(loader.state(), ScrutinyState::default());
    }

    #[test]
    fn loader_records_fetch_and_missing_detail_failures() {
        let mut repo = MockRepository::new();
        let mut calls = 0;
        repo.expect_get_scrutiny_details()
            .times(2)
            .returning(move |_, _, _| {
                calls += 1;
                if calls == 1 {
                    Err(RepositoryError::ConnectionError("timeout".into()))
                } else {
                    Ok(ScrutinyDetails::default())
                }
            });
        let loader = ScrutinyReportLoader::new();

        assert!(block_on(loader.load(&repo, &request(), &tenant(), &edcr())));
        let state = loader.state();
        assert!(!state.loading);
        assert!(matches!(state.error, Some(ScrutinyFailure::Fetch(message)) if message.contains("timeout")));

        assert!(block_on(loader.load(&repo, &request(), &tenant(), &edcr())));
        assert_eq!(loader.state().error, Some(ScrutinyFailure::MissingDetail));
    }
}
