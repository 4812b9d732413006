use obps_portal::domain::edcr::ScrutinyDetails;
use obps_portal::services::scrutiny::project_scrutiny_report;
use serde_json::json;

mod common;

fn fixture() -> ScrutinyDetails {
    serde_json::from_str(common::EDCR_FIXTURE).expect("fixture should deserialize")
}

#[test]
fn fixture_projects_into_all_three_forms() {
    let report = project_scrutiny_report(&fixture()).expect("fixture has a detail record");

    assert_eq!(report.form22.plot_area, "334.45");
    assert_eq!(report.form22.proposed_plinth_area, "146.2");
    assert_eq!(report.form22.deduction_calculation, 12.4);
    assert_eq!(report.form22.total_floor_area_after_deduction[0].area, "133.8");
    assert_eq!(report.form22.mezzanine_floor_area, "");

    let form23a = &report.form23a;
    assert_eq!(form23a.revenue_village, "Hatigaon");
    assert_eq!(form23a.dag_no, "1457");
    assert_eq!(form23a.patta_no, "");
    assert_eq!(form23a.ducts.len(), 1);
    assert_eq!(form23a.ducts[0].width, "0.6");
    assert_eq!(form23a.electric_line.len(), 1);
    assert_eq!(form23a.electric_line[0].nature, "");
    assert_eq!(form23a.parking_provided.len(), 1);
    assert_eq!(form23a.parking_provided[0].open, "41.25");
    assert_eq!(form23a.parking_required[0].car, "3");
    assert_eq!(form23a.principal_bylaws.len(), 7);
    assert_eq!(form23a.principal_bylaws[3].desc, "Floor 2");

    let form23b = &report.form23b;
    assert_eq!(form23b.construction_valid_upto.as_deref(), Some("2027-03-31"));
    assert_eq!(form23b.lease_extension_upto, None);
    assert_eq!(form23b.floors[2].label, "Floor 2");
    assert_eq!(form23b.floors[2].total, "");
    assert_eq!(form23b.sanitary_details[1].total.as_value(), &json!(6));
}

#[test]
fn report_serializes_with_portal_keys() {
    let report = project_scrutiny_report(&fixture()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["form23A"]["heightofPlinth"], json!("0.6"));
    assert_eq!(value["form23A"]["principalBylaws"][0]["use"], json!("Residential"));
    assert_eq!(value["form23A"]["parkingRequired"][0]["type"], json!("Residential"));
    assert_eq!(value["form23B"]["leaseExtensionUpto"], json!(null));
    assert_eq!(
        value["form22"]["floorAreaCalculation"][1],
        json!({"floor": "Floor 2", "builtUpArea": "146.2", "existingFloorArea": ""})
    );
}

#[test]
fn wrongly_shaped_sections_still_project() {
    let mut document: serde_json::Value = serde_json::from_str(common::EDCR_FIXTURE).unwrap();
    document["edcrDetail"][0]["planDetail"]["blocks"][0]["building"]["floors"] = json!("n/a");
    document["edcrDetail"][0]["planDetail"]["reportOutput"] = json!(42);
    let details: ScrutinyDetails = serde_json::from_value(document).unwrap();

    let report = project_scrutiny_report(&details).unwrap();

    assert!(report.form22.floor_area_calculation.is_empty());
    assert!(report.form23b.floors.is_empty());
    assert_eq!(report.form23a.parking_provided[0].open, "");
    assert_eq!(report.form23a.dag_no, "1457");
}
