use pediq_core::input::ClinicalInput;
use pediq_core::models::severity::Severity;
use pediq_protocols::evaluate;

#[test]
fn glasgow_below_nine_is_severe_at_any_age() {
    // 18 months with a total of 8: severe, even though the age-expected
    // score is only 12.
    let input = ClinicalInput::new()
        .with_number("weight_kg", 11.0)
        .with_number("age_months", 18.0)
        .with_number("glasgow_total", 8.0);
    let result = evaluate("tbi", &input).unwrap();

    assert_eq!(result.severity, Some(Severity::Severe));
    assert_eq!(result.classification.as_deref(), Some("Severe traumatic brain injury"));
    assert!(result.observations.iter().any(|o| o.contains("12 (reference only)")));
}

#[test]
fn glasgow_bands_for_moderate_and_mild() {
    let base = ClinicalInput::new().with_number("weight_kg", 20.0).with_number("age_months", 72.0);
    let moderate = evaluate("tbi", &base.clone().with_number("glasgow_total", 10.0)).unwrap();
    assert_eq!(moderate.severity, Some(Severity::Moderate));

    let mild = evaluate("tbi", &base.with_number("glasgow_total", 14.0)).unwrap();
    assert_eq!(mild.severity, Some(Severity::Mild));
}

#[test]
fn appendicitis_score_cutoffs() {
    let base = ClinicalInput::new().with_number("weight_kg", 25.0);

    // 2 + 2 points: equivocal.
    let four = base
        .clone()
        .with_flag("rlq_tenderness", true)
        .with_flag("cough_hop_tenderness", true);
    let result = evaluate("appendicitis", &four).unwrap();
    assert_eq!(result.score, Some(4.0));
    assert_eq!(result.severity, Some(Severity::Moderate));

    // Two more single-point findings: high probability.
    let six = four.with_flag("fever", true).with_flag("anorexia", true);
    let result = evaluate("appendicitis", &six).unwrap();
    assert_eq!(result.score, Some(6.0));
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.doses.iter().any(|d| d.label.contains("Cefoxitin")));
}

#[test]
fn appendicitis_severity_is_monotone_in_findings() {
    let findings = [
        "pain_migration",
        "anorexia",
        "nausea_vomiting",
        "rlq_tenderness",
        "cough_hop_tenderness",
        "fever",
        "leukocytosis",
        "neutrophilia",
    ];
    let mut previous = Severity::Mild;
    for count in 0..=findings.len() {
        let mut input = ClinicalInput::new().with_number("weight_kg", 25.0);
        for finding in &findings[..count] {
            input = input.with_flag(finding, true);
        }
        let severity = evaluate("appendicitis", &input).unwrap().severity.unwrap();
        assert!(severity >= previous, "severity dropped at {count} findings");
        previous = severity;
    }
}

#[test]
fn revised_trauma_score_codes_and_weighting() {
    let intact = ClinicalInput::new()
        .with_number("glasgow_total", 15.0)
        .with_number("systolic_bp", 110.0)
        .with_number("respiratory_rate", 20.0);
    let result = evaluate("trauma_score", &intact).unwrap();
    assert_eq!(result.score, Some(7.8408));
    assert_eq!(result.severity, Some(Severity::Mild));

    // RR of 30 codes 3, not 4: the band peaks at 10-29.
    let tachypneic = ClinicalInput::new()
        .with_number("glasgow_total", 15.0)
        .with_number("systolic_bp", 110.0)
        .with_number("respiratory_rate", 30.0);
    let result = evaluate("trauma_score", &tachypneic).unwrap();
    assert_eq!(result.severity, Some(Severity::Moderate));
    assert!(result.recommendations[0].contains("trauma center"));
}

#[test]
fn revised_trauma_score_floor() {
    let arrested = ClinicalInput::new()
        .with_number("glasgow_total", 3.0)
        .with_number("systolic_bp", 0.0)
        .with_number("respiratory_rate", 0.0);
    let result = evaluate("trauma_score", &arrested).unwrap();
    assert_eq!(result.score, Some(0.0));
    assert_eq!(result.severity, Some(Severity::Severe));
}

#[test]
fn pneumonia_tachypnea_cutoff_tracks_age() {
    // 50 rpm is tachypnea at 3 years but normal at 3 months.
    let toddler = ClinicalInput::new()
        .with_number("weight_kg", 14.0)
        .with_number("age_months", 36.0)
        .with_number("respiratory_rate", 50.0)
        .with_flag("retractions", true);
    let result = evaluate("pneumonia", &toddler).unwrap();
    assert_eq!(result.severity, Some(Severity::Moderate));

    let young_infant = ClinicalInput::new()
        .with_number("weight_kg", 6.0)
        .with_number("age_months", 3.0)
        .with_number("respiratory_rate", 50.0)
        .with_flag("retractions", true);
    let result = evaluate("pneumonia", &young_infant).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
}

#[test]
fn pneumonia_danger_signs_short_circuit() {
    let input = ClinicalInput::new()
        .with_number("weight_kg", 14.0)
        .with_number("age_months", 36.0)
        .with_flag("cyanosis", true);
    let result = evaluate("pneumonia", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.doses.iter().any(|d| d.label == "Ampicillin"));
}

#[test]
fn neonatal_jaundice_thresholds_by_age_band() {
    let photo = ClinicalInput::new()
        .with_number("age_hours", 50.0)
        .with_number("bilirubin_mg_dl", 15.5);
    let result = evaluate("neonatal_jaundice", &photo).unwrap();
    assert_eq!(result.severity, Some(Severity::Moderate));

    let exchange = ClinicalInput::new()
        .with_number("age_hours", 50.0)
        .with_number("bilirubin_mg_dl", 22.0);
    let result = evaluate("neonatal_jaundice", &exchange).unwrap();
    assert_eq!(result.severity, Some(Severity::Critical));

    let below = ClinicalInput::new()
        .with_number("age_hours", 50.0)
        .with_number("bilirubin_mg_dl", 12.0);
    let result = evaluate("neonatal_jaundice", &below).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
}

#[test]
fn first_day_jaundice_is_pathological() {
    let input = ClinicalInput::new()
        .with_number("age_hours", 12.0)
        .with_number("bilirubin_mg_dl", 6.0);
    let result = evaluate("neonatal_jaundice", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.classification.as_deref().unwrap().contains("first 24 h"));
}

#[test]
fn hyperkalemia_tiers_are_monotone_in_potassium() {
    let mut previous: Option<Severity> = None;
    for potassium in [5.0, 5.5, 6.0, 7.0, 8.0] {
        let input = ClinicalInput::new()
            .with_number("weight_kg", 20.0)
            .with_number("potassium_meq_l", potassium);
        let severity = evaluate("hyperkalemia", &input).unwrap().severity;
        assert!(severity >= previous, "severity dropped at K {potassium}");
        previous = severity;
    }
    assert_eq!(previous, Some(Severity::Severe));
}

#[test]
fn ecg_changes_escalate_hyperkalemia() {
    let input = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("potassium_meq_l", 6.0)
        .with_flag("ecg_changes", true);
    let result = evaluate("hyperkalemia", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.doses[0].label.contains("Calcium gluconate"));
}

#[test]
fn fever_risk_bands_by_age() {
    let neonate = ClinicalInput::new()
        .with_number("weight_kg", 4.0)
        .with_number("age_months", 0.5)
        .with_number("temperature_c", 38.2);
    let result = evaluate("fever_without_source", &neonate).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.doses.iter().any(|d| d.label == "Ampicillin"));
    assert!(result.doses.iter().any(|d| d.label == "Gentamicin"));

    let young_infant = ClinicalInput::new()
        .with_number("weight_kg", 5.0)
        .with_number("age_months", 2.0)
        .with_number("temperature_c", 38.2);
    let result = evaluate("fever_without_source", &young_infant).unwrap();
    assert_eq!(result.severity, Some(Severity::Moderate));

    let vaccinated_child = ClinicalInput::new()
        .with_number("weight_kg", 12.0)
        .with_number("age_months", 24.0)
        .with_number("temperature_c", 39.5)
        .with_flag("fully_immunized", true);
    let result = evaluate("fever_without_source", &vaccinated_child).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
}

#[test]
fn asthma_cascade_first_match_wins() {
    let base = ClinicalInput::new().with_number("weight_kg", 20.0);

    let critical = base.clone().with_flag("silent_chest", true).with_number("spo2", 97.0);
    let result = evaluate("asthma", &critical).unwrap();
    assert_eq!(result.severity, Some(Severity::Critical));

    let severe = base.clone().with_number("spo2", 88.0);
    let result = evaluate("asthma", &severe).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.doses.iter().any(|d| d.label.contains("Magnesium")));

    let moderate = base.clone().with_number("spo2", 93.0);
    let result = evaluate("asthma", &moderate).unwrap();
    assert_eq!(result.severity, Some(Severity::Moderate));

    let mild = base.with_number("spo2", 97.0);
    let result = evaluate("asthma", &mild).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
    assert!(!result.doses.iter().any(|d| d.label.contains("Magnesium")));
}

#[test]
fn hypoglycemia_below_treatment_threshold_routes() {
    let oral = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("glucose_mg_dl", 55.0);
    let result = evaluate("hypoglycemia", &oral).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
    assert!(result.doses[0].label.contains("carbohydrate"));

    let unconscious = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("glucose_mg_dl", 30.0)
        .with_flag("unconscious", true);
    let result = evaluate("hypoglycemia", &unconscious).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    // No access recorded: glucagon while obtaining it.
    assert!(result.doses.iter().any(|d| d.label == "Glucagon" && d.amount == 0.5));

    let normal = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("glucose_mg_dl", 80.0);
    let result = evaluate("hypoglycemia", &normal).unwrap();
    assert_eq!(result.severity, None);
    assert!(result.doses.is_empty());
}

#[test]
fn sepsis_shock_adds_the_infusion() {
    let shock = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("age_months", 36.0)
        .with_flag("hypotension", true);
    let result = evaluate("sepsis", &shock).unwrap();
    assert_eq!(result.severity, Some(Severity::Critical));
    assert!(result.doses.iter().any(|d| d.label.contains("Epinephrine infusion")));

    let sepsis = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("age_months", 36.0);
    let result = evaluate("sepsis", &sepsis).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(!result.doses.iter().any(|d| d.label.contains("Epinephrine infusion")));
}

#[test]
fn meningitis_antibiotics_follow_the_age_band() {
    let neonate = ClinicalInput::new().with_number("weight_kg", 4.0).with_number("age_months", 0.5);
    let result = evaluate("meningitis", &neonate).unwrap();
    assert!(result.doses.iter().any(|d| d.label == "Cefotaxime"));
    assert!(!result.doses.iter().any(|d| d.label == "Dexamethasone"));

    let child = ClinicalInput::new().with_number("weight_kg", 15.0).with_number("age_months", 48.0);
    let result = evaluate("meningitis", &child).unwrap();
    assert!(result.doses.iter().any(|d| d.label == "Ceftriaxone"));
    assert!(result.doses.iter().any(|d| d.label == "Dexamethasone"));
}

#[test]
fn uti_route_follows_age_and_tolerance() {
    let outpatient =
        ClinicalInput::new().with_number("weight_kg", 12.0).with_number("age_months", 30.0);
    let result = evaluate("uti", &outpatient).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
    assert!(result.doses[0].label.contains("Cephalexin"));
    assert_eq!(result.doses[0].amount, 300.0);

    let young = ClinicalInput::new().with_number("weight_kg", 4.5).with_number("age_months", 1.5);
    let result = evaluate("uti", &young).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.doses[0].label.contains("Ceftriaxone"));
}

#[test]
fn adrenal_crisis_prefers_surface_area_dosing() {
    let with_height = ClinicalInput::new()
        .with_number("weight_kg", 36.0)
        .with_number("age_years", 10.0)
        .with_number("height_cm", 100.0);
    let result = evaluate("adrenal_crisis", &with_height).unwrap();
    // BSA is exactly 1 m² here, so the bolus is 50 mg.
    let bolus = result.doses.iter().find(|d| d.label.contains("Hydrocortisone")).unwrap();
    assert_eq!(bolus.amount, 50.0);

    let without_height =
        ClinicalInput::new().with_number("weight_kg", 36.0).with_number("age_years", 10.0);
    let result = evaluate("adrenal_crisis", &without_height).unwrap();
    let bolus = result.doses.iter().find(|d| d.label.contains("Hydrocortisone")).unwrap();
    assert_eq!(bolus.amount, 50.0);
    assert!(bolus.note.as_deref().unwrap().contains("age-banded"));
}

#[test]
fn bronchiolitis_cascade() {
    let severe = ClinicalInput::new().with_number("age_months", 2.0).with_flag("apnea", true);
    let result = evaluate("bronchiolitis", &severe).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert!(result.observations.iter().any(|o| o.contains("under 3 months")));

    let moderate = ClinicalInput::new()
        .with_number("age_months", 8.0)
        .with_flag("feeding_difficulty", true);
    let result = evaluate("bronchiolitis", &moderate).unwrap();
    assert_eq!(result.severity, Some(Severity::Moderate));

    let mild = ClinicalInput::new().with_number("age_months", 8.0);
    let result = evaluate("bronchiolitis", &mild).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
    assert!(result.doses.is_empty());
}
