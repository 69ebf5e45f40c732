use pediq_core::input::ClinicalInput;
use pediq_core::models::dose::Unit;
use pediq_core::models::severity::Severity;
use pediq_protocols::evaluate;
use pediq_protocols::protocols::diabetic_ketoacidosis::DILUTION_ML_PER_UNIT;

#[test]
fn dehydration_mild_plan_matches_the_reference_case() {
    // 12 kg, no signs: deficit 50 mL/kg and Holliday-Segar maintenance.
    let input = ClinicalInput::new().with_number("weight_kg", 12.0);
    let result = evaluate("dehydration", &input).unwrap();

    assert_eq!(result.severity, Some(Severity::Mild));
    let deficit = result.doses.iter().find(|d| d.label == "Estimated deficit").unwrap();
    assert_eq!(deficit.amount, 600.0);
    let maintenance =
        result.doses.iter().find(|d| d.label.contains("Holliday-Segar")).unwrap();
    assert_eq!(maintenance.amount, 1100.0);
    assert_eq!(maintenance.unit, Unit::MlPerDay);
}

#[test]
fn dehydration_tier_rises_with_sign_count() {
    let signs = [
        "lethargy",
        "sunken_eyes",
        "dry_mucosa",
        "reduced_turgor",
        "absent_tears",
        "slow_capillary_refill",
        "oliguria",
    ];

    let mut previous = Severity::Mild;
    for count in 0..=signs.len() {
        let mut input = ClinicalInput::new().with_number("weight_kg", 10.0);
        for sign in &signs[..count] {
            input = input.with_flag(sign, true);
        }
        let severity = evaluate("dehydration", &input).unwrap().severity.unwrap();
        assert!(severity >= previous, "severity dropped at {count} signs");
        previous = severity;
    }
    assert_eq!(previous, Severity::Severe);
}

#[test]
fn dehydration_severe_gets_a_bolus_first() {
    let input = ClinicalInput::new()
        .with_number("weight_kg", 10.0)
        .with_flag("lethargy", true)
        .with_flag("sunken_eyes", true)
        .with_flag("dry_mucosa", true)
        .with_flag("reduced_turgor", true)
        .with_flag("absent_tears", true)
        .with_flag("slow_capillary_refill", true);
    let result = evaluate("dehydration", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Severe));
    assert_eq!(result.doses[0].label, "Ringer lactate bolus");
    assert_eq!(result.doses[0].amount, 200.0);
}

#[test]
fn dka_insulin_infusion_matches_the_reference_case() {
    // 20 kg at the default 0.05 U/kg/h.
    let input = ClinicalInput::new().with_number("weight_kg", 20.0).with_number("ph", 7.25);
    let result = evaluate("diabetic_ketoacidosis", &input).unwrap();

    let insulin =
        result.doses.iter().find(|d| d.label.contains("insulin infusion")).unwrap();
    assert_eq!(insulin.amount, 1.0);
    assert_eq!(insulin.unit, Unit::UnitsPerHour);

    let pump = result.doses.iter().find(|d| d.label.contains("Pump rate")).unwrap();
    assert_eq!(pump.amount, insulin.amount * DILUTION_ML_PER_UNIT);
}

#[test]
fn dka_severity_follows_the_ph_cascade() {
    let base = ClinicalInput::new().with_number("weight_kg", 20.0);
    let severe = evaluate("diabetic_ketoacidosis", &base.clone().with_number("ph", 7.05)).unwrap();
    assert_eq!(severe.severity, Some(Severity::Severe));

    let moderate =
        evaluate("diabetic_ketoacidosis", &base.clone().with_number("ph", 7.15)).unwrap();
    assert_eq!(moderate.severity, Some(Severity::Moderate));

    let mild = evaluate("diabetic_ketoacidosis", &base.with_number("ph", 7.25)).unwrap();
    assert_eq!(mild.severity, Some(Severity::Mild));
}

#[test]
fn dka_criteria_not_met_produces_no_doses() {
    let input = ClinicalInput::new().with_number("weight_kg", 20.0).with_number("ph", 7.38);
    let result = evaluate("diabetic_ketoacidosis", &input).unwrap();
    assert_eq!(result.severity, None);
    assert!(result.doses.is_empty());
    assert_eq!(result.classification.as_deref(), Some("Ketoacidosis criteria not met"));
}

#[test]
fn dka_bicarbonate_alone_can_meet_criteria() {
    let input = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("ph", 7.32)
        .with_number("bicarbonate", 9.0);
    let result = evaluate("diabetic_ketoacidosis", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Moderate));
}

#[test]
fn burns_parkland_plan() {
    // 20 kg, 10% TBSA: 3 × 20 × 10 = 600 mL, half in the first 8 h.
    let input = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("tbsa_percent", 10.0);
    let result = evaluate("burns", &input).unwrap();

    let total = result.doses.iter().find(|d| d.label.contains("first 24 h")).unwrap();
    assert_eq!(total.amount, 600.0);
    let first_eight = result.doses.iter().find(|d| d.label.contains("first 8 h")).unwrap();
    assert_eq!(first_eight.amount, 300.0);
    let maintenance = result.doses.iter().find(|d| d.label.contains("Maintenance")).unwrap();
    assert_eq!(maintenance.amount, 1500.0);
}

#[test]
fn small_burns_skip_formal_resuscitation() {
    let input = ClinicalInput::new()
        .with_number("weight_kg", 20.0)
        .with_number("tbsa_percent", 4.0);
    let result = evaluate("burns", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Mild));
    assert!(result.doses.is_empty());
}

#[test]
fn dengue_groups_cascade_in_priority_order() {
    let base = ClinicalInput::new().with_number("weight_kg", 15.0);

    let group_a = evaluate("dengue", &base.clone()).unwrap();
    assert_eq!(group_a.severity, Some(Severity::Mild));
    // 60 mL/kg/day oral plan.
    assert_eq!(group_a.doses[0].amount, 900.0);

    let group_b = evaluate("dengue", &base.clone().with_flag("mucosal_bleeding", true)).unwrap();
    assert_eq!(group_b.severity, Some(Severity::Moderate));

    let group_c = evaluate(
        "dengue",
        &base.clone().with_flag("mucosal_bleeding", true).with_flag("abdominal_pain", true),
    )
    .unwrap();
    assert_eq!(group_c.severity, Some(Severity::Severe));
    assert_eq!(group_c.doses[0].amount, 150.0);

    let group_d = evaluate(
        "dengue",
        &base.with_flag("abdominal_pain", true).with_flag("shock", true),
    )
    .unwrap();
    assert_eq!(group_d.severity, Some(Severity::Critical));
    assert_eq!(group_d.doses[0].amount, 300.0);
}
