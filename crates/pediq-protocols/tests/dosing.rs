use pediq_core::input::ClinicalInput;
use pediq_core::models::severity::Severity;
use pediq_protocols::evaluate;

fn with_weight(weight: f64) -> ClinicalInput {
    ClinicalInput::new().with_number("weight_kg", weight)
}

#[test]
fn anaphylaxis_epinephrine_is_weight_proportional() {
    let result = evaluate("anaphylaxis", &with_weight(30.0)).unwrap();
    let epinephrine = &result.doses[0];
    assert!(epinephrine.label.starts_with("Epinephrine"));
    assert_eq!(epinephrine.amount, 0.3);
}

#[test]
fn anaphylaxis_epinephrine_clamps_at_half_milligram() {
    let result = evaluate("anaphylaxis", &with_weight(60.0)).unwrap();
    assert_eq!(result.doses[0].amount, 0.5);
}

#[test]
fn anaphylaxis_epinephrine_line_comes_first() {
    let result = evaluate("anaphylaxis", &with_weight(25.0)).unwrap();
    assert!(result.recommendations[0].starts_with("Epinephrine"));
}

#[test]
fn anaphylaxis_shock_adds_volume_and_infusion() {
    let input = with_weight(25.0).with_flag("hypotension", true);
    let result = evaluate("anaphylaxis", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Critical));
    assert!(result.doses.iter().any(|d| d.label.contains("saline bolus") && d.amount == 500.0));
    assert!(result.doses.iter().any(|d| d.label.contains("infusion")));
}

#[test]
fn croup_dexamethasone_caps_at_sixteen_milligrams() {
    let mild = ClinicalInput::new()
        .with_number("weight_kg", 10.0)
        .with_number("stridor", 1.0)
        .with_number("retractions", 0.0)
        .with_number("air_entry", 0.0)
        .with_number("cyanosis", 0.0)
        .with_number("consciousness", 0.0);
    let result = evaluate("croup", &mild).unwrap();
    assert_eq!(result.doses[0].amount, 6.0);

    let heavy = mild.clone().with_number("weight_kg", 30.0);
    let result = evaluate("croup", &heavy).unwrap();
    assert_eq!(result.doses[0].amount, 16.0);
    // Mild croup gets steroid only, no nebulized epinephrine.
    assert_eq!(result.doses.len(), 1);
}

#[test]
fn cardiac_arrest_energies_clamp_at_adult_settings() {
    let input = with_weight(120.0).with_flag("shockable_rhythm", true);
    let result = evaluate("cardiac_arrest", &input).unwrap();
    let first = result.doses.iter().find(|d| d.label == "First shock").unwrap();
    let subsequent = result.doses.iter().find(|d| d.label == "Subsequent shocks").unwrap();
    assert_eq!(first.amount, 200.0);
    assert_eq!(subsequent.amount, 200.0);
    // Epinephrine caps at 1 mg.
    assert!(result.doses.iter().any(|d| d.label.starts_with("Epinephrine (") && d.amount == 1.0));
}

#[test]
fn cardiac_arrest_non_shockable_has_no_defibrillation() {
    let result = evaluate("cardiac_arrest", &with_weight(20.0)).unwrap();
    assert!(!result.doses.iter().any(|d| d.label.contains("shock")));
    assert!(!result.doses.iter().any(|d| d.label == "Amiodarone"));
}

#[test]
fn status_epilepticus_route_follows_access() {
    let with_access = with_weight(20.0).with_flag("iv_access", true);
    let result = evaluate("status_epilepticus", &with_access).unwrap();
    assert!(result.doses[0].label.contains("Diazepam"));
    assert_eq!(result.doses[0].amount, 6.0);

    let without_access = with_weight(20.0);
    let result = evaluate("status_epilepticus", &without_access).unwrap();
    assert!(result.doses[0].label.contains("Midazolam"));
    assert_eq!(result.doses[0].amount, 4.0);
}

#[test]
fn refractory_status_moves_to_phenytoin() {
    let input = with_weight(60.0)
        .with_flag("iv_access", true)
        .with_number("benzodiazepine_doses_given", 2.0);
    let result = evaluate("status_epilepticus", &input).unwrap();
    assert_eq!(result.severity, Some(Severity::Critical));
    assert!(result.doses[0].label.contains("Phenytoin"));
    // 20 mg/kg at 60 kg clamps at 1000 mg.
    assert_eq!(result.doses[0].amount, 1000.0);
}

#[test]
fn morphine_caps_for_heavy_adolescents() {
    let input = with_weight(150.0).with_number("pain_score", 9.0);
    let result = evaluate("pain", &input).unwrap();
    let morphine = result.doses.iter().find(|d| d.label == "Morphine").unwrap();
    assert_eq!(morphine.amount, 10.0);
}

#[test]
fn rsi_tube_size_formula_and_clamp() {
    let four_years = ClinicalInput::new()
        .with_number("weight_kg", 16.0)
        .with_number("age_years", 4.0)
        .with_flag("cuffed_tube", true);
    let result = evaluate("rsi", &four_years).unwrap();
    let size = result.doses.iter().find(|d| d.label.contains("internal diameter")).unwrap();
    assert_eq!(size.amount, 4.5);
    let depth = result.doses.iter().find(|d| d.label.contains("Insertion depth")).unwrap();
    assert_eq!(depth.amount, 13.5);

    let twenty_years = ClinicalInput::new()
        .with_number("weight_kg", 70.0)
        .with_number("age_years", 20.0)
        .with_flag("cuffed_tube", true);
    let result = evaluate("rsi", &twenty_years).unwrap();
    let size = result.doses.iter().find(|d| d.label.contains("internal diameter")).unwrap();
    assert_eq!(size.amount, 8.0);
}

#[test]
fn rsi_infants_use_the_fixed_table_and_atropine() {
    let infant = ClinicalInput::new()
        .with_number("weight_kg", 6.0)
        .with_number("age_years", 0.3);
    let result = evaluate("rsi", &infant).unwrap();
    let size = result.doses.iter().find(|d| d.label.contains("internal diameter")).unwrap();
    assert_eq!(size.amount, 3.5);
    assert!(result.doses.iter().any(|d| d.label == "Atropine"));
}

#[test]
fn pharyngitis_penicillin_steps_at_the_weight_cutoff() {
    let base = ClinicalInput::new()
        .with_number("age_years", 6.0)
        .with_flag("fever_history", true)
        .with_flag("no_cough", true)
        .with_flag("tender_nodes", true);

    let light = base.clone().with_number("weight_kg", 20.0);
    let result = evaluate("pharyngitis", &light).unwrap();
    let penicillin = result.doses.iter().find(|d| d.label.contains("penicillin")).unwrap();
    assert_eq!(penicillin.amount, 600_000.0);

    let heavy = base.with_number("weight_kg", 30.0);
    let result = evaluate("pharyngitis", &heavy).unwrap();
    let penicillin = result.doses.iter().find(|d| d.label.contains("penicillin")).unwrap();
    assert_eq!(penicillin.amount, 1_200_000.0);
}
