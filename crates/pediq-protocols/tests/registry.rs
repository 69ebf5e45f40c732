use std::collections::HashSet;

use pediq_core::input::ClinicalInput;
use pediq_protocols::error::ProtocolError;
use pediq_protocols::{all_protocols, evaluate, get_protocol};

/// A minimal valid input for each protocol: required fields only.
fn sample_input(id: &str) -> ClinicalInput {
    let input = ClinicalInput::new();
    match id {
        "adrenal_crisis" => input.with_number("weight_kg", 20.0).with_number("age_years", 6.0),
        "anaphylaxis" | "appendicitis" | "asthma" | "cardiac_arrest" | "dengue"
        | "status_epilepticus" => input.with_number("weight_kg", 20.0),
        "bronchiolitis" => input.with_number("age_months", 6.0),
        "burns" => input.with_number("weight_kg", 20.0).with_number("tbsa_percent", 12.0),
        "croup" => input
            .with_number("weight_kg", 10.0)
            .with_number("stridor", 1.0)
            .with_number("retractions", 1.0)
            .with_number("air_entry", 0.0)
            .with_number("cyanosis", 0.0)
            .with_number("consciousness", 0.0),
        "dehydration" => input.with_number("weight_kg", 12.0),
        "diabetic_ketoacidosis" => input.with_number("weight_kg", 20.0).with_number("ph", 7.25),
        "fever_without_source" => input
            .with_number("weight_kg", 8.0)
            .with_number("age_months", 6.0)
            .with_number("temperature_c", 38.5),
        "hyperkalemia" => {
            input.with_number("weight_kg", 20.0).with_number("potassium_meq_l", 6.2)
        }
        "hypoglycemia" => {
            input.with_number("weight_kg", 20.0).with_number("glucose_mg_dl", 50.0)
        }
        "meningitis" => input.with_number("weight_kg", 10.0).with_number("age_months", 24.0),
        "neonatal_jaundice" => {
            input.with_number("age_hours", 50.0).with_number("bilirubin_mg_dl", 10.0)
        }
        "pain" => input.with_number("weight_kg", 20.0).with_number("pain_score", 5.0),
        "pharyngitis" => input.with_number("weight_kg", 20.0).with_number("age_years", 6.0),
        "pneumonia" => input.with_number("weight_kg", 10.0).with_number("age_months", 12.0),
        "rsi" => input.with_number("weight_kg", 20.0).with_number("age_years", 5.0),
        "sepsis" => input.with_number("weight_kg", 20.0).with_number("age_months", 36.0),
        "tbi" => input
            .with_number("weight_kg", 12.0)
            .with_number("age_months", 18.0)
            .with_number("glasgow_total", 14.0),
        "trauma_score" => input
            .with_number("glasgow_total", 15.0)
            .with_number("systolic_bp", 110.0)
            .with_number("respiratory_rate", 20.0),
        "uti" => input.with_number("weight_kg", 10.0).with_number("age_months", 18.0),
        other => panic!("no sample input for protocol '{other}'"),
    }
}

#[test]
fn protocol_ids_are_unique() {
    let protocols = all_protocols();
    let ids: HashSet<_> = protocols.iter().map(|p| p.id().to_string()).collect();
    assert_eq!(ids.len(), protocols.len());
}

#[test]
fn catalog_has_the_expected_size() {
    assert_eq!(all_protocols().len(), 25);
}

#[test]
fn lookup_by_id() {
    assert!(get_protocol("croup").is_some());
    assert!(get_protocol("nope").is_none());
}

#[test]
fn unknown_protocol_error_carries_the_id() {
    let err = evaluate("nope", &ClinicalInput::new()).unwrap_err();
    match err {
        ProtocolError::UnknownProtocol(id) => assert_eq!(id, "nope"),
        other => panic!("expected UnknownProtocol, got {other:?}"),
    }
}

#[test]
fn every_protocol_evaluates_its_sample_input() {
    for protocol in all_protocols() {
        let input = sample_input(protocol.id());
        let errors = protocol.validate(&input);
        assert!(errors.is_empty(), "{}: {errors:?}", protocol.id());

        let result = evaluate(protocol.id(), &input)
            .unwrap_or_else(|e| panic!("{} failed: {e}", protocol.id()));
        assert_eq!(result.protocol_id, protocol.id());
        assert!(
            result.classification.is_some(),
            "{} returned no classification",
            protocol.id()
        );
        assert!(
            !result.recommendations.is_empty() || !result.observations.is_empty(),
            "{} returned an empty plan",
            protocol.id()
        );
        for dose in &result.doses {
            assert!(dose.amount >= 0.0, "{}: negative dose", protocol.id());
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    for protocol in all_protocols() {
        let input = sample_input(protocol.id());
        let first = evaluate(protocol.id(), &input).unwrap();
        let second = evaluate(protocol.id(), &input).unwrap();
        assert_eq!(first, second, "{} is not deterministic", protocol.id());
    }
}

#[test]
fn non_positive_weight_is_rejected_before_any_computation() {
    for protocol in all_protocols() {
        if !protocol.fields().iter().any(|f| f.id == "weight_kg") {
            continue;
        }
        let mut input = sample_input(protocol.id());
        input.set("weight_kg", pediq_core::input::Value::Number(0.0));

        let errors = protocol.validate(&input);
        assert!(
            errors.iter().any(|e| e.field == "weight_kg"),
            "{} accepted weight 0",
            protocol.id()
        );

        let err = evaluate(protocol.id(), &input).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidInput(_)));
    }
}

#[test]
fn declared_required_fields_are_enforced() {
    for protocol in all_protocols() {
        let empty = ClinicalInput::new();
        let required: Vec<_> =
            protocol.fields().iter().filter(|f| f.required).map(|f| f.id.clone()).collect();
        if required.is_empty() {
            continue;
        }
        let errors = protocol.validate(&empty);
        for field in &required {
            assert!(
                errors.iter().any(|e| &e.field == field),
                "{}: missing '{field}' not reported",
                protocol.id()
            );
        }
    }
}

#[test]
fn out_of_range_score_is_rejected() {
    let input = sample_input("croup").with_number("stridor", 9.0);
    let croup = get_protocol("croup").unwrap();
    let errors = croup.validate(&input);
    assert!(errors.iter().any(|e| e.field == "stridor"));
}

#[test]
fn evaluation_serializes_with_snake_case_severity() {
    let result = evaluate("dehydration", &sample_input("dehydration")).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["severity"], "mild");
    assert_eq!(json["protocol_id"], "dehydration");
    assert!(json["recommendations"].as_array().is_some_and(|r| !r.is_empty()));
}
