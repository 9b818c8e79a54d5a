use osc_core::Vector;
use osc_project::schema::*;
use osc_project::{
    ProjectError, from_yaml_str, load, load_json, load_yaml, save, save_json, save_yaml,
    validate_scenario,
};

fn damped_planar() -> Scenario {
    Scenario {
        version: LATEST_VERSION,
        name: "Damped planar".to_string(),
        oscillator: OscillatorDef {
            mass_kg: 2.0,
            spring_constant_n_per_m: 50.0,
            damping_n_s_per_m: 0.4,
            amplitude_factor_m_per_s2: 9.81,
        },
        initial: InitialStateDef {
            value: Vector::new([0.0, 0.1]).unwrap(),
            rate: Vector::new([-1.0, 0.0]).unwrap(),
        },
        timing: TimingDef {
            dt_s: 0.005,
            t_end_s: 2.0,
            max_steps: Some(10_000),
        },
        output: OutputDef {
            record_every: 4,
            component: 1,
            csv_path: Some("out/damped.csv".to_string()),
        },
    }
}

#[test]
fn roundtrip_yaml_default_scenario() {
    let scenario = Scenario::default();
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("osc_project_roundtrip_default.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_full_scenario() {
    let scenario = damped_planar();

    let path = std::env::temp_dir().join("osc_project_roundtrip_full.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn extension_selects_format() {
    let scenario = damped_planar();
    let yaml = std::env::temp_dir().join("osc_project_by_extension.yml");
    save(&yaml, &scenario).unwrap();
    assert_eq!(load(&yaml).unwrap(), scenario);

    let other = std::env::temp_dir().join("osc_project_by_extension.toml");
    assert!(matches!(
        save(&other, &scenario),
        Err(ProjectError::UnsupportedFormat { .. })
    ));
}

#[test]
fn empty_document_is_reference_setup() {
    let scenario = from_yaml_str("{}").unwrap();
    assert_eq!(scenario, Scenario::default());
    assert_eq!(scenario.oscillator.mass_kg, 1.0);
    assert_eq!(scenario.oscillator.spring_constant_n_per_m, 100.0);
    assert_eq!(scenario.initial.rate.as_slice(), &[-1.0]);
    assert_eq!(scenario.timing.dt_s, 0.01);
    assert_eq!(scenario.timing.t_end_s, 3.0);
}

#[test]
fn partial_sections_fill_defaults() {
    let scenario = from_yaml_str(
        "oscillator:\n  spring_constant_n_per_m: 400.0\ntiming:\n  dt_s: 0.001\n",
    )
    .unwrap();
    assert_eq!(scenario.oscillator.spring_constant_n_per_m, 400.0);
    assert_eq!(scenario.oscillator.mass_kg, 1.0);
    assert_eq!(scenario.timing.dt_s, 0.001);
    assert_eq!(scenario.timing.t_end_s, 3.0);
}

#[test]
fn empty_initial_vector_rejected_at_parse() {
    let err = from_yaml_str("initial:\n  value: []\n  rate: []\n").unwrap_err();
    assert!(matches!(err, ProjectError::Yaml(_)));
}

#[test]
fn mismatched_initial_dimensions_rejected() {
    let err = from_yaml_str("initial:\n  value: [0.0, 1.0]\n  rate: [0.0]\n").unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}
