use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;
use steer_client::{run_scenario, NeighborGroup, Scenario};
use steer_core::{SeparationConfig, Vector3D};
use steer_shared::{Position, SeparationSettings};

/// Writes a scenario to a unique temp file, removed on drop
struct ScenarioFile {
    path: PathBuf,
}

impl ScenarioFile {
    fn new(name: &str, contents: &str) -> Result<Self> {
        let path = std::env::temp_dir().join(format!(
            "steer-client-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents)?;
        Ok(Self { path })
    }
}

impl Drop for ScenarioFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn crowded_scenario() -> serde_json::Value {
    json!({
        "settings": {
            "comfort_distance": 1.0,
            "multiplier_inside_comfort_distance": 3.0
        },
        "focal": { "x": 0.0, "y": 0.0, "z": 0.0 },
        "neighbors": [
            { "x": 2.0, "y": 0.0, "z": 0.0 },
            { "x": 0.0, "y": 0.5, "z": 0.0 },
            { "x": 0.0, "y": 0.0, "z": 0.0 }
        ]
    })
}

#[test]
fn test_scenario_contributions_and_total() -> Result<()> {
    let scenario = Scenario::from_json(&crowded_scenario().to_string())?;
    let evaluation = run_scenario(&scenario)?;

    assert_eq!(evaluation.reports.len(), 2);
    assert_eq!(evaluation.skipped, vec![2]);

    // Outside the comfort distance: plain 1/d
    assert_eq!(
        evaluation.reports[0].contribution,
        Position::new(-0.5, 0.0, 0.0)
    );
    // Inside: 1/d scaled by 3
    assert_eq!(
        evaluation.reports[1].contribution,
        Position::new(0.0, -6.0, 0.0)
    );
    assert_eq!(evaluation.total, Position::new(-0.5, -6.0, 0.0));

    Ok(())
}

#[test]
fn test_missing_settings_use_defaults() -> Result<()> {
    let json = json!({
        "focal": { "x": 1.0, "y": 1.0, "z": 1.0 },
        "neighbors": [{ "x": 1.0, "y": 1.5, "z": 1.0 }]
    });
    let scenario = Scenario::from_json(&json.to_string())?;
    assert_eq!(scenario.settings, SeparationSettings::default());

    // Inside the comfort distance, but a multiplier of 1 leaves 1/d untouched
    let evaluation = run_scenario(&scenario)?;
    assert_eq!(evaluation.total, Position::new(0.0, -2.0, 0.0));

    Ok(())
}

#[test]
fn test_empty_neighbor_list() -> Result<()> {
    let json = json!({ "focal": { "x": 0.0, "y": 0.0, "z": 0.0 } });
    let evaluation = run_scenario(&Scenario::from_json(&json.to_string())?)?;

    assert!(evaluation.reports.is_empty());
    assert!(evaluation.skipped.is_empty());
    assert_eq!(evaluation.total, Position::new(0.0, 0.0, 0.0));

    Ok(())
}

#[test]
fn test_load_scenario_from_file() -> Result<()> {
    let file = ScenarioFile::new("load", &crowded_scenario().to_string())?;
    let scenario = Scenario::load(&file.path)?;

    assert_eq!(scenario.neighbors.len(), 3);
    assert_eq!(scenario.settings.multiplier_inside_comfort_distance, 3.0);

    Ok(())
}

#[test]
fn test_load_missing_file_reports_path() {
    let path = std::env::temp_dir().join("steer-client-does-not-exist.json");
    let err = Scenario::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("steer-client-does-not-exist.json"));
}

#[test]
fn test_malformed_scenario_is_rejected() {
    assert!(Scenario::from_json(r#"{"neighbors": []}"#).is_err());
    assert!(Scenario::from_json("not json").is_err());
}

#[test]
fn test_invalid_settings_are_rejected() -> Result<()> {
    let mut json = crowded_scenario();
    json["settings"]["comfort_distance"] = json!(-2.0);
    let scenario = Scenario::from_json(&json.to_string())?;

    assert!(run_scenario(&scenario).is_err());
    Ok(())
}

#[test]
fn test_comfort_distance_override_moves_threshold() -> Result<()> {
    let scenario = Scenario::from_json(&crowded_scenario().to_string())?;
    let mut group = NeighborGroup::new(&scenario.settings)?;

    // Exactly at the threshold: the multiplier stays off
    group.set_comfort_distance(2.0)?;
    let evaluation = group.evaluate(scenario.focal, &scenario.neighbors[..1]);
    assert_eq!(evaluation.total, Position::new(-0.5, 0.0, 0.0));

    group.set_comfort_distance(2.5)?;
    let evaluation = group.evaluate(scenario.focal, &scenario.neighbors[..1]);
    assert_eq!(evaluation.total, Position::new(-1.5, 0.0, 0.0));

    Ok(())
}

#[test]
fn test_multiplier_override() -> Result<()> {
    let scenario = Scenario::from_json(&crowded_scenario().to_string())?;
    let mut group = NeighborGroup::new(&scenario.settings)?;
    group.set_multiplier(1.0)?;

    let evaluation = group.evaluate(scenario.focal, &scenario.neighbors);
    assert_eq!(evaluation.total, Position::new(-0.5, -2.0, 0.0));
    assert!(group.set_multiplier(f32::INFINITY).is_err());

    Ok(())
}

fn doubled(focal: Vector3D, neighbor: Vector3D, config: &SeparationConfig) -> Vector3D {
    steer_core::separation_contribution(focal, neighbor, config) * 2.0
}

#[test]
fn test_custom_contribution_hook() -> Result<()> {
    let group = NeighborGroup::new(&SeparationSettings::default())?.with_contribution(doubled);
    let evaluation = group.evaluate(
        Position::new(0.0, 0.0, 0.0),
        &[Position::new(0.0, 0.0, 4.0)],
    );

    assert_eq!(evaluation.total, Position::new(0.0, 0.0, -0.5));
    Ok(())
}

#[test]
fn test_evaluation_serializes() -> Result<()> {
    let evaluation = run_scenario(&Scenario::from_json(&crowded_scenario().to_string())?)?;
    let value = serde_json::to_value(&evaluation)?;

    assert_eq!(value["skipped"], json!([2]));
    assert_eq!(value["reports"].as_array().map(|r| r.len()), Some(2));
    assert_eq!(value["total"]["y"], json!(-6.0));

    Ok(())
}
