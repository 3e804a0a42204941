//! Content domain: tests for RON parsing, defaults and validation.

use std::path::Path;

use super::*;
use crate::patterns::PatternStep;

const WARDEN: &str = r#"
(
    schema_version: 1,
    items: [
        (
            id: "warden",
            name: "Stone Warden",
            max_health: 500.0,
            defense: 5.0,
            detection_range: 600.0,
            phases: [
                (health_threshold: 1.0),
                (
                    health_threshold: 0.5,
                    attack_multiplier: 1.5,
                    invulnerability_duration: 2.0,
                    allowed_pattern_ids: ["slam"],
                ),
            ],
            patterns: [
                (
                    id: "swipe",
                    weight: 3.0,
                    cooldown: 1.5,
                    range: 150.0,
                    category: Melee,
                    steps: [
                        Telegraph(duration: 0.4, radius: 90.0),
                        Strike(damage: 12.0, radius: 90.0, duration: 0.2),
                        Recovery(duration: 0.5),
                    ],
                ),
                (
                    id: "slam",
                    weight: 1.0,
                    cooldown: 4.0,
                    range: 250.0,
                    phases: Phases([2]),
                    category: Area,
                ),
            ],
        ),
    ],
)
"#;

fn warden() -> BossDef {
    parse_data_file::<BossDef>("bosses.ron", WARDEN)
        .expect("warden should parse")
        .remove(0)
}

// -----------------------------------------------------------------------------
// Parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_boss_file_parses_with_defaults() {
    let boss = warden();
    assert_eq!(boss.id, "warden");
    assert_eq!(boss.time_limit, 0.0);
    assert_eq!(boss.phases.len(), 2);

    let first = &boss.phases[0];
    assert_eq!(first.attack_multiplier, 1.0);
    assert_eq!(first.speed_multiplier, 1.0);
    assert_eq!(first.attack_speed_multiplier, 1.0);
    assert_eq!(first.invulnerability_duration, 0.0);
    assert!(first.allowed_pattern_ids.is_empty());

    assert_eq!(boss.phases[1].allowed_pattern_ids, vec!["slam".to_string()]);
    assert_eq!(boss.patterns[0].phases, PhaseEligibility::All);
    assert_eq!(boss.patterns[1].phases, PhaseEligibility::Phases(vec![2]));
    assert!(boss.patterns[1].steps.is_empty());
    assert_eq!(
        boss.patterns[0].steps[1],
        PatternStep::Strike {
            damage: 12.0,
            radius: 90.0,
            duration: 0.2
        }
    );
}

#[test]
fn test_parse_error_names_the_file() {
    let err = parse_data_file::<BossDef>("bosses.ron", "(schema_version: 1, items: [(id: 3)])")
        .unwrap_err();
    assert_eq!(err.file, "bosses.ron");
    assert!(err.to_string().starts_with("Failed to load bosses.ron"));
}

#[test]
fn test_combat_defaults_parse_with_optional_seed() {
    let defaults: CombatDefaults = parse_single_file(
        "combat_defaults.ron",
        "(consecutive_limit: 3, cooldown_multiplier: 0.5, teardown_delay: 1.0, seed: 42)",
    )
    .expect("defaults should parse");
    assert_eq!(defaults.consecutive_limit, 3);
    assert_eq!(defaults.seed, Some(42));

    let unseeded: CombatDefaults = parse_single_file(
        "combat_defaults.ron",
        "(consecutive_limit: 2, cooldown_multiplier: 1.0, teardown_delay: 3.0)",
    )
    .expect("defaults should parse");
    assert_eq!(unseeded.seed, None);
}

#[test]
fn test_missing_directory_falls_back_to_defaults() {
    let (registry, defaults, errors) = load_all_content(Path::new("does/not/exist"));
    assert!(registry.bosses.is_empty());
    assert_eq!(defaults.consecutive_limit, CombatDefaults::default().consecutive_limit);
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_shipped_content_loads_cleanly() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");
    let (registry, _defaults, errors) = load_all_content(&dir);
    assert!(errors.is_empty(), "load errors: {:?}", errors);
    assert!(!registry.bosses.is_empty());

    let issues = validate_content(&registry);
    assert!(issues.is_empty(), "validation issues: {:?}", issues);
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

fn fields(issues: &[ValidationError], severity: Severity) -> Vec<&str> {
    issues
        .iter()
        .filter(|i| i.severity == severity)
        .map(|i| i.field.as_str())
        .collect()
}

#[test]
fn test_clean_boss_has_no_findings() {
    assert!(validate_boss(&warden()).is_empty());
}

#[test]
fn test_invalid_stats_are_errors() {
    let mut boss = warden();
    boss.max_health = 0.0;
    boss.defense = -1.0;
    boss.time_limit = -5.0;

    let issues = validate_boss(&boss);
    let errors = fields(&issues, Severity::Error);
    assert!(errors.contains(&"max_health"));
    assert!(errors.contains(&"defense"));
    assert!(errors.contains(&"time_limit"));
}

#[test]
fn test_non_finite_numbers_are_errors() {
    let mut boss = warden();
    boss.patterns[0].weight = f32::INFINITY;
    boss.patterns[0].range = f32::NAN;
    boss.patterns[1].cooldown = -1.0;
    boss.phases[1].attack_speed_multiplier = f32::INFINITY;
    boss.phases[1].speed_multiplier = -0.5;

    let issues = validate_boss(&boss);
    let errors = fields(&issues, Severity::Error);
    assert!(errors.contains(&"patterns.weight"));
    assert!(errors.contains(&"patterns.range"));
    assert!(errors.contains(&"patterns.cooldown"));
    assert!(errors.contains(&"phases.attack_speed_multiplier"));
    assert!(errors.contains(&"phases.speed_multiplier"));
    assert_eq!(errors.len(), 5);
}

#[test]
fn test_broken_references_are_errors() {
    let mut boss = warden();
    boss.patterns.push(boss.patterns[0].clone());
    boss.patterns[1].phases = PhaseEligibility::Phases(vec![0, 3]);
    boss.phases[1].allowed_pattern_ids.push("meteor".to_string());

    let issues = validate_boss(&boss);
    let errors = fields(&issues, Severity::Error);
    assert!(errors.contains(&"patterns"));
    assert_eq!(errors.iter().filter(|f| **f == "patterns.phases").count(), 2);
    assert!(errors.contains(&"phases.allowed_pattern_ids"));
}

#[test]
fn test_ascending_thresholds_only_warn() {
    let mut boss = warden();
    boss.phases.reverse();
    boss.phases[0].allowed_pattern_ids.clear();

    let issues = validate_boss(&boss);
    assert!(fields(&issues, Severity::Error).is_empty());
    assert_eq!(fields(&issues, Severity::Warning), vec!["phases"]);
}

#[test]
fn test_empty_boss_warns_about_fallbacks() {
    let mut boss = warden();
    boss.phases.clear();
    boss.patterns.clear();

    let issues = validate_boss(&boss);
    assert!(fields(&issues, Severity::Error).is_empty());
    assert_eq!(fields(&issues, Severity::Warning), vec!["phases", "patterns"]);
}

#[test]
fn test_registry_lookup() {
    let mut registry = ContentRegistry::default();
    registry.bosses.insert("warden".to_string(), warden());
    assert!(registry.boss("warden").is_some());
    assert!(registry.boss("ghost").is_none());
    assert!(validate_content(&registry).is_empty());
}
