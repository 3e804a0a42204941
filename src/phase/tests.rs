//! Phase domain: tests for phase determination and transitions.

use super::{PhaseChange, PhaseController, determine_phase_index};
use crate::content::PhaseDef;

fn descending_phases() -> Vec<PhaseDef> {
    vec![
        PhaseDef::with_threshold(1.0),
        PhaseDef::with_threshold(0.6),
        PhaseDef::with_threshold(0.3),
    ]
}

// -----------------------------------------------------------------------------
// determine_phase_index tests
// -----------------------------------------------------------------------------

#[test]
fn test_backward_scan_takes_first_match_from_the_end() {
    let phases = vec![PhaseDef::with_threshold(0.5), PhaseDef::with_threshold(1.0)];
    assert_eq!(determine_phase_index(&phases, 0.8), 1);
    // Ascending authoring shadows the first phase for every ratio.
    assert_eq!(determine_phase_index(&phases, 0.2), 1);
}

#[test]
fn test_descending_thresholds_step_through_phases() {
    let phases = descending_phases();
    assert_eq!(determine_phase_index(&phases, 1.0), 0);
    assert_eq!(determine_phase_index(&phases, 0.8), 0);
    assert_eq!(determine_phase_index(&phases, 0.6), 1);
    assert_eq!(determine_phase_index(&phases, 0.45), 1);
    assert_eq!(determine_phase_index(&phases, 0.3), 2);
    assert_eq!(determine_phase_index(&phases, 0.0), 2);
}

#[test]
fn test_no_match_falls_back_to_first_phase() {
    let phases = vec![PhaseDef::with_threshold(0.5), PhaseDef::with_threshold(0.2)];
    assert_eq!(determine_phase_index(&phases, 0.9), 0);
    assert_eq!(determine_phase_index(&[], 0.9), 0);
}

#[test]
fn test_determine_is_pure() {
    let controller = PhaseController::new(descending_phases());
    for step in 0..=20 {
        let ratio = step as f32 / 20.0;
        let first = controller.determine_phase_index(ratio);
        let second = controller.determine_phase_index(ratio);
        assert_eq!(first, second);
        assert_eq!(first, determine_phase_index(controller.phases(), ratio));
    }
}

// -----------------------------------------------------------------------------
// PhaseController tests
// -----------------------------------------------------------------------------

#[test]
fn test_empty_definitions_get_safe_default() {
    let controller = PhaseController::new(Vec::new());
    assert_eq!(controller.total_phases(), 1);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.current_phase().health_threshold, 1.0);
    assert_eq!(controller.attack_multiplier(), 1.0);
    assert_eq!(controller.speed_multiplier(), 1.0);
    assert_eq!(controller.attack_speed_multiplier(), 1.0);
}

#[test]
fn test_update_phase_reports_only_changes() {
    let mut controller = PhaseController::new(descending_phases());
    assert_eq!(controller.update_phase(0.9), None);
    assert_eq!(
        controller.update_phase(0.5),
        Some(PhaseChange {
            previous: 0,
            current: 1
        })
    );
    assert_eq!(controller.update_phase(0.4), None);
    assert_eq!(controller.previous_index(), 0);
    assert_eq!(
        controller.update_phase(0.1),
        Some(PhaseChange {
            previous: 1,
            current: 2
        })
    );
}

#[test]
fn test_reset_to_adopts_phase_silently() {
    let phases = vec![PhaseDef::with_threshold(0.5), PhaseDef::with_threshold(1.0)];
    let mut controller = PhaseController::new(phases);
    controller.reset_to(1.0);
    assert_eq!(controller.current_index(), 1);
    assert_eq!(controller.previous_index(), 1);
    assert_eq!(controller.update_phase(0.7), None);
}

#[test]
fn test_force_phase_rejects_out_of_range() {
    let mut controller = PhaseController::new(descending_phases());
    assert_eq!(controller.force_phase(3), None);
    assert_eq!(controller.current_index(), 0);

    let change = controller.force_phase(2);
    assert_eq!(
        change,
        Some(PhaseChange {
            previous: 0,
            current: 2
        })
    );
    assert_eq!(controller.force_phase(2), None);
}

#[test]
fn test_multipliers_fall_back_to_one_when_not_positive() {
    let phases = vec![PhaseDef {
        attack_multiplier: 1.5,
        speed_multiplier: 0.0,
        attack_speed_multiplier: -2.0,
        ..PhaseDef::safe_default()
    }];
    let controller = PhaseController::new(phases);
    assert_eq!(controller.attack_multiplier(), 1.5);
    assert_eq!(controller.speed_multiplier(), 1.0);
    assert_eq!(controller.attack_speed_multiplier(), 1.0);
}

#[test]
fn test_non_finite_multipliers_fall_back_to_one() {
    let phases = vec![PhaseDef {
        attack_multiplier: f32::INFINITY,
        speed_multiplier: f32::NAN,
        attack_speed_multiplier: f32::INFINITY,
        ..PhaseDef::safe_default()
    }];
    let controller = PhaseController::new(phases);
    assert_eq!(controller.attack_multiplier(), 1.0);
    assert_eq!(controller.speed_multiplier(), 1.0);
    assert_eq!(controller.attack_speed_multiplier(), 1.0);
}

#[test]
fn test_pattern_allow_list() {
    let phases = vec![
        PhaseDef::safe_default(),
        PhaseDef {
            allowed_pattern_ids: vec!["slam".to_string()],
            ..PhaseDef::with_threshold(0.5)
        },
    ];
    let mut controller = PhaseController::new(phases);
    assert!(controller.is_pattern_available("slam"));
    assert!(controller.is_pattern_available("sweep"));

    controller.update_phase(0.4);
    assert!(controller.is_pattern_available("slam"));
    assert!(!controller.is_pattern_available("sweep"));
}
