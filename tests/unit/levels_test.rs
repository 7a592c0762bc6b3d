//! Unit tests for the level curve and player tiers.

use careerquest::progression::levels::level_progress;
use careerquest::progression::{
    cumulative_xp_for_level, level_from_xp, xp_for_level, xp_to_next_level, PlayerTier,
    ProgressionState,
};

#[test]
fn test_level_costs() {
    assert_eq!(xp_for_level(1), 100);
    assert_eq!(xp_for_level(2), 120);
    assert_eq!(xp_for_level(3), 144);
    // 172.8 and 207.36 are floored
    assert_eq!(xp_for_level(4), 172);
    assert_eq!(xp_for_level(5), 207);
    assert_eq!(xp_for_level(0), xp_for_level(1));
}

#[test]
fn test_cumulative_thresholds() {
    assert_eq!(cumulative_xp_for_level(1), 0);
    assert_eq!(cumulative_xp_for_level(2), 100);
    assert_eq!(cumulative_xp_for_level(3), 220);
    assert_eq!(cumulative_xp_for_level(4), 364);
    assert_eq!(cumulative_xp_for_level(5), 536);
}

#[test]
fn test_level_boundaries() {
    assert_eq!(level_from_xp(0), 1);
    assert_eq!(level_from_xp(99), 1);
    assert_eq!(level_from_xp(100), 2);
    assert_eq!(level_from_xp(219), 2);
    assert_eq!(level_from_xp(220), 3);
    assert_eq!(level_from_xp(250), 3);
    assert_eq!(level_from_xp(400), 4);
    assert_eq!(level_from_xp(536), 5);
}

#[test]
fn test_level_is_monotonic() {
    let mut last = 1;
    for xp in (0..20_000).step_by(37) {
        let level = level_from_xp(xp);
        assert!(level >= last, "level dropped at {} XP", xp);
        assert!(cumulative_xp_for_level(level) <= xp);
        assert!(cumulative_xp_for_level(level + 1) > xp);
        last = level;
    }
}

#[test]
fn test_xp_to_next_level_uses_band_remainder() {
    // 150 % 120 = 30, so 90 remain
    assert_eq!(xp_to_next_level(150, 2), 90);
    assert_eq!(xp_to_next_level(0, 1), 100);
    assert_eq!(xp_to_next_level(100, 1), 100);
}

#[test]
fn test_level_progress_fraction() {
    assert_eq!(level_progress(0), 0.0);
    assert!((level_progress(160) - 0.5).abs() < 1e-6);
}

#[test]
fn test_state_from_total() {
    let state = ProgressionState::from_total_xp(400);
    assert_eq!(state.current_level, 4);
    assert_eq!(state.total_xp_earned, 400);
    assert_eq!(state.xp_multiplier, 1.0);
    assert!(!state.bonus_xp_active);
    assert!(state.is_consistent());
}

#[test]
fn test_tiers() {
    assert_eq!(PlayerTier::for_level(1), PlayerTier::Bronze);
    assert_eq!(PlayerTier::for_level(10), PlayerTier::Silver);
    assert_eq!(PlayerTier::for_level(29), PlayerTier::Gold);
    assert_eq!(PlayerTier::for_level(30), PlayerTier::Platinum);
    assert_eq!(PlayerTier::for_level(50), PlayerTier::Mythic);
    assert_eq!(PlayerTier::Gold.to_string(), "Gold");
}

#[test]
fn test_level_saturates_at_max_xp() {
    let level = level_from_xp(u64::MAX);
    assert_eq!(cumulative_xp_for_level(level + 1), u64::MAX);
    assert!(level_progress(u64::MAX) <= 1.0);

    let state = ProgressionState::from_total_xp(u64::MAX);
    assert_eq!(state.current_level, level);
    assert!(state.is_consistent());
}
