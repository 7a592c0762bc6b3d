//! Level curve calculations.
//!
//! Each level costs roughly 20% more than the one before it:
//! `xp_for_level(L) = floor(100 * 1.2^(L-1))`. The floor is applied per level,
//! so cumulative thresholds are accumulated iteratively rather than derived
//! from a closed-form geometric sum.

/// XP cost of level 1.
pub const BASE_LEVEL_XP: u64 = 100;

/// Growth factor between consecutive level costs.
pub const LEVEL_GROWTH: f64 = 1.2;

/// XP cost of the given level (levels below 1 are treated as level 1).
pub fn xp_for_level(level: u32) -> u64 {
    let exponent = level.max(1) - 1;
    (BASE_LEVEL_XP as f64 * LEVEL_GROWTH.powi(exponent as i32)).floor() as u64
}

/// Cumulative XP needed to reach the given level.
///
/// Level 1 is reached with 0 XP, level 2 with `xp_for_level(1)`, and so on.
pub fn cumulative_xp_for_level(level: u32) -> u64 {
    (1..level.max(1))
        .map(xp_for_level)
        .fold(0u64, |total, cost| total.saturating_add(cost))
}

/// Level reached with the given total XP.
///
/// Largest `L` such that `cumulative_xp_for_level(L) <= xp`.
pub fn level_from_xp(xp: u64) -> u32 {
    let mut level = 1u32;
    let mut threshold = 0u64;

    // The next threshold past u64::MAX can never be reached
    while level < u32::MAX {
        match threshold.checked_add(xp_for_level(level)) {
            Some(next) if next <= xp => {
                threshold = next;
                level += 1;
            }
            _ => break,
        }
    }
    level
}

/// XP remaining in the current level band as the progression panel reports it.
///
/// `xp_for_level(level) - (xp mod xp_for_level(level))`
pub fn xp_to_next_level(xp: u64, level: u32) -> u64 {
    let cost = xp_for_level(level);
    cost - (xp % cost)
}

/// Fraction (0.0..1.0) of the way from the current level threshold to the next.
pub fn level_progress(xp: u64) -> f32 {
    let level = level_from_xp(xp);
    let floor = cumulative_xp_for_level(level);
    let span = xp_for_level(level);
    (xp - floor) as f32 / span as f32
}
