use super::reference::ReferenceData;

/// Bonus for stepping up exactly one program level.
pub const PROGRESSION_BONUS: i16 = 5;
/// Penalty for enrolling below the level already held.
pub const DOWNGRADE_PENALTY: i16 = -5;

/// Score adjustment for moving from `current` to `intended` program level.
///
/// Unranked levels are neutral. Only a single-step rise earns the bonus; larger jumps and
/// lateral moves score zero, and any drop takes the full penalty.
pub fn transition_delta(reference: &ReferenceData, current: &str, intended: &str) -> i16 {
    let (Some(current), Some(intended)) = (
        reference.program_requirements(current),
        reference.program_requirements(intended),
    ) else {
        return 0;
    };

    if intended.rank < current.rank {
        DOWNGRADE_PENALTY
    } else if intended.rank == current.rank + 1 {
        PROGRESSION_BONUS
    } else {
        0
    }
}
