//! Fixed game constants: grid dimensions, fleet roster, AI tuning and
//! reveal pacing.

use core::time::Duration;

/// Number of grid columns.
pub const GRID_COLS: i32 = 20;
/// Number of grid rows.
pub const GRID_ROWS: i32 = 15;
/// Edge length of one grid cell on the rendering surface, in pixels.
pub const CELL_SIZE: i32 = 40;

/// Fleet roster per side as `(length, count)` pairs.
pub const FLEET_ROSTER: [(u8, usize); 3] = [(2, 2), (3, 3), (4, 2)];

/// Number of ships each side fields.
pub const SHIPS_PER_SIDE: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < FLEET_ROSTER.len() {
        total += FLEET_ROSTER[i].1;
        i += 1;
    }
    total
};

/// Shortest legal ship.
pub const MIN_SHIP_LENGTH: u8 = 2;
/// Longest legal ship.
pub const MAX_SHIP_LENGTH: u8 = 4;

/// Lateral reach of the wide threat zone used for AI scoring.
pub const THREAT_RANGE: i32 = 3;

/// Score for every enemy cell a pose would put under fire.
pub const SCORE_PER_TARGET_CELL: i32 = 10;
/// Penalty for every own cell inside an enemy threat zone.
pub const PENALTY_PER_EXPOSED_CELL: i32 = 5;
/// Distance under which closing on an enemy earns a bonus.
pub const PROXIMITY_HORIZON: i32 = 10;

/// Delay before the first AI log line is revealed.
pub const AI_FIRST_REVEAL: Duration = Duration::from_millis(500);
/// Delay between consecutive AI log lines.
pub const AI_REVEAL_INTERVAL: Duration = Duration::from_millis(800);

/// Expand the roster into one length per ship, in roster order.
pub fn roster_lengths() -> impl Iterator<Item = u8> {
    FLEET_ROSTER
        .iter()
        .flat_map(|&(length, count)| core::iter::repeat(length).take(count))
}
