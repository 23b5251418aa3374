//! Game-wide configuration constants.

// Persistence
pub const STORAGE_KEY: &str = "percentGameData_v3";

// Scoring
pub const TARGET_SCORE: i32 = 150;
pub const POINTS_CORRECT: i32 = 10;
pub const POINTS_WRONG: i32 = 10;
/// Absolute tolerance when comparing an answer. The comparison is strict.
pub const ANSWER_TOLERANCE: f64 = 0.01;

// Problem domain
pub const ORIGINAL_MIN: u32 = 20;
pub const ORIGINAL_MAX: u32 = 110;
pub const ORIGINAL_STEP: u32 = 10;
pub const PERCENT_MIN: u32 = 10;
pub const PERCENT_MAX: u32 = 50;
pub const PERCENT_STEP: u32 = 10;

// Timing (10 ticks/sec)
pub const TICKS_PER_SEC: u32 = 10;
/// Delay between feedback and the next problem (1 second).
pub const ADVANCE_DELAY_TICKS: u64 = 10;
/// Window in which a second reset trigger confirms the reset (3 seconds).
pub const RESET_CONFIRM_TICKS: u64 = 30;

// UI behaviour
pub const TITLE_CLICKS_TO_TOGGLE: u32 = 5;
pub const MAX_INPUT_LEN: usize = 8;

// Responsive diagram breakpoints (terminal columns)
pub const DIAGRAM_NARROW_MAX_COLS: u16 = 44;
pub const DIAGRAM_MEDIUM_MAX_COLS: u16 = 72;
