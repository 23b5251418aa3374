//! Semantic action IDs for drill click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Header ──────────────────────────────────────────────────────
pub const TITLE: u16 = 0;

// ── Command bar ─────────────────────────────────────────────────
pub const SUBMIT: u16 = 10;
pub const SHOW_ANSWER: u16 = 11;
pub const OPEN_REPORT: u16 = 12;
pub const RESET: u16 = 13;
pub const TOGGLE_LANG: u16 = 14;

// ── Report overlay ──────────────────────────────────────────────
pub const CLOSE_REPORT: u16 = 20;
/// Clicks inside the overlay that hit nothing else.
pub const REPORT_BACKDROP: u16 = 21;
