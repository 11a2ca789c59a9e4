//! Shared numeric constants for the canvas crate.

// ── Board document ──────────────────────────────────────────────

/// Format version written into every saved board document.
pub const BOARD_FORMAT_VERSION: &str = "1.0.0";

/// Title used when a board is saved without one.
pub const DEFAULT_BOARD_TITLE: &str = "Conspiracy Board";

/// Filename stem used when a board is exported without a title.
pub const DEFAULT_FILENAME_STEM: &str = "conspiracy-board";

// ── Cards ───────────────────────────────────────────────────────

/// Photo card size in board units.
pub const PHOTO_SIZE: (f64, f64) = (200.0, 240.0);

/// Sticky note size in board units.
pub const NOTE_SIZE: (f64, f64) = (200.0, 200.0);

/// Wanted poster size in board units.
pub const WANTED_SIZE: (f64, f64) = (220.0, 300.0);

/// Lined paper size in board units.
pub const PAPER_SIZE: (f64, f64) = (255.0, 330.0);

/// Vertical offset of a yarn anchor below the card's top edge.
pub const YARN_ANCHOR_DY: f64 = 30.0;

/// Horizontal yarn anchor offset for photos, notes, and wanted posters.
pub const YARN_ANCHOR_DX: f64 = 100.0;

/// Horizontal yarn anchor offset for lined papers.
pub const PAPER_YARN_ANCHOR_DX: f64 = 125.0;

// ── Spawning ────────────────────────────────────────────────────

/// Newly added cards land at `SPAWN_ORIGIN + random * SPAWN_SPAN`.
pub const SPAWN_ORIGIN: (f64, f64) = (100.0, 100.0);

/// Width and height of the random spawn area.
pub const SPAWN_SPAN: (f64, f64) = (400.0, 300.0);

/// Full rotation spread for new photos, in degrees (±10°).
pub const PHOTO_ROTATION_SPREAD_DEG: f64 = 20.0;

/// Full rotation spread for every other new card, in degrees (±5°).
pub const CARD_ROTATION_SPREAD_DEG: f64 = 10.0;

// ── Item defaults ───────────────────────────────────────────────

pub const DEFAULT_PHOTO_TITLE: &str = "New Photo";
pub const DEFAULT_NOTE_COLOR: &str = "#fef08a";
pub const DEFAULT_WANTED_REWARD: &str = "$10,000";

// ── Drawing ─────────────────────────────────────────────────────

pub const DEFAULT_PEN_COLOR: &str = "#000000";
pub const DEFAULT_PEN_WIDTH: f64 = 2.0;

/// Strokes with fewer recorded points than this are discarded on release.
pub const MIN_STROKE_POINTS: usize = 3;

// ── Input ───────────────────────────────────────────────────────

/// Pointer travel, in screen pixels, before a press on a card becomes a drag.
pub const DRAG_ACTIVATION_PX: f64 = 8.0;

/// Side of the square resize grip in the mascot's bottom-right corner.
pub const MASCOT_GRIP_SIZE: f64 = 20.0;

/// Smallest width the mascot can be resized to.
pub const MASCOT_MIN_WIDTH: f64 = 50.0;

// ── Yarn ────────────────────────────────────────────────────────

/// Color of new yarn connections unless configured otherwise.
pub const DEFAULT_YARN_COLOR: &str = "#e53e3e";

// ── Rendering ───────────────────────────────────────────────────

/// Border color of the pending connection source.
pub const SOURCE_HIGHLIGHT: &str = "#38a169";

/// Border color of cards already connected to the pending source.
pub const CONNECTED_HIGHLIGHT: &str = "#f56500";

/// Yarn line width in board units.
pub const YARN_WIDTH: f64 = 3.0;

/// Thumbtack radius drawn at each yarn endpoint.
pub const PIN_RADIUS: f64 = 6.0;
