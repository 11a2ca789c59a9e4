use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use time::OffsetDateTime;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::board::{Board, NoteUpdate};
use crate::camera::{Camera, Point};
use crate::config::{BoardConfig, ConfigError};
use crate::consts::DRAG_ACTIVATION_PX;
use crate::doc::{ItemId, ItemKind, ItemRef, NotePatch, PaperPatch, PhotoPatch, WantedPatch};
use crate::drawing::{DrawMode, DrawingController};
use crate::graph::{Toggle, YarnConnection};
use crate::hit::{self, HitPart, HitTarget};
use crate::input::{Button, DragTarget, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::notify::{Notification, Notifier, Severity};
use crate::persist::{self, LoadError, SaveError, SavedBoard};
use crate::render;
use crate::scene::{self, SceneInput};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ItemCreated(ItemRef),
    ItemUpdated(ItemRef),
    /// Cards translated by a board-space delta (a whole group for grouped notes).
    ItemsMoved { items: Vec<ItemRef>, dx: f64, dy: f64 },
    ItemsDeleted { items: Vec<ItemRef>, connections: Vec<ItemId> },
    ConnectionAdded(YarnConnection),
    ConnectionRemoved(YarnConnection),
    /// The pending connection source was set or cleared.
    PendingSourceChanged(Option<ItemRef>),
    /// The host should open the editor for this card.
    EditRequested(ItemRef),
    DrawingModeChanged { item: ItemRef, mode: DrawMode },
    DrawingAdded { item: ItemRef, path_id: ItemId },
    NoteSplit { group_id: ItemId, parts: Vec<ItemRef> },
    MascotMoved { id: ItemId, x: f64, y: f64 },
    MascotResized { id: ItemId, width: f64, height: f64 },
    BoardLoaded { title: String },
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Time enters through [`EngineCore::set_clock`]; randomness through the seed.
pub struct EngineCore {
    pub board: Board,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub drawing: DrawingController,
    pub notifier: Notifier,
    pub config: BoardConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    rng: SmallRng,
    clock_ms: f64,
    load_pending: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::build(BoardConfig::default(), 0)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with an empty board, the given tunables, and an
    /// explicit seed for placement and rotation jitter.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`BoardConfig::validate`].
    pub fn with_config(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: BoardConfig, seed: u64) -> Self {
        Self {
            board: Board::default(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            drawing: DrawingController::new(),
            notifier: Notifier::new(config.notification_ttl_ms),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            rng: SmallRng::seed_from_u64(seed),
            clock_ms: 0.0,
            load_pending: false,
        }
    }

    /// Replace the board wholesale (e.g. with [`Board::demo`]).
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.reset_interaction();
    }

    /// Advance the notification clock.
    pub fn set_clock(&mut self, now_ms: f64) {
        self.clock_ms = now_ms;
    }

    /// Advance the clock and drop an expired notification.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.set_clock(now_ms);
        if self.notifier.expire(now_ms) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Viewport ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);

        match hit::hit_test(world, &self.board) {
            Some(hit) => match (hit.target, hit.part) {
                (HitTarget::Mascot(id), HitPart::ResizeHandle) => {
                    let Some(orig_width) = self.board.mascot(&id).map(|m| m.width) else {
                        return Vec::new();
                    };
                    self.input = InputState::ResizingMascot { id, start_screen: screen_pt, orig_width };
                    vec![Action::SetCursor("nwse-resize".into())]
                }
                (HitTarget::Mascot(id), HitPart::Body) => {
                    self.start_drag(DragTarget::Mascot(id), screen_pt);
                    Vec::new()
                }
                (HitTarget::Item(item), _) => {
                    if self.drawing.is_drawing(&item) {
                        self.begin_stroke(item, world)
                    } else {
                        self.start_drag(DragTarget::Item(item), screen_pt);
                        Vec::new()
                    }
                }
            },
            None => {
                if self.ui.connection_mode {
                    return self.cancel_pending_source();
                }
                self.input = InputState::Panning { last_screen: screen_pt };
                vec![Action::SetCursor("grabbing".into())]
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => {
                let world = self.camera.screen_to_world(screen_pt);
                vec![Action::SetCursor(hover_cursor(hit::hit_test(world, &self.board)).into())]
            }
            InputState::Panning { last_screen } => {
                self.camera.pan(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                vec![Action::RenderNeeded]
            }
            InputState::Dragging { start_screen, last_screen, active, .. } => {
                *last_screen = screen_pt;
                if !*active && start_screen.distance(screen_pt) >= DRAG_ACTIVATION_PX {
                    *active = true;
                    return vec![Action::SetCursor("grabbing".into()), Action::RenderNeeded];
                }
                if *active { vec![Action::RenderNeeded] } else { Vec::new() }
            }
            InputState::Stroking { item } => {
                let world = self.camera.screen_to_world(screen_pt);
                let Some(card) = self.board.card(item) else {
                    return Vec::new();
                };
                if self.drawing.extend_stroke(hit::to_local(card, world)) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::ResizingMascot { id, start_screen, orig_width } => {
                let (dx, _) = self.camera.drag_delta(*start_screen, screen_pt, true);
                if self.board.resize_mascot(id, *orig_width + dx).is_some() {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![Action::SetCursor("default".into())],
            InputState::Dragging { target, start_screen, active, .. } => {
                if active {
                    self.finish_drag(target, start_screen, screen_pt)
                } else {
                    match target {
                        DragTarget::Item(item) => self.click_item(&item),
                        DragTarget::Mascot(_) => Vec::new(),
                    }
                }
            }
            InputState::Stroking { .. } => self.finish_stroke(),
            InputState::ResizingMascot { id, .. } => {
                let Some(m) = self.board.mascot(&id) else {
                    return Vec::new();
                };
                vec![
                    Action::MascotResized { id, width: m.width, height: m.height },
                    Action::SetCursor("default".into()),
                    Action::RenderNeeded,
                ]
            }
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if self.camera.zoom_at(screen_pt, delta.dy, &self.config.zoom) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Escape cancels whatever is pending: the gesture, the connection source,
    /// drawing mode, and the open editor.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if !key.is("Escape") {
            return Vec::new();
        }
        let mut actions = self.cancel_pending_source();
        if let Some(item) = self.drawing.target().cloned() {
            self.drawing.stop();
            actions.push(Action::DrawingModeChanged { item, mode: DrawMode::Idle });
        }
        self.ui.editing = None;
        self.input = InputState::Idle;
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Host operations ---

    /// Add a card of `kind` with default content at a random spot.
    pub fn add_item(&mut self, kind: ItemKind) -> Vec<Action> {
        let item = self.board.add(kind, &mut self.rng);
        vec![Action::ItemCreated(item), Action::RenderNeeded]
    }

    pub fn update_photo(&mut self, id: &str, patch: &PhotoPatch) -> Vec<Action> {
        updated(self.board.update_photo(id, patch), ItemRef::photo(id))
    }

    pub fn update_wanted(&mut self, id: &str, patch: &WantedPatch) -> Vec<Action> {
        updated(self.board.update_wanted(id, patch), ItemRef::wanted(id))
    }

    pub fn update_paper(&mut self, id: &str, patch: &PaperPatch) -> Vec<Action> {
        updated(self.board.update_paper(id, patch), ItemRef::paper(id))
    }

    /// Update a sticky note. Oversized text splits the note into a group and
    /// raises an info notification.
    pub fn update_note(&mut self, id: &str, patch: &NotePatch) -> Vec<Action> {
        match self.board.update_note(id, patch, &self.config, &mut self.rng) {
            NoteUpdate::Updated => updated(true, ItemRef::note(id)),
            NoteUpdate::NotFound => Vec::new(),
            NoteUpdate::Split { group_id, parts } => {
                self.notifier.show(
                    format!("Note split into {} parts due to length", parts.len()),
                    Severity::Info,
                    self.clock_ms,
                );
                vec![Action::NoteSplit { group_id, parts }, Action::RenderNeeded]
            }
        }
    }

    /// Delete a card (its whole group for a grouped note) and its yarn.
    pub fn delete_item(&mut self, item: &ItemRef) -> Vec<Action> {
        let Some(deleted) = self.board.delete(item) else {
            return Vec::new();
        };
        for removed in &deleted.items {
            self.drawing.forget(removed);
        }
        let mut actions = Vec::new();
        if self.ui.pending_source.as_ref().is_some_and(|s| deleted.items.contains(s)) {
            actions.extend(self.cancel_pending_source());
        }
        if self.ui.editing.as_ref().is_some_and(|e| deleted.items.contains(e)) {
            self.ui.editing = None;
        }
        actions.push(Action::ItemsDeleted {
            items: deleted.items,
            connections: deleted.connections.into_iter().map(|c| c.id).collect(),
        });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Enter or leave connection mode. Leaving clears the pending source.
    pub fn set_connection_mode(&mut self, on: bool) -> Vec<Action> {
        self.ui.connection_mode = on;
        let mut actions = if on { Vec::new() } else { self.cancel_pending_source() };
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn toggle_connection_mode(&mut self) -> Vec<Action> {
        self.set_connection_mode(!self.ui.connection_mode)
    }

    /// Flip drawing mode on `item`. Only one card draws at a time.
    pub fn toggle_drawing(&mut self, item: &ItemRef) -> Vec<Action> {
        if !self.board.contains(item) {
            return Vec::new();
        }
        let previous = self.drawing.target().filter(|t| *t != item).cloned();
        if matches!(self.input, InputState::Stroking { .. }) {
            self.input = InputState::Idle;
        }
        let mode = self.drawing.toggle(item);
        let mut actions: Vec<Action> = previous
            .into_iter()
            .map(|prev| Action::DrawingModeChanged { item: prev, mode: DrawMode::Idle })
            .collect();
        actions.push(Action::DrawingModeChanged { item: item.clone(), mode });
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn clear_drawings(&mut self, item: &ItemRef) -> Vec<Action> {
        updated(self.board.clear_drawings(item), item.clone())
    }

    pub fn set_pen(&mut self, color: impl Into<String>, width: f64) {
        self.drawing.pen.color = color.into();
        self.drawing.pen.width = width;
    }

    /// The host closed the card editor.
    pub fn close_editor(&mut self) {
        self.ui.editing = None;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.board.title = title.into();
    }

    // --- Save / load ---

    /// Produce the board file and raise a success or error notification.
    ///
    /// # Errors
    ///
    /// Returns a [`SaveError`] if the board can't be encoded; the board is unchanged either way.
    pub fn save(&mut self, generated_at: OffsetDateTime) -> Result<SavedBoard, SaveError> {
        match self.board.save(generated_at) {
            Ok(saved) => {
                debug!("saved board as {}", saved.filename);
                self.notifier.show("Board saved successfully!", Severity::Success, self.clock_ms);
                Ok(saved)
            }
            Err(e) => {
                warn!("save failed: {e}");
                self.notifier.show("Failed to save board", Severity::Error, self.clock_ms);
                Err(e)
            }
        }
    }

    /// Flag a load as in flight while the host reads a file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Busy`] if another load is already in flight.
    pub fn begin_load(&mut self) -> Result<(), LoadError> {
        if self.load_pending {
            warn!("rejected load: another load is in flight");
            return Err(LoadError::Busy);
        }
        self.load_pending = true;
        Ok(())
    }

    /// The host's file picker closed without a file.
    pub fn cancel_load(&mut self) {
        self.load_pending = false;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.load_pending
    }

    /// Replace the board with the document in `raw`, all or nothing.
    ///
    /// On failure the board, camera, and interaction state are left exactly as
    /// they were and an error notification is raised. Mascots survive a load.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the document is malformed, or has a dangling
    /// connection under the strict policy.
    pub fn load_json(&mut self, raw: &str) -> Result<Vec<Action>, LoadError> {
        self.load_pending = false;
        let doc = match persist::deserialize_with(raw, self.config.dangling) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("load failed: {e}");
                self.notifier.show("Failed to load board", Severity::Error, self.clock_ms);
                return Err(e);
            }
        };

        let mascots = std::mem::take(&mut self.board.mascots);
        self.board = Board::from_document(doc);
        self.board.mascots = mascots;
        self.reset_interaction();

        let title = self.board.title.clone();
        debug!("loaded board \"{title}\" with {} cards", self.board.card_count());
        self.notifier.show(format!("Board \"{title}\" loaded successfully!"), Severity::Success, self.clock_ms);
        Ok(vec![Action::BoardLoaded { title }, Action::RenderNeeded])
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The notification to show right now, if any.
    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.visible(self.clock_ms)
    }

    /// Inputs for [`scene::build`] reflecting the current state.
    #[must_use]
    pub fn scene_input(&self) -> SceneInput<'_> {
        SceneInput {
            board: &self.board,
            ui: &self.ui,
            input: &self.input,
            drawing: &self.drawing,
            camera: &self.camera,
            config: &self.config,
            notification: self.notification(),
        }
    }

    // --- Internals ---

    fn start_drag(&mut self, target: DragTarget, screen_pt: Point) {
        self.input = InputState::Dragging { target, start_screen: screen_pt, last_screen: screen_pt, active: false };
    }

    fn finish_drag(&mut self, target: DragTarget, start: Point, end: Point) -> Vec<Action> {
        let (dx, dy) = self.camera.drag_delta(start, end, self.config.scale_drag_by_zoom);
        let moved = match target {
            DragTarget::Item(item) => {
                let items = self.board.drag_item(&item, dx, dy);
                if items.is_empty() {
                    return Vec::new();
                }
                Action::ItemsMoved { items, dx, dy }
            }
            DragTarget::Mascot(id) => {
                if !self.board.drag_mascot(&id, dx, dy) {
                    return Vec::new();
                }
                let Some(m) = self.board.mascot(&id) else {
                    return Vec::new();
                };
                Action::MascotMoved { x: m.x, y: m.y, id }
            }
        };
        vec![moved, Action::SetCursor("default".into()), Action::RenderNeeded]
    }

    fn begin_stroke(&mut self, item: ItemRef, world: Point) -> Vec<Action> {
        let Some(card) = self.board.card(&item) else {
            return Vec::new();
        };
        if !self.drawing.begin_stroke(hit::to_local(card, world)) {
            return Vec::new();
        }
        self.input = InputState::Stroking { item };
        vec![Action::SetCursor("crosshair".into()), Action::RenderNeeded]
    }

    fn finish_stroke(&mut self) -> Vec<Action> {
        let Some((item, path)) = self.drawing.finish_stroke() else {
            return vec![Action::RenderNeeded];
        };
        let path_id = path.id.clone();
        if !self.board.append_drawing(&item, path) {
            return vec![Action::RenderNeeded];
        }
        vec![Action::DrawingAdded { item, path_id }, Action::RenderNeeded]
    }

    /// A press and release on a card without dragging.
    fn click_item(&mut self, item: &ItemRef) -> Vec<Action> {
        if !self.ui.connection_mode {
            self.ui.editing = Some(item.clone());
            return vec![Action::EditRequested(item.clone())];
        }

        let Some(source) = self.ui.pending_source.clone() else {
            self.ui.pending_source = Some(item.clone());
            return vec![Action::PendingSourceChanged(Some(item.clone())), Action::RenderNeeded];
        };
        if source == *item {
            return self.cancel_pending_source();
        }

        let mut actions = match self.board.toggle_connection(&source, item, &self.config.yarn_color) {
            Some(Toggle::Added(edge)) => vec![Action::ConnectionAdded(edge)],
            Some(Toggle::Removed(edge)) => vec![Action::ConnectionRemoved(edge)],
            Some(Toggle::SelfLoop) | None => Vec::new(),
        };
        actions.extend(self.cancel_pending_source());
        actions
    }

    fn cancel_pending_source(&mut self) -> Vec<Action> {
        if self.ui.pending_source.take().is_none() {
            return Vec::new();
        }
        vec![Action::PendingSourceChanged(None), Action::RenderNeeded]
    }

    fn reset_interaction(&mut self) {
        self.ui.pending_source = None;
        self.ui.editing = None;
        self.input = InputState::Idle;
        self.drawing.stop();
    }
}

fn updated(ok: bool, item: ItemRef) -> Vec<Action> {
    if ok { vec![Action::ItemUpdated(item), Action::RenderNeeded] } else { Vec::new() }
}

fn hover_cursor(hit: Option<hit::Hit>) -> &'static str {
    match hit {
        Some(hit::Hit { part: HitPart::ResizeHandle, .. }) => "nwse-resize",
        Some(_) => "grab",
        None => "default",
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Every host operation is forwarded here so the notification clock is read
/// from the browser before the core runs.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to the given canvas element, starting on the demo board.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`BoardConfig::validate`].
    pub fn new(canvas: HtmlCanvasElement, config: BoardConfig) -> Result<Self, ConfigError> {
        let seed = uuid::Uuid::new_v4().as_u64_pair().0;
        let mut core = EngineCore::with_config(config, seed)?;
        core.set_board(Board::demo());
        let mut engine = Self { canvas, core };
        engine.sync_clock();
        Ok(engine)
    }

    fn sync_clock(&mut self) -> &mut EngineCore {
        self.core.set_clock(js_sys::Date::now());
        &mut self.core
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the backing store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * dpr).round() as u32);
        self.canvas.set_height((height_css * dpr).round() as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.sync_clock().on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.sync_clock().on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.sync_clock().on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.sync_clock().on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.sync_clock().on_key_down(key, modifiers)
    }

    /// Call from `requestAnimationFrame` or a timer to expire notifications.
    pub fn tick(&mut self) -> Vec<Action> {
        self.core.tick(js_sys::Date::now())
    }

    // --- Host operations ---

    pub fn set_board(&mut self, board: Board) {
        self.sync_clock().set_board(board);
    }

    pub fn add_item(&mut self, kind: ItemKind) -> Vec<Action> {
        self.sync_clock().add_item(kind)
    }

    pub fn update_photo(&mut self, id: &str, patch: &PhotoPatch) -> Vec<Action> {
        self.sync_clock().update_photo(id, patch)
    }

    pub fn update_wanted(&mut self, id: &str, patch: &WantedPatch) -> Vec<Action> {
        self.sync_clock().update_wanted(id, patch)
    }

    pub fn update_paper(&mut self, id: &str, patch: &PaperPatch) -> Vec<Action> {
        self.sync_clock().update_paper(id, patch)
    }

    pub fn update_note(&mut self, id: &str, patch: &NotePatch) -> Vec<Action> {
        self.sync_clock().update_note(id, patch)
    }

    pub fn delete_item(&mut self, item: &ItemRef) -> Vec<Action> {
        self.sync_clock().delete_item(item)
    }

    pub fn set_connection_mode(&mut self, on: bool) -> Vec<Action> {
        self.sync_clock().set_connection_mode(on)
    }

    pub fn toggle_connection_mode(&mut self) -> Vec<Action> {
        self.sync_clock().toggle_connection_mode()
    }

    pub fn toggle_drawing(&mut self, item: &ItemRef) -> Vec<Action> {
        self.sync_clock().toggle_drawing(item)
    }

    pub fn clear_drawings(&mut self, item: &ItemRef) -> Vec<Action> {
        self.sync_clock().clear_drawings(item)
    }

    pub fn set_pen(&mut self, color: impl Into<String>, width: f64) {
        self.core.set_pen(color, width);
    }

    pub fn close_editor(&mut self) {
        self.core.close_editor();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.core.set_title(title);
    }

    /// Save the board, stamped with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns a [`SaveError`] if encoding fails.
    pub fn save(&mut self) -> Result<SavedBoard, SaveError> {
        self.sync_clock().save(OffsetDateTime::now_utc())
    }

    /// # Errors
    ///
    /// Returns [`LoadError::Busy`] if a load is already in flight.
    pub fn begin_load(&mut self) -> Result<(), LoadError> {
        self.sync_clock().begin_load()
    }

    pub fn cancel_load(&mut self) {
        self.core.cancel_load();
    }

    /// # Errors
    ///
    /// Returns a [`LoadError`] if the document is rejected; the board is unchanged.
    pub fn load_json(&mut self, raw: &str) -> Result<Vec<Action>, LoadError> {
        self.sync_clock().load_json(raw)
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.core.notification()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let frame = scene::build(&self.core.scene_input());
        render::draw(
            &ctx,
            &frame,
            &self.core.camera,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }
}
