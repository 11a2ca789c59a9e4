//! Rendering: paints a [`Scene`] onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Everything it needs has already been resolved by [`crate::scene::build`];
//! it only produces pixels and never mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::board::Mascot;
use crate::camera::{Camera, Point};
use crate::consts::{CONNECTED_HIGHLIGHT, MASCOT_GRIP_SIZE, PIN_RADIUS, SOURCE_HIGHLIGHT, YARN_WIDTH};
use crate::doc::{Card, DrawingPath, LinedPaper, Photo, StickyNote, WantedPoster};
use crate::notify::Notification;
use crate::scene::{CardBody, Highlight, Scene, SceneCard, StrokePreview, YarnSegment};

const CORK: &str = "#c8a26b";
const INK: &str = "#1f1a17";
const PAPER_LINE_SPACING: f64 = 22.0;
const PAPER_MARGIN_X: f64 = 36.0;
const DRAWING_DASH_PX: f64 = 6.0;

/// Draw the full scene: cards, yarn, mascots, the stroke in progress, and
/// the notification toast.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene<'_>,
    camera: &Camera,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: cork background in screen space.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(CORK);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // Layer 2: board space.
    ctx.save();
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    for card in &scene.cards {
        draw_card(ctx, card, camera.zoom)?;
    }
    // Yarn is strung over the cards, pinned at both ends.
    for segment in &scene.yarn {
        draw_yarn(ctx, segment)?;
    }
    for mascot in &scene.mascots {
        draw_mascot(ctx, mascot)?;
    }
    if let Some(stroke) = &scene.stroke {
        draw_stroke_preview(ctx, stroke);
    }
    ctx.restore();

    // Layer 3: screen-space overlay.
    if let Some(note) = scene.notification {
        draw_notification(ctx, note, viewport_w)?;
    }
    Ok(())
}

// =============================================================
// Cards
// =============================================================

fn draw_card(ctx: &CanvasRenderingContext2d, card: &SceneCard<'_>, zoom: f64) -> Result<(), JsValue> {
    let inner = card.body.card();
    let (w, h) = inner.kind().size();

    ctx.save();
    // Rotate about the card center, then work in card-local coordinates.
    ctx.translate(card.origin.x + w / 2.0, card.origin.y + h / 2.0)?;
    ctx.rotate(inner.rotation().to_radians())?;
    ctx.translate(-w / 2.0, -h / 2.0)?;

    ctx.set_shadow_color("rgba(0, 0, 0, 0.35)");
    ctx.set_shadow_blur(8.0);
    ctx.set_shadow_offset_y(3.0);
    match card.body {
        CardBody::Photo(photo) => draw_photo(ctx, photo, w, h)?,
        CardBody::Note(note) => draw_note(ctx, note, w, h)?,
        CardBody::Wanted(poster) => draw_wanted(ctx, poster, w, h)?,
        CardBody::Paper(paper) => draw_paper(ctx, paper, w, h)?,
    }
    ctx.set_shadow_color("transparent");

    for path in inner.drawings() {
        draw_path(ctx, path);
    }
    draw_highlight(ctx, card.highlight, w, h);
    if card.drawing {
        draw_drawing_frame(ctx, w, h, zoom)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_photo(ctx: &CanvasRenderingContext2d, photo: &Photo, w: f64, h: f64) -> Result<(), JsValue> {
    let pad = 12.0;
    ctx.set_fill_style_str("#fdfdfb");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_shadow_color("transparent");

    // Image well. Remote images are loaded by the host; the well marks their spot.
    let well = w - pad * 2.0;
    ctx.set_fill_style_str("#3a3a3a");
    ctx.fill_rect(pad, pad, well, well);
    if photo.image_url.is_empty() {
        ctx.set_fill_style_str("#8a8a8a");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font("13px sans-serif");
        ctx.fill_text("no image", w / 2.0, pad + well / 2.0)?;
    }

    ctx.set_fill_style_str(INK);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("16px 'Permanent Marker', cursive");
    let caption_y = pad + well + (h - pad - well) / 2.0;
    ctx.fill_text(&fit_text(ctx, &photo.title, w - pad * 2.0), w / 2.0, caption_y)?;
    Ok(())
}

fn draw_note(ctx: &CanvasRenderingContext2d, note: &StickyNote, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.set_fill_style_str(&note.color);
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_shadow_color("transparent");

    // Grouped notes carry their position in the chain.
    if let Some(index) = note.group_index {
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.45)");
        ctx.set_text_align("right");
        ctx.set_text_baseline("top");
        ctx.set_font("11px sans-serif");
        ctx.fill_text(&format!("#{}", index + 1), w - 8.0, 6.0)?;
    }

    ctx.set_fill_style_str(INK);
    ctx.set_font("16px 'Kalam', cursive");
    draw_wrapped(ctx, &note.text, 14.0, 24.0, w - 28.0, h - 36.0, 20.0)
}

fn draw_wanted(ctx: &CanvasRenderingContext2d, poster: &WantedPoster, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.set_fill_style_str("#f3e2bd");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_shadow_color("transparent");
    ctx.set_stroke_style_str("#6b4f2a");
    ctx.set_line_width(3.0);
    ctx.stroke_rect(6.0, 6.0, w - 12.0, h - 12.0);

    ctx.set_fill_style_str("#3b2a14");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("bold 30px serif");
    ctx.fill_text("WANTED", w / 2.0, 32.0)?;

    let portrait = w * 0.55;
    ctx.set_fill_style_str("#d8c49c");
    ctx.fill_rect((w - portrait) / 2.0, 54.0, portrait, portrait);

    let max_w = w - 24.0;
    let mut y = 54.0 + portrait + 20.0;
    ctx.set_fill_style_str("#3b2a14");
    ctx.set_font("bold 16px serif");
    ctx.fill_text(&fit_text(ctx, &poster.name, max_w), w / 2.0, y)?;
    if !poster.alias.is_empty() {
        y += 18.0;
        ctx.set_font("italic 12px serif");
        ctx.fill_text(&fit_text(ctx, &format!("a.k.a. {}", poster.alias), max_w), w / 2.0, y)?;
    }
    if !poster.crime.is_empty() {
        y += 18.0;
        ctx.set_font("12px serif");
        ctx.fill_text(&fit_text(ctx, &poster.crime, max_w), w / 2.0, y)?;
    }
    ctx.set_font("bold 18px serif");
    ctx.fill_text(&fit_text(ctx, &format!("REWARD {}", poster.reward), max_w), w / 2.0, h - 22.0)?;
    Ok(())
}

fn draw_paper(ctx: &CanvasRenderingContext2d, paper: &LinedPaper, w: f64, h: f64) -> Result<(), JsValue> {
    ctx.set_fill_style_str("#fffef8");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_shadow_color("transparent");

    ctx.set_stroke_style_str("#a9c4e8");
    ctx.set_line_width(1.0);
    let mut y = 40.0;
    while y < h {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        ctx.stroke();
        y += PAPER_LINE_SPACING;
    }
    ctx.set_stroke_style_str("#e8a0a0");
    ctx.begin_path();
    ctx.move_to(PAPER_MARGIN_X - 6.0, 0.0);
    ctx.line_to(PAPER_MARGIN_X - 6.0, h);
    ctx.stroke();

    ctx.set_fill_style_str("#23324d");
    ctx.set_font("15px 'Kalam', cursive");
    draw_wrapped(ctx, &paper.content, PAPER_MARGIN_X, 26.0, w - PAPER_MARGIN_X - 10.0, h - 30.0, PAPER_LINE_SPACING)
}

fn draw_path(ctx: &CanvasRenderingContext2d, path: &DrawingPath) {
    let mut points = path.points.chunks_exact(2);
    let Some(first) = points.next() else {
        return;
    };
    ctx.set_stroke_style_str(&path.color);
    ctx.set_line_width(path.stroke_width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(first[0], first[1]);
    for xy in points {
        ctx.line_to(xy[0], xy[1]);
    }
    ctx.stroke();
}

fn draw_highlight(ctx: &CanvasRenderingContext2d, highlight: Highlight, w: f64, h: f64) {
    let color = match highlight {
        Highlight::None => return,
        Highlight::Source => SOURCE_HIGHLIGHT,
        Highlight::Connected => CONNECTED_HIGHLIGHT,
    };
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(4.0);
    ctx.stroke_rect(-2.0, -2.0, w + 4.0, h + 4.0);
}

fn draw_drawing_frame(ctx: &CanvasRenderingContext2d, w: f64, h: f64, zoom: f64) -> Result<(), JsValue> {
    let dash = DRAWING_DASH_PX / zoom;
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str("#1e90ff");
    ctx.set_line_width(2.0 / zoom);
    ctx.stroke_rect(0.0, 0.0, w, h);
    ctx.set_line_dash(&js_sys::Array::new())?;
    Ok(())
}

// =============================================================
// Yarn, mascot, previews
// =============================================================

fn draw_yarn(ctx: &CanvasRenderingContext2d, segment: &YarnSegment) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(&segment.color);
    ctx.set_line_width(YARN_WIDTH);
    ctx.set_line_cap("round");
    ctx.begin_path();
    ctx.move_to(segment.from.x, segment.from.y);
    ctx.line_to(segment.to.x, segment.to.y);
    ctx.stroke();

    for pin in [segment.from, segment.to] {
        draw_pin(ctx, pin)?;
    }
    ctx.restore();
    Ok(())
}

fn draw_pin(ctx: &CanvasRenderingContext2d, at: Point) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(at.x, at.y, PIN_RADIUS, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str("#c53030");
    ctx.fill();
    ctx.begin_path();
    ctx.arc(at.x - PIN_RADIUS * 0.3, at.y - PIN_RADIUS * 0.3, PIN_RADIUS * 0.35, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
    ctx.fill();
    Ok(())
}

fn draw_mascot(ctx: &CanvasRenderingContext2d, mascot: &Mascot) -> Result<(), JsValue> {
    let cx = mascot.x + mascot.width / 2.0;
    let cy = mascot.y + mascot.height / 2.0;

    ctx.save();
    ctx.begin_path();
    ctx.ellipse(cx, cy, mascot.width / 2.0, mascot.height / 2.0, 0.0, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str("#2d3748");
    ctx.fill();

    // Eyes scale with the mascot.
    let eye_r = mascot.width * 0.06;
    ctx.set_fill_style_str("#f6e05e");
    for dx in [-0.15, 0.15] {
        ctx.begin_path();
        ctx.arc(cx + mascot.width * dx, cy - mascot.height * 0.1, eye_r, 0.0, 2.0 * PI)?;
        ctx.fill();
    }

    ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
    ctx.fill_rect(
        mascot.x + mascot.width - MASCOT_GRIP_SIZE,
        mascot.y + mascot.height - MASCOT_GRIP_SIZE,
        MASCOT_GRIP_SIZE,
        MASCOT_GRIP_SIZE,
    );
    ctx.restore();
    Ok(())
}

fn draw_stroke_preview(ctx: &CanvasRenderingContext2d, stroke: &StrokePreview) {
    let Some((first, rest)) = stroke.points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(&stroke.pen.color);
    ctx.set_line_width(stroke.pen.width);
    ctx.set_line_cap("round");
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for pt in rest {
        ctx.line_to(pt.x, pt.y);
    }
    ctx.stroke();
}

fn draw_notification(ctx: &CanvasRenderingContext2d, note: &Notification, viewport_w: f64) -> Result<(), JsValue> {
    let (w, h, margin) = (320.0, 44.0, 16.0);
    let x = viewport_w - w - margin;

    ctx.save();
    ctx.set_fill_style_str(note.severity.color());
    ctx.fill_rect(x, margin, w, h);
    ctx.set_fill_style_str("#fff");
    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    ctx.set_font("14px sans-serif");
    ctx.fill_text(&fit_text(ctx, &note.message, w - 24.0), x + 12.0, margin + h / 2.0)?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Text
// =============================================================

/// Fill `text` word-wrapped into the box at `(x, y)`, cutting off at `max_h`.
fn draw_wrapped(
    ctx: &CanvasRenderingContext2d,
    text: &str,
    x: f64,
    y: f64,
    max_w: f64,
    max_h: f64,
    line_height: f64,
) -> Result<(), JsValue> {
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    let mut line_y = y;
    for line in wrap_lines(ctx, text, max_w) {
        if line_y > y && line_y + line_height > y + max_h {
            break;
        }
        ctx.fill_text(&line, x, line_y)?;
        line_y += line_height;
    }
    Ok(())
}

/// Break `text` into lines no wider than `max_w`, keeping explicit newlines.
fn wrap_lines(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if current.is_empty() || text_width(ctx, &candidate) <= max_w {
                current = candidate;
            } else {
                out.push(std::mem::replace(&mut current, word.to_owned()));
            }
        }
        out.push(current);
    }
    out
}

/// `text`, shortened with an ellipsis if it doesn't fit in `max_w`.
fn fit_text(ctx: &CanvasRenderingContext2d, text: &str, max_w: f64) -> String {
    let trimmed = text.trim();
    if text_width(ctx, trimmed) <= max_w {
        return trimmed.to_owned();
    }
    let mut chars: Vec<char> = trimmed.chars().collect();
    while chars.pop().is_some() {
        let candidate = format!("{}...", chars.iter().collect::<String>().trim_end());
        if text_width(ctx, &candidate) <= max_w {
            return candidate;
        }
    }
    "...".to_owned()
}

fn text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => f64::INFINITY,
    }
}
