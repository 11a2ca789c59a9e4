//! Board model, input engine, and renderer for the conspiracy pinboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! whole editing lifecycle of the corkboard: the four card stores and the
//! yarn graph, translating raw DOM input into board mutations, pan/zoom,
//! freehand drawing, hit-testing, and painting the scene. The host
//! JavaScript layer wires DOM events to the engine, opens editors and file
//! dialogs in response to [`engine::Action`]s, and hands file contents back.
//!
//! Everything except [`engine::Engine`] and [`render`] is plain Rust and is
//! also used natively by the `pinboard` command-line tool.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`board`] | Board aggregate: cascade delete, group drag, note split, mascot |
//! | [`doc`] | Card variants, patches, and the per-variant [`doc::ItemStore`] |
//! | [`group`] | Note-group text splitting and reindexing |
//! | [`graph`] | Undirected yarn connection graph with toggle semantics |
//! | [`drawing`] | Freehand drawing target and stroke recording |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against cards and the mascot |
//! | [`persist`] | Board document JSON, validation, export filenames |
//! | [`notify`] | Transient success/error/info notifications |
//! | [`scene`] | Pure per-frame render list |
//! | [`render`] | Canvas2D painting of a scene |
//! | [`config`] | Tunable board behavior |
//! | [`consts`] | Shared constants (card sizes, defaults, colors) |

pub mod board;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod drawing;
pub mod engine;
pub mod graph;
pub mod group;
pub mod hit;
pub mod input;
pub mod notify;
pub mod persist;
pub mod render;
pub mod scene;
