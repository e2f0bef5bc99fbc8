//! Floor-plan sketch engine.
//!
//! An in-memory editor core for drawing floor plans: walls, arc walls, doors,
//! windows, fixtures, labels, dimensions and trade overlays. The host owns the
//! document, editor and selection values; the engine interprets pointer and
//! keyboard events against them and hands back replacement values as
//! [`engine::Action`]s. Every document change goes through an undoable
//! [`command::Command`], and the renderer produces a backend-agnostic
//! [`scene::Scene`] that the host draws however it likes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event dispatcher: tools, shortcuts, pan/zoom, clipboard |
//! | [`doc`] | Floor-plan document, element union, validation, JSON |
//! | [`command`] | Reversible document mutations |
//! | [`history`] | Bounded undo/redo stacks |
//! | [`geometry`] | Points, snapping, projection, containment, formatting |
//! | [`render`] | Scene builder for grid, base, trade and overlay layers |
//! | [`scene`] | Layered visual tree |
//! | [`hit`] | Hit-testing against the visual tree |
//! | [`camera`] | Viewport transform and zoom-to-cursor |
//! | [`input`] | Tools, event types and gesture state machines |
//! | [`selection`] | Single and multi selection |
//! | [`editor`] | Editor state and partial updates |
//! | [`clipboard`] | Session clipboard |
//! | [`ids`] | Injectable id generation |
//! | [`config`] | Engine tunables |
//! | [`consts`] | Shared numeric constants and palette |

pub mod camera;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod consts;
pub mod doc;
pub mod editor;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod history;
pub mod ids;
pub mod input;
pub mod render;
pub mod scene;
pub mod selection;
