//! Annotation engine for scanned essay pages.
//!
//! The host owns rendering and persistence. It feeds raw pointer and keyboard
//! events into [`engine::EngineCore`], draws from the read-only store and
//! [`engine::Overlay`], and applies the returned [`engine::Action`]s. All
//! geometry is relative to the page (0..1 on both axes), so annotations stay
//! put under any zoom level.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture dispatch, editor and keyboard handling |
//! | [`doc`] | Annotation types and the per-document store |
//! | [`history`] | Per-page undo/redo with typing coalescing |
//! | [`input`] | Tools, modifiers and the gesture state machine |
//! | [`hit`] | Hit-testing and rubber-band selection |
//! | [`labels`] | Derived dot labels (`2`, `2a`, `2b`) |
//! | [`geom`] | Points, rectangles and screen/page conversion |
//! | [`consts`] | Shared numeric constants |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod history;
pub mod hit;
pub mod input;
pub mod labels;
