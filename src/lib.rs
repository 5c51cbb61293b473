//! Interactive force-directed graph viewer built around a reusable 2D
//! layout engine.
//!
//! The [`sim`] module is the engine: it owns the node and edge tables and
//! advances positions one tick at a time when the host asks it to. The
//! [`data`] module defines the JSON dataset format and ships a built-in
//! demo graph. The [`app`] module is an egui viewer that drives the engine
//! once per frame and translates pointer input into pin/unpin calls.

pub mod app;
pub mod data;
pub mod sim;
pub mod util;
