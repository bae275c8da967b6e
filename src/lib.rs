//! Purpose: Library crate behind the `boundjson` CLI and its tests.
//! Exports: `api` (public decode surface), `core` (value model, parser, errors).
//! Role: Decode JSON text into a dynamically-typed `Value` tree; never encodes text.
//! Invariants: Each parse call owns all of its state; calls share nothing.
//! Invariants: Composites are located before they are parsed.
pub mod api;
pub mod core;
