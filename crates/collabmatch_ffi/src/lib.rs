//! Flutter-facing bindings for the CollabMatch core.

pub mod api;
