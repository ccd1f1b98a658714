//! Interaction engine for annotating a captured screen region.
//!
//! The host feeds pointer and keyboard events into [`input::InputState`],
//! renders through the [`draw::Canvas`] seam, and drives the coordinate
//! readout with a [`readout::ReadoutTicker`] on its `calloop` event loop.
//! Configuration is shared with the `dump_config_schema` tool.

pub mod config;
pub mod draw;
pub mod history;
pub mod input;
pub mod readout;
pub mod replay;
pub mod transform;
pub mod util;

pub use config::Config;
