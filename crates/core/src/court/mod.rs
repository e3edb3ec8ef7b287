//! Court diagram engine: session state, movement recording, action drawing
//! and playback for one coach editing session.
//!
//! - [`session`] -- player layout, drawn actions, selection.
//! - [`recorder`] -- Idle/Recording state machine producing [`recording::Recording`]s.
//! - [`drawing`] -- Inactive/Armed/Drawing gesture state machine for actions.
//! - [`playback`] -- virtual clock, interpolation and action reveal.
//! - [`editor`] -- [`editor::CourtEditor`], the synchronous composition of the above.
//! - [`clock`] -- cancellable ticking task that drives playback in real time.
//! - [`live`] -- [`live::LiveCourt`], the async runtime wrapper owning the clock
//!   and the persistence gateway.
//!
//! The engine itself never fails: invalid local operations are no-ops. Only
//! the [`gateway`] boundary returns errors.

pub mod action;
pub mod clock;
pub mod config;
pub mod drawing;
pub mod editor;
pub mod gateway;
pub mod geometry;
pub mod live;
pub mod playback;
pub mod player;
pub mod recorder;
pub mod recording;
pub mod session;
pub mod time;

pub use action::{Action, ActionKind};
pub use config::CourtConfig;
pub use editor::CourtEditor;
pub use geometry::Point;
pub use live::LiveCourt;
pub use player::{Player, PlayerRole};
pub use recording::{Movement, Recording};
