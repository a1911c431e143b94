#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Framework-independent UI core for the investment guide.
//!
//! All shared state lives in a single [`state::GuideState`] record driven
//! by a pure reducer, so every transition is testable without a rendering
//! framework. The map SDK is consumed through the injected [`map::MapProvider`]
//! capability; the real adapter lives entirely at the boundary.
//!
//! Stale async completions are discarded by a request-generation token:
//! each submit increments the counter, and a resolution is applied only if
//! its token still matches.

pub mod controller;
pub mod map;
pub mod present;
pub mod state;

pub use controller::GuideController;
pub use present::{present, ReportView, SectionBlock};
pub use state::{reduce, Event, GuideState, Phase};
