//! Hand gesture estimation from detected hand landmarks.
//!
//! The pipeline has three stages:
//!
//! 1. [`pose::PoseExtractor`] turns the 21 landmarks of a hand into a [`pose::HandPose`]: one
//!    curl class and one pointing direction per finger.
//! 2. [`score::score`] rates a pose against a [`gesture::GestureDescriptor`], a named set of
//!    weighted rules over curls and directions.
//! 3. [`estimator::Estimator`] scores a pose against every descriptor of a
//!    [`registry::Registry`] and ranks the gestures reaching a minimum confidence.
//!
//! [`cycle::DetectionCycle`] drives the pipeline periodically from an asynchronous
//! [`cycle::LandmarkSource`], never running more than one acquisition at a time.
//!
//! # Coordinates
//!
//! Landmarks use image coordinates: X points to the right, Y points *down*, and Z is the depth
//! relative to the wrist, with smaller values being closer to the camera. Directions are reported
//! as seen in the image, so [`pose::Direction::Up`] points towards the top edge of the frame.
//!
//! # Environment Variables
//!
//! [`config::Config::from_env`] reads `HANDSIGN_MIN_CONFIDENCE`, `HANDSIGN_TICK_MS` and
//! `HANDSIGN_DIRECTION_TOLERANCE`; see the [`config`] module for details.

use log::LevelFilter;

pub mod config;
pub mod cycle;
pub mod estimator;
pub mod gesture;
pub mod iter;
pub mod landmark;
pub mod num;
pub mod pose;
pub mod registry;
pub mod schedule;
pub mod score;
pub mod synth;
pub mod timer;

#[cfg(test)]
mod test;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and `handsign` will log at *debug* level. `RUST_LOG` can be used to change
/// that, eg. `RUST_LOG=handsign=trace` logs every score of every cycle.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
