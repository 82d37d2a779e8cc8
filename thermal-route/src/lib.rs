//! Thermal route synchronization engine.
//!
//! Watches a start waypoint, an end waypoint and a target hour, fetches a
//! thermal-comfort route from an external routing service whenever all
//! three are usable, and keeps a small map overlay (markers plus colored
//! route segments) in step with the newest inputs. Results of superseded
//! requests are never shown.

pub mod cache;
pub mod console;
pub mod domain;
pub mod overlay;
pub mod service;
pub mod sync;
