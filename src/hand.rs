//! Hand landmark data, the external detector, and per-frame tracking.

pub mod detection;
pub mod landmark;
pub mod tracking;
