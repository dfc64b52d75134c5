//! Usecase layer: application workflows + events.

pub mod decompose;
pub mod event;
pub mod report;
pub mod stats;
pub mod verify;
