//! Command implementations for the `fxroute` binary.

pub mod convert;
pub mod setup;
pub mod table;
pub mod ui;
pub mod verify;
