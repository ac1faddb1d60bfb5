//! Ports (trait boundaries) between the simulation core and its drivers.

pub mod observer;

pub use observer::Observer;
