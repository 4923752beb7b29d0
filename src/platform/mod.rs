// Platform-specific code module

pub mod net;
pub mod signal;

pub use signal::SignalError;
