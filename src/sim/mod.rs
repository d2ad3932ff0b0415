//! Simulated hardware for running the ranger without a sensor attached.
//!
//! Everything here runs on virtual time: [`VirtualClock`] only moves when a delay,
//! a wait or a clock read asks it to, so the whole loop can be exercised without
//! sleeping.

mod clock;
mod echo;
mod pins;

pub use {clock::*, echo::*, pins::*};
