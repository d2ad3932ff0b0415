//! The ranging loop: trigger, time the echo, convert, print, wait, repeat.

mod config;
mod measurement;
mod ranger_loop;

pub use config::*;
pub use measurement::*;
pub use ranger_loop::*;
