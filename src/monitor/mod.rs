//! Host side of the serial link: turns the ranger text stream back into numbers
//! and keeps statistics over the latest samples.

mod parser;
#[cfg(not(target_os = "espidf"))]
mod ports;
mod session;
mod window;

#[cfg(not(target_os = "espidf"))]
pub use ports::*;
pub use {parser::*, session::*, window::*};
