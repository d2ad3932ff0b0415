mod echo;
mod hc_sr04;

pub use {echo::*, hc_sr04::*};
