// scene/ - Everything a simulation is configured from
//
// - Species palette (formula -> colour, interned to small ids)
// - Scene config (container, constants, reactions, starting populations)
// - Built-in default scene

mod config;
mod palette;

pub use config::*;
pub use palette::*;
