// Mapping algorithms module

pub mod noise_grid_map;

pub use noise_grid_map::*;
