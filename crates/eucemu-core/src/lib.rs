pub mod common;
pub mod cosmology;
pub mod domain;
pub mod emulator;
pub mod lensing;
pub mod numerics;
pub mod serialization;
