pub mod gamma;
pub mod integration;
pub mod legendre;
pub mod spline;

pub use gamma::ln_gamma;
pub use integration::{RombergError, romberg_samples, romberg_uniform};
pub use legendre::legendre_table;
pub use spline::{NaturalCubicSpline, SplineError};
