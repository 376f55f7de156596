//! Derived density parameters reported alongside every emulator run.
//!
//! The geometry is flat and the radiation density is pinned to
//! [`OMEGA_RAD`], matching the assumptions the emulator was built under.

use crate::common::constants::OMEGA_RAD;
use crate::domain::CosmologyParameters;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityParameters {
    pub omega0: f64,
    pub omega_rad: f64,
    pub omega_de: f64,
}

impl DensityParameters {
    pub fn from_cosmology(cosmology: &CosmologyParameters) -> Self {
        let h_squared = cosmology.h * cosmology.h;
        let omega0 = cosmology.omega_m / h_squared;
        let omega_rad = OMEGA_RAD / h_squared;
        Self {
            omega0,
            omega_rad,
            omega_de: 1.0 - omega0 - omega_rad,
        }
    }

    /// The `# Cosmology:` block written to the diagnostic stream, ending in a blank line.
    pub fn render_diagnostic_block(&self) -> String {
        let mut block = String::new();
        let _ = writeln!(block, "#");
        let _ = writeln!(block, "# Cosmology:");
        let _ = writeln!(block, "#\tdOmega0: {:.8}", self.omega0);
        let _ = writeln!(block, "#\tdOmegaRad: {:.8}", self.omega_rad);
        let _ = writeln!(block, "#\tdOmegaDE: {:.8}", self.omega_de);
        block.push('\n');
        block
    }
}

#[cfg(test)]
mod tests {
    use super::DensityParameters;
    use crate::domain::CosmologyParameters;

    fn reference_cosmology() -> CosmologyParameters {
        CosmologyParameters::new(0.05, 0.3, 0.96, 0.7, -1.0, 0.8)
    }

    #[test]
    fn density_parameters_match_reference_cosmology() {
        let densities = DensityParameters::from_cosmology(&reference_cosmology());

        assert!((densities.omega0 - 0.3 / 0.49).abs() <= 1.0e-15);
        assert!((densities.omega0 - 0.612245).abs() <= 1.0e-6);
        assert!((densities.omega_rad - 8.538e-5).abs() <= 1.0e-8);
        assert!((densities.omega_de - 0.387670).abs() <= 1.0e-6);
        assert!(
            (densities.omega0 + densities.omega_rad + densities.omega_de - 1.0).abs() <= 1.0e-15
        );
    }

    #[test]
    fn diagnostic_block_uses_eight_decimal_layout() {
        let block = DensityParameters::from_cosmology(&reference_cosmology()).render_diagnostic_block();

        assert_eq!(
            block,
            "#\n# Cosmology:\n#\tdOmega0: 0.61224490\n#\tdOmegaRad: 0.00008538\n#\tdOmegaDE: 0.38766972\n\n"
        );
    }
}
