use super::BoostEmulator;
use super::model::{PceModel, PceTerm};
use crate::common::constants::{COSMOLOGY_PARAMETER_COUNT, PARAMETER_NAMES};
use crate::domain::{
    CosmologyParameters, EmuError, EmuResult, EmulatorOutput, EmulatorVersion, RedshiftList,
};
use crate::numerics::{NaturalCubicSpline, legendre_table};
use faer::Mat;
use std::path::Path;

struct ComponentExpansion {
    basis: Mat<f64>,
    terms: Vec<PceTerm>,
}

/// Principal-component emulator whose component weights are polynomial-chaos
/// expansions in the normalized cosmological parameters.
///
/// `log10 B(z_node, k) = mean + sum_c weight_c * PC_c(z_node, k)`, interpolated
/// in redshift with a natural cubic spline per wavenumber.
pub struct PceEmulator {
    name: String,
    version: EmulatorVersion,
    parameter_bounds: [[f64; 2]; COSMOLOGY_PARAMETER_COUNT],
    k_values: Vec<f64>,
    redshift_nodes: Vec<f64>,
    mean_log_boost: Mat<f64>,
    components: Vec<ComponentExpansion>,
    max_degrees: [usize; COSMOLOGY_PARAMETER_COUNT],
}

impl PceEmulator {
    pub fn from_path(path: &Path) -> EmuResult<Self> {
        Self::from_model(PceModel::from_path(path)?)
    }

    pub fn from_model(model: PceModel) -> EmuResult<Self> {
        model.validate()?;

        let mut max_degrees = [0_usize; COSMOLOGY_PARAMETER_COUNT];
        for term in model
            .principal_components
            .iter()
            .flat_map(|component| component.terms.iter())
        {
            for (slot, degree) in max_degrees.iter_mut().zip(term.degrees) {
                *slot = (*slot).max(degree as usize);
            }
        }

        let components = model
            .principal_components
            .into_iter()
            .map(|component| ComponentExpansion {
                basis: table_to_matrix(&component.basis),
                terms: component.terms,
            })
            .collect();

        Ok(Self {
            name: model.name,
            version: model.version.into(),
            parameter_bounds: model.parameter_bounds,
            mean_log_boost: table_to_matrix(&model.mean_log_boost),
            k_values: model.k_values,
            redshift_nodes: model.redshift_nodes,
            components,
            max_degrees,
        })
    }

    pub fn k_values(&self) -> &[f64] {
        &self.k_values
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Maps each parameter from its training range onto `[-1, 1]`.
    pub fn normalize(
        &self,
        cosmology: &CosmologyParameters,
    ) -> EmuResult<[f64; COSMOLOGY_PARAMETER_COUNT]> {
        cosmology.ensure_finite()?;

        let mut normalized = [0.0; COSMOLOGY_PARAMETER_COUNT];
        for (index, value) in cosmology.as_array().into_iter().enumerate() {
            let [min, max] = self.parameter_bounds[index];
            if value < min || value > max {
                return Err(EmuError::domain(
                    "DOMAIN.PARAMETER_BOUNDS",
                    format!(
                        "parameter '{}' = {value} is outside the emulator range [{min}, {max}]",
                        PARAMETER_NAMES[index]
                    ),
                ));
            }
            normalized[index] = 2.0 * (value - min) / (max - min) - 1.0;
        }

        Ok(normalized)
    }

    pub fn component_weights(&self, normalized: &[f64; COSMOLOGY_PARAMETER_COUNT]) -> Vec<f64> {
        let tables: Vec<Vec<f64>> = normalized
            .iter()
            .zip(self.max_degrees)
            .map(|(x, max_degree)| legendre_table(max_degree, *x))
            .collect();

        self.components
            .iter()
            .map(|component| {
                component
                    .terms
                    .iter()
                    .map(|term| {
                        term.degrees
                            .iter()
                            .zip(&tables)
                            .fold(term.coefficient, |product, (degree, table)| {
                                product * table[*degree as usize]
                            })
                    })
                    .sum()
            })
            .collect()
    }

    /// `log10` boost on the model's redshift nodes (rows) and wavenumbers (columns).
    pub fn log_boost_at_nodes(&self, weights: &[f64]) -> Mat<f64> {
        let mut log_boost = self.mean_log_boost.clone();
        for (component, weight) in self.components.iter().zip(weights) {
            if *weight == 0.0 {
                continue;
            }
            for row in 0..log_boost.nrows() {
                for col in 0..log_boost.ncols() {
                    log_boost[(row, col)] += weight * component.basis[(row, col)];
                }
            }
        }
        log_boost
    }
}

impl BoostEmulator for PceEmulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> EmulatorVersion {
        self.version
    }

    fn evaluate(
        &self,
        cosmology: &CosmologyParameters,
        redshifts: &RedshiftList,
    ) -> EmuResult<EmulatorOutput> {
        let normalized = self.normalize(cosmology)?;
        let weights = self.component_weights(&normalized);
        tracing::debug!(?weights, "evaluated principal component weights");

        let log_boost = self.log_boost_at_nodes(&weights);
        let k_count = self.k_values.len();
        let mut boost = vec![0.0; redshifts.len() * k_count];
        let mut column = vec![0.0; self.redshift_nodes.len()];

        for k_index in 0..k_count {
            for (node_index, slot) in column.iter_mut().enumerate() {
                *slot = log_boost[(node_index, k_index)];
            }
            let spline = NaturalCubicSpline::new(&self.redshift_nodes, &column).map_err(|source| {
                EmuError::model(
                    "MODEL.REDSHIFT_SPLINE",
                    format!("failed to interpolate wavenumber index {k_index}: {source}"),
                )
            })?;

            for (z_index, z) in redshifts.as_slice().iter().enumerate() {
                boost[z_index * k_count + k_index] = 10.0_f64.powf(spline.evaluate(*z));
            }
        }

        if let Some(index) = boost.iter().position(|value| !value.is_finite()) {
            return Err(EmuError::integrity(
                "INTEGRITY.NON_FINITE_BOOST",
                format!(
                    "boost for redshift index {} and wavenumber index {} is not finite",
                    index / k_count,
                    index % k_count
                ),
            ));
        }

        Ok(EmulatorOutput {
            k_values: self.k_values.clone(),
            boost,
            boost_length: k_count,
        })
    }
}

fn table_to_matrix(table: &[Vec<f64>]) -> Mat<f64> {
    let rows = table.len();
    let cols = table.first().map_or(0, |row| row.len());
    let mut matrix = Mat::zeros(rows, cols);
    for (row_index, row) in table.iter().enumerate() {
        for (col_index, value) in row.iter().enumerate() {
            matrix[(row_index, col_index)] = *value;
        }
    }
    matrix
}
