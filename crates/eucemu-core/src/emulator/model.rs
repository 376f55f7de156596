//! Trained polynomial-chaos emulator model and its on-disk JSON layout.
//!
//! Two-dimensional tables are stored row-major by redshift node: row `i`
//! holds the values for `redshift_nodes[i]` across all `k_values`.

use crate::common::constants::{COSMOLOGY_PARAMETER_COUNT, MAX_REDSHIFT, PARAMETER_NAMES};
use crate::domain::{EmuError, EmuResult, EmulatorVersion};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVersion {
    pub major: u32,
    pub minor: u32,
}

impl From<ModelVersion> for EmulatorVersion {
    fn from(version: ModelVersion) -> Self {
        EmulatorVersion {
            major: version.major,
            minor: version.minor,
        }
    }
}

/// One product term `coefficient * prod_i P_{degrees[i]}(x_i)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PceTerm {
    pub degrees: [u32; COSMOLOGY_PARAMETER_COUNT],
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalComponent {
    pub basis: Vec<Vec<f64>>,
    #[serde(default)]
    pub terms: Vec<PceTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PceModel {
    pub name: String,
    pub version: ModelVersion,
    pub parameter_bounds: [[f64; 2]; COSMOLOGY_PARAMETER_COUNT],
    pub k_values: Vec<f64>,
    pub redshift_nodes: Vec<f64>,
    pub mean_log_boost: Vec<Vec<f64>>,
    #[serde(default)]
    pub principal_components: Vec<PrincipalComponent>,
}

impl PceModel {
    pub fn from_path(path: &Path) -> EmuResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| {
            EmuError::io_system(
                "IO.MODEL_READ",
                format!("failed to read emulator model '{}': {}", path.display(), source),
            )
        })?;
        let model = Self::from_json(&content).map_err(|error| {
            EmuError::new(
                error.category(),
                error.code(),
                format!("{} ('{}')", error.message(), path.display()),
            )
        })?;
        tracing::debug!(
            path = %path.display(),
            name = %model.name,
            k_count = model.k_values.len(),
            node_count = model.redshift_nodes.len(),
            component_count = model.principal_components.len(),
            "loaded emulator model"
        );
        Ok(model)
    }

    pub fn from_json(content: &str) -> EmuResult<Self> {
        let model: Self = serde_json::from_str(content).map_err(|source| {
            EmuError::io_system(
                "IO.MODEL_PARSE",
                format!("failed to parse emulator model: {}", source),
            )
        })?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> EmuResult<()> {
        for (name, [min, max]) in PARAMETER_NAMES.iter().zip(self.parameter_bounds) {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(EmuError::model(
                    "MODEL.PARAMETER_BOUNDS",
                    format!("bounds for '{name}' must be finite with min < max, got [{min}, {max}]"),
                ));
            }
        }

        if self.k_values.is_empty() {
            return Err(EmuError::model("MODEL.K_VALUES", "model has no wavenumbers"));
        }
        if let Some((index, k)) = self
            .k_values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, k)| !k.is_finite() || *k <= 0.0)
        {
            return Err(EmuError::model(
                "MODEL.K_VALUES",
                format!("wavenumber at index {index} must be finite and > 0, got {k}"),
            ));
        }

        self.validate_redshift_nodes()?;

        let rows = self.redshift_nodes.len();
        let cols = self.k_values.len();
        validate_table("mean_log_boost", &self.mean_log_boost, rows, cols)?;
        for (index, component) in self.principal_components.iter().enumerate() {
            validate_table(
                &format!("principal_components[{index}].basis"),
                &component.basis,
                rows,
                cols,
            )?;
            if let Some(term) = component
                .terms
                .iter()
                .find(|term| !term.coefficient.is_finite())
            {
                return Err(EmuError::model(
                    "MODEL.PCE_TERM",
                    format!(
                        "principal component {index} has a non-finite coefficient {}",
                        term.coefficient
                    ),
                ));
            }
        }

        Ok(())
    }

    fn validate_redshift_nodes(&self) -> EmuResult<()> {
        let nodes = &self.redshift_nodes;
        if nodes.len() < 2 {
            return Err(EmuError::model(
                "MODEL.REDSHIFT_NODES",
                format!("model needs at least 2 redshift nodes, got {}", nodes.len()),
            ));
        }
        if nodes.iter().any(|z| !z.is_finite()) {
            return Err(EmuError::model(
                "MODEL.REDSHIFT_NODES",
                "redshift nodes must be finite",
            ));
        }
        if let Some(index) = (1..nodes.len()).find(|index| nodes[*index] <= nodes[index - 1]) {
            return Err(EmuError::model(
                "MODEL.REDSHIFT_NODES",
                format!(
                    "redshift nodes must be strictly increasing, index {index} has {} after {}",
                    nodes[index],
                    nodes[index - 1]
                ),
            ));
        }

        let first = nodes[0];
        let last = nodes[nodes.len() - 1];
        if first > 0.0 || last < MAX_REDSHIFT {
            return Err(EmuError::model(
                "MODEL.REDSHIFT_NODES",
                format!("redshift nodes [{first}, {last}] must cover [0, {MAX_REDSHIFT}]"),
            ));
        }

        Ok(())
    }
}

fn validate_table(field: &str, table: &[Vec<f64>], rows: usize, cols: usize) -> EmuResult<()> {
    if table.len() != rows {
        return Err(EmuError::model(
            "MODEL.TABLE_SHAPE",
            format!("'{field}' has {} rows, expected {rows} (one per redshift node)", table.len()),
        ));
    }
    for (row_index, row) in table.iter().enumerate() {
        if row.len() != cols {
            return Err(EmuError::model(
                "MODEL.TABLE_SHAPE",
                format!(
                    "'{field}' row {row_index} has {} values, expected {cols} (one per wavenumber)",
                    row.len()
                ),
            ));
        }
        if let Some(value) = row.iter().find(|value| !value.is_finite()) {
            return Err(EmuError::model(
                "MODEL.TABLE_VALUE",
                format!("'{field}' row {row_index} contains non-finite value {value}"),
            ));
        }
    }
    Ok(())
}
