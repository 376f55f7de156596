#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplineError {
    #[error("cubic spline requires at least 2 nodes, got {actual}")]
    InsufficientPoints { actual: usize },
    #[error("cubic spline input length mismatch: x={x}, y={y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("cubic spline nodes must be strictly increasing, index {index} has {current} after {previous}")]
    NonIncreasingNode {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("cubic spline vector '{field}' must contain finite values, index {index} got {value}")]
    NonFiniteValue {
        field: &'static str,
        index: usize,
        value: f64,
    },
}

/// Natural cubic spline (zero second derivative at both ends).
///
/// Queries outside the node range continue the boundary cubic.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    second_derivatives: Vec<f64>,
}

impl NaturalCubicSpline {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, SplineError> {
        validate_nodes(x, y)?;

        let second_derivatives = solve_second_derivatives(x, y);
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            second_derivatives,
        })
    }

    pub fn evaluate(&self, at: f64) -> f64 {
        let segment = self.segment_for(at);
        let x_lo = self.x[segment];
        let x_hi = self.x[segment + 1];
        let width = x_hi - x_lo;
        let m_lo = self.second_derivatives[segment];
        let m_hi = self.second_derivatives[segment + 1];

        let right = x_hi - at;
        let left = at - x_lo;
        m_lo * right.powi(3) / (6.0 * width)
            + m_hi * left.powi(3) / (6.0 * width)
            + (self.y[segment] / width - m_lo * width / 6.0) * right
            + (self.y[segment + 1] / width - m_hi * width / 6.0) * left
    }

    fn segment_for(&self, at: f64) -> usize {
        let last_segment = self.x.len() - 2;
        self.x
            .partition_point(|node| *node <= at)
            .saturating_sub(1)
            .min(last_segment)
    }
}

fn validate_nodes(x: &[f64], y: &[f64]) -> Result<(), SplineError> {
    if x.len() != y.len() {
        return Err(SplineError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(SplineError::InsufficientPoints { actual: x.len() });
    }

    for (field, values) in [("x", x), ("y", y)] {
        if let Some((index, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(SplineError::NonFiniteValue {
                field,
                index,
                value,
            });
        }
    }

    for index in 1..x.len() {
        if x[index] <= x[index - 1] {
            return Err(SplineError::NonIncreasingNode {
                index,
                previous: x[index - 1],
                current: x[index],
            });
        }
    }

    Ok(())
}

// Tridiagonal system for the interior second derivatives (Thomas algorithm).
fn solve_second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let count = x.len();
    let mut second = vec![0.0; count];
    if count < 3 {
        return second;
    }

    let interior = count - 2;
    let mut diagonal = vec![0.0; interior];
    let mut upper = vec![0.0; interior];
    let mut rhs = vec![0.0; interior];

    for row in 0..interior {
        let node = row + 1;
        let h_left = x[node] - x[node - 1];
        let h_right = x[node + 1] - x[node];
        diagonal[row] = 2.0 * (h_left + h_right);
        upper[row] = h_right;
        rhs[row] = 6.0 * ((y[node + 1] - y[node]) / h_right - (y[node] - y[node - 1]) / h_left);
    }

    for row in 1..interior {
        let lower = x[row + 1] - x[row];
        let factor = lower / diagonal[row - 1];
        diagonal[row] -= factor * upper[row - 1];
        rhs[row] -= factor * rhs[row - 1];
    }

    second[interior] = rhs[interior - 1] / diagonal[interior - 1];
    for row in (0..interior - 1).rev() {
        second[row + 1] = (rhs[row] - upper[row] * second[row + 2]) / diagonal[row];
    }

    second
}
