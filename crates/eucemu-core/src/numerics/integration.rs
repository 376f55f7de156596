#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RombergError {
    #[error("romberg integration requires 2^k + 1 samples, got {actual}")]
    InvalidSampleCount { actual: usize },
    #[error("romberg sample spacing must be finite, got {spacing}")]
    InvalidSpacing { spacing: f64 },
    #[error("romberg samples must be finite, index {index} got {value}")]
    NonFiniteSample { index: usize, value: f64 },
    #[error("romberg precision {precision} exceeds the addressable sample count")]
    PrecisionTooLarge { precision: u32 },
    #[error("romberg integration produced a non-finite result")]
    NonFiniteResult,
}

/// Romberg integration of `2^k + 1` equally spaced samples with spacing `spacing`.
///
/// Builds the trapezoid sequence on successively halved strides and applies
/// Richardson extrapolation across the full tableau.
pub fn romberg_samples(samples: &[f64], spacing: f64) -> Result<f64, RombergError> {
    let interval_count = samples.len().saturating_sub(1);
    if interval_count == 0 || !interval_count.is_power_of_two() {
        return Err(RombergError::InvalidSampleCount {
            actual: samples.len(),
        });
    }
    if !spacing.is_finite() {
        return Err(RombergError::InvalidSpacing { spacing });
    }
    if let Some((index, value)) = samples
        .iter()
        .copied()
        .enumerate()
        .find(|(_, value)| !value.is_finite())
    {
        return Err(RombergError::NonFiniteSample { index, value });
    }

    let levels = interval_count.trailing_zeros() as usize;
    let span = spacing * interval_count as f64;

    let mut previous = vec![0.5 * span * (samples[0] + samples[interval_count])];
    for level in 1..=levels {
        let stride = interval_count >> level;
        let step = span / (1_usize << level) as f64;
        let midpoint_sum: f64 = (stride..interval_count)
            .step_by(2 * stride)
            .map(|index| samples[index])
            .sum();

        let mut current = Vec::with_capacity(level + 1);
        current.push(0.5 * previous[0] + step * midpoint_sum);
        for column in 1..=level {
            let factor = 4.0_f64.powi(column as i32) - 1.0;
            let refined = current[column - 1] + (current[column - 1] - previous[column - 1]) / factor;
            current.push(refined);
        }
        previous = current;
    }

    let integral = previous[levels];
    if !integral.is_finite() {
        return Err(RombergError::NonFiniteResult);
    }

    Ok(integral)
}

/// Samples `integrand` on `2^precision + 1` points over `[lower, upper]` and integrates with Romberg.
pub fn romberg_uniform<F>(
    integrand: F,
    lower: f64,
    upper: f64,
    precision: u32,
) -> Result<f64, RombergError>
where
    F: Fn(f64) -> f64,
{
    if precision >= usize::BITS {
        return Err(RombergError::PrecisionTooLarge { precision });
    }
    let interval_count = 1_usize << precision;
    let spacing = (upper - lower) / interval_count as f64;
    let samples: Vec<f64> = (0..=interval_count)
        .map(|index| {
            let at = if index == interval_count {
                upper
            } else {
                lower + spacing * index as f64
            };
            integrand(at)
        })
        .collect();

    romberg_samples(&samples, spacing)
}
