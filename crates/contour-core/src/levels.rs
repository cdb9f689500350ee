//! Confidence-level threshold tables.

use crate::surface::{SurfaceType, HILL_OFFSET};

/// Number of sigma levels traced per extraction.
pub const N_SIGMA_LEVELS: usize = 5;

/// Chi2 deltas for 1..5 sigma with one degree of freedom.
pub const CHI2_DELTA_1D: [f64; N_SIGMA_LEVELS] = [1.0, 4.0, 9.0, 16.0, 25.0];

/// Chi2 deltas for 1..5 sigma calibrated for two degrees of freedom.
pub const CHI2_DELTA_2D: [f64; N_SIGMA_LEVELS] = [2.30, 6.18, 11.83, 19.34, 28.76];

/// Two-sided p-value thresholds for 1..5 sigma.
pub const P_VALUE_THRESHOLDS: [f64; N_SIGMA_LEVELS] = [0.3173, 4.55e-2, 2.7e-3, 6.3e-5, 5.7e-7];

/// Build the five level values handed to the tracer, in ascending order
/// (index 0 = loosest confidence, index 4 = tightest).
///
/// Chi2 levels are expressed on the hill surface as `HILL_OFFSET - delta`;
/// p-value levels are the raw thresholds.
pub fn target_levels(surface: SurfaceType, two_dim_cl: bool) -> [f64; N_SIGMA_LEVELS] {
    let mut levels = [0.0; N_SIGMA_LEVELS];
    match surface {
        SurfaceType::Chi2 => {
            let deltas = if two_dim_cl {
                &CHI2_DELTA_2D
            } else {
                &CHI2_DELTA_1D
            };
            for (i, level) in levels.iter_mut().enumerate() {
                *level = HILL_OFFSET - deltas[N_SIGMA_LEVELS - 1 - i];
            }
        }
        SurfaceType::PValue => {
            for (i, level) in levels.iter_mut().enumerate() {
                *level = P_VALUE_THRESHOLDS[N_SIGMA_LEVELS - 1 - i];
            }
        }
    }
    levels
}
