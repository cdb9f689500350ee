//! Options controlling contour computation and drawing.

use crate::levels::N_SIGMA_LEVELS;
use scan_common::{ScanError, ScanResult};

/// Configuration for one `ConfidenceContours` instance.
#[derive(Debug, Clone)]
pub struct ContourOptions {
    /// Emit verbose stage diagnostics during computation.
    pub debug: bool,

    /// Use chi2 levels calibrated for two degrees of freedom.
    pub two_dim_cl: bool,

    /// Snap contours back onto the original grid boundary after extraction.
    pub magnetic_boundaries: bool,

    /// How many sigma levels to draw (1..=5).
    pub n_sigma_contours: usize,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            debug: false,
            two_dim_cl: false,
            magnetic_boundaries: false,
            n_sigma_contours: 2,
        }
    }
}

impl ContourOptions {
    /// Load options from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(val) = std::env::var("CONTOUR_DEBUG") {
            options.debug = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("CONTOUR_2D_CL") {
            options.two_dim_cl = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("CONTOUR_MAGNETIC") {
            options.magnetic_boundaries = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("CONTOUR_NSIGMA") {
            if let Ok(n) = val.parse() {
                options.n_sigma_contours = n;
            }
        }

        options
    }

    /// Validate the option values.
    pub fn validate(&self) -> ScanResult<()> {
        if self.n_sigma_contours == 0 || self.n_sigma_contours > N_SIGMA_LEVELS {
            return Err(ScanError::InvalidOption {
                option: "n_sigma_contours".to_string(),
                message: format!(
                    "must be 1..={}, got {}",
                    N_SIGMA_LEVELS, self.n_sigma_contours
                ),
            });
        }
        Ok(())
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}
