//! Shared test utilities for the scan-contours crates.

pub mod generators;

pub use generators::{
    centered_chi2_bowl, constant_pvalue_grid, edge_chi2_bowl, gaussian_pvalue_grid,
    shallow_chi2_bowl, shallow_edge_chi2_bowl,
};
