//! Level configuration and tracer invocation.

use crate::batch::BatchGuard;
use crate::levels::{target_levels, N_SIGMA_LEVELS};
use crate::surface::SurfaceType;
use crate::trace::{LevelSetTracer, RingSet};
use scan_common::ScanGrid;
use tracing::debug;

/// Configure the five target levels for the surface type and run the tracer
/// over the padded grid.
///
/// The tracer needs a rendering pass to produce its geometry; the pass runs
/// with interactive rendering disabled and the prior mode is restored on
/// every path out of this function.
pub fn extract_ring_sets(
    padded: &ScanGrid,
    surface: SurfaceType,
    two_dim_cl: bool,
    tracer: &mut dyn LevelSetTracer,
) -> [RingSet; N_SIGMA_LEVELS] {
    let levels = target_levels(surface, two_dim_cl);
    debug!(?levels, ?surface, "configuring contour levels");

    let _batch = BatchGuard::enter();
    tracer.configure_levels(levels);
    tracer.trace(padded)
}
