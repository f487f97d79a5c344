//! Benchmark profiles for the Gyre track propagation toolkit.
//!
//! Provides pre-wired propagators over the canonical test tracker so the
//! benches (and ad-hoc profiling) share one setup.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use gyre_core::{units, ConstantField, GeometryProvider};
use gyre_propagator::Propagator;
use gyre_stepper::{RungeKuttaStepper, StraightLineStepper};
use gyre_test_utils::CylinderTracker;

/// Nominal field strength for the benchmark profiles.
pub const FIELD_BZ: f64 = 2.0 * units::T;

/// A field-integrating propagator over the canonical tracker.
pub fn reference_rk_propagator() -> Propagator {
    let geometry = Arc::new(CylinderTracker::tracker());
    Propagator::new(
        Box::new(RungeKuttaStepper::new(Box::new(ConstantField::axial(
            FIELD_BZ,
        )))),
        geometry as Arc<dyn GeometryProvider>,
    )
}

/// A straight-line propagator over the canonical tracker.
pub fn reference_sl_propagator() -> Propagator {
    let geometry = Arc::new(CylinderTracker::tracker());
    Propagator::new(
        Box::new(StraightLineStepper::new()),
        geometry as Arc<dyn GeometryProvider>,
    )
}
