//! Core trait for conducting elements of the hydraulic pathway.

use crate::common::integrate_tension;

/// An element that conducts water from a lower to a higher tension.
///
/// Elements are deterministic functions of tension and parameters, so they
/// can be evaluated repeatedly inside nested Newton iterations.
pub trait ConductingElement: Send + Sync {
    /// Element name for diagnostics.
    fn name(&self) -> &str;

    /// Saturated (zero tension) conductance.
    fn kmax(&self) -> f64;

    /// Fraction of `kmax` still conducting at tension `p`, in [0, 1].
    fn conductance_fraction(&self, p: f64) -> f64;

    /// Conductance at tension `p`.
    fn conductance(&self, p: f64) -> f64 {
        self.kmax() * self.conductance_fraction(p)
    }

    /// Steady flow through the element with `upstream` tension at its inlet
    /// and `downstream` tension at its outlet.
    ///
    /// Positive when `downstream > upstream`; negative for reversed gradients.
    fn flow(&self, upstream: f64, downstream: f64) -> f64 {
        integrate_tension(|p| self.conductance_fraction(p), upstream, downstream) * self.kmax()
    }
}
