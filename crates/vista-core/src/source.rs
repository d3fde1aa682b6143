//! The [`GeometrySource`] trait shared by all parametric sources.

use crate::multiblock::MultiBlock;

/// A parametric generator of composite geometry.
///
/// Sources hold their parameters and rebuild their output on demand. Setters
/// mark the source dirty; [`GeometrySource::update`] regenerates the output
/// from the current parameters and clears the flag.
pub trait GeometrySource {
    /// Returns the type name of this source (e.g., "`AxesGeometrySource`").
    fn type_name(&self) -> &'static str;

    /// Regenerates the output from the current parameters.
    fn update(&mut self);

    /// Returns whether parameters changed since the last update.
    fn is_dirty(&self) -> bool;

    /// Regenerates and returns a copy of the output.
    ///
    /// The returned composite is owned by the caller; later parameter changes
    /// do not affect it.
    fn output(&mut self) -> MultiBlock {
        self.update();
        self.current_output().clone()
    }

    /// Returns the output as of the last update, without regenerating.
    fn current_output(&self) -> &MultiBlock;
}
