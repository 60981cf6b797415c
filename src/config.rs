//! Static shape configuration: template, parameter table and guard constants.

use crate::float_types::Real;
use crate::parameters::{ParameterKind, ParameterSet, ParameterSpec};
use crate::template::Template;

/// Immutable configuration the generator reads from.
///
/// Nothing mutates a `ShapeConfig` after construction, so a single static
/// instance is shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeConfig {
    pub template: Template,
    /// One entry per slot, in [`ParameterKind::ALL`] order.
    pub parameters: [ParameterSpec; 10],
    /// Fraction of the base-to-rim span the neck must stay beyond after head widening.
    pub neck_margin: Real,
    /// Fraction of the base-to-rim span used in the fallback head width factor.
    pub neck_fallback_fraction: Real,
}

static STANDARD: ShapeConfig = ShapeConfig {
    template: Template::STANDARD,
    parameters: [
        ParameterSpec::new(50.0, 300.0, 1.0, 140.0),
        ParameterSpec::new(50.0, 300.0, 1.0, 140.0),
        ParameterSpec::new(-60.0, 60.0, 1.0, 10.0),
        ParameterSpec::new(-60.0, 60.0, 1.0, 10.0),
        ParameterSpec::new(-40.0, 40.0, 1.0, 0.0),
        ParameterSpec::new(75.0, 200.0, 1.0, 100.0),
        ParameterSpec::new(75.0, 150.0, 1.0, 100.0),
        ParameterSpec::new(0.0, 1.0, 1.0, 0.0),
        ParameterSpec::new(0.0, 1.0, 1.0, 0.0),
        ParameterSpec::new(0.0, 1.0, 1.0, 0.0),
    ],
    neck_margin: 0.1,
    neck_fallback_fraction: 0.1,
};

impl ShapeConfig {
    /// The built-in configuration.
    pub fn standard() -> &'static ShapeConfig {
        &STANDARD
    }

    #[inline]
    pub fn spec(&self, kind: ParameterKind) -> &ParameterSpec {
        &self.parameters[kind.index()]
    }

    /// A parameter set holding every slot's configured default.
    pub fn default_parameters(&self) -> ParameterSet {
        ParameterSet::from_array(std::array::from_fn(|i| self.parameters[i].default))
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        STANDARD.clone()
    }
}
