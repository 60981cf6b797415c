//! The ten-slot parameter vector, its configured ranges and the preset
//! wrappers that pin a subset of slots.

use crate::config::ShapeConfig;
use crate::errors::ParameterError;
use crate::float_types::{FRAC_PI_2, PI, Real, tolerance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names the ten slots of a [`ParameterSet`], in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Length,
    Circumference,
    ShaftCurve,
    ShaftAngle,
    HeadAngle,
    ShaftExpansion,
    HeadExpansion,
    Flag0,
    Flag1,
    Flag2,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 10] = [
        ParameterKind::Length,
        ParameterKind::Circumference,
        ParameterKind::ShaftCurve,
        ParameterKind::ShaftAngle,
        ParameterKind::HeadAngle,
        ParameterKind::ShaftExpansion,
        ParameterKind::HeadExpansion,
        ParameterKind::Flag0,
        ParameterKind::Flag1,
        ParameterKind::Flag2,
    ];

    /// Slot position in the raw ten-value vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            ParameterKind::Length => "Length",
            ParameterKind::Circumference => "Circumference",
            ParameterKind::ShaftCurve => "Shaft Curve",
            ParameterKind::ShaftAngle => "Shaft Angle",
            ParameterKind::HeadAngle => "Head Angle",
            ParameterKind::ShaftExpansion => "Shaft Expansion rate",
            ParameterKind::HeadExpansion => "Head Expansion rate",
            ParameterKind::Flag0 => "Flag 0",
            ParameterKind::Flag1 => "Flag 1",
            ParameterKind::Flag2 => "Flag 2",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            ParameterKind::Length | ParameterKind::Circumference => "mm",
            ParameterKind::ShaftCurve
            | ParameterKind::ShaftAngle
            | ParameterKind::HeadAngle => "°",
            ParameterKind::ShaftExpansion | ParameterKind::HeadExpansion => "%",
            ParameterKind::Flag0 | ParameterKind::Flag1 | ParameterKind::Flag2 => "",
        }
    }

    /// Angles fed through a `1 / cos` compensation in the pipeline.
    pub const fn is_secant_compensated(self) -> bool {
        matches!(self, ParameterKind::ShaftCurve | ParameterKind::ShaftAngle)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configured range, step granularity and default of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub min: Real,
    pub max: Real,
    pub step: Real,
    pub default: Real,
}

impl ParameterSpec {
    pub const fn new(min: Real, max: Real, step: Real, default: Real) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    /// Clamps into `[min, max]` and snaps to the nearest step. NaN maps to the default.
    ///
    /// An inverted range (`min > max`) collapses to `max`.
    pub fn clamp(&self, value: Real) -> Real {
        if value.is_nan() {
            return self.default;
        }
        let clamped = value.max(self.min).min(self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.min(self.max)
    }

    fn is_on_step(&self, value: Real) -> bool {
        if self.step <= 0.0 {
            return true;
        }
        let steps = (value - self.min) / self.step;
        (steps - steps.round()).abs() <= tolerance().max(steps.abs() * Real::EPSILON)
    }
}

/// The parameter vector driving one generator call.
///
/// Only the first seven slots shape the profile; the three flags are carried
/// through for downstream consumers and never read by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Target horizontal distance from the base axis end to the rim.
    pub length: Real,
    /// Target outer circumference of the shaft; the diameter is `circumference / π`.
    pub circumference: Real,
    /// Bend along the middle of the shaft, in degrees.
    pub shaft_curve: Real,
    /// Rigid bend at the base of the shaft, in degrees.
    pub shaft_angle: Real,
    /// Tilt of the rim neighbourhood, in degrees.
    pub head_angle: Real,
    /// Radial scale of the shaft in percent.
    pub shaft_expansion: Real,
    /// Radial scale of the head in percent.
    pub head_expansion: Real,
    pub flags: [Real; 3],
}

impl Default for ParameterSet {
    fn default() -> Self {
        ShapeConfig::standard().default_parameters()
    }
}

impl ParameterSet {
    /// Builds a set from the raw ten-slot vector, in [`ParameterKind::ALL`] order.
    pub const fn from_array(values: [Real; 10]) -> Self {
        Self {
            length: values[0],
            circumference: values[1],
            shaft_curve: values[2],
            shaft_angle: values[3],
            head_angle: values[4],
            shaft_expansion: values[5],
            head_expansion: values[6],
            flags: [values[7], values[8], values[9]],
        }
    }

    pub const fn to_array(&self) -> [Real; 10] {
        [
            self.length,
            self.circumference,
            self.shaft_curve,
            self.shaft_angle,
            self.head_angle,
            self.shaft_expansion,
            self.head_expansion,
            self.flags[0],
            self.flags[1],
            self.flags[2],
        ]
    }

    pub const fn get(&self, kind: ParameterKind) -> Real {
        self.to_array()[kind.index()]
    }

    pub fn set(&mut self, kind: ParameterKind, value: Real) {
        let mut values = self.to_array();
        values[kind.index()] = value;
        *self = Self::from_array(values);
    }

    /// Returns a copy with one slot replaced.
    pub fn with(mut self, kind: ParameterKind, value: Real) -> Self {
        self.set(kind, value);
        self
    }

    /// Diameter implied by the circumference slot.
    pub fn diameter(&self) -> Real {
        self.circumference / PI
    }

    /// Checks every slot against `config`.
    ///
    /// The generator accepts anything; this is the caller-side gate. Bend
    /// angles at or beyond ±90° are reported as [`ParameterError::SingularAngle`]
    /// even when a custom config would allow them.
    pub fn validate(&self, config: &ShapeConfig) -> Result<(), ParameterError> {
        for kind in ParameterKind::ALL {
            let value = self.get(kind);
            let spec = config.spec(kind);

            if !value.is_finite() {
                return Err(ParameterError::NonFinite { kind, value });
            }
            if kind.is_secant_compensated() && value.to_radians().abs() >= FRAC_PI_2 {
                return Err(ParameterError::SingularAngle { kind, value });
            }
            if value < spec.min || value > spec.max {
                return Err(ParameterError::OutOfRange {
                    kind,
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
            if !spec.is_on_step(value) {
                return Err(ParameterError::OffStep {
                    kind,
                    value,
                    min: spec.min,
                    step: spec.step,
                });
            }
        }
        Ok(())
    }

    /// Clamps and step-snaps every slot into `config`'s ranges.
    pub fn clamped(&self, config: &ShapeConfig) -> Self {
        let values = self.to_array();
        Self::from_array(std::array::from_fn(|i| {
            config.spec(ParameterKind::ALL[i]).clamp(values[i])
        }))
    }

    /// One human-readable line per geometry slot.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("Length : {}mm", self.length),
            format!("Diameter : φ{}mm", self.diameter().floor()),
            format!("Shaft Curve : {}°", self.shaft_curve),
            format!("Shaft Angle : {}°", self.shaft_angle),
            format!("Head Angle : {}°", self.head_angle),
            format!("Shaft Expansion rate : {}%", self.shaft_expansion),
            format!("Head Expansion rate : {}%", self.head_expansion),
        ]
    }
}

/// Wrappers that pin some slots before delegating to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    /// Every geometry slot fixed; only the flags pass through.
    Showcase,
    /// Straight, with circumference fixed at 80.
    NarrowStraight,
    /// Straight: no curve, bend or tilt.
    Straight,
    /// Straight shaft that keeps the caller's head angle.
    StraightTipTilt,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Showcase,
        Preset::NarrowStraight,
        Preset::Straight,
        Preset::StraightTipTilt,
    ];

    pub fn apply(self, params: &ParameterSet) -> ParameterSet {
        let p = *params;
        match self {
            Preset::Showcase => ParameterSet {
                length: 90.0,
                circumference: 80.0,
                shaft_curve: -20.0,
                shaft_angle: -40.0,
                head_angle: -30.0,
                shaft_expansion: 140.0,
                head_expansion: 80.0,
                flags: p.flags,
            },
            Preset::NarrowStraight => ParameterSet {
                circumference: 80.0,
                shaft_curve: 0.0,
                shaft_angle: 0.0,
                head_angle: 0.0,
                ..p
            },
            Preset::Straight => ParameterSet {
                shaft_curve: 0.0,
                shaft_angle: 0.0,
                head_angle: 0.0,
                ..p
            },
            Preset::StraightTipTilt => ParameterSet {
                shaft_curve: 0.0,
                shaft_angle: 0.0,
                ..p
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_round_trip_keeps_slot_order() {
        let raw = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let set = ParameterSet::from_array(raw);
        assert_eq!(set.head_expansion, 7.0);
        assert_eq!(set.flags, [8.0, 9.0, 10.0]);
        assert_eq!(set.to_array(), raw);
        for kind in ParameterKind::ALL {
            assert_eq!(set.get(kind), raw[kind.index()]);
        }
    }

    #[test]
    fn spec_clamp_snaps_to_step() {
        let spec = ParameterSpec::new(75.0, 150.0, 5.0, 100.0);
        assert_eq!(spec.clamp(200.0), 150.0);
        assert_eq!(spec.clamp(10.0), 75.0);
        assert_eq!(spec.clamp(93.0), 95.0);
        assert_eq!(spec.clamp(Real::NAN), 100.0);
    }

    #[test]
    fn inverted_spec_clamps_without_panicking() {
        let spec = ParameterSpec::new(10.0, 5.0, 1.0, 7.0);
        assert_eq!(spec.clamp(0.0), 5.0);
        assert_eq!(spec.clamp(20.0), 5.0);
        assert_eq!(spec.clamp(7.0), 5.0);
    }

    #[test]
    fn presets_keep_flags() {
        let p = ParameterSet::default().with(ParameterKind::Flag1, 1.0);
        for preset in Preset::ALL {
            assert_eq!(preset.apply(&p).flags, p.flags);
        }
    }
}
