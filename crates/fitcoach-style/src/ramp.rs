//! Twelve-step shade ramp derived from one primary color.

use std::fmt;

use crate::color::shade;

/// Luminance added per step away from `500`.
pub const SHADE_OFFSET: i32 = 40;

/// A step of the primary ramp, ordered lightest to darkest.
///
/// `Default` sorts first but carries the base color, same as `S500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShadeStep {
    Default,
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl ShadeStep {
    pub const ALL: [ShadeStep; 12] = [
        ShadeStep::Default,
        ShadeStep::S50,
        ShadeStep::S100,
        ShadeStep::S200,
        ShadeStep::S300,
        ShadeStep::S400,
        ShadeStep::S500,
        ShadeStep::S600,
        ShadeStep::S700,
        ShadeStep::S800,
        ShadeStep::S900,
        ShadeStep::S950,
    ];

    /// Key used in style-variable names (`--color-primary-<key>`).
    pub fn key(self) -> &'static str {
        match self {
            ShadeStep::Default => "default",
            ShadeStep::S50 => "50",
            ShadeStep::S100 => "100",
            ShadeStep::S200 => "200",
            ShadeStep::S300 => "300",
            ShadeStep::S400 => "400",
            ShadeStep::S500 => "500",
            ShadeStep::S600 => "600",
            ShadeStep::S700 => "700",
            ShadeStep::S800 => "800",
            ShadeStep::S900 => "900",
            ShadeStep::S950 => "950",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.key() == key)
    }

    /// Number of steps away from the base; negative is lighter.
    fn distance(self) -> i32 {
        match self {
            ShadeStep::Default | ShadeStep::S500 => 0,
            ShadeStep::S400 => -1,
            ShadeStep::S300 => -2,
            ShadeStep::S200 => -3,
            ShadeStep::S100 => -4,
            ShadeStep::S50 => -5,
            ShadeStep::S600 => 1,
            ShadeStep::S700 => 2,
            ShadeStep::S800 => 3,
            ShadeStep::S900 => 4,
            ShadeStep::S950 => 5,
        }
    }

    /// Luminance offset applied to the base color for this step.
    pub fn offset(self) -> i32 {
        -self.distance() * SHADE_OFFSET
    }
}

impl fmt::Display for ShadeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The full primary palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRamp {
    shades: [String; 12],
}

impl ColorRamp {
    /// Builds the ramp for `base`.
    ///
    /// `default` and `500` hold `base` verbatim; every other step is
    /// [`shade`]d by its offset. `base` must be a valid hex color.
    pub fn generate(base: &str) -> Self {
        let shades = ShadeStep::ALL.map(|step| match step.offset() {
            0 => base.to_string(),
            offset => shade(base, offset),
        });
        Self { shades }
    }

    pub fn get(&self, step: ShadeStep) -> &str {
        &self.shades[step as usize]
    }

    pub fn base(&self) -> &str {
        self.get(ShadeStep::S500)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShadeStep, &str)> {
        ShadeStep::ALL
            .into_iter()
            .zip(self.shades.iter().map(String::as_str))
    }
}
