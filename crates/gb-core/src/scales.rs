//! Reference scales for nondimensionalizing a problem.
//!
//! Every quantity stored inside the solver is divided by a reference scale
//! (length, time, pressure, ...) for numerical conditioning. Values coming
//! from the outside world (spatial databases, time histories) are converted
//! with [`Normalizer::nondimensionalize`]; values going back out are
//! converted with [`Normalizer::dimensionalize`].

use crate::error::GbResult;
use crate::numeric::{Real, ensure_positive};
use crate::units::{Density, Length, Pressure, Temperature, Time};

/// Reference scales in SI units.
///
/// All scales default to 1 (no scaling).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalizer {
    length_scale: Real,
    pressure_scale: Real,
    time_scale: Real,
    density_scale: Real,
    temperature_scale: Real,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            length_scale: 1.0,
            pressure_scale: 1.0,
            time_scale: 1.0,
            density_scale: 1.0,
            temperature_scale: 1.0,
        }
    }
}

impl Normalizer {
    /// Create a normalizer from typed reference quantities.
    ///
    /// # Errors
    ///
    /// Returns error if any scale is not finite and positive.
    pub fn new(
        length: Length,
        pressure: Pressure,
        time: Time,
        density: Density,
        temperature: Temperature,
    ) -> GbResult<Self> {
        Ok(Self {
            length_scale: ensure_positive(length.value, "length scale")?,
            pressure_scale: ensure_positive(pressure.value, "pressure scale")?,
            time_scale: ensure_positive(time.value, "time scale")?,
            density_scale: ensure_positive(density.value, "density scale")?,
            temperature_scale: ensure_positive(temperature.value, "temperature scale")?,
        })
    }

    pub fn with_length_scale(mut self, length: Length) -> GbResult<Self> {
        self.length_scale = ensure_positive(length.value, "length scale")?;
        Ok(self)
    }

    pub fn with_pressure_scale(mut self, pressure: Pressure) -> GbResult<Self> {
        self.pressure_scale = ensure_positive(pressure.value, "pressure scale")?;
        Ok(self)
    }

    pub fn with_time_scale(mut self, time: Time) -> GbResult<Self> {
        self.time_scale = ensure_positive(time.value, "time scale")?;
        Ok(self)
    }

    pub fn with_density_scale(mut self, density: Density) -> GbResult<Self> {
        self.density_scale = ensure_positive(density.value, "density scale")?;
        Ok(self)
    }

    pub fn with_temperature_scale(mut self, temperature: Temperature) -> GbResult<Self> {
        self.temperature_scale = ensure_positive(temperature.value, "temperature scale")?;
        Ok(self)
    }

    /// Length scale in meters.
    pub fn length_scale(&self) -> Real {
        self.length_scale
    }

    /// Pressure scale in pascals.
    pub fn pressure_scale(&self) -> Real {
        self.pressure_scale
    }

    /// Time scale in seconds.
    pub fn time_scale(&self) -> Real {
        self.time_scale
    }

    /// Density scale in kg/m^3.
    pub fn density_scale(&self) -> Real {
        self.density_scale
    }

    /// Temperature scale in kelvin.
    pub fn temperature_scale(&self) -> Real {
        self.temperature_scale
    }

    /// Make values dimensional: `v *= scale`.
    pub fn dimensionalize(&self, values: &mut [Real], scale: Real) {
        debug_assert!(scale > 0.0, "scale must be positive");
        for v in values.iter_mut() {
            *v *= scale;
        }
    }

    /// Make values nondimensional: `v /= scale`.
    pub fn nondimensionalize(&self, values: &mut [Real], scale: Real) {
        debug_assert!(scale > 0.0, "scale must be positive");
        for v in values.iter_mut() {
            *v /= scale;
        }
    }

    pub fn dimensionalize_value(&self, value: Real, scale: Real) -> Real {
        debug_assert!(scale > 0.0, "scale must be positive");
        value * scale
    }

    pub fn nondimensionalize_value(&self, value: Real, scale: Real) -> Real {
        debug_assert!(scale > 0.0, "scale must be positive");
        value / scale
    }
}
