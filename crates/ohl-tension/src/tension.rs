//! Sag-tension solver.

use crate::error::{TensionError, TensionResult};
use ohl_conductor::Conductor;
use ohl_core::bisect;
use ohl_core::bounds::{self, TENSION_MAX};
use ohl_core::error::OhlError;
use std::f64::consts::PI;

/// Equation-of-state residual between the reference point (1) and the
/// calculation point (2). Zero at the consistent tension `t2`.
///
/// `span` ruling span [m]; `p1`/`p2` transverse loads [kg/m]; `t1`/`t2`
/// longitudinal tensions [kg]; `temp1`/`temp2` conductor temperatures
/// [°C]; `area` [mm²]; `modulus` [kg/mm²]; `expansion` [1/°C].
#[allow(clippy::too_many_arguments)]
fn eos_residual(
    span: f64,
    p1: f64,
    p2: f64,
    t1: f64,
    t2: f64,
    temp1: f64,
    temp2: f64,
    area: f64,
    modulus: f64,
    expansion: f64,
) -> f64 {
    (span * span / 24.0) * (p1 * p1 * t2 * t2 - p2 * p2 * t1 * t1)
        + expansion * t1 * t1 * t2 * t2 * (temp2 - temp1)
        + t1 * t1 * t2 * t2 * (t2 - t1) / (area * modulus)
}

/// Sag-tension solver for one conductor.
///
/// Reference-point state anchors the equation of state; calculation-point
/// state describes the loading at the temperature being asked about. The
/// reference tension is carried as a fraction of rated strength, so the
/// absolute and fractional views always agree.
#[derive(Debug, Clone)]
pub struct SagTension<'a> {
    conductor: &'a Conductor,
    tension_factor_ref: f64,
    temp_ref: f64,
    creep_factor_ref: f64,
    ice_thick_ref: f64,
    wind_pressure_ref: f64,
    creep_factor_cal: f64,
    ice_thick_cal: f64,
    wind_pressure_cal: f64,
    delta_tension: f64,
}

impl<'a> SagTension<'a> {
    /// Default bracket-width tolerance for the tension bisection [kg]
    pub const DELTA_TENSION_DEFAULT: f64 = 0.001;

    /// Build a solver for `conductor`.
    ///
    /// Requires positive diameter, area, weight and strength, a positive
    /// elastic modulus and thermal expansion, and non-negative creep.
    pub fn new(conductor: &'a Conductor) -> TensionResult<Self> {
        if conductor.diameter <= 0.0 {
            return Err(TensionError::InvalidConductor {
                what: "diameter must be positive",
            });
        }
        if conductor.area <= 0.0 {
            return Err(TensionError::InvalidConductor {
                what: "area must be positive",
            });
        }
        if conductor.weight <= 0.0 {
            return Err(TensionError::InvalidConductor {
                what: "weight must be positive",
            });
        }
        if conductor.strength <= 0.0 {
            return Err(TensionError::InvalidConductor {
                what: "strength must be positive",
            });
        }
        if conductor.category.elastic_modulus <= 0.0 {
            return Err(TensionError::InvalidConductor {
                what: "category.elastic_modulus must be positive",
            });
        }
        if conductor.category.thermal_expansion <= 0.0 {
            return Err(TensionError::InvalidConductor {
                what: "category.thermal_expansion must be positive",
            });
        }
        if conductor.category.creep < 0.0 {
            return Err(TensionError::InvalidConductor {
                what: "category.creep must be non-negative",
            });
        }

        Ok(Self {
            conductor,
            tension_factor_ref: 0.2,
            temp_ref: 15.0,
            creep_factor_ref: 1.0,
            ice_thick_ref: 0.0,
            wind_pressure_ref: 0.0,
            creep_factor_cal: 1.0,
            ice_thick_cal: 0.0,
            wind_pressure_cal: 0.0,
            delta_tension: Self::DELTA_TENSION_DEFAULT,
        })
    }

    /// Longitudinal tension [kg] at the calculation point for conductor
    /// temperature `tc` [°C], solved from the equation of state against
    /// the reference point by bisection over `[0, TENSION_MAX]`.
    ///
    /// `ruling_span` is the equivalent span [m]; it must be positive.
    pub fn tension(&self, ruling_span: f64, tc: f64) -> TensionResult<f64> {
        if ruling_span <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "ruling_span must be positive",
            }
            .into());
        }

        let p1 = self.transverse_load_ref();
        let p2 = self.transverse_load_cal();
        let t1 = self.tension_ref();
        let temp1 = self.temp_ref;
        let area = self.conductor.area;
        let modulus = self.conductor.category.elastic_modulus;
        let expansion = self.conductor.category.thermal_expansion;

        // Creep difference between the two points, as a temperature offset.
        let creep = (self.creep_factor_cal - self.creep_factor_ref) * self.conductor.category.creep;
        let temp2 = tc + creep;

        let t2 = bisect(
            0.0,
            TENSION_MAX,
            self.delta_tension,
            |mid| {
                Ok(eos_residual(
                    ruling_span,
                    p1,
                    p2,
                    t1,
                    mid,
                    temp1,
                    temp2,
                    area,
                    modulus,
                    expansion,
                ) > 0.0)
            },
            |limit| TensionError::Convergence {
                op: "tension",
                limit,
            },
        )?;
        tracing::debug!(ruling_span, tc, tension = t2, "tension solved");
        Ok(t2)
    }

    /// Maximum sag [m] of a span under the calculation-point ice load,
    /// from the catenary form.
    ///
    /// `tension` [kg]; `span` [m].
    pub fn sag(&self, tension: f64, span: f64) -> f64 {
        let p = self.ice_load_cal();
        let a = tension / p;
        let x = span / 2.0;
        a * ((x / a).cosh() - 1.0)
    }

    /// Time [s] of one sag oscillation cycle.
    pub fn sag_period(sag: f64) -> f64 {
        (sag / 0.306).sqrt()
    }

    /// Ice load per unit length [kg/m] for an ice shell `thickness` [mm]
    /// thick, conductor weight included. Water weighs 1 kg per litre.
    pub fn ice_load(&self, thickness: f64) -> f64 {
        let d = self.conductor.diameter;
        let w = self.conductor.weight;
        (thickness * thickness + thickness * d) * PI * 0.001 + w
    }

    /// Wind load per unit length [kg/m] on the iced conductor under
    /// `pressure` [kg/m²].
    pub fn wind_load(&self, thickness: f64, pressure: f64) -> f64 {
        (2.0 * thickness + self.conductor.diameter) * pressure * 0.001
    }

    /// Transverse load per unit length [kg/m]: vertical ice load and
    /// horizontal wind load added vectorially.
    pub fn transverse_load(&self, thickness: f64, pressure: f64) -> f64 {
        let fv = self.ice_load(thickness);
        let fh = self.wind_load(thickness, pressure);
        (fv * fv + fh * fh).sqrt()
    }

    pub fn conductor(&self) -> &Conductor {
        self.conductor
    }

    pub fn ice_load_ref(&self) -> f64 {
        self.ice_load(self.ice_thick_ref)
    }

    pub fn ice_load_cal(&self) -> f64 {
        self.ice_load(self.ice_thick_cal)
    }

    pub fn wind_load_ref(&self) -> f64 {
        self.wind_load(self.ice_thick_ref, self.wind_pressure_ref)
    }

    pub fn wind_load_cal(&self) -> f64 {
        self.wind_load(self.ice_thick_cal, self.wind_pressure_cal)
    }

    pub fn transverse_load_ref(&self) -> f64 {
        self.transverse_load(self.ice_thick_ref, self.wind_pressure_ref)
    }

    pub fn transverse_load_cal(&self) -> f64 {
        self.transverse_load(self.ice_thick_cal, self.wind_pressure_cal)
    }

    /// Reference tension as a fraction of rated strength, 0 to 1.
    pub fn tension_factor_ref(&self) -> f64 {
        self.tension_factor_ref
    }

    pub fn set_tension_factor_ref(&mut self, v: f64) -> TensionResult<()> {
        bounds::check_range("tension_factor_ref", v, 0.0, 1.0)?;
        self.tension_factor_ref = v;
        Ok(())
    }

    /// Absolute reference tension [kg].
    pub fn tension_ref(&self) -> f64 {
        self.tension_factor_ref * self.conductor.strength
    }

    /// Set the reference tension by absolute value; the factor view
    /// follows. Only non-negativity is enforced here.
    pub fn set_tension_ref(&mut self, v: f64) -> TensionResult<()> {
        if v < 0.0 {
            return Err(OhlError::InvalidArg {
                what: "tension_ref < 0",
            }
            .into());
        }
        self.tension_factor_ref = v / self.conductor.strength;
        Ok(())
    }

    /// Conductor temperature at the reference point [°C].
    pub fn temp_ref(&self) -> f64 {
        self.temp_ref
    }

    pub fn set_temp_ref(&mut self, v: f64) {
        self.temp_ref = v;
    }

    /// Creep factor at the reference point, 0 to 1.
    pub fn creep_factor_ref(&self) -> f64 {
        self.creep_factor_ref
    }

    pub fn set_creep_factor_ref(&mut self, v: f64) -> TensionResult<()> {
        bounds::check_range("creep_factor_ref", v, 0.0, 1.0)?;
        self.creep_factor_ref = v;
        Ok(())
    }

    /// Ice shell thickness at the reference point [mm].
    pub fn ice_thick_ref(&self) -> f64 {
        self.ice_thick_ref
    }

    pub fn set_ice_thick_ref(&mut self, v: f64) -> TensionResult<()> {
        if v < 0.0 {
            return Err(OhlError::InvalidArg {
                what: "ice_thick_ref < 0",
            }
            .into());
        }
        self.ice_thick_ref = v;
        Ok(())
    }

    /// Wind pressure at the reference point [kg/m²].
    pub fn wind_pressure_ref(&self) -> f64 {
        self.wind_pressure_ref
    }

    pub fn set_wind_pressure_ref(&mut self, v: f64) -> TensionResult<()> {
        if v < 0.0 {
            return Err(OhlError::InvalidArg {
                what: "wind_pressure_ref < 0",
            }
            .into());
        }
        self.wind_pressure_ref = v;
        Ok(())
    }

    /// Creep factor at the calculation point, 0 to 1.
    pub fn creep_factor_cal(&self) -> f64 {
        self.creep_factor_cal
    }

    pub fn set_creep_factor_cal(&mut self, v: f64) -> TensionResult<()> {
        bounds::check_range("creep_factor_cal", v, 0.0, 1.0)?;
        self.creep_factor_cal = v;
        Ok(())
    }

    /// Ice shell thickness at the calculation point [mm].
    pub fn ice_thick_cal(&self) -> f64 {
        self.ice_thick_cal
    }

    pub fn set_ice_thick_cal(&mut self, v: f64) -> TensionResult<()> {
        if v < 0.0 {
            return Err(OhlError::InvalidArg {
                what: "ice_thick_cal < 0",
            }
            .into());
        }
        self.ice_thick_cal = v;
        Ok(())
    }

    /// Wind pressure at the calculation point [kg/m²].
    pub fn wind_pressure_cal(&self) -> f64 {
        self.wind_pressure_cal
    }

    pub fn set_wind_pressure_cal(&mut self, v: f64) -> TensionResult<()> {
        if v < 0.0 {
            return Err(OhlError::InvalidArg {
                what: "wind_pressure_cal < 0",
            }
            .into());
        }
        self.wind_pressure_cal = v;
        Ok(())
    }

    /// Bracket-width tolerance for the tension bisection [kg].
    pub fn delta_tension(&self) -> f64 {
        self.delta_tension
    }

    pub fn set_delta_tension(&mut self, v: f64) -> TensionResult<()> {
        if v <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "delta_tension <= 0",
            }
            .into());
        }
        self.delta_tension = v;
        Ok(())
    }
}
