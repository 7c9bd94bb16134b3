//! Steady-state current/temperature solver.

use crate::error::{AmpacityError, AmpacityResult};
use ohl_conductor::Conductor;
use ohl_core::bisect;
use ohl_core::bounds::{self, TA_MAX, TA_MIN, TC_MAX, TC_MIN};
use ohl_core::error::OhlError;

/// Forced-convection correlation selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConvectionModel {
    /// Take the largest of the natural-convection term and both
    /// forced-convection correlations.
    #[default]
    Ieee,
    /// Historical practice: switch between the low-wind and high-wind
    /// forced correlations at forced-convection parameter 12 000 and
    /// never blend in natural convection.
    Classic,
}

/// Steady-state heat balance for one conductor.
///
/// Holds the weather/installation configuration (altitude, air stream,
/// sun, emissivity) and answers current ↔ temperature queries against it.
/// Configuration is mutated through validated setters only.
#[derive(Debug, Clone)]
pub struct HeatBalance<'a> {
    conductor: &'a Conductor,
    // Cached at construction; the formulas touch these on every call.
    diameter: f64,
    r25: f64,
    alpha: f64,
    altitude: f64,
    air_velocity: f64,
    sun_effect: f64,
    emissivity: f64,
    formula: ConvectionModel,
    delta_temp: f64,
}

impl<'a> HeatBalance<'a> {
    /// Default bracket-width tolerance for the temperature bisections [°C]
    pub const DELTA_TEMP_DEFAULT: f64 = 0.01;
    /// Tighter preset for work that needs sub-millidegree agreement
    /// between the forward and inverse directions [°C]
    pub const DELTA_TEMP_FINE: f64 = 1e-4;

    /// Build a solver for `conductor`.
    ///
    /// Requires `diameter > 0`, `r25 > 0` and `0 < category.alpha < 1`;
    /// the remaining record fields are not used here.
    pub fn new(conductor: &'a Conductor) -> AmpacityResult<Self> {
        if conductor.diameter <= 0.0 {
            return Err(AmpacityError::InvalidConductor {
                what: "diameter must be positive",
            });
        }
        if conductor.r25 <= 0.0 {
            return Err(AmpacityError::InvalidConductor {
                what: "r25 must be positive",
            });
        }
        let alpha = conductor.category.alpha;
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(AmpacityError::InvalidConductor {
                what: "category.alpha must lie strictly between 0 and 1",
            });
        }

        Ok(Self {
            conductor,
            diameter: conductor.diameter,
            r25: conductor.r25,
            alpha,
            altitude: 300.0,
            air_velocity: 2.0,
            sun_effect: 1.0,
            emissivity: 0.5,
            formula: ConvectionModel::default(),
            delta_temp: Self::DELTA_TEMP_DEFAULT,
        })
    }

    /// Conductor resistance [Ω/km] at temperature `tc` [°C].
    pub fn resistance(&self, tc: f64) -> AmpacityResult<f64> {
        bounds::check_range("tc", tc, TC_MIN, TC_MAX)?;
        Ok(self.r25 * (1.0 + self.alpha * (tc - 25.0)))
    }

    /// Current [A] that holds the conductor at `tc` [°C] under ambient
    /// temperature `ta` [°C]. Zero whenever `ta >= tc`, and zero when the
    /// solar gain exceeds what convection and radiation can shed at this
    /// operating point.
    pub fn current(&self, ta: f64, tc: f64) -> AmpacityResult<f64> {
        bounds::check_range("ta", ta, TA_MIN, TA_MAX)?;
        bounds::check_range("tc", tc, TC_MIN, TC_MAX)?;

        if ta >= tc {
            return Ok(0.0);
        }

        let d = self.diameter / 25.4; // diameter [in]
        let pb = 10f64.powf(1.880_813_592 - self.altitude / 18_336.0); // barometric pressure [cmHg]
        let v = self.air_velocity * 3600.0; // air stream [ft/h]
        let rc = self.resistance(tc)? * 0.000_304_8; // resistance [Ω/ft]
        let tm = 0.5 * (tc + ta); // film temperature [°C]
        let rf = 0.290_157_7 * pb / (273.0 + tm); // relative air density
        let uf = 0.041_65 + 0.000_111 * tm; // air viscosity [lb/(ft·h)]
        let kf = 0.007_39 + 0.000_022_7 * tm; // air thermal conductivity [W/(ft·°C)]

        // Natural convection [W/ft]
        let mut qc = 0.283 * rf.sqrt() * d.powf(0.75) * (tc - ta).powf(1.25);

        if v != 0.0 {
            let factor = d * rf * v / uf;
            let qc_low = kf * (tc - ta) * (1.01 + 0.371 * factor.powf(0.52));
            let qc_high = 0.1695 * kf * (tc - ta) * factor.powf(0.6);
            match self.formula {
                ConvectionModel::Ieee => qc = qc.max(qc_low).max(qc_high),
                ConvectionModel::Classic => {
                    qc = if factor < 12_000.0 { qc_low } else { qc_high };
                }
            }
        }

        let lk = ((tc + 273.0) / 100.0).powi(4);
        let mk = ((ta + 273.0) / 100.0).powi(4);
        let qr = 0.138 * d * self.emissivity * (lk - mk); // radiated loss [W/ft]
        let qs = 3.87 * d * self.sun_effect; // solar gain [W/ft]

        if (qc + qr) < qs {
            return Ok(0.0);
        }
        Ok(((qc + qr - qs) / rc).sqrt())
    }

    /// Conductor temperature [°C] reached under current `ic` [A] at
    /// ambient temperature `ta` [°C]. Inverse of [`Self::current`] in its
    /// second argument, solved by bisection over `[ta, TC_MAX]`.
    ///
    /// Requires `0 <= ic <= current(ta, TC_MAX)`.
    pub fn temperature_for_current(&self, ta: f64, ic: f64) -> AmpacityResult<f64> {
        bounds::check_range("ta", ta, TA_MIN, TA_MAX)?;
        if ic < 0.0 {
            return Err(OhlError::InvalidArg { what: "ic < 0" }.into());
        }
        if ic > self.current(ta, TC_MAX)? {
            return Err(OhlError::InvalidArg {
                what: "ic above the current at TC_MAX",
            }
            .into());
        }

        let tc = bisect(
            ta,
            TC_MAX,
            self.delta_temp,
            |tc_mid| Ok(self.current(ta, tc_mid)? > ic),
            |limit| AmpacityError::Convergence {
                op: "temperature_for_current",
                limit,
            },
        )?;
        tracing::debug!(ta, ic, tc, "steady conductor temperature solved");
        Ok(tc)
    }

    /// Ambient temperature [°C] at which current `ic` [A] holds the
    /// conductor at `tc` [°C]. Inverse of [`Self::current`] in its first
    /// argument; current decreases monotonically with ambient temperature,
    /// so the bracket is `[TA_MIN, min(TA_MAX, tc)]`. A degenerate bracket
    /// short-circuits to `tc`.
    ///
    /// Requires `current(TA_MAX, tc) <= ic <= current(TA_MIN, tc)`.
    pub fn ambient_for_current(&self, tc: f64, ic: f64) -> AmpacityResult<f64> {
        bounds::check_range("tc", tc, TC_MIN, TC_MAX)?;
        if ic < self.current(TA_MAX, tc)? {
            return Err(OhlError::InvalidArg {
                what: "ic below the current at TA_MAX",
            }
            .into());
        }
        if ic > self.current(TA_MIN, tc)? {
            return Err(OhlError::InvalidArg {
                what: "ic above the current at TA_MIN",
            }
            .into());
        }

        let lo = TA_MIN;
        let hi = TA_MAX.min(tc);
        if lo >= hi {
            return Ok(tc);
        }

        let ta = bisect(
            lo,
            hi,
            self.delta_temp,
            |ta_mid| Ok(self.current(ta_mid, tc)? <= ic),
            |limit| AmpacityError::Convergence {
                op: "ambient_for_current",
                limit,
            },
        )?;
        tracing::debug!(tc, ic, ta, "ambient temperature solved");
        Ok(ta)
    }

    pub fn conductor(&self) -> &Conductor {
        self.conductor
    }

    /// Altitude above sea level [m].
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn set_altitude(&mut self, v: f64) -> AmpacityResult<()> {
        if v < 0.0 {
            return Err(OhlError::InvalidArg { what: "altitude < 0" }.into());
        }
        self.altitude = v;
        Ok(())
    }

    /// Air stream velocity [ft/s].
    pub fn air_velocity(&self) -> f64 {
        self.air_velocity
    }

    pub fn set_air_velocity(&mut self, v: f64) -> AmpacityResult<()> {
        if v < 0.0 {
            return Err(OhlError::InvalidArg {
                what: "air_velocity < 0",
            }
            .into());
        }
        self.air_velocity = v;
        Ok(())
    }

    /// Sun effect factor, 0 to 1.
    pub fn sun_effect(&self) -> f64 {
        self.sun_effect
    }

    pub fn set_sun_effect(&mut self, v: f64) -> AmpacityResult<()> {
        bounds::check_range("sun_effect", v, 0.0, 1.0)?;
        self.sun_effect = v;
        Ok(())
    }

    /// Emissivity, 0 to 1.
    pub fn emissivity(&self) -> f64 {
        self.emissivity
    }

    pub fn set_emissivity(&mut self, v: f64) -> AmpacityResult<()> {
        bounds::check_range("emissivity", v, 0.0, 1.0)?;
        self.emissivity = v;
        Ok(())
    }

    /// Active forced-convection correlation.
    pub fn formula(&self) -> ConvectionModel {
        self.formula
    }

    pub fn set_formula(&mut self, v: ConvectionModel) {
        self.formula = v;
    }

    /// Bracket-width tolerance for the inverse bisections [°C].
    pub fn delta_temp(&self) -> f64 {
        self.delta_temp
    }

    pub fn set_delta_temp(&mut self, v: f64) -> AmpacityResult<()> {
        if v <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "delta_temp <= 0",
            }
            .into());
        }
        self.delta_temp = v;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ohl_conductor::{Category, ConductorBuilder};

    fn flint() -> Conductor {
        ConductorBuilder::new("AAAC 740,8 MCM FLINT", Category::aaac())
            .diameter(25.17)
            .r25(0.08936)
            .build()
    }

    #[test]
    fn defaults() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();
        assert_eq!(hb.altitude(), 300.0);
        assert_eq!(hb.air_velocity(), 2.0);
        assert_eq!(hb.sun_effect(), 1.0);
        assert_eq!(hb.emissivity(), 0.5);
        assert_eq!(hb.formula(), ConvectionModel::Ieee);
        assert_eq!(hb.delta_temp(), HeatBalance::DELTA_TEMP_DEFAULT);
    }

    #[test]
    fn rejects_bad_r25() {
        let mut cond = flint();
        cond.r25 = 0.0;
        assert!(matches!(
            HeatBalance::new(&cond),
            Err(AmpacityError::InvalidConductor { .. })
        ));
        cond.r25 = -0.2;
        assert!(HeatBalance::new(&cond).is_err());
    }

    #[test]
    fn rejects_bad_diameter() {
        let mut cond = flint();
        cond.diameter = 0.0;
        assert!(HeatBalance::new(&cond).is_err());
        cond.diameter = -0.1;
        assert!(HeatBalance::new(&cond).is_err());
    }

    #[test]
    fn alpha_interval_is_open() {
        let mut cond = flint();
        for bad in [-0.1, 0.0, 1.0, 1.1] {
            cond.category.alpha = bad;
            assert!(HeatBalance::new(&cond).is_err(), "alpha = {bad}");
        }
        cond.category.alpha = 1e-9;
        assert!(HeatBalance::new(&cond).is_ok());
        cond.category.alpha = 1.0 - 1e-9;
        assert!(HeatBalance::new(&cond).is_ok());
    }

    #[test]
    fn setter_ranges() {
        let cond = flint();
        let mut hb = HeatBalance::new(&cond).unwrap();

        assert!(hb.set_altitude(0.0).is_ok());
        assert!(hb.set_altitude(-0.1).is_err());

        assert!(hb.set_air_velocity(0.0).is_ok());
        assert!(hb.set_air_velocity(-0.1).is_err());

        assert!(hb.set_sun_effect(0.0).is_ok());
        assert!(hb.set_sun_effect(1.0).is_ok());
        assert!(hb.set_sun_effect(-0.1).is_err());
        assert!(hb.set_sun_effect(1.1).is_err());

        assert!(hb.set_emissivity(0.0).is_ok());
        assert!(hb.set_emissivity(1.0).is_ok());
        assert!(hb.set_emissivity(-0.1).is_err());
        assert!(hb.set_emissivity(1.1).is_err());

        assert!(hb.set_delta_temp(1e-4).is_ok());
        assert!(hb.set_delta_temp(0.0).is_err());
        assert!(hb.set_delta_temp(-0.1).is_err());
    }

    #[test]
    fn resistance_is_linear() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();
        assert_eq!(hb.resistance(25.0).unwrap(), cond.r25);

        let r0 = hb.resistance(0.0).unwrap();
        let r50 = hb.resistance(50.0).unwrap();
        let r100 = hb.resistance(100.0).unwrap();
        // Equal temperature steps, equal resistance steps.
        assert!(((r100 - r50) - (r50 - r0)).abs() < 1e-12);

        assert!(hb.resistance(TC_MIN).is_ok());
        assert!(hb.resistance(TC_MAX).is_ok());
        assert!(hb.resistance(TC_MIN - 1.0).is_err());
        assert!(hb.resistance(TC_MAX + 1.0).is_err());
    }

    #[test]
    fn current_zero_when_ambient_at_or_above_conductor() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();
        assert_eq!(hb.current(25.0, 25.0).unwrap(), 0.0);
        assert_eq!(hb.current(30.0, 25.0).unwrap(), 0.0);
    }

    #[test]
    fn current_range_checks() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();
        assert!(hb.current(TA_MIN - 1.0, 50.0).is_err());
        assert!(hb.current(TA_MAX + 1.0, 50.0).is_err());
        assert!(hb.current(25.0, TC_MIN - 1.0).is_err());
        assert!(hb.current(25.0, TC_MAX + 1.0).is_err());
    }

    #[test]
    fn classic_reference_currents() {
        let cond = flint();
        let mut hb = HeatBalance::new(&cond).unwrap();
        hb.set_formula(ConvectionModel::Classic);

        assert!((hb.current(25.0, 50.0).unwrap() - 517.7).abs() < 0.1);
        assert!((hb.current(30.0, 60.0).unwrap() - 585.4).abs() < 0.1);
        assert!((hb.current(10.0, 30.0).unwrap() - 438.4).abs() < 0.1);
    }

    #[test]
    fn formula_variants_differ() {
        let cond = flint();
        let mut hb = HeatBalance::new(&cond).unwrap();
        hb.set_formula(ConvectionModel::Classic);
        let classic = hb.current(3.0, 30.0).unwrap();
        hb.set_formula(ConvectionModel::Ieee);
        let ieee = hb.current(3.0, 30.0).unwrap();
        assert_ne!(classic, ieee);
    }

    #[test]
    fn sun_effect_changes_current() {
        let cond = flint();
        let mut hb = HeatBalance::new(&cond).unwrap();
        hb.set_formula(ConvectionModel::Classic);
        hb.set_sun_effect(1.0).unwrap();
        let shaded = hb.current(25.0, 50.0).unwrap();
        hb.set_sun_effect(0.0).unwrap();
        let dark = hb.current(25.0, 50.0).unwrap();
        assert!(dark > shaded);
    }

    #[test]
    fn temperature_for_current_inverts_current() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();

        let amp1 = hb.current(25.0, 50.0).unwrap();
        let amp2 = hb.current(35.0, 65.0).unwrap();
        let tc1 = hb.temperature_for_current(25.0, amp1).unwrap();
        let tc2 = hb.temperature_for_current(35.0, amp2).unwrap();
        assert!((tc1 - 50.0).abs() < hb.delta_temp());
        assert!((tc2 - 65.0).abs() < hb.delta_temp());
    }

    #[test]
    fn temperature_for_current_domain() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();

        assert!(hb.temperature_for_current(30.0, -1.0).is_err());

        let icmax = hb.current(30.0, TC_MAX).unwrap();
        assert!(hb.temperature_for_current(30.0, icmax).is_ok());
        assert!(hb.temperature_for_current(30.0, icmax + 1.0).is_err());
        assert!(hb.temperature_for_current(TA_MIN - 1.0, 100.0).is_err());
        assert!(hb.temperature_for_current(TA_MAX + 1.0, 100.0).is_err());
    }

    #[test]
    fn ambient_for_current_inverts_current() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();

        let amp1 = hb.current(25.0, 50.0).unwrap();
        let amp2 = hb.current(35.0, 65.0).unwrap();
        let ta1 = hb.ambient_for_current(50.0, amp1).unwrap();
        let ta2 = hb.ambient_for_current(65.0, amp2).unwrap();
        assert!((ta1 - 25.0).abs() < hb.delta_temp());
        assert!((ta2 - 35.0).abs() < hb.delta_temp());
    }

    #[test]
    fn ambient_for_current_degenerate_bracket() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();
        // tc at the bottom of the ambient range: bracket collapses,
        // the solver answers tc itself without iterating.
        assert_eq!(hb.ambient_for_current(TC_MIN, 0.0).unwrap(), TC_MIN);
    }

    #[test]
    fn ambient_for_current_domain() {
        let cond = flint();
        let hb = HeatBalance::new(&cond).unwrap();

        assert!(hb.ambient_for_current(TC_MIN - 1.0, 0.0).is_err());

        let ic_min = hb.current(TA_MAX, 100.0).unwrap();
        let ic_max = hb.current(TA_MIN, 100.0).unwrap();
        assert!(hb.ambient_for_current(100.0, ic_min).is_ok());
        assert!(hb.ambient_for_current(100.0, ic_min - 1.0).is_err());
        assert!(hb.ambient_for_current(100.0, ic_max).is_ok());
        assert!(hb.ambient_for_current(100.0, ic_max + 1.0).is_err());
    }

    #[test]
    fn tiny_tolerance_raises_convergence_error() {
        let cond = flint();
        let mut hb = HeatBalance::new(&cond).unwrap();
        hb.set_delta_temp(1e-300).unwrap();
        let amp = hb.current(25.0, 50.0).unwrap();
        assert!(matches!(
            hb.temperature_for_current(25.0, amp),
            Err(AmpacityError::Convergence { .. })
        ));
    }
}
