//! Transient solver: explicit time stepping plus trajectory root-finds.

use crate::error::{TransientError, TransientResult};
use crate::profile::{self, Sample, TempProfile};
use ohl_ampacity::HeatBalance;
use ohl_core::bisect;
use ohl_core::bounds::{self, TA_MAX, TA_MIN, TC_MAX, TC_MIN};
use ohl_core::error::OhlError;

/// Transient conductor-temperature solver.
///
/// Drives the steady-state heat balance through forward-Euler time steps
/// at a fixed ambient temperature, and answers the two inverse questions
/// over simulated trajectories. Every call is stateless given the current
/// `(ta, time_step, delta_ic)` configuration; only the cached `icmax`
/// survives between calls, recomputed whenever `ta` changes.
pub struct Transient<'a> {
    steady: &'a HeatBalance<'a>,
    ta: f64,
    icmax: f64,
    time_step: f64,
    delta_ic: f64,
}

impl<'a> Transient<'a> {
    /// Default integration step [s]
    pub const TIME_STEP_DEFAULT: f64 = 1.0;
    /// Default bracket-width tolerance for the current bisections [A]
    pub const DELTA_IC_DEFAULT: f64 = 0.01;

    /// Build a solver around `steady` at ambient temperature `ta` [°C].
    ///
    /// Requires a positive conductor heat capacity and `ta` within the
    /// ambient range.
    pub fn new(steady: &'a HeatBalance<'a>, ta: f64) -> TransientResult<Self> {
        if steady.conductor().heat_capacity <= 0.0 {
            return Err(TransientError::InvalidConductor {
                what: "heat_capacity must be positive",
            });
        }
        let mut solver = Self {
            steady,
            ta: 0.0,
            icmax: 0.0,
            time_step: Self::TIME_STEP_DEFAULT,
            delta_ic: Self::DELTA_IC_DEFAULT,
        };
        solver.set_ta(ta)?;
        Ok(solver)
    }

    pub fn steady(&self) -> &HeatBalance<'a> {
        self.steady
    }

    /// Ambient temperature [°C].
    pub fn ta(&self) -> f64 {
        self.ta
    }

    /// Change the ambient temperature and refresh the cached `icmax`.
    pub fn set_ta(&mut self, ta: f64) -> TransientResult<()> {
        bounds::check_range("ta", ta, TA_MIN, TA_MAX)?;
        self.ta = ta;
        self.icmax = self.steady.current(ta, TC_MAX)?;
        Ok(())
    }

    /// Current that would hold the conductor at `TC_MAX` under the
    /// present ambient temperature [A].
    pub fn icmax(&self) -> f64 {
        self.icmax
    }

    /// Integration step [s].
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn set_time_step(&mut self, v: f64) -> TransientResult<()> {
        if v <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "time_step must be positive",
            }
            .into());
        }
        if v > 60.0 {
            return Err(OhlError::InvalidArg {
                what: "time_step above 60 s",
            }
            .into());
        }
        self.time_step = v;
        Ok(())
    }

    /// Bracket-width tolerance for the current bisections [A].
    pub fn delta_ic(&self) -> f64 {
        self.delta_ic
    }

    pub fn set_delta_ic(&mut self, v: f64) -> TransientResult<()> {
        if v <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "delta_ic <= 0",
            }
            .into());
        }
        self.delta_ic = v;
        Ok(())
    }

    /// Conductor resistance [Ω/km] at `tc`; shortcut to the steady solver.
    pub fn resistance(&self, tc: f64) -> TransientResult<f64> {
        Ok(self.steady.resistance(tc)?)
    }

    /// Steady current [A] at `tc` under the present ambient temperature.
    pub fn current(&self, tc: f64) -> TransientResult<f64> {
        Ok(self.steady.current(self.ta, tc)?)
    }

    /// Steady conductor temperature [°C] under `ic` at the present
    /// ambient temperature.
    pub fn temperature_for_current(&self, ic: f64) -> TransientResult<f64> {
        Ok(self.steady.temperature_for_current(self.ta, ic)?)
    }

    /// Simulate the temperature trajectory after the current steps to
    /// `ic_final` and stays there for `lapse` seconds.
    ///
    /// The series starts at `(t_offset, tc_start)` and records the
    /// pre-update temperature of every step, so restarting from any
    /// recorded point rejoins the original trajectory. `tc_start` need
    /// not be the balance temperature of the pre-step current.
    ///
    /// Requires `0 <= ic_final <= icmax` and `lapse > 0`.
    pub fn simulate(
        &self,
        tc_start: f64,
        ic_final: f64,
        lapse: f64,
        t_offset: f64,
    ) -> TransientResult<TempProfile> {
        let mut samples = Vec::new();
        self.run_steps(&mut samples, tc_start, ic_final, lapse, t_offset)?;
        TempProfile::new(samples)
    }

    /// Euler loop shared by `simulate` and the root-finds; reuses the
    /// caller's sample buffer across invocations.
    fn run_steps(
        &self,
        samples: &mut Vec<Sample>,
        tc_start: f64,
        ic_final: f64,
        lapse: f64,
        t_offset: f64,
    ) -> TransientResult<()> {
        bounds::check_range("tc_start", tc_start, TC_MIN, TC_MAX)?;
        if ic_final < 0.0 {
            return Err(OhlError::InvalidArg {
                what: "ic_final < 0",
            }
            .into());
        }
        if ic_final > self.icmax {
            return Err(OhlError::InvalidArg {
                what: "ic_final above icmax",
            }
            .into());
        }
        if lapse <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "lapse must be positive",
            }
            .into());
        }

        let steps = (lapse / self.time_step).ceil() as usize + 1;
        let k = 0.86 / 3600.0 * self.time_step / self.steady.conductor().heat_capacity;

        samples.clear();
        samples.reserve(steps);
        let mut temp = tc_start;
        for i in 0..steps {
            let time = t_offset + i as f64 * self.time_step;
            samples.push(Sample { time, temp });
            let r_ft = self.steady.resistance(temp)? * 0.000_304_8; // Ω/ft
            let ic = self.steady.current(self.ta, temp)?;
            temp += k * r_ft * (ic_final * ic_final - ic * ic);
        }
        Ok(())
    }

    /// Initial current [A] whose trajectory, after stepping to
    /// `factor` times itself, reaches `tc_target` [°C] at `lapse` seconds.
    ///
    /// Bisects candidate initial currents over `[0, icmax / factor]`,
    /// running a full simulation per iteration.
    pub fn initial_current(
        &self,
        tc_target: f64,
        factor: f64,
        lapse: f64,
    ) -> TransientResult<f64> {
        if tc_target <= self.ta {
            return Err(OhlError::InvalidArg {
                what: "tc_target at or below ta",
            }
            .into());
        }
        if tc_target > TC_MAX {
            return Err(OhlError::InvalidArg {
                what: "tc_target above TC_MAX",
            }
            .into());
        }
        if factor <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "factor must be positive",
            }
            .into());
        }
        if lapse <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "lapse must be positive",
            }
            .into());
        }

        let mut scratch = Vec::new();
        let ic = bisect(
            0.0,
            self.icmax / factor,
            self.delta_ic,
            |ic_mid| {
                let tc_mid = self.steady.temperature_for_current(self.ta, ic_mid)?;
                self.run_steps(
                    &mut scratch,
                    tc_mid,
                    ic_mid * factor,
                    lapse + self.time_step,
                    0.0,
                )?;
                Ok(profile::interp_temp(&scratch, lapse) > tc_target)
            },
            |limit| TransientError::Convergence {
                op: "initial_current",
                limit,
            },
        )?;
        tracing::debug!(tc_target, factor, lapse, ic, "initial current solved");
        Ok(ic)
    }

    /// Final current [A] that takes the conductor from the trajectory of
    /// `ic_initial` to `tc_target` [°C] in `lapse` seconds.
    ///
    /// The search direction follows from comparing `tc_target` with the
    /// balance temperature of `ic_initial`: a heating trajectory bisects
    /// `[ic_initial, icmax]`, a cooling one `[0, ic_initial]`. A
    /// `tc_start` override must lie on the detected side, strictly
    /// between the balance temperature and the target.
    pub fn final_current(
        &self,
        tc_target: f64,
        ic_initial: f64,
        lapse: f64,
        tc_start: Option<f64>,
    ) -> TransientResult<f64> {
        if tc_target <= self.ta {
            return Err(OhlError::InvalidArg {
                what: "tc_target at or below ta",
            }
            .into());
        }
        if tc_target > TC_MAX {
            return Err(OhlError::InvalidArg {
                what: "tc_target above TC_MAX",
            }
            .into());
        }
        if ic_initial <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "ic_initial must be positive",
            }
            .into());
        }
        if ic_initial > self.icmax {
            return Err(OhlError::InvalidArg {
                what: "ic_initial above icmax",
            }
            .into());
        }
        if lapse <= 0.0 {
            return Err(OhlError::InvalidArg {
                what: "lapse must be positive",
            }
            .into());
        }

        let t_initial = self.steady.temperature_for_current(self.ta, ic_initial)?;
        let tc_start = tc_start.unwrap_or(t_initial);

        let (lo, hi) = if tc_target > t_initial {
            if tc_start < t_initial {
                return Err(OhlError::InvalidArg {
                    what: "tc_start below the initial balance temperature (heating)",
                }
                .into());
            }
            if tc_start >= tc_target {
                return Err(OhlError::InvalidArg {
                    what: "tc_start at or above tc_target (heating)",
                }
                .into());
            }
            (ic_initial, self.icmax)
        } else {
            if tc_start > t_initial {
                return Err(OhlError::InvalidArg {
                    what: "tc_start above the initial balance temperature (cooling)",
                }
                .into());
            }
            if tc_start <= tc_target {
                return Err(OhlError::InvalidArg {
                    what: "tc_start at or below tc_target (cooling)",
                }
                .into());
            }
            (0.0, ic_initial)
        };

        let mut scratch = Vec::new();
        let ic = bisect(
            lo,
            hi,
            self.delta_ic,
            |ic_mid| {
                self.run_steps(
                    &mut scratch,
                    tc_start,
                    ic_mid,
                    lapse + self.time_step,
                    0.0,
                )?;
                Ok(profile::interp_temp(&scratch, lapse) > tc_target)
            },
            |limit| TransientError::Convergence {
                op: "final_current",
                limit,
            },
        )?;
        tracing::debug!(tc_target, ic_initial, lapse, ic, "final current solved");
        Ok(ic)
    }
}
