//! Time/temperature trajectory records.

use crate::error::TransientResult;
use ohl_core::OhlError;

/// One recorded point of a conductor-temperature trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Time [s]; times are relative, so negative values are allowed
    pub time: f64,
    /// Conductor temperature [°C]
    pub temp: f64,
}

/// Immutable time-ordered conductor-temperature trajectory.
///
/// Times ascend strictly and the temperature moves in one global
/// direction, fixed at construction from the sign of `last - first`.
/// Lookups outside the recorded range extrapolate linearly from the
/// nearest boundary segment instead of erroring; this is deliberately
/// looser than the range checking the solvers apply to their inputs.
#[derive(Clone, Debug)]
pub struct TempProfile {
    samples: Vec<Sample>,
    growing: bool,
    temp_min: f64,
    temp_max: f64,
}

impl TempProfile {
    /// Wrap a recorded trajectory. Fails with fewer than two samples.
    pub fn new(samples: Vec<Sample>) -> TransientResult<Self> {
        if samples.len() < 2 {
            return Err(OhlError::InvalidArg {
                what: "profile needs at least two samples",
            }
            .into());
        }
        let growing = is_growing(&samples);
        let mut temp_min = f64::INFINITY;
        let mut temp_max = f64::NEG_INFINITY;
        for s in &samples {
            temp_min = temp_min.min(s.temp);
            temp_max = temp_max.max(s.temp);
        }
        Ok(Self {
            samples,
            growing,
            temp_min,
            temp_max,
        })
    }

    /// True when the trajectory heats up overall.
    pub fn growing(&self) -> bool {
        self.growing
    }

    /// Lowest recorded temperature [°C].
    pub fn temp_min(&self) -> f64 {
        self.temp_min
    }

    /// Highest recorded temperature [°C].
    pub fn temp_max(&self) -> f64 {
        self.temp_max
    }

    /// First recorded time [s].
    pub fn time_min(&self) -> f64 {
        self.samples[0].time
    }

    /// Last recorded time [s].
    pub fn time_max(&self) -> f64 {
        self.samples[self.samples.len() - 1].time
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time [s] at which the trajectory reaches temperature `tc` [°C],
    /// linearly interpolated between the bracketing samples. Temperatures
    /// outside `[temp_min, temp_max]` extrapolate from the boundary
    /// segment; a negative interpolated time clamps to zero.
    pub fn time_for_temp(&self, tc: f64) -> f64 {
        interp_time(&self.samples, self.growing, tc)
    }

    /// Temperature [°C] reached at time `t` [s], linearly interpolated
    /// between the bracketing samples. Times outside
    /// `[time_min, time_max]` extrapolate from the boundary segment.
    pub fn temp_at(&self, t: f64) -> f64 {
        interp_temp(&self.samples, t)
    }
}

pub(crate) fn is_growing(samples: &[Sample]) -> bool {
    samples[samples.len() - 1].temp > samples[0].temp
}

/// Direction-aware binary search + linear interpolation of time by
/// temperature. Requires at least two samples.
pub(crate) fn interp_time(samples: &[Sample], growing: bool, tc: f64) -> f64 {
    let mut ilo = 0;
    let mut ihi = samples.len() - 1;
    while ihi - ilo > 1 {
        let mid = (ilo + ihi) / 2;
        if tc > samples[mid].temp {
            if growing {
                ilo = mid;
            } else {
                ihi = mid;
            }
        } else if growing {
            ihi = mid;
        } else {
            ilo = mid;
        }
    }

    let Sample { time: t0, temp: v0 } = samples[ilo];
    let Sample { time: t1, temp: v1 } = samples[ihi];
    let tx = (tc - v0) * (t1 - t0) / (v1 - v0) + t0;
    if tx < 0.0 { 0.0 } else { tx }
}

/// Binary search + linear interpolation of temperature by time.
/// Requires at least two samples.
pub(crate) fn interp_temp(samples: &[Sample], t: f64) -> f64 {
    let mut ilo = 0;
    let mut ihi = samples.len() - 1;
    while ihi - ilo > 1 {
        let mid = (ilo + ihi) / 2;
        if t > samples[mid].time {
            ilo = mid;
        } else {
            ihi = mid;
        }
    }

    let Sample { time: t0, temp: v0 } = samples[ilo];
    let Sample { time: t1, temp: v1 } = samples[ihi];
    (t - t0) * (v1 - v0) / (t1 - t0) + v0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, temp: f64) -> Sample {
        Sample { time, temp }
    }

    fn heating() -> TempProfile {
        TempProfile::new(vec![
            sample(0.0, 20.0),
            sample(10.0, 30.0),
            sample(20.0, 38.0),
            sample(30.0, 44.0),
            sample(40.0, 48.0),
        ])
        .unwrap()
    }

    fn cooling() -> TempProfile {
        TempProfile::new(vec![
            sample(0.0, 80.0),
            sample(10.0, 60.0),
            sample(20.0, 48.0),
            sample(30.0, 41.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_short_input() {
        assert!(TempProfile::new(vec![]).is_err());
        assert!(TempProfile::new(vec![sample(0.0, 20.0)]).is_err());
        assert!(TempProfile::new(vec![sample(0.0, 20.0), sample(1.0, 21.0)]).is_ok());
    }

    #[test]
    fn direction_and_extrema() {
        let up = heating();
        assert!(up.growing());
        assert_eq!(up.temp_min(), 20.0);
        assert_eq!(up.temp_max(), 48.0);
        assert_eq!(up.time_min(), 0.0);
        assert_eq!(up.time_max(), 40.0);

        let down = cooling();
        assert!(!down.growing());
        assert_eq!(down.temp_min(), 41.0);
        assert_eq!(down.temp_max(), 80.0);
    }

    #[test]
    fn temp_at_hits_samples_and_midpoints() {
        let p = heating();
        assert_eq!(p.temp_at(0.0), 20.0);
        assert_eq!(p.temp_at(20.0), 38.0);
        assert_eq!(p.temp_at(40.0), 48.0);
        // Midpoint of the 10 s → 20 s segment.
        assert!((p.temp_at(15.0) - 34.0).abs() < 1e-12);
    }

    #[test]
    fn time_for_temp_inverts_temp_at() {
        let p = heating();
        for t in [0.0, 5.0, 10.0, 17.5, 25.0, 40.0] {
            let tc = p.temp_at(t);
            assert!((p.time_for_temp(tc) - t).abs() < 1e-9, "t = {t}");
        }
    }

    #[test]
    fn time_for_temp_on_cooling_profile() {
        let p = cooling();
        assert_eq!(p.time_for_temp(80.0), 0.0);
        assert!((p.time_for_temp(54.0) - 15.0).abs() < 1e-9);
        assert!((p.time_for_temp(41.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_extrapolates_from_boundary_segment() {
        let p = heating();
        // Above the last sample: continue the 44 → 48 °C segment.
        assert!((p.temp_at(50.0) - 52.0).abs() < 1e-12);
        // Before the first sample: continue the 20 → 30 °C segment.
        assert!((p.temp_at(-10.0) - 10.0).abs() < 1e-12);

        // Temperature beyond temp_max maps past the end of the series.
        assert!((p.time_for_temp(52.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn negative_interpolated_time_clamps_to_zero() {
        let p = heating();
        // 10 °C sits before time zero on the first segment.
        assert_eq!(p.time_for_temp(10.0), 0.0);
    }

    #[test]
    fn offset_profile_keeps_negative_times() {
        let p = TempProfile::new(vec![sample(-20.0, 50.0), sample(-10.0, 60.0)]).unwrap();
        assert_eq!(p.time_min(), -20.0);
        assert_eq!(p.temp_at(-15.0), 55.0);
        // The clamp applies to the interpolated result, not stored times.
        assert_eq!(p.time_for_temp(55.0), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lookups_invert_on_monotone_profiles(
            start in -50.0_f64..100.0,
            increments in prop::collection::vec(0.1_f64..5.0, 2..40),
            heating in proptest::bool::ANY,
        ) {
            let mut temp = start;
            let mut samples = Vec::with_capacity(increments.len() + 1);
            samples.push(Sample { time: 0.0, temp });
            for (i, dt) in increments.iter().enumerate() {
                temp += if heating { *dt } else { -*dt };
                samples.push(Sample {
                    time: (i + 1) as f64 * 10.0,
                    temp,
                });
            }
            let profile = TempProfile::new(samples).unwrap();
            prop_assert_eq!(profile.growing(), heating);

            for frac in [0.0, 0.25, 0.6, 1.0] {
                let t = frac * profile.time_max();
                let tc = profile.temp_at(t);
                let back = profile.time_for_temp(tc);
                prop_assert!((back - t).abs() < 1e-6, "t = {}, back = {}", t, back);
            }
        }
    }
}
