//! Benchmark framework for the ohl solver hot paths.
//!
//! The nested root-finds (`initial_current`/`final_current`) re-run a
//! full simulation per bisection iteration, which makes them the cost
//! center of the workspace; this harness times them alongside the plain
//! simulation and tension solves they are built from.

use ohl_ampacity::{AmpacityError, ConvectionModel, HeatBalance};
use ohl_conductor::{Category, Conductor, ConductorBuilder};
use ohl_tension::{SagTension, TensionError};
use ohl_transient::{Transient, TransientError};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

/// Errors surfaced while running a scenario.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Ampacity error: {0}")]
    Ampacity(#[from] AmpacityError),

    #[error("Transient error: {0}")]
    Transient(#[from] TransientError),

    #[error("Tension error: {0}")]
    Tension(#[from] TensionError),
}

/// A benchmark scenario definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchScenario {
    /// Unique identifier for this benchmark.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Ambient temperature [°C].
    pub ta: f64,
    /// Operation to time.
    pub mode: BenchMode,
}

/// Operation timed by a scenario. Currents are expressed as fractions of
/// the solver's `icmax` so scenarios stay valid for any conductor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum BenchMode {
    /// One full trajectory simulation.
    Simulate {
        tc_start: f64,
        ic_final_frac: f64,
        lapse_s: f64,
    },
    /// Nested root-find over candidate initial currents.
    InitialCurrent {
        tc_target: f64,
        factor: f64,
        lapse_s: f64,
    },
    /// Nested root-find over candidate final currents.
    FinalCurrent {
        tc_target: f64,
        ic_initial_frac: f64,
        lapse_s: f64,
    },
    /// Sag-tension equation-of-state solve.
    Tension { ruling_span_m: f64, tc: f64 },
}

/// A single run's timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub total_time_s: f64,
    /// The solved value, for sanity checking across runs.
    pub result: f64,
}

/// Aggregated statistics for multiple runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub run_count: usize,
    pub total_time_median_s: f64,
    pub total_time_min_s: f64,
    pub total_time_max_s: f64,
}

/// Complete benchmark result for a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchResult {
    pub scenario: BenchScenario,
    pub runs: Vec<RunMetrics>,
    pub aggregate: AggregateMetrics,
}

/// Collection of benchmark results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchSuite {
    pub results: Vec<BenchResult>,
}

/// The conductor every scenario runs against.
pub fn reference_conductor() -> Conductor {
    ConductorBuilder::new("AAAC 740,8 MCM FLINT", Category::aaac())
        .diameter(25.17)
        .area(375.4)
        .weight(1.035)
        .strength(11625.0)
        .r25(0.08936)
        .heat_capacity(0.052744)
        .build()
}

/// The scenario set the binary runs by default.
pub fn default_scenarios() -> Vec<BenchScenario> {
    vec![
        BenchScenario {
            id: "simulate-15min".into(),
            name: "simulate, 15 min heating step".into(),
            ta: 25.0,
            mode: BenchMode::Simulate {
                tc_start: 50.0,
                ic_final_frac: 0.25,
                lapse_s: 900.0,
            },
        },
        BenchScenario {
            id: "initial-current".into(),
            name: "initial_current, factor 2 over 10 min".into(),
            ta: 25.0,
            mode: BenchMode::InitialCurrent {
                tc_target: 70.0,
                factor: 2.0,
                lapse_s: 600.0,
            },
        },
        BenchScenario {
            id: "final-current".into(),
            name: "final_current, heating over 10 min".into(),
            ta: 25.0,
            mode: BenchMode::FinalCurrent {
                tc_target: 80.0,
                ic_initial_frac: 0.1,
                lapse_s: 600.0,
            },
        },
        BenchScenario {
            id: "tension-hot".into(),
            name: "tension at 50 °C, 350 m ruling span".into(),
            ta: 25.0,
            mode: BenchMode::Tension {
                ruling_span_m: 350.0,
                tc: 50.0,
            },
        },
    ]
}

fn aggregate(runs: &[RunMetrics]) -> AggregateMetrics {
    let mut times: Vec<f64> = runs.iter().map(|r| r.total_time_s).collect();
    times.sort_by(|a, b| a.total_cmp(b));
    AggregateMetrics {
        run_count: runs.len(),
        total_time_median_s: times[times.len() / 2],
        total_time_min_s: times[0],
        total_time_max_s: times[times.len() - 1],
    }
}

/// Run a single scenario `times` times against the reference conductor.
pub fn run_scenario(scenario: &BenchScenario, times: usize) -> Result<BenchResult, BenchError> {
    let conductor = reference_conductor();
    let mut steady = HeatBalance::new(&conductor)?;
    steady.set_formula(ConvectionModel::Classic);

    let mut runs = Vec::with_capacity(times);
    for _ in 0..times {
        let start = Instant::now();
        let result = match scenario.mode {
            BenchMode::Simulate {
                tc_start,
                ic_final_frac,
                lapse_s,
            } => {
                let transient = Transient::new(&steady, scenario.ta)?;
                let profile = transient.simulate(
                    tc_start,
                    ic_final_frac * transient.icmax(),
                    lapse_s,
                    0.0,
                )?;
                profile.temp_at(lapse_s)
            }
            BenchMode::InitialCurrent {
                tc_target,
                factor,
                lapse_s,
            } => {
                let transient = Transient::new(&steady, scenario.ta)?;
                transient.initial_current(tc_target, factor, lapse_s)?
            }
            BenchMode::FinalCurrent {
                tc_target,
                ic_initial_frac,
                lapse_s,
            } => {
                let transient = Transient::new(&steady, scenario.ta)?;
                transient.final_current(
                    tc_target,
                    ic_initial_frac * transient.icmax(),
                    lapse_s,
                    None,
                )?
            }
            BenchMode::Tension { ruling_span_m, tc } => {
                let solver = SagTension::new(&conductor)?;
                solver.tension(ruling_span_m, tc)?
            }
        };
        runs.push(RunMetrics {
            total_time_s: start.elapsed().as_secs_f64(),
            result,
        });
    }

    let aggregate = aggregate(&runs);
    Ok(BenchResult {
        scenario: scenario.clone(),
        runs,
        aggregate,
    })
}
