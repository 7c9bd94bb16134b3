//! Standalone benchmark runner for the ohl solvers.

use std::fs;
use std::io::Write;
use ohl_bench::{BenchSuite, default_scenarios, run_scenario};

const RUNS_PER_SCENARIO: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("ohl Benchmark Suite");
    println!("===================\n");

    let scenarios = default_scenarios();
    println!(
        "Running {} benchmarks, {} runs each...\n",
        scenarios.len(),
        RUNS_PER_SCENARIO
    );

    let mut results = Vec::new();

    for (idx, scenario) in scenarios.iter().enumerate() {
        print!("[{}/{}] {} ... ", idx + 1, scenarios.len(), scenario.name);
        std::io::stdout().flush()?;

        match run_scenario(scenario, RUNS_PER_SCENARIO) {
            Ok(result) => {
                println!("OK ({:.4}s median)", result.aggregate.total_time_median_s);
                results.push(result);
            }
            Err(e) => {
                println!("FAILED");
                eprintln!("  Error: {}", e);
            }
        }
    }

    println!("\n===================");
    println!("Results Summary");
    println!("===================\n");

    for result in &results {
        let agg = &result.aggregate;
        println!("{}", result.scenario.name);
        println!("  Mode:   {:?}", result.scenario.mode);
        println!(
            "  Time:   {:.4}s (median), min: {:.4}s, max: {:.4}s",
            agg.total_time_median_s, agg.total_time_min_s, agg.total_time_max_s
        );
        println!("  Result: {:.3}", result.runs[result.runs.len() - 1].result);
        println!();
    }

    let suite = BenchSuite { results };
    let path = "bench_results.json";
    fs::write(path, serde_json::to_string_pretty(&suite)?)?;
    println!("Report written to {path}");

    Ok(())
}
