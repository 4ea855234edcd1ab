// CLI tool for running pressure-volume sweeps
use std::env;
use std::process::ExitCode;

use gas_properties::sweep::{export_results_to_csv, SweepConfig, SweepRunner};

fn print_usage() {
    println!("Usage: pv_sweep <command> [options]\n");
    println!("Commands:");
    println!("  generate <output.toml>            Write a volume series sweep definition");
    println!("  list     <sweep.toml>             List the cases in a sweep");
    println!("  run      <sweep.toml> <case_id>   Run one case and print its result");
    println!("  run-all  <sweep.toml> [out_dir]   Run every case and export CSV (default out_dir: sweep_results)");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "generate" => generate(&args[2]),
        "list" => list_cases(&args[2]),
        "run" => match args.get(3) {
            Some(case_id) => run_case(&args[2], case_id),
            None => {
                print_usage();
                return ExitCode::FAILURE;
            }
        },
        "run-all" => run_all(&args[2], args.get(3).map(String::as_str).unwrap_or("sweep_results")),
        other => {
            println!("Unknown command: {other}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn generate(output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let widths: Vec<f64> = (5..=15).map(|w| w as f64 * 1000.0).collect();
    let config = SweepConfig::volume_series("boyle", &widths, 100, 100);
    std::fs::write(output, toml::to_string_pretty(&config)?)?;
    println!("Wrote {} cases to {output}", config.cases.len());
    Ok(())
}

fn list_cases(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = SweepConfig::load(path)?;
    println!("Study: {} ({} cases)", config.study_name, config.cases.len());
    for case in &config.cases {
        println!(
            "  {:<12} width {:>8.0} pm  heavy {:>4}  light {:>4}  hold {:?}",
            case.case_id, case.width, case.heavy, case.light, case.hold_constant
        );
    }
    Ok(())
}

fn run_case(path: &str, case_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let runner = SweepRunner::new(SweepConfig::load(path)?);
    let result = runner.run_case(case_id)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_all(path: &str, output_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let runner = SweepRunner::new(SweepConfig::load(path)?);
    let results = runner.run_all()?;
    let csv = export_results_to_csv(&runner.config().study_name, &results, output_dir)?;
    println!("Results saved to: {}", csv.display());
    Ok(())
}
