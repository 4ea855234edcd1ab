// Headless ideal gas run: drives a scripted scenario through the command
// channel and writes one JSON snapshot line per report interval to stdout.
//
// Usage: gas_properties [config.toml]

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use crossbeam::channel::{unbounded, Sender};

use gas_properties::commands::{drain_commands, drain_diffusion_commands, DiffusionCommand, SimCommand};
use gas_properties::config::SimConfig;
use gas_properties::gas_law::HoldConstant;
use gas_properties::io::{write_json_line, DiffusionSnapshot, Snapshot};
use gas_properties::species::ParticleType;
use gas_properties::{DiffusionModel, IdealGasModel, Result};

/// Real seconds per frame.
const FRAME_DT: f64 = 1.0 / 60.0;
const IDEAL_FRAMES: usize = 3600;
const DIFFUSION_FRAMES: usize = 1800;
const REPORT_EVERY: usize = 60;

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load_from_file(&path) {
            Ok(config) => {
                tracing::info!(%path, "loaded configuration");
                config
            }
            Err(e) => {
                tracing::error!(%path, "failed to load configuration: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: SimConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    run_ideal_gas(config.clone(), &mut out)?;
    run_diffusion(config, &mut out)?;
    out.flush()?;

    #[cfg(feature = "profiling")]
    gas_properties::PROFILER.lock().log_and_clear();

    Ok(())
}

/// Commands sent at the start of a frame.
fn ideal_gas_script(frame: usize, tx: &Sender<SimCommand>) {
    let cmds: &[SimCommand] = match frame {
        0 => &[
            SimCommand::AddParticles { species: ParticleType::Heavy, count: 100 },
            SimCommand::AddParticles { species: ParticleType::Light, count: 50 },
        ],
        600 => &[SimCommand::SetHoldConstant { mode: HoldConstant::Temperature }],
        900 => &[SimCommand::SetDesiredWidth { width: 6000.0 }],
        1200 => &[
            SimCommand::SetHoldConstant { mode: HoldConstant::PressureViaVolume },
            SimCommand::SetHeatCoolFactor { factor: 0.5 },
        ],
        1800 => &[
            SimCommand::SetHeatCoolFactor { factor: 0.0 },
            SimCommand::SetHoldConstant { mode: HoldConstant::Nothing },
            SimCommand::StartCollisionCounter,
        ],
        2400 => &[SimCommand::SetHeatCoolFactor { factor: 1.0 }],
        3000 => &[SimCommand::SetLidOn { on: false }],
        _ => &[],
    };
    for cmd in cmds {
        // The receiver lives for the whole run.
        let _ = tx.send(cmd.clone());
    }
}

fn run_ideal_gas<W: Write>(config: SimConfig, out: &mut W) -> Result<()> {
    let mut model = IdealGasModel::new(config)?;
    let oops = model.subscribe_oops();
    let (tx, rx) = unbounded();

    for frame in 0..IDEAL_FRAMES {
        ideal_gas_script(frame, &tx);
        drain_commands(&rx, &mut model);
        model.step(FRAME_DT);

        for o in oops.try_iter() {
            tracing::warn!(frame, "{}", o.message());
        }
        if frame % REPORT_EVERY == 0 {
            write_json_line(out, &Snapshot::capture(&model))?;
        }
    }

    let snapshot = Snapshot::capture(&model);
    tracing::info!(
        time = snapshot.time,
        inside = snapshot.heavy + snapshot.light,
        outside = snapshot.outside,
        temperature = ?snapshot.temperature,
        pressure_kpa = snapshot.pressure_kpa,
        wall_collisions = model.collision_counter().count(),
        "ideal gas run finished"
    );
    Ok(())
}

fn run_diffusion<W: Write>(config: SimConfig, out: &mut W) -> Result<()> {
    let mut model = DiffusionModel::new(config)?;
    let (tx, rx) = unbounded();

    for frame in 0..DIFFUSION_FRAMES {
        if frame == DIFFUSION_FRAMES / 4 {
            let _ = tx.send(DiffusionCommand::SetDivider { present: false });
        }
        drain_diffusion_commands(&rx, &mut model);
        model.step(FRAME_DT);
        if frame % REPORT_EVERY == 0 {
            write_json_line(out, &DiffusionSnapshot::capture(&model))?;
        }
    }

    let data = model.data();
    tracing::info!(
        species1 = ?data.count(ParticleType::Diffusion1),
        species2 = ?data.count(ParticleType::Diffusion2),
        "diffusion run finished"
    );
    Ok(())
}
