use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use dslab_autoscaling::core::config::SimulationConfig;
use dslab_autoscaling::simulation::AutoscalingSimulation;

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to simulation config
    #[clap(short, long, default_value = "config.yaml")]
    config: String,

    /// Simulation duration in seconds
    #[clap(short, long, default_value_t = 200.)]
    duration: f64,

    /// Print final VM states as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    let sim_config = match SimulationConfig::from_file(&args.config) {
        Ok(sim_config) => sim_config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut sim = AutoscalingSimulation::new(sim_config);
    if let Err(e) = sim.spawn_initial_vms() {
        error!("can't spawn initial VMs: {}", e);
        return ExitCode::FAILURE;
    }

    let created = sim.step_for_duration(args.duration);

    let broker = sim.broker();
    let broker = broker.borrow();
    info!(
        "simulated {:.1}s: {} VMs running, {} created by scale-outs, {} rejected",
        sim.current_time(),
        broker.vm_count(),
        created.len(),
        broker.rejected_count()
    );
    if args.json {
        let vms: Vec<_> = broker.vms().collect();
        match serde_json::to_string_pretty(&vms) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("can't serialize VMs: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
