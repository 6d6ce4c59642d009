use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use tracebench::azure::load_azure_trace;
use tracebench::benchmarks::catalog_entries;
use tracebench::error::Result;
use tracebench::generator::{GenerationMode, GeneratorConfig, RequestGenerator, TimeScaling, DEFAULT_SEED};
use tracebench::mapping::FunctionMapping;
use tracebench::workload::WorkloadTable;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the workload catalogue JSON file.
    #[arg(short, long)]
    workloads_file: PathBuf,
    /// Path to the output file; stdout if left unspecified.
    #[arg(short, long)]
    out_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Output all available workloads as a deployable JSON list.
    Functions,
    /// Generate a request schedule from an Azure Functions trace.
    Trace {
        /// Path to the directory with the trace CSV files.
        #[arg(long)]
        trace_dir: PathBuf,
        /// Trace day to use.
        #[arg(long, default_value_t = 1)]
        day: u32,
        /// Target maximum number of requests per second.
        #[arg(short = 'r', long)]
        request_rate: u64,
        /// Target duration of the experiment, in minutes.
        #[arg(short = 'd', long)]
        target_duration: usize,
        #[command(subcommand)]
        mode: Mode,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TimeScalingArg {
    Thumbnails,
    MinuteRange,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Deterministic time/rate rescaling of the trace.
    Spec {
        /// Method used for scaling in time.
        #[arg(long, value_enum, default_value_t = TimeScalingArg::Thumbnails)]
        time_scaling: TimeScalingArg,
        /// First minute of the range (minute-range time scaling only).
        #[arg(short, long, required_if_eq("time_scaling", "minute-range"))]
        first_minute: Option<usize>,
    },
    /// Stochastic inverse-transform sampling over the trace's durations.
    Smirnov {
        /// Seed for the random generator.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

fn run(args: Args) -> Result<()> {
    let workloads = WorkloadTable::from_json_reader(File::open(&args.workloads_file)?)?;
    let mut out: Box<dyn Write> = match &args.out_file {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match args.command {
        Command::Functions => {
            let entries = catalog_entries(&workloads)?;
            serde_json::to_writer_pretty(&mut out, &entries)?;
            out.write_all(b"\n")?;
        }
        Command::Trace {
            trace_dir,
            day,
            request_rate,
            target_duration,
            mode,
        } => {
            let trace = load_azure_trace(&trace_dir, day)?;
            info!("trace processed, {} distinct durations", trace.len());
            let mapping = FunctionMapping::new(trace, &workloads)?;

            let specification = match mode {
                Mode::Spec {
                    time_scaling,
                    first_minute,
                } => {
                    let time_scaling = match time_scaling {
                        TimeScalingArg::Thumbnails => TimeScaling::Thumbnails,
                        TimeScalingArg::MinuteRange => TimeScaling::MinuteRange {
                            first_minute: first_minute.expect("enforced by clap"),
                        },
                    };
                    let generator = RequestGenerator::new(
                        mapping,
                        GeneratorConfig {
                            mode: GenerationMode::Spec,
                            time_scaling,
                            max_rps: request_rate,
                            target_minutes: target_duration,
                        },
                    );
                    generator.generate_spec()?
                }
                Mode::Smirnov { seed } => {
                    let generator = RequestGenerator::new(
                        mapping,
                        GeneratorConfig {
                            mode: GenerationMode::Smirnov,
                            max_rps: request_rate,
                            target_minutes: target_duration,
                            ..Default::default()
                        },
                    );
                    generator.generate_smirnov(seed)?
                }
            };
            specification.write_csv(out)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
