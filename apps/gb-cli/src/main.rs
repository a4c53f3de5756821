mod compile;
mod error;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use compile::{CompiledBc, compile};
use error::{CliError, CliResult};
use gb_bc::ParameterField;
use gb_core::Real;

#[derive(Parser)]
#[command(name = "gb-cli")]
#[command(about = "geobc CLI - time-dependent boundary condition evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a boundary condition definition file
    Validate {
        /// Path to the YAML or JSON definition file
        path: PathBuf,
    },
    /// Print prescribed values over a time range
    Values {
        /// Path to the YAML or JSON definition file
        path: PathBuf,
        /// Boundary condition ID
        bc_id: String,
        /// Start time in seconds
        #[arg(long, default_value_t = 0.0)]
        t_start: f64,
        /// End time in seconds
        #[arg(long)]
        t_end: f64,
        /// Time step in seconds
        #[arg(long)]
        dt: f64,
    },
    /// Print the change in prescribed values between two times
    Increment {
        /// Path to the YAML or JSON definition file
        path: PathBuf,
        /// Boundary condition ID
        bc_id: String,
        /// Start of the increment in seconds
        #[arg(long)]
        t0: f64,
        /// End of the increment in seconds
        #[arg(long)]
        t1: f64,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Values {
            path,
            bc_id,
            t_start,
            t_end,
            dt,
        } => cmd_values(&path, &bc_id, t_start, t_end, dt),
        Commands::Increment {
            path,
            bc_id,
            t0,
            t1,
        } => cmd_increment(&path, &bc_id, t0, t1),
    }
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating definition: {}", path.display());
    let file = gb_project::load(path)?;
    for def in &file.boundary_conditions {
        compile(&file, &def.id)?;
        println!("  {} - {} ({} points)", def.id, def.field, def.points.len());
    }
    println!("✓ Definition is valid");
    Ok(())
}

fn cmd_values(path: &Path, bc_id: &str, t_start: f64, t_end: f64, dt: f64) -> CliResult<()> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(CliError::InvalidArg {
            what: format!("dt must be positive, got {dt}"),
        });
    }
    if t_end < t_start {
        return Err(CliError::InvalidArg {
            what: format!("t_end ({t_end}) is before t_start ({t_start})"),
        });
    }

    let file = gb_project::load(path)?;
    let mut compiled = compile(&file, bc_id)?;
    print_header(&compiled, "t [s]");

    let steps = ((t_end - t_start) / dt + 1e-9).floor() as usize;
    for step in 0..=steps {
        let t = t_start + step as f64 * dt;
        let t_nd = nondim_time(&compiled, t);
        let values = compiled.bc.calculate_value(t_nd)?;
        print_row(&format!("{t:.6e}"), values);
    }
    Ok(())
}

fn cmd_increment(path: &Path, bc_id: &str, t0: f64, t1: f64) -> CliResult<()> {
    let file = gb_project::load(path)?;
    let mut compiled = compile(&file, bc_id)?;
    print_header(&compiled, "window [s]");

    let (t0_nd, t1_nd) = (nondim_time(&compiled, t0), nondim_time(&compiled, t1));
    let values = compiled.bc.calculate_value_incr(t0_nd, t1_nd)?;
    print_row(&format!("{t0:.3e}..{t1:.3e}"), values);
    Ok(())
}

fn nondim_time(compiled: &CompiledBc<'_>, t: Real) -> Real {
    let n = &compiled.normalizer;
    n.nondimensionalize_value(t, n.time_scale())
}

fn print_header(compiled: &CompiledBc<'_>, time_label: &str) {
    let mut line = format!("{time_label:>22}");
    for point in &compiled.def.points {
        for name in compiled.bc.bc_dof().component_names(&format!("{}-", compiled.def.field)) {
            line.push_str(&format!(" {:>22}", format!("p{point}:{name}")));
        }
    }
    println!("{line}");
}

fn print_row(time: &str, values: &ParameterField) {
    let mut line = format!("{time:>22}");
    for v in values.dimensionalized() {
        line.push_str(&format!(" {v:>22.12e}"));
    }
    println!("{line}");
}
