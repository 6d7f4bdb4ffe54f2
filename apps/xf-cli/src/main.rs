use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xf_app::{AppError, AppResult, run_config, write_json, write_tsv};
use xf_project::{SimulationConfig, VariantDef, load_config};

#[derive(Parser)]
#[command(name = "xf-cli")]
#[command(about = "XylemFlow CLI - plant hydraulic supply and stomatal regulation sweeps", long_about = None)]
struct Cli {
    /// Two-parameter preset: FB FC LB LC (organ curve b, c; range curve b, c)
    #[arg(value_name = "PARAM", num_args = 0..)]
    params: Vec<f64>,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, conflicts_with = "params")]
    config: Option<PathBuf>,

    /// Supply curve variant, overriding the configuration
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Number of predawn scenarios, overriding the configuration
    #[arg(long)]
    scenarios: Option<usize>,

    /// TSV output path
    #[arg(short, long, default_value = "output/vc_e.txt")]
    output: PathBuf,

    /// Also write a JSON report with convergence annotations
    #[arg(long)]
    json: Option<PathBuf>,

    /// Report elapsed time
    #[arg(long)]
    timing: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    StemLeaf,
    SingleLayer,
    MultiLayer,
}

impl From<VariantArg> for VariantDef {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::StemLeaf => VariantDef::StemLeaf,
            VariantArg::SingleLayer => VariantDef::SingleLayer,
            VariantArg::MultiLayer => VariantDef::MultiLayer,
        }
    }
}

fn build_config(cli: &Cli) -> AppResult<SimulationConfig> {
    let mut config = match (cli.params.as_slice(), &cli.config) {
        ([], Some(path)) => load_config(path)?,
        ([], None) => SimulationConfig::default(),
        (&[fb, fc, lb, lc], None) => SimulationConfig::two_parameter(fb, fc, lb, lc),
        (params, _) => {
            return Err(AppError::InvalidInput(format!(
                "expected 0 or 4 positional parameters, got {}",
                params.len()
            )));
        }
    };
    if let Some(variant) = cli.variant {
        config.sweep.variant = variant.into();
    }
    if let Some(scenarios) = cli.scenarios {
        config.sweep.scenarios = scenarios;
    }
    Ok(config)
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.timing {
        xf_core::timing::enable_timing();
    }

    let config = build_config(&cli)?;
    tracing::debug!(
        name = %config.name,
        variant = ?config.sweep.variant,
        scenarios = config.sweep.scenarios,
        "configuration resolved"
    );
    let outcome = run_config(&config)?;
    write_tsv(&cli.output, &outcome)?;
    if let Some(json) = &cli.json {
        write_json(json, &outcome)?;
    }

    println!(
        "{} scenarios ({} variant, {}) written to {}",
        outcome.records.len(),
        outcome.variant,
        outcome.quantity,
        cli.output.display()
    );
    if outcome.failed > 0 || outcome.unconverged > 0 {
        println!(
            "  {} failed, {} unconverged",
            outcome.failed, outcome.unconverged
        );
    }
    if let Some(elapsed) = outcome.elapsed_s {
        println!("  elapsed: {elapsed:.3} s");
    }
    Ok(())
}
