use std::path::{Path, PathBuf};

use aircraft_topsis::config::{Config, ConfigOverrides};
use aircraft_topsis::criteria::{parse_direction_override, WeightMap};
use aircraft_topsis::engine::{fingerprint, rank_with_options, DecisionMatrix, RankOptions};
use aircraft_topsis::output::chart::render_bar_chart;
use aircraft_topsis::output::csv::{matrix_to_csv, ranking_to_csv};
use aircraft_topsis::output::json::render_json;
use aircraft_topsis::output::table::{
    render_matrix_table, render_ranking_table, render_weights_table,
};
use aircraft_topsis::output::{best_summary, RankingReport};
use aircraft_topsis::source::{CsvSource, MatrixSource, SimulatedSource};
use aircraft_topsis::weights::{
    check_weight_sum, parse_weight_override, validate_weight_bounds, weight_distribution,
};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "aircraft-topsis",
    about = "Rank simulated aircraft configurations with TOPSIS"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Criterion weight override, e.g. `--weight trip_fuel=0.3`.
    #[arg(short = 'w', long = "weight", value_name = "NAME=VALUE")]
    weights: Vec<String>,
    /// Criterion direction override, e.g. `--direction noise_db=min`.
    #[arg(short = 'd', long = "direction", value_name = "NAME=max|min")]
    directions: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct SourceArgs {
    /// Number of simulated aircraft cases.
    #[arg(short = 'n', long)]
    alternatives: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Read the decision matrix from a CSV file instead of simulating it.
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rank {
        #[command(flatten)]
        source: SourceArgs,
        /// Top alternatives to display.
        #[arg(short, long)]
        top: Option<usize>,
        /// Print the input matrix before the ranking.
        #[arg(long)]
        show_data: bool,
    },
    Simulate {
        #[command(flatten)]
        source: SourceArgs,
    },
    Weights,
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;

    if let Commands::Config { init, show } = &cli.command {
        return handle_config_command(*init, *show, &config, &config_path);
    }

    let mut overrides = ConfigOverrides {
        weights: cli
            .weights
            .iter()
            .map(|raw| parse_weight_override(raw))
            .collect::<Result<Vec<_>>>()?,
        directions: cli
            .directions
            .iter()
            .map(|raw| parse_direction_override(raw))
            .collect::<Result<Vec<_>>>()?,
        ..ConfigOverrides::default()
    };
    match &cli.command {
        Commands::Rank { source, top, .. } => {
            apply_source_args(&mut overrides, source);
            overrides.top_n = *top;
        }
        Commands::Simulate { source } => apply_source_args(&mut overrides, source),
        Commands::Weights | Commands::Config { .. } => {}
    }
    config.apply_overrides(overrides);

    match &cli.command {
        Commands::Rank { show_data, .. } => run_rank(&config, cli.output, *show_data)?,
        Commands::Simulate { .. } => {
            let matrix = build_source(&config).load()?;
            print_matrix(&matrix, cli.output)?;
        }
        Commands::Weights => print_weights(&config, cli.output)?,
        Commands::Config { .. } => unreachable!("config command handled before dispatch"),
    }

    Ok(())
}

fn apply_source_args(overrides: &mut ConfigOverrides, source: &SourceArgs) {
    overrides.alternatives = source.alternatives;
    overrides.seed = source.seed;
    overrides.csv_path = source.input.clone();
}

fn handle_config_command(init: bool, show: bool, config: &Config, config_path: &Path) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn build_source(config: &Config) -> Box<dyn MatrixSource> {
    match config.resolved_csv_path() {
        Some(path) => Box::new(CsvSource::new(path)),
        None => Box::new(SimulatedSource::new(
            config.simulation.alternatives,
            config.simulation.seed,
        )),
    }
}

fn weights_for(config: &Config, matrix: &DecisionMatrix) -> WeightMap {
    let mut weights = WeightMap::new();
    for (name, weight) in &config.weights {
        if matrix.column_index(name).is_some() {
            weights.insert(name.clone(), *weight);
        } else {
            warn!("ignoring weight for {name}: not a criterion of the input matrix");
        }
    }
    weights
}

fn run_rank(config: &Config, format: OutputFormat, show_data: bool) -> Result<()> {
    let source = build_source(config);
    let matrix = source.load()?;
    let weights = weights_for(config, &matrix);
    let directions = config.directions();

    validate_weight_bounds(&weights)?;
    let check = check_weight_sum(&weights, config.ranking.weight_sum_tolerance);
    if !check.is_balanced() {
        bail!("{check}");
    }

    let options = if config.ranking.enforce_in_engine {
        RankOptions::strict(config.ranking.weight_sum_tolerance)
    } else {
        RankOptions::default()
    };
    let result = rank_with_options(&matrix, &weights, &directions, &options)?;
    let top_n = config.effective_top_n(result.len());
    info!(
        "ranked {} alternatives from {}",
        result.len(),
        source.name()
    );

    match format {
        OutputFormat::Table => {
            if show_data {
                println!(
                    "Aircraft Data ({} alternatives)",
                    matrix.alternative_count()
                );
                println!("{}", render_matrix_table(&matrix));
            }
            println!("TOPSIS Ranking (Top {top_n} Aircraft)");
            println!("{}", render_ranking_table(&result, &matrix, top_n));
            println!();
            print!("{}", render_bar_chart(&result, top_n));
            if let Some(summary) = best_summary(&result) {
                println!();
                println!("{summary}");
            }
        }
        OutputFormat::Json => {
            let report = RankingReport::build(
                source.name(),
                fingerprint(&matrix, &weights, &directions),
                check,
                &matrix,
                &result,
                top_n,
            );
            println!("{}", render_json(&report)?);
        }
        OutputFormat::Csv => print!("{}", ranking_to_csv(&result, &matrix, top_n)?),
    }
    Ok(())
}

fn print_matrix(matrix: &DecisionMatrix, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_matrix_table(matrix)),
        OutputFormat::Json => println!("{}", render_json(matrix)?),
        OutputFormat::Csv => print!("{}", matrix_to_csv(matrix)?),
    }
    Ok(())
}

fn print_weights(config: &Config, format: OutputFormat) -> Result<()> {
    validate_weight_bounds(&config.weights)?;
    let check = check_weight_sum(&config.weights, config.ranking.weight_sum_tolerance);
    let shares = weight_distribution(&config.weights);
    match format {
        OutputFormat::Table => {
            if check.is_balanced() {
                println!("{}", render_weights_table(&check, &shares));
            } else {
                println!("[ERROR] {check}");
                println!("Adjust the weights to make the total equal to 1 before displaying the distribution.");
            }
        }
        OutputFormat::Json => println!(
            "{}",
            render_json(&serde_json::json!({ "check": check, "distribution": shares }))?
        ),
        OutputFormat::Csv => {
            warn!("CSV output for weights not implemented, using JSON");
            println!(
                "{}",
                render_json(&serde_json::json!({ "check": check, "distribution": shares }))?
            );
        }
    }
    Ok(())
}
