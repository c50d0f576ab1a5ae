use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use hwbench::config::loader::{get_default_config_path, save_config_to_file};
use hwbench::performance::{aggregate_domain, ComparisonSummary, Normalizer, Recommender};
use hwbench::{report, results, Domain, ScoringConfig, SystemRecord};

#[derive(Parser)]
#[command(
    name = "hwbench",
    version,
    about = "Normalize hardware benchmark results, score systems and recommend hardware per workload"
)]
struct Cli {
    /// Scoring config (.toml or .json); defaults to the user config dir
    #[arg(long, global = true, env = "HWBENCH_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score raw_results.json in each directory and write normalized_results.json
    Normalize {
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
    },
    /// Aggregate a JSON array of run records into run-set statistics
    Aggregate {
        #[arg(long)]
        domain: Domain,
        runs: PathBuf,
        /// Write the run-set JSON here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Rank systems for one workload
    Recommend {
        #[arg(long, short)]
        workload: String,
        #[command(flatten)]
        systems: SystemArgs,
        /// Write the capacity plan here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Print recommendations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score every system against every workload profile
    Matrix {
        #[command(flatten)]
        systems: SystemArgs,
        /// Output prefix: writes <prefix>_matrix.csv and <prefix>_detailed.csv
        #[arg(long, short, default_value = "capacity_plan")]
        output: PathBuf,
    },
    /// Compare systems side by side
    Compare {
        #[command(flatten)]
        systems: SystemArgs,
        /// Directory for comparison_table.csv / comparison_table.txt
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List workload profiles
    Profiles,
    /// Write the active scoring config to a file
    InitConfig {
        /// Target file (.toml or .json); defaults to the user config dir
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args)]
struct SystemArgs {
    /// System result directories
    #[arg(long, short, num_args = 1.., required = true)]
    systems: Vec<PathBuf>,
    /// System names (default: directory names)
    #[arg(long, short, num_args = 1..)]
    names: Vec<String>,
    /// System costs, in the same order as --systems
    #[arg(long, short, num_args = 1..)]
    costs: Vec<f64>,
}

impl SystemArgs {
    fn load(&self) -> Result<Vec<SystemRecord>> {
        self.systems
            .iter()
            .enumerate()
            .map(|(i, dir)| {
                let name = self.names.get(i).map(String::as_str);
                let cost = self.costs.get(i).copied();
                results::load_system(dir, name, cost)
                    .with_context(|| format!("Failed to load system from {}", dir.display()))
            })
            .collect()
    }
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✓ Saved: {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// `<prefix><suffix>`, dropping a trailing `.txt` from the prefix.
fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let base = prefix.to_string_lossy();
    let base = base.strip_suffix(".txt").unwrap_or(base.as_ref());
    PathBuf::from(format!("{}{}", base, suffix))
}

fn recommender_for(config: &ScoringConfig, systems: Vec<SystemRecord>) -> Recommender {
    let mut recommender = Recommender::with_profiles(config.profiles.clone());
    for system in systems {
        recommender.add_system(system);
    }
    recommender
}

fn run(cli: Cli) -> Result<()> {
    let config = ScoringConfig::load_or_default(cli.config.as_deref()).context("Failed to load scoring config")?;

    match cli.cmd {
        Command::Normalize { dirs } => {
            let normalizer = Normalizer::from_config(&config);
            log::info!(
                "[Main] Scoring against baseline table v{}",
                normalizer.baselines().version
            );
            for dir in &dirs {
                let normalized = results::normalize_directory(dir, &normalizer)
                    .map_err(|e| anyhow::anyhow!(e.user_message()))
                    .with_context(|| format!("Failed to normalize {}", dir.display()))?;
                println!(
                    "{}: overall {:.2}/100 ({})",
                    dir.display(),
                    normalized.overall_score,
                    report::PerformanceRating::from_score(normalized.overall_score)
                );
                for domain in Domain::ALL {
                    if let Some(reason) = normalized.domain_error(domain) {
                        println!("  {} failed: {}", domain.label(), reason);
                    }
                }
                println!("  report: {}", dir.join(results::BENCHMARK_REPORT_FILE).display());
            }
        }
        Command::Aggregate { domain, runs, output } => {
            let records = results::load_run_records(&runs)
                .with_context(|| format!("Failed to read run records from {}", runs.display()))?;
            let outcome = aggregate_domain(domain, &records);
            if let Some(reason) = outcome.error() {
                log::warn!("[Main] {} run-set failed: {}", domain, reason);
            }
            let mut json = serde_json::to_string_pretty(&outcome)?;
            json.push('\n');
            write_output(output.as_deref(), &json)?;
        }
        Command::Recommend {
            workload,
            systems,
            output,
            json,
        } => {
            let recommender = recommender_for(&config, systems.load()?);
            let Some(profile) = recommender.profile(&workload) else {
                bail!(
                    "Unknown workload '{}'. Available: {}",
                    workload,
                    config.profile_names().join(", ")
                );
            };
            let recommendations = recommender.recommend_for_workload(&workload);

            let rendered = if json {
                let mut text = serde_json::to_string_pretty(&recommendations)?;
                text.push('\n');
                text
            } else {
                report::render_capacity_plan(profile, &recommendations)
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Command::Matrix { systems, output } => {
            let recommender = recommender_for(&config, systems.load()?);
            let matrix = recommender.workload_matrix();
            write_output(
                Some(&with_suffix(&output, "_matrix.csv")),
                &report::render_workload_matrix_csv(&matrix),
            )?;
            write_output(
                Some(&with_suffix(&output, "_detailed.csv")),
                &report::render_workload_detail_csv(&matrix),
            )?;
        }
        Command::Compare { systems, output } => {
            let systems = systems.load()?;
            let text = report::render_comparison_text(&systems);
            match output {
                Some(dir) => {
                    write_output(
                        Some(&dir.join("comparison_table.csv")),
                        &report::render_comparison_csv(&systems),
                    )?;
                    write_output(Some(&dir.join("comparison_table.txt")), &text)?;
                    let summary = ComparisonSummary::from_systems(&systems);
                    let mut json = serde_json::to_string_pretty(&summary)?;
                    json.push('\n');
                    write_output(Some(&dir.join("comparison_summary.json")), &json)?;
                }
                None => print!("{}", text),
            }
        }
        Command::Profiles => {
            for profile in &config.profiles {
                println!("{}", profile.name);
                if !profile.description.is_empty() {
                    println!("  {}", profile.description);
                }
                let weights: Vec<String> = profile
                    .weights
                    .iter()
                    .map(|(d, w)| format!("{} {:.0}%", d, w * 100.0))
                    .collect();
                let minimums: Vec<String> = profile
                    .min_scores
                    .iter()
                    .map(|(d, m)| format!("{} {}", d, m))
                    .collect();
                println!("  weights:  {}", weights.join(", "));
                println!("  minimums: {}", minimums.join(", "));
            }
        }
        Command::InitConfig { path, force } => {
            let Some(path) = path.or_else(get_default_config_path) else {
                bail!("No config directory on this platform; pass a target path");
            };
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            save_config_to_file(&config, &path)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            eprintln!("✓ Wrote scoring config: {}", path.display());
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = hwbench::init_logging(log_level(cli.verbose), cli.log_file.as_deref()) {
        eprintln!("[Main] WARNING: {}", e);
    }
    log::debug!("[Main] hwbench {} starting", hwbench::VERSION);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
