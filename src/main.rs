use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folknorm::NormalizerConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folknorm", version, about = "Strip meters and transpose folk-tune corpora to C")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip meter markers and transpose every tune
    Normalize {
        /// Corpus file to read
        input: PathBuf,

        /// Write the rewritten corpus here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Leave meter markers in place
        #[arg(long)]
        keep_meters: bool,

        /// Rewrite tunes in parallel
        #[arg(long)]
        parallel: bool,

        /// Print the rewrite report as YAML on stderr
        #[arg(long)]
        report: bool,
    },

    /// Show original and transposed bodies of selected tunes
    Compare {
        /// Corpus before transposition
        before: PathBuf,

        /// Corpus after transposition
        after: PathBuf,

        /// 0-based tune positions in the original corpus
        #[arg(required = true)]
        positions: Vec<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Normalize {
            input,
            output,
            config,
            keep_meters,
            parallel,
            report,
        } => {
            let mut settings = match &config {
                Some(path) => NormalizerConfig::from_file(path)?,
                None => NormalizerConfig::default(),
            };
            if keep_meters {
                settings.strip_meters = false;
            }
            if parallel {
                settings.parallel = true;
            }
            log::debug!("Settings: {:?}", settings);

            let corpus = fs::read_to_string(&input)
                .with_context(|| format!("Error reading file '{}'", input.display()))?;
            let normalized = folknorm::normalize(&corpus, &settings)?;

            match output {
                Some(path) => {
                    fs::write(&path, &normalized.text)
                        .with_context(|| format!("Error writing to '{}'", path.display()))?;
                    eprintln!("Wrote normalized corpus to {}", path.display());
                }
                None => print!("{}", normalized.text),
            }

            eprintln!(
                "Tunes: {} read, {} retained",
                normalized.report.tunes_read, normalized.report.tunes_retained
            );
            if report {
                let yaml = serde_yaml::to_string(&normalized.report)
                    .context("Error serializing report")?;
                eprint!("{}", yaml);
            }
        }

        Commands::Compare {
            before,
            after,
            positions,
        } => {
            let before_text = fs::read_to_string(&before)
                .with_context(|| format!("Error reading file '{}'", before.display()))?;
            let after_text = fs::read_to_string(&after)
                .with_context(|| format!("Error reading file '{}'", after.display()))?;

            for comparison in folknorm::compare_tunes(&before_text, &after_text, &positions) {
                print!("{}", comparison);
            }
        }
    }

    Ok(())
}
