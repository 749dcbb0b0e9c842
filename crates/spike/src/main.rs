use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use paddle_nn_core::dataset::{synthetic_predictive, synthetic_reactive, unzip, Sample};
use paddle_nn_core::state::{PREDICTIVE_INPUTS, REACTIVE_INPUTS};
use paddle_nn_core::{
    ModelConfig, PaddleModel, PredictiveModel, PredictiveState, ReactiveModel, ReactiveState,
    WeightSnapshot,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const BENCHMARK_SEEDS: u64 = 8;
const BENCHMARK_TRAIN: usize = 400;
const BENCHMARK_HOLDOUT: usize = 200;

#[derive(Parser)]
#[command(name = "paddle-nn")]
#[command(about = "Train and query paddle controller networks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    Reactive,
    Predictive,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model on labelled samples and write its weights
    Train {
        #[arg(long, value_enum)]
        variant: Variant,

        /// JSON array of {"state": ..., "action": ...} samples
        #[arg(long)]
        data: PathBuf,

        /// Where to write the weight snapshot (JSON)
        #[arg(long)]
        out: PathBuf,

        /// Model config (JSON); defaults apply to missing fields
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured epoch budget
        #[arg(long)]
        epochs: Option<usize>,

        /// Override the configured initialization seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the action a trained model picks for one state
    Predict {
        #[arg(long, value_enum)]
        variant: Variant,

        /// Weight snapshot (JSON)
        #[arg(long)]
        weights: PathBuf,

        /// State record as inline JSON
        #[arg(long)]
        state: String,
    },
    /// Train independently seeded models on synthetic data and report holdout accuracy
    Benchmark {
        #[arg(long, value_enum, default_value = "predictive")]
        variant: Variant,

        #[arg(long, default_value_t = 100)]
        epochs: usize,
    },
    /// Dump the default model configuration to stdout
    DumpDefaultConfig,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_config(path: Option<&Path>, epochs: Option<usize>, seed: Option<u64>) -> Result<ModelConfig> {
    let mut config = match path {
        Some(path) => read_json(path)?,
        None => ModelConfig::default(),
    };
    if let Some(epochs) = epochs {
        config.epochs = epochs;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate().context("model config validation error")?;
    Ok(config)
}

fn train<const N: usize, M>(mut model: M, samples: &[Sample<M::State>], out: &Path) -> Result<()>
where
    M: PaddleModel<N>,
    M::State: Clone,
{
    if samples.is_empty() {
        bail!("no training samples");
    }
    let (states, labels) = unzip(samples);
    let start = Instant::now();
    model.fit_default(&states, &labels)?;
    let accuracy = model.accuracy(&states, &labels)?;
    tracing::info!(
        samples = samples.len(),
        accuracy,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "training finished"
    );

    let json = model.export_weights().to_json()?;
    fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(path = %out.display(), "weights written");
    Ok(())
}

fn predict<const N: usize, M>(model: &M, state_json: &str) -> Result<()>
where
    M: PaddleModel<N>,
    M::State: DeserializeOwned,
{
    let state: M::State = serde_json::from_str(state_json).context("parsing state")?;
    println!("{}", model.predict(&state));
    Ok(())
}

fn benchmark_seed(variant: Variant, seed: u64, epochs: usize) -> Result<f64> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let config = ModelConfig {
        epochs,
        seed: Some(seed),
        ..ModelConfig::default()
    };
    let accuracy = match variant {
        Variant::Reactive => {
            let (train_x, train_y) = unzip(&synthetic_reactive(&mut rng, BENCHMARK_TRAIN));
            let (test_x, test_y) = unzip(&synthetic_reactive(&mut rng, BENCHMARK_HOLDOUT));
            let mut model = ReactiveModel::from_config(&config)?;
            model.fit_default(&train_x, &train_y)?;
            model.accuracy(&test_x, &test_y)?
        }
        Variant::Predictive => {
            let (train_x, train_y) = unzip(&synthetic_predictive(&mut rng, BENCHMARK_TRAIN));
            let (test_x, test_y) = unzip(&synthetic_predictive(&mut rng, BENCHMARK_HOLDOUT));
            let mut model = PredictiveModel::from_config(&config)?;
            model.fit_default(&train_x, &train_y)?;
            model.accuracy(&test_x, &test_y)?
        }
    };
    Ok(accuracy)
}

fn run_benchmark(variant: Variant, epochs: usize) -> Result<()> {
    let start = Instant::now();
    // One owned model per seed; nothing is shared between workers.
    let results: Vec<(u64, f64)> = (0..BENCHMARK_SEEDS)
        .into_par_iter()
        .map(|seed| benchmark_seed(variant, seed, epochs).map(|acc| (seed, acc)))
        .collect::<Result<_>>()?;
    let elapsed = start.elapsed();

    println!("--- {variant:?}: {BENCHMARK_SEEDS} seeds, {BENCHMARK_TRAIN} train / {BENCHMARK_HOLDOUT} holdout, {epochs} epochs ---");
    for (seed, acc) in &results {
        println!("  seed {seed:>2}: holdout accuracy {:.1}%", acc * 100.0);
    }
    let mean = results.iter().map(|(_, a)| a).sum::<f64>() / results.len() as f64;
    println!("  Mean accuracy: {:.1}%", mean * 100.0);
    println!("  Wall time:     {elapsed:?}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            variant,
            data,
            out,
            config,
            epochs,
            seed,
        } => {
            let config = load_config(config.as_deref(), epochs, seed)?;
            match variant {
                Variant::Reactive => {
                    let samples: Vec<Sample<ReactiveState>> = read_json(&data)?;
                    train::<REACTIVE_INPUTS, _>(ReactiveModel::from_config(&config)?, &samples, &out)?;
                }
                Variant::Predictive => {
                    let samples: Vec<Sample<PredictiveState>> = read_json(&data)?;
                    train::<PREDICTIVE_INPUTS, _>(PredictiveModel::from_config(&config)?, &samples, &out)?;
                }
            }
        }
        Commands::Predict {
            variant,
            weights,
            state,
        } => {
            let snapshot: WeightSnapshot = read_json(&weights)?;
            let lr = ModelConfig::default().learning_rate;
            match variant {
                Variant::Reactive => {
                    predict::<REACTIVE_INPUTS, _>(&ReactiveModel::with_weights(lr, &snapshot)?, &state)?
                }
                Variant::Predictive => {
                    predict::<PREDICTIVE_INPUTS, _>(&PredictiveModel::with_weights(lr, &snapshot)?, &state)?
                }
            }
        }
        Commands::Benchmark { variant, epochs } => run_benchmark(variant, epochs)?,
        Commands::DumpDefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&ModelConfig::default())?);
        }
    }

    Ok(())
}
