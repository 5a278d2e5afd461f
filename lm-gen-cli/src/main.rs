//! Command line front end: trains a model on a corpus file and prints
//! the generated text.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lm_gen_core::io::read_corpus;
use lm_gen_core::{LanguageModel, ModelConfig, SeedMode, StopReason, DEFAULT_SEED};

/// Random source selection on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SeedChoice {
    /// Reproducible output (see `--seed`)
    Fixed,
    /// Different output on every run
    Random,
}

#[derive(Parser, Debug)]
#[command(
    name = "lm-gen",
    about = "Generate text from a character-level sliding window model"
)]
struct Args {
    /// Number of preceding characters used to predict the next one
    window_length: usize,

    /// Text to extend; its last `window_length` characters start the generation
    initial_text: String,

    /// Number of characters to generate
    length: usize,

    /// Seed mode of the random source
    #[arg(value_enum)]
    seed_mode: SeedChoice,

    /// Path to the training corpus
    corpus: PathBuf,

    /// Seed used in `fixed` mode
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Print the trained mapping to stderr
    #[arg(long)]
    dump: bool,

    /// Print the trained mapping to stderr as JSON
    #[arg(long)]
    dump_json: bool,
}

impl Args {
    fn seed_mode(&self) -> SeedMode {
        match self.seed_mode {
            SeedChoice::Fixed => SeedMode::Fixed(self.seed),
            SeedChoice::Random => SeedMode::Entropy,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Fails fast on a zero window length
    let config = ModelConfig::new(args.window_length)?.with_seed_mode(args.seed_mode());
    let mut model = LanguageModel::new(config);

    let corpus = read_corpus(&args.corpus)?;
    log::info!("training on {} ({} characters)", args.corpus.display(), corpus.len());
    model.train(corpus)?;
    log::info!("{} windows learned", model.len());

    if args.dump {
        eprint!("{model}");
    }
    if args.dump_json {
        eprintln!("{}", model.to_json()?);
    }

    let generation = model.generate_with_report(&args.initial_text, args.length);
    match &generation.stop {
        StopReason::Completed => (),
        StopReason::SeedTooShort => log::warn!(
            "initial text is shorter than the window length ({}), nothing generated",
            args.window_length
        ),
        StopReason::UnknownSeedWindow { window } => {
            log::warn!("window {window:?} never appears in the corpus, nothing generated")
        }
        StopReason::UnsampleableFrame { window } => log::warn!(
            "stopped after {}/{} characters at window {window:?}",
            generation.produced,
            generation.requested
        ),
    }

    println!("{}", generation.text);
    Ok(())
}
