use anyhow::Result;
use clap::Parser;

use alfie::logging::init_logger;

mod commands;

use commands::{run_classify, run_features, ClassifyArgs, Cli, Commands, FeaturesArgs};

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose);

    match args.command {
        Commands::Classify {
            file,
            model,
            kmers,
            batch_size,
            classes,
            output_dir,
            config,
        } => run_classify(ClassifyArgs {
            file,
            model,
            kmers,
            batch_size,
            classes,
            output_dir,
            config,
        }),

        Commands::Features {
            file,
            kmers,
            batch_size,
            output,
        } => run_features(FeaturesArgs {
            file,
            kmers,
            batch_size,
            output,
        }),
    }
}
