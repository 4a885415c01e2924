//! All stuff relate to command line

/* crate use */
use anyhow::Result;

/* module declaration */
pub mod simulate;

/// A spliced RNA-seq read simulator with ground truth alignment
#[derive(clap::Parser, std::fmt::Debug)]
#[clap(name = "spliceread", version = "0.1")]
pub struct Command {
    /// Subcommand call
    #[clap(subcommand)]
    pub subcmd: SubCommand,

    /// Number of thread use by spliceread, 0 use all avaible core, default value 0
    #[clap(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Verbosity level also control by environment variable SPLICEREAD_LOG if flag is set SPLICEREAD_LOG value is ignored
    #[clap(short = 'v', long = "verbosity", parse(from_occurrences))]
    pub verbosity: i8,
}

#[derive(clap::Parser, Debug)]
pub enum SubCommand {
    Simulate(simulate::Command),
}

/// Convert verbosity level (number of v) is log::Level
pub fn i82level(level: i8) -> Option<log::Level> {
    match level {
        std::i8::MIN..=0 => None,
        1 => Some(log::Level::Error),
        2 => Some(log::Level::Warn),
        3 => Some(log::Level::Info),
        4 => Some(log::Level::Debug),
        5..=std::i8::MAX => Some(log::Level::Trace),
    }
}

/// set number of global rayon thread pool
pub fn set_nb_threads(nb_threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(nb_threads)
        .build_global()?;

    Ok(())
}
