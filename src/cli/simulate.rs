//! All stuff relate to simulate subcommand

/* local use */
use crate::error;
use crate::model::Expression;

/// Struct use to parse simulate subcommand argument
#[derive(clap::Parser, Debug)]
#[clap(about = "Simulate spliced RNA-seq reads with their true alignment")]
pub struct Command {
    /// Reference genome in fasta format (can be gzipped, bzip2ped, xzped)
    #[clap(long = "genome")]
    pub genome_path: String,

    /// Gene annotation in gtf format
    #[clap(long = "annotation")]
    pub annotation_path: String,

    /// Variants table: id, kind (single, deletion, insertion), chromosome, position, payload
    #[clap(long = "variants")]
    pub variants_path: Option<String>,

    /// Output base name, write <base>.sam, <base>_1.fa and <base>_2.fa
    #[clap(long = "output")]
    pub output_base: String,

    /// Read length
    #[clap(short = 'r', long = "read-length", default_value = "100")]
    pub read_length: usize,

    /// Fragment length, raised to read length if lower
    #[clap(short = 'f', long = "fragment-length", default_value = "250")]
    pub fragment_length: usize,

    /// Number of fragments
    #[clap(short = 'n', long = "num-fragment", default_value = "1000000")]
    pub num_fragment: u64,

    /// Expression profile, flux or constant
    #[clap(short = 'e', long = "expr-profile", default_value = "flux")]
    pub expr_profile: Expression,

    /// Per base sequencing error rate, not applied
    #[clap(long = "error-rate", default_value = "0.0")]
    pub error_rate: f64,

    /// Seed use by random generator
    #[clap(long = "seed", default_value = "0")]
    pub seed: u64,

    /// Produce single-end reads
    #[clap(long = "single-end")]
    pub single_end: bool,

    /// Report input statistics and verify each alignment
    #[clap(long = "sanity-check")]
    pub sanity_check: bool,
}

impl Command {
    /// Check value of parameter clap can't check
    pub fn validate(&self) -> Result<(), error::Cli> {
        if self.read_length == 0 {
            return Err(error::Cli::ReadLengthMustBeUpperThan0);
        }

        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(error::Cli::ErrorRateOutOfRange);
        }

        Ok(())
    }
}

#[cfg(test)]
mod t {
    use super::*;

    use clap::Parser as _;

    const REQUIRED: [&str; 7] = [
        "simulate",
        "--genome",
        "genome.fa",
        "--annotation",
        "annotation.gtf",
        "--output",
        "out",
    ];

    #[test]
    fn default() {
        let cmd = Command::try_parse_from(REQUIRED).unwrap();

        assert_eq!(cmd.genome_path, "genome.fa");
        assert_eq!(cmd.annotation_path, "annotation.gtf");
        assert_eq!(cmd.variants_path, None);
        assert_eq!(cmd.output_base, "out");
        assert_eq!(cmd.read_length, 100);
        assert_eq!(cmd.fragment_length, 250);
        assert_eq!(cmd.num_fragment, 1_000_000);
        assert_eq!(cmd.expr_profile, Expression::Flux);
        assert_eq!(cmd.error_rate, 0.0);
        assert_eq!(cmd.seed, 0);
        assert!(!cmd.single_end);
        assert!(!cmd.sanity_check);
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn options() {
        let mut args = REQUIRED.to_vec();
        args.extend([
            "--variants",
            "snp.tsv",
            "-r",
            "75",
            "-f",
            "300",
            "-n",
            "1000",
            "-e",
            "constant",
            "--seed",
            "42",
            "--single-end",
            "--sanity-check",
        ]);

        let cmd = Command::try_parse_from(args).unwrap();

        assert_eq!(cmd.variants_path, Some("snp.tsv".to_string()));
        assert_eq!(cmd.read_length, 75);
        assert_eq!(cmd.fragment_length, 300);
        assert_eq!(cmd.num_fragment, 1000);
        assert_eq!(cmd.expr_profile, Expression::Constant);
        assert_eq!(cmd.seed, 42);
        assert!(cmd.single_end);
        assert!(cmd.sanity_check);
    }

    #[test]
    fn invalid() {
        let mut args = REQUIRED.to_vec();
        args.extend(["-e", "zipf"]);
        assert!(Command::try_parse_from(args).is_err());

        assert!(Command::try_parse_from(&REQUIRED[..5]).is_err());

        let mut args = REQUIRED.to_vec();
        args.extend(["-r", "0"]);
        assert!(matches!(
            Command::try_parse_from(args).unwrap().validate(),
            Err(error::Cli::ReadLengthMustBeUpperThan0)
        ));

        let mut args = REQUIRED.to_vec();
        args.extend(["--error-rate", "1.5"]);
        assert!(matches!(
            Command::try_parse_from(args).unwrap().validate(),
            Err(error::Cli::ErrorRateOutOfRange)
        ));
    }
}
