//! Model to distribute fragments over transcripts

/* standard use */

/* crate use */
use anyhow::Result;

/* local use */
use crate::error;

/// At most this number of transcripts are expressed
pub const MAX_TRANSCRIPTS: usize = 10_000;

/// Shape of expression level over transcript rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression {
    /// Power law with exponential tail of the Flux Simulator
    Flux,
    /// Same level for all transcript
    Constant,
}

impl std::str::FromStr for Expression {
    type Err = error::Cli;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flux" => Ok(Expression::Flux),
            "constant" => Ok(Expression::Constant),
            _ => Err(error::Cli::CantParseExprProfile),
        }
    }
}

impl Expression {
    /// Relative expression of transcript at 1-based `rank`
    fn level(&self, rank: usize) -> f64 {
        match self {
            Expression::Flux => {
                let x = rank as f64;
                let (a, b) = (9500.0, 9500.0);

                x.powf(-0.6) * (x / a * (x / b).powi(2)).exp()
            }
            Expression::Constant => 1.0,
        }
    }

    /// Expression of `nb_transcripts` normalized to a sum of 1
    pub fn profile(&self, nb_transcripts: usize) -> Vec<f64> {
        let levels: Vec<f64> = (1..=nb_transcripts).map(|x| self.level(x)).collect();
        let total: f64 = levels.iter().sum();

        levels.into_iter().map(|x| x / total).collect()
    }

    /// Number of fragments of each transcript, first transcript get the rounding remainder
    pub fn counts(&self, nb_transcripts: usize, nb_fragments: u64) -> Result<Vec<u64>> {
        if nb_transcripts == 0 {
            anyhow::bail!(error::Input::NoTranscript);
        }

        let mut counts: Vec<u64> = self
            .profile(nb_transcripts)
            .iter()
            .map(|p| (p * nb_fragments as f64) as u64)
            .collect();

        let assigned: u64 = counts.iter().sum();
        counts[0] += nb_fragments.saturating_sub(assigned);

        Ok(counts)
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse() {
        assert_eq!(Expression::from_str("flux").unwrap(), Expression::Flux);
        assert_eq!(
            Expression::from_str("constant").unwrap(),
            Expression::Constant
        );
        assert!(Expression::from_str("Flux").is_err());
        assert!(Expression::from_str("").is_err());
    }

    #[test]
    fn profile() {
        let constant = Expression::Constant.profile(4);
        assert_eq!(constant, vec![0.25; 4]);

        let flux = Expression::Flux.profile(1000);
        assert!((flux.iter().sum::<f64>() - 1.0).abs() < 0.001);
        assert!(flux.windows(2).all(|w| w[0] > w[1]));
        assert!(Expression::Flux.profile(0).is_empty());
    }

    #[test]
    fn counts() {
        assert_eq!(
            Expression::Constant.counts(3, 10).unwrap(),
            vec![4, 3, 3]
        );
        assert_eq!(Expression::Constant.counts(4, 2).unwrap(), vec![2, 0, 0, 0]);

        let flux = Expression::Flux.counts(100, 1_000_000).unwrap();
        assert_eq!(flux.iter().sum::<u64>(), 1_000_000);
        assert!(flux[0] > flux[99]);

        assert!(Expression::Flux.counts(0, 10).is_err());
    }
}
