//! Check input consistency and report statistics

/* crate use */
use anyhow::Result;

/* local use */
use crate::error::Input;
use crate::references::{revcomp, Genome};
use crate::transcripts::Transcripts;
use crate::variants::{Kind, Variants};

/// Count canonical GT/AG splice sites, return (canonical, total)
pub fn splice_sites(genome: &Genome, transcripts: &Transcripts) -> (usize, usize) {
    let mut canonical = 0;
    let mut total = 0;

    for transcript in &transcripts.transcripts {
        let chrom = match genome.get(&transcript.chrom) {
            Some(seq) => seq,
            None => continue,
        };

        for pair in transcript.exons.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);

            let donor = chrom.get(prev.right + 1..prev.right + 3).unwrap_or(b"");
            let acceptor = chrom
                .get(next.left.saturating_sub(2)..next.left)
                .unwrap_or(b"");

            let (donor, acceptor) = if transcript.strand == '-' {
                (revcomp(acceptor), revcomp(donor))
            } else {
                (donor.to_vec(), acceptor.to_vec())
            };

            if donor.eq_ignore_ascii_case(b"GT") && acceptor.eq_ignore_ascii_case(b"AG") {
                canonical += 1;
            }
            total += 1;
        }
    }

    (canonical, total)
}

/// Count substitution with a base different from reference, return (alternative, total).
///
/// A substitution outside of its chromosome is an error.
pub fn alternative_bases(genome: &Genome, variants: &Variants) -> Result<(usize, usize)> {
    let mut alternative = 0;
    let mut total = 0;

    for (chrom, chrom_variants) in variants.iter() {
        let seq = match genome.get(chrom) {
            Some(seq) => seq,
            None => continue,
        };

        for variant in chrom_variants {
            let base = match variant.kind {
                Kind::Substitution(base) => base,
                _ => continue,
            };

            match seq.get(variant.pos) {
                Some(reference) => {
                    if *reference != base {
                        alternative += 1;
                    }
                }
                None => anyhow::bail!(Input::VariantOutOfChromosome {
                    id: variant.id.clone().unwrap_or_default(),
                    chrom: chrom.clone(),
                    pos: variant.pos,
                    length: seq.len(),
                }),
            }
            total += 1;
        }
    }

    Ok((alternative, total))
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Log statistics of input
pub fn check_input(genome: &Genome, transcripts: &Transcripts, variants: &Variants) -> Result<()> {
    let (canonical, sites) = splice_sites(genome, transcripts);
    log::info!(
        "GT/AG splice sites: {}/{} ({:.2}%)",
        canonical,
        sites,
        ratio(canonical, sites)
    );

    let (alternative, substitutions) = alternative_bases(genome, variants)?;
    log::info!(
        "Alternative bases: {}/{} ({:.2}%)",
        alternative,
        substitutions,
        ratio(alternative, substitutions)
    );

    Ok(())
}

#[cfg(test)]
mod t {
    use super::*;
    use crate::transcripts::{Exon, Transcript};
    use crate::variants::Variant;

    fn genome() -> Genome {
        let mut genome = Genome::default();
        //                                   0         1         2         3
        //                                   0123456789012345678901234567890123456789
        genome.insert("chr1".to_string(), b"AAAAAGTAAAAAAAGAAAAACTAAAAAAACAAAAAAAAAA".to_vec().into_boxed_slice());
        genome
    }

    fn transcript(strand: char, exons: Vec<Exon>) -> Transcript {
        Transcript::new(
            "t".to_string(),
            "g".to_string(),
            "chr1".to_string(),
            strand,
            exons,
        )
    }

    #[test]
    fn splice_site() {
        let genome = genome();

        let transcripts = Transcripts {
            transcripts: vec![
                // GT at 5-6, AG at 13-14
                transcript('+', vec![Exon::new(0, 4), Exon::new(15, 19)]),
                // minus strand: CT at 20-21, AC at 28-29
                transcript('-', vec![Exon::new(10, 19), Exon::new(30, 35)]),
                transcript('+', vec![Exon::new(0, 9), Exon::new(30, 35)]),
                transcript('+', vec![Exon::new(0, 9)]),
            ],
        };

        assert_eq!(splice_sites(&genome, &transcripts), (2, 3));
    }

    #[test]
    fn alternative() {
        let genome = genome();

        let mut map = rustc_hash::FxHashMap::default();
        map.insert(
            "chr1".to_string(),
            vec![
                Variant::new(None, 0, Kind::Substitution(b'A')),
                Variant::new(None, 5, Kind::Substitution(b'T')),
                Variant::new(None, 8, Kind::Deletion(3)),
            ],
        );
        map.insert(
            "chr2".to_string(),
            vec![Variant::new(None, 5, Kind::Substitution(b'T'))],
        );
        let variants = Variants::from_map(map);
        assert_eq!(alternative_bases(&genome, &variants).unwrap(), (1, 2));

        let mut map = rustc_hash::FxHashMap::default();
        map.insert(
            "chr1".to_string(),
            vec![Variant::new(None, 40, Kind::Substitution(b'A'))],
        );
        let variants = Variants::from_map(map);
        assert!(alternative_bases(&genome, &variants).is_err());
        assert!(check_input(&genome, &Transcripts::default(), &variants).is_err());
    }
}
