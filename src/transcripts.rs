//! Transcript annotation, exon structure read from GTF

/* standard use */
use std::str::FromStr;

/* crate use */
use anyhow::Result;

/* local use */
use crate::error::Input;

/// Exons separated by an intron of this length or less are merged
const MAX_MERGE_GAP: usize = 5;

/// An exon, 0-based genomic interval with both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Exon {
    pub left: usize,
    pub right: usize,
}

impl Exon {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Number of base in exon
    pub fn length(&self) -> usize {
        self.right - self.left + 1
    }
}

/// Length of intron between two consecutive exons
pub fn intron_length(prev: &Exon, next: &Exon) -> usize {
    next.left - prev.right - 1
}

/// A transcript and its exons sorted by position
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub id: String,
    pub gene_id: String,
    pub chrom: String,
    pub strand: char,
    pub length: usize,
    pub exons: Vec<Exon>,
}

impl Transcript {
    /// Build a transcript, exons are sorted and merged if intron is too small
    pub fn new(id: String, gene_id: String, chrom: String, strand: char, exons: Vec<Exon>) -> Self {
        let exons = merge_exons(exons);
        let length = exons.iter().map(Exon::length).sum();

        Self {
            id,
            gene_id,
            chrom,
            strand,
            length,
            exons,
        }
    }

    /// Build spliced sequence of transcript from chromosome sequence
    pub fn sequence(&self, chrom_seq: &[u8]) -> Result<Vec<u8>> {
        let mut seq = Vec::with_capacity(self.length);

        for exon in &self.exons {
            match chrom_seq.get(exon.left..=exon.right) {
                Some(s) => seq.extend_from_slice(s),
                None => anyhow::bail!(Input::ExonOutOfChromosome {
                    transcript: self.id.clone(),
                    chrom: self.chrom.clone(),
                    right: exon.right,
                    length: chrom_seq.len(),
                }),
            }
        }

        Ok(seq)
    }
}

/// Sort exons and merge those separated by a small intron
fn merge_exons(mut exons: Vec<Exon>) -> Vec<Exon> {
    exons.sort();

    let mut merged: Vec<Exon> = Vec::with_capacity(exons.len());
    for exon in exons {
        match merged.last_mut() {
            Some(last) if exon.left <= last.right + MAX_MERGE_GAP => {
                last.right = last.right.max(exon.right);
            }
            _ => merged.push(exon),
        }
    }

    merged
}

/// A collection of transcript
#[derive(Debug, Default)]
pub struct Transcripts {
    pub transcripts: Vec<Transcript>,
}

impl Transcripts {
    /// Read exon record of a GTF input stream.
    ///
    /// Transcript with a spliced length lower than `min_length` are discarded. Transcripts are
    /// sorted by id.
    pub fn from_stream<R>(input: R, min_length: usize) -> Result<Self>
    where
        R: std::io::Read,
    {
        // transcript id -> (gene id, chrom, strand, exons)
        let mut raw: rustc_hash::FxHashMap<String, (String, String, char, Vec<Exon>)> =
            rustc_hash::FxHashMap::default();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .from_reader(input);

        for result in reader.records() {
            let record = result?;

            if record.len() != 9 || &record[2] != "exon" {
                continue;
            }

            // zero based offset
            let left = parse_coordinate(&record[3])? - 1;
            let right = parse_coordinate(&record[4])? - 1;
            if left >= right {
                continue;
            }

            let attributes = parse_attributes(&record[8]);
            let (gene_id, transcript_id) =
                match (attributes.get("gene_id"), attributes.get("transcript_id")) {
                    (Some(g), Some(t)) => (g.to_string(), t.to_string()),
                    _ => continue,
                };

            let strand = record[6].chars().next().unwrap_or('.');

            raw.entry(transcript_id)
                .or_insert_with(|| (gene_id, record[0].to_string(), strand, Vec::new()))
                .3
                .push(Exon::new(left, right));
        }

        let total = raw.len();
        let mut transcripts: Vec<Transcript> = raw
            .into_iter()
            .map(|(id, (gene_id, chrom, strand, exons))| {
                Transcript::new(id, gene_id, chrom, strand, exons)
            })
            .filter(|t| t.length >= min_length)
            .collect();
        transcripts.sort_by(|a, b| a.id.cmp(&b.id));

        log::debug!(
            "Keep {} transcripts on {} with length upper than {}",
            transcripts.len(),
            total,
            min_length
        );

        Ok(Self { transcripts })
    }

    /// Drop transcripts located on a chromosome absent from genome
    pub fn retain_in(&mut self, genome: &crate::references::Genome) {
        self.transcripts.retain(|t| {
            if genome.contains(&t.chrom) {
                true
            } else {
                log::warn!(
                    "Transcript {} is on {} which isn't present in genome",
                    t.id,
                    t.chrom
                );
                false
            }
        });
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }
}

fn parse_coordinate(field: &str) -> Result<usize> {
    match usize::from_str(field.trim()) {
        Ok(n) if n > 0 => Ok(n),
        _ => anyhow::bail!(Input::InvalidExonCoordinate(field.to_string())),
    }
}

/// Parse `key "value";` attributes, text after a '#' is ignored
fn parse_attributes(field: &str) -> rustc_hash::FxHashMap<&str, &str> {
    let field = field.split('#').next().unwrap_or("");

    field
        .split(';')
        .map(str::trim)
        .filter(|attr| !attr.is_empty())
        .filter_map(|attr| {
            attr.split_once(' ')
                .map(|(key, value)| (key, value.trim().trim_matches('"')))
        })
        .collect()
}

#[cfg(test)]
mod t {
    use super::*;

    static GTF: &[u8] = b"#!genome-build test
chr1\ttest\tgene\t1\t400\t.\t+\t.\tgene_id \"g1\";
chr1\ttest\texon\t11\t60\t.\t+\t.\tgene_id \"g1\"; transcript_id \"t1\";
chr1\ttest\texon\t101\t150\t.\t+\t.\tgene_id \"g1\"; transcript_id \"t1\";
chr1\ttest\texon\t201\t250\t.\t+\t.\tgene_id \"g1\"; transcript_id \"t1\"; # comment
chr1\ttest\texon\t301\t320\t.\t-\t.\tgene_id \"g2\"; transcript_id \"t0\";
chr1\ttest\texon\t324\t340\t.\t-\t.\tgene_id \"g2\"; transcript_id \"t0\";
chr1\ttest\texon\t360\t360\t.\t-\t.\tgene_id \"g2\"; transcript_id \"t0\";
chr1\ttest\texon\t361\t380\t.\t-\t.\tgene_id \"g2\";
chr2\ttest\texon\t1\t10\t.\t+\t.\tgene_id \"g3\"; transcript_id \"t2\";
chr2\ttest\texon
";

    #[test]
    fn exon() {
        let exon = Exon::new(10, 59);
        assert_eq!(exon.length(), 50);
        assert_eq!(intron_length(&exon, &Exon::new(100, 149)), 40);
    }

    #[test]
    fn merge() {
        assert_eq!(
            merge_exons(vec![
                Exon::new(100, 150),
                Exon::new(0, 50),
                Exon::new(55, 80),
                Exon::new(87, 90)
            ]),
            vec![Exon::new(0, 80), Exon::new(87, 90), Exon::new(100, 150)]
        );
    }

    #[test]
    fn read_gtf() {
        let transcripts = Transcripts::from_stream(GTF, 20).unwrap();

        assert_eq!(
            transcripts.transcripts,
            vec![
                Transcript {
                    id: "t0".to_string(),
                    gene_id: "g2".to_string(),
                    chrom: "chr1".to_string(),
                    strand: '-',
                    length: 40,
                    exons: vec![Exon::new(300, 339)],
                },
                Transcript {
                    id: "t1".to_string(),
                    gene_id: "g1".to_string(),
                    chrom: "chr1".to_string(),
                    strand: '+',
                    length: 150,
                    exons: vec![Exon::new(10, 59), Exon::new(100, 149), Exon::new(200, 249)],
                },
            ]
        );

        assert_eq!(Transcripts::from_stream(GTF, 100).unwrap().len(), 1);
        assert_eq!(Transcripts::from_stream(GTF, 5).unwrap().len(), 3);
    }

    #[test]
    fn read_gtf_error() {
        assert!(Transcripts::from_stream(
            &b"chr1\tt\texon\tten\t20\t.\t+\t.\tgene_id \"g\"; transcript_id \"t\";\n"[..],
            1
        )
        .is_err());
    }

    #[test]
    fn sequence() {
        let chrom = b"AAAAACCCCCGGGGGTTTTT";
        let transcript = Transcript::new(
            "t".to_string(),
            "g".to_string(),
            "chr".to_string(),
            '+',
            vec![Exon::new(12, 16), Exon::new(2, 6)],
        );

        assert_eq!(transcript.length, 10);
        assert_eq!(transcript.sequence(chrom).unwrap(), b"AAACCGGGTT".to_vec());

        let outside = Transcript::new(
            "t".to_string(),
            "g".to_string(),
            "chr".to_string(),
            '+',
            vec![Exon::new(12, 25)],
        );
        assert!(outside.sequence(chrom).is_err());
    }

    #[test]
    fn missing_chromosome() {
        let mut genome = crate::references::Genome::default();
        genome.insert("chr1".to_string(), b"ACGT".to_vec().into_boxed_slice());

        let mut transcripts = Transcripts::from_stream(GTF, 5).unwrap();
        transcripts.retain_in(&genome);

        assert_eq!(transcripts.len(), 2);
        assert!(transcripts.transcripts.iter().all(|t| t.chrom == "chr1"));
    }
}
