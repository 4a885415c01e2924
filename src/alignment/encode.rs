//! Produce ground truth alignment of a read taken from a transcript

/* local use */
use crate::alignment::{locate, render, Alignment, Builder};
use crate::error;
use crate::transcripts::{intron_length, Exon};
use crate::variants::{self, Kind, Variant};

/// Encode reads of one transcript.
///
/// Walk exons from the read start, a splice skip is added between exons, variants located in
/// an exon are applied on read: substitution replace a base, deletion split match run. Insertion
/// aren't supported and ignored.
pub struct Encoder<'a> {
    exons: &'a [Exon],
    transcript: &'a [u8],
    variants: &'a [Variant],
    read_len: usize,
    /// Per base sequencing error rate, not applied on read bases
    pub error_rate: f64,
}

impl<'a> Encoder<'a> {
    /// `transcript` is the spliced sequence of `exons`, `variants` the sorted variants of the
    /// chromosome.
    pub fn new(
        exons: &'a [Exon],
        transcript: &'a [u8],
        variants: &'a [Variant],
        read_len: usize,
        error_rate: f64,
    ) -> Self {
        Self {
            exons,
            transcript,
            variants,
            read_len,
            error_rate,
        }
    }

    pub fn read_len(&self) -> usize {
        self.read_len
    }

    /// Build alignment of read starting at `offset` of spliced transcript
    pub fn encode(&self, offset: usize) -> Result<Alignment, error::Alignment> {
        let locus = locate(self.exons, offset)?;

        let mut builder = Builder::new(self.transcript, offset, self.read_len);
        let mut budget = self.read_len;
        let mut exon_offset = locus.offset;

        for (index, exon) in self.exons.iter().enumerate().skip(locus.exon) {
            if index != locus.exon {
                builder.push_splice(intron_length(&self.exons[index - 1], exon));
            }

            // genomic start of current match segment
            let mut left = exon.left + exon_offset;
            // next reference base not yet push in builder
            let mut cursor = left;
            exon_offset = 0;

            for variant in variants::overlapping(self.variants, left, exon.right) {
                if left + budget - 1 < variant.end() || exon.right < variant.end() {
                    break;
                }

                match &variant.kind {
                    Kind::Substitution(base) => {
                        builder.push_match(variant.pos - cursor)?;
                        builder.push_substitution(*base, variant.id.clone())?;
                        cursor = variant.pos + 1;
                    }
                    Kind::Deletion(len) => {
                        if builder.is_empty() && variant.pos == left {
                            log::trace!("Deletion {:?} at read start ignored", variant.id);
                            continue;
                        }

                        let remain = budget - (variant.pos - left);
                        if self.downstream(index, variant.end()) < remain {
                            log::trace!("Deletion {:?} near transcript end ignored", variant.id);
                            continue;
                        }

                        builder.push_match(variant.pos - cursor)?;
                        builder.push_deletion(*len, variant.id.clone())?;
                        budget = remain;
                        left = variant.end();
                        cursor = left;
                    }
                    Kind::Insertion(_) => continue,
                }
            }

            let right = exon.right.min(left + budget - 1);
            builder.push_match((right + 1).saturating_sub(cursor))?;

            let covered = right - left + 1;
            if covered < budget {
                budget -= covered;
            } else {
                budget = 0;
                break;
            }
        }

        if budget != 0 {
            return Err(error::Alignment::TranscriptExhausted { missing: budget });
        }

        let (cigar, read) = builder.finish();
        if read.len() != self.read_len {
            return Err(error::Alignment::ReadLength {
                expected: self.read_len,
                actual: read.len(),
            });
        }

        let tags = render(cigar.ops());

        Ok(Alignment {
            pos: locus.pos,
            cigar,
            tags,
            read,
        })
    }

    /// Number of transcript bases from genomic position `pos` of exon `index` to transcript end
    fn downstream(&self, index: usize, pos: usize) -> usize {
        let exon = &self.exons[index];

        (exon.right + 1).saturating_sub(pos)
            + self.exons[index + 1..]
                .iter()
                .map(Exon::length)
                .sum::<usize>()
    }
}

#[cfg(test)]
mod t {
    use super::*;

    fn init() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .try_init();
    }

    static CHROM: &[u8] = b"TCCTAACGTGGCACGATTACCCTATCCGATTGCAAGATCATAGCCGTGGTCGCTTTGTGACACATGGGCGATCTAATGCGCGGAACTCAGTCCCGCTGTCTCCTAACGTGTCACGATTAC";

    fn transcript(exons: &[Exon]) -> Vec<u8> {
        exons
            .iter()
            .flat_map(|e| CHROM[e.left..=e.right].iter().copied())
            .collect()
    }

    fn sub(id: &str, pos: usize, base: u8) -> Variant {
        Variant::new(Some(id.to_string()), pos, Kind::Substitution(base))
    }

    fn del(id: &str, pos: usize, len: usize) -> Variant {
        Variant::new(Some(id.to_string()), pos, Kind::Deletion(len))
    }

    #[test]
    fn no_variant() {
        init();

        let exons = [Exon::new(0, 99)];
        let seq = transcript(&exons);
        let encoder = Encoder::new(&exons, &seq, &[], 50, 0.0);

        let aln = encoder.encode(0).unwrap();
        assert_eq!(aln.pos, 0);
        assert_eq!(aln.cigar.to_string(), "50M");
        assert_eq!(aln.tags.md, "50");
        assert_eq!(aln.tags.mismatches, 0);
        assert_eq!(aln.tags.edits, 0);
        assert_eq!(aln.tags.variants, "");
        assert_eq!(aln.read, CHROM[0..50].to_vec());
    }

    #[test]
    fn splice() {
        init();

        let exons = [Exon::new(0, 49), Exon::new(60, 109)];
        let seq = transcript(&exons);
        let encoder = Encoder::new(&exons, &seq, &[], 20, 0.0);

        let aln = encoder.encode(40).unwrap();
        assert_eq!(aln.pos, 40);
        assert_eq!(aln.cigar.to_string(), "10M10N10M");
        assert_eq!(aln.tags.md, "20");

        let mut read = CHROM[40..50].to_vec();
        read.extend(&CHROM[60..70]);
        assert_eq!(aln.read, read);

        let aln = encoder.encode(50).unwrap();
        assert_eq!(aln.pos, 60);
        assert_eq!(aln.cigar.to_string(), "20M");

        assert!(encoder.encode(100).is_err());
    }

    #[test]
    fn named_substitution() {
        init();

        // reference base at 10 is a G
        let exons = [Exon::new(0, 99)];
        let seq = transcript(&exons);
        let variants = [sub("rs1", 10, b'A')];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        let aln = encoder.encode(0).unwrap();
        assert_eq!(aln.cigar.to_string(), "20M");
        assert_eq!(aln.tags.md, "10G9");
        assert_eq!(aln.tags.variants, "10|S|rs1");
        // named substitution count as edit but not as mismatch
        assert_eq!(aln.tags.edits, 1);
        assert_eq!(aln.tags.mismatches, 0);
        assert_eq!(aln.read[10], b'A');
        assert_eq!(aln.read.len(), 20);
    }

    #[test]
    fn unnamed_substitution() {
        init();

        let exons = [Exon::new(0, 99)];
        let seq = transcript(&exons);
        let variants = [Variant::new(None, 10, Kind::Substitution(b'A'))];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        let aln = encoder.encode(0).unwrap();
        assert_eq!(aln.tags.md, "10G9");
        assert_eq!(aln.tags.variants, "");
        assert_eq!(aln.tags.edits, 1);
        assert_eq!(aln.tags.mismatches, 1);
    }

    #[test]
    fn deletion() {
        init();

        let exons = [Exon::new(0, 99)];
        let seq = transcript(&exons);
        let variants = [del("rs2", 10, 3)];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        let aln = encoder.encode(0).unwrap();
        assert_eq!(aln.cigar.to_string(), "10M3D10M");
        assert_eq!(aln.tags.md, "10^GCA10");
        assert_eq!(aln.tags.variants, "10|D|rs2");
        assert_eq!(aln.tags.edits, 3);
        assert_eq!(aln.tags.mismatches, 0);

        let mut read = CHROM[0..10].to_vec();
        read.extend(&CHROM[13..23]);
        assert_eq!(aln.read, read);
    }

    #[test]
    fn deletion_at_read_start() {
        init();

        let exons = [Exon::new(0, 99)];
        let seq = transcript(&exons);
        let variants = [del("rs2", 10, 3)];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        let aln = encoder.encode(10).unwrap();
        assert_eq!(aln.cigar.to_string(), "20M");
        assert_eq!(aln.tags.variants, "");
    }

    #[test]
    fn deletion_at_exon_start() {
        init();

        let exons = [Exon::new(0, 49), Exon::new(60, 109)];
        let seq = transcript(&exons);
        let variants = [del("rs3", 60, 2)];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        let aln = encoder.encode(45).unwrap();
        assert_eq!(aln.cigar.to_string(), "5M10N2D15M");
        assert_eq!(aln.tags.md, "5^CA15");
        assert_eq!(aln.tags.variants, "5|D|rs3");
    }

    #[test]
    fn deletion_near_transcript_end() {
        init();

        let exons = [Exon::new(0, 29)];
        let seq = transcript(&exons);
        let variants = [del("rs2", 20, 3)];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        // read end at transcript end, deletion can't be applied
        let aln = encoder.encode(10).unwrap();
        assert_eq!(aln.cigar.to_string(), "20M");

        let aln = encoder.encode(5).unwrap();
        assert_eq!(aln.cigar.to_string(), "15M3D5M");
        assert_eq!(aln.tags.md, "15^CCT5");
    }

    #[test]
    fn variant_outside_read() {
        init();

        let exons = [Exon::new(0, 99)];
        let seq = transcript(&exons);
        let variants = [sub("rs1", 5, b'A'), del("rs2", 28, 3), sub("rs3", 40, b'A')];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        // deletion end after last read base, stop at deletion
        let aln = encoder.encode(10).unwrap();
        assert_eq!(aln.cigar.to_string(), "20M");
        assert_eq!(aln.tags.md, "20");
    }

    #[test]
    fn insertion_ignored() {
        init();

        let exons = [Exon::new(0, 99)];
        let seq = transcript(&exons);
        let variants = [Variant::new(
            Some("ins".to_string()),
            10,
            Kind::Insertion(b"AAA".to_vec()),
        )];
        let encoder = Encoder::new(&exons, &seq, &variants, 20, 0.0);

        let aln = encoder.encode(0).unwrap();
        assert_eq!(aln.cigar.to_string(), "20M");
        assert_eq!(aln.read, CHROM[0..20].to_vec());
    }

    #[test]
    fn variant_on_last_exon_base_ignored() {
        init();

        let exons = [Exon::new(0, 9), Exon::new(20, 39)];
        let seq = transcript(&exons);
        let variants = [sub("rs1", 9, b'A')];
        let encoder = Encoder::new(&exons, &seq, &variants, 15, 0.0);

        let aln = encoder.encode(0).unwrap();
        assert_eq!(aln.cigar.to_string(), "10M10N5M");
        assert_eq!(aln.tags.md, "15");
    }
}
