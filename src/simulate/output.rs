//! Write simulated reads in SAM and FASTA

/* standard use */
use std::io::Write;

/* crate use */
use anyhow::Result;

/* local use */
use crate::alignment::Alignment;
use crate::references::revcomp;

/// Paired, proper pair, mate reverse, first in pair
pub const FLAG_FIRST_FORWARD: u16 = 99;
/// Paired, proper pair, read reverse, first in pair
pub const FLAG_FIRST_REVERSE: u16 = 83;
/// Paired, proper pair, mate reverse, second in pair
pub const FLAG_SECOND_FORWARD: u16 = 163;
/// Paired, proper pair, read reverse, second in pair
pub const FLAG_SECOND_REVERSE: u16 = 147;

/// Alignments of one fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    /// Mate at fragment start
    pub start: Alignment,
    /// Mate at fragment end, None in single-end mode
    pub end: Option<Alignment>,
    /// Mate at fragment end is read 1
    pub swapped: bool,
}

/// One SAM line
#[derive(Debug)]
pub struct Record<'a> {
    pub id: u64,
    pub flag: u16,
    pub chrom: &'a str,
    /// Genomic position of mate, None in single-end mode
    pub mate_pos: Option<usize>,
    pub transcript: &'a str,
    pub alignment: &'a Alignment,
}

impl<'a> std::fmt::Display for Record<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let aln = self.alignment;

        write!(
            f,
            "{}\t{}\t{}\t{}\t255\t{}\t",
            self.id,
            self.flag,
            self.chrom,
            aln.pos + 1,
            aln.cigar
        )?;

        match self.mate_pos {
            Some(pos) => write!(f, "{}\t{}\t", self.chrom, pos + 1)?,
            None => write!(f, "*\t0\t")?,
        }

        write!(
            f,
            "0\t{}\t*\tXM:i:{}\tNM:i:{}\tMD:Z:{}",
            String::from_utf8_lossy(&aln.read),
            aln.tags.mismatches,
            aln.tags.edits,
            aln.tags.md
        )?;

        if !aln.tags.variants.is_empty() {
            write!(f, "\tZs:Z:{}", aln.tags.variants)?;
        }

        write!(f, "\tTI:Z:{}", self.transcript)
    }
}

/// Write pairs in a SAM stream and one FASTA stream per mate, read id start at 1
pub struct Writer<W>
where
    W: Write,
{
    sam: W,
    read1: W,
    read2: Option<W>,
    next_id: u64,
}

impl<W> Writer<W>
where
    W: Write,
{
    /// `read2` is None in single-end mode
    pub fn new(sam: W, read1: W, read2: Option<W>) -> Self {
        Self {
            sam,
            read1,
            read2,
            next_id: 1,
        }
    }

    /// Number of pairs written
    pub fn written(&self) -> u64 {
        self.next_id - 1
    }

    pub fn write_pair(&mut self, chrom: &str, transcript: &str, pair: &Pair) -> Result<()> {
        let id = self.next_id;
        self.next_id += 1;

        match (&pair.end, self.read2.as_mut()) {
            (Some(end), Some(read2)) => {
                let (first, second, first_flag, second_flag) = if pair.swapped {
                    (end, &pair.start, FLAG_FIRST_REVERSE, FLAG_SECOND_FORWARD)
                } else {
                    (&pair.start, end, FLAG_FIRST_FORWARD, FLAG_SECOND_REVERSE)
                };

                // mate at fragment end is on reverse strand
                write_fasta(&mut self.read1, id, &first.read, pair.swapped)?;
                write_fasta(read2, id, &second.read, !pair.swapped)?;

                writeln!(
                    self.sam,
                    "{}",
                    Record {
                        id,
                        flag: first_flag,
                        chrom,
                        mate_pos: Some(second.pos),
                        transcript,
                        alignment: first,
                    }
                )?;
                writeln!(
                    self.sam,
                    "{}",
                    Record {
                        id,
                        flag: second_flag,
                        chrom,
                        mate_pos: Some(first.pos),
                        transcript,
                        alignment: second,
                    }
                )?;
            }
            _ => {
                write_fasta(&mut self.read1, id, &pair.start.read, false)?;

                writeln!(
                    self.sam,
                    "{}",
                    Record {
                        id,
                        flag: 0,
                        chrom,
                        mate_pos: None,
                        transcript,
                        alignment: &pair.start,
                    }
                )?;
            }
        }

        Ok(())
    }

    /// Flush all streams and return them
    pub fn finish(mut self) -> Result<(W, W, Option<W>)> {
        self.sam.flush()?;
        self.read1.flush()?;
        if let Some(read2) = self.read2.as_mut() {
            read2.flush()?;
        }

        Ok((self.sam, self.read1, self.read2))
    }
}

fn write_fasta<W>(output: &mut W, id: u64, seq: &[u8], reverse: bool) -> Result<()>
where
    W: Write,
{
    if reverse {
        writeln!(output, ">{}\n{}", id, String::from_utf8_lossy(&revcomp(seq)))?;
    } else {
        writeln!(output, ">{}\n{}", id, String::from_utf8_lossy(seq))?;
    }

    Ok(())
}
