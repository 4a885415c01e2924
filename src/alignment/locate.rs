//! Convert transcript offset in genomic coordinate

/* local use */
use crate::error::Alignment;
use crate::transcripts::Exon;

/// Genomic location of a transcript offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locus {
    /// 0-based genomic position
    pub pos: usize,
    /// Index of exon containing position
    pub exon: usize,
    /// Offset of position inside exon
    pub offset: usize,
}

/// Find exon containing the 0-based `offset` of spliced transcript and the genomic position of
/// this offset.
pub fn locate(exons: &[Exon], offset: usize) -> Result<Locus, Alignment> {
    let mut remain = offset;

    for (index, exon) in exons.iter().enumerate() {
        if remain < exon.length() {
            return Ok(Locus {
                pos: exon.left + remain,
                exon: index,
                offset: remain,
            });
        }

        remain -= exon.length();
    }

    Err(Alignment::OffsetOutOfTranscript {
        offset,
        length: exons.iter().map(Exon::length).sum(),
    })
}
