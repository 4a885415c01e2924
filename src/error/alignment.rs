//! Alignment encoding and verification error

/* crate use */
use thiserror::Error;

/// Enum to manage error polymorphism
#[derive(Debug, Error)]
pub enum Alignment {
    /// Fragment offset is outside of spliced transcript
    #[error("Offset {offset} is outside of transcript of length {length}")]
    OffsetOutOfTranscript { offset: usize, length: usize },

    /// Exon walk reach transcript end before read is complete
    #[error("Transcript end reached with {missing} read bases left to produce")]
    TranscriptExhausted { missing: usize },

    /// Synthesized read length differ from requested length
    #[error("Read length differs: {actual} vs. {expected}")]
    ReadLength { expected: usize, actual: usize },

    /// Cigar string can't be parsed
    #[error("We aren't able to parse cigar '{0}'")]
    MalformedCigar(String),

    /// Cigar operation not produce by encoder
    #[error("Cigar operation '{0}' isn't supported")]
    UnsupportedCigarOp(char),

    /// Cigar walk go outside of reference
    #[error("Cigar {cigar} at position {pos} go outside of reference")]
    ReferenceOutOfBound { pos: usize, cigar: String },

    /// Variant tag string can't be parsed
    #[error("We aren't able to parse variant tag '{0}'")]
    MalformedVariantTag(String),

    /// Variant tag point outside of aligned columns
    #[error("Variant tag '{0}' point outside of alignment")]
    VariantTagOutOfAlignment(String),

    /// Verifier and encoder disagree
    #[error("Alignment at {pos} with cigar {cigar} disagree: encoded MD:{md} XM:{mismatches} NM:{edits}, recomputed MD:{expected_md} XM:{expected_mismatches} NM:{expected_edits}")]
    Disagreement {
        pos: usize,
        cigar: String,
        md: String,
        mismatches: usize,
        edits: usize,
        expected_md: String,
        expected_mismatches: usize,
        expected_edits: usize,
    },
}
