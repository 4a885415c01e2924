//! Input data error

/* crate use */
use thiserror::Error;

/// Enum to manage error polymorphism
#[derive(Debug, Error)]
pub enum Input {
    /// Variant kind isn't single, deletion or insertion
    #[error("Variant {id} has an unknown kind '{kind}'")]
    UnknownVariantKind { id: String, kind: String },

    /// Variant payload doesn't match variant kind
    #[error("Variant {id} has an invalid payload '{payload}'")]
    InvalidVariantPayload { id: String, payload: String },

    /// Variant position isn't an integer
    #[error("Variant {id} has an invalid position '{pos}'")]
    InvalidVariantPosition { id: String, pos: String },

    /// Substitution outside of chromosome
    #[error("Variant {id} at position {pos} is outside of {chrom} (length {length})")]
    VariantOutOfChromosome {
        id: String,
        chrom: String,
        pos: usize,
        length: usize,
    },

    /// Exon coordinate isn't an integer
    #[error("We aren't able to parse exon coordinate '{0}'")]
    InvalidExonCoordinate(String),

    /// Exon outside of chromosome
    #[error("Transcript {transcript} has an exon ending at {right} outside of {chrom} (length {length})")]
    ExonOutOfChromosome {
        transcript: String,
        chrom: String,
        right: usize,
        length: usize,
    },

    /// Chromosome absent from genome
    #[error("Chromosome {0} isn't present in genome")]
    MissingChromosome(String),

    /// No transcript can support requested fragment length
    #[error("No transcript is long enough to produce fragment")]
    NoTranscript,
}
