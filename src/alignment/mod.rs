//! Ground truth alignment of simulated reads
//!
//! The encoder walks transcript exons from a fragment offset and produces the cigar, the
//! annotations of variants applied on read and the read sequence. Tags (MD, XM, NM, Zs) are
//! rendered from annotations, and the verifier recomputes them from the reference sequence and
//! cigar string only.

/* module declaration */
pub mod builder;
pub mod encode;
pub mod locate;
pub mod tags;
pub mod verify;

/* reexport for easiest use */
pub use builder::Builder;
pub use encode::Encoder;
pub use locate::{locate, Locus};
pub use tags::{render, Tags};
pub use verify::{recompute, verify};

/// Kind of a cigar operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Match,
    Insertion,
    Deletion,
    SpliceSkip,
}

impl Kind {
    /// Sam cigar code
    pub fn code(&self) -> char {
        match self {
            Kind::Match => 'M',
            Kind::Insertion => 'I',
            Kind::Deletion => 'D',
            Kind::SpliceSkip => 'N',
        }
    }

    /// Kind associate to a sam cigar code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(Kind::Match),
            'I' => Some(Kind::Insertion),
            'D' => Some(Kind::Deletion),
            'N' => Some(Kind::SpliceSkip),
            _ => None,
        }
    }
}

/// Where and how a variant alter reference inside a cigar operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Run of read bases equal to reference
    Match(usize),
    /// One reference base replaced in read
    Substitution {
        reference: u8,
        base: u8,
        id: Option<String>,
    },
    /// Reference bases absent from read
    Deletion {
        reference: Vec<u8>,
        id: Option<String>,
    },
}

/// A cigar operation and annotations of its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub len: usize,
    pub kind: Kind,
    pub annotations: Vec<Annotation>,
}

impl Op {
    pub fn new(len: usize, kind: Kind, annotations: Vec<Annotation>) -> Self {
        Self {
            len,
            kind,
            annotations,
        }
    }
}

/// A sequence of cigar operations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cigar(pub Vec<Op>);

impl Cigar {
    pub fn ops(&self) -> &[Op] {
        &self.0
    }

    /// Number of reference bases covered, splice skip include
    pub fn reference_length(&self) -> usize {
        self.0
            .iter()
            .filter(|op| op.kind != Kind::Insertion)
            .map(|op| op.len)
            .sum()
    }
}

impl std::fmt::Display for Cigar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for op in &self.0 {
            write!(f, "{}{}", op.len, op.kind.code())?;
        }

        Ok(())
    }
}

/// Ground truth alignment of a read
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// 0-based genomic position of first aligned base
    pub pos: usize,
    pub cigar: Cigar,
    pub tags: Tags,
    pub read: Vec<u8>,
}
