//! A collections of sequence to store reference genome

/* crate use */
use anyhow::Result;

type Text = Box<[u8]>;

/// Reference genome, chromosome name to sequence
#[derive(Debug, Default)]
pub struct Genome {
    sequences: rustc_hash::FxHashMap<String, Text>,
}

impl Genome {
    /// Read a collection of sequence in fasta format from an input stream.
    ///
    /// Chromosome name is the record id, first word of the header.
    pub fn from_stream<R>(input: R) -> Result<Self>
    where
        R: std::io::Read,
    {
        let mut sequences: rustc_hash::FxHashMap<String, Text> = rustc_hash::FxHashMap::default();

        for record in bio::io::fasta::Reader::new(input).records() {
            let record = record?;

            if record.seq().is_empty() {
                log::warn!("Skip empty sequence {}", record.id());
                continue;
            }

            sequences.insert(record.id().to_string(), record.seq().into());
        }

        Ok(Self { sequences })
    }

    /// Insert a sequence
    pub fn insert(&mut self, name: String, seq: Text) {
        self.sequences.insert(name, seq);
    }

    /// Get sequence of a chromosome
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.sequences.get(name).map(|x| &x[..])
    }

    /// Return true if chromosome is present
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Number of chromosome
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

/// Reverse complement of a sequence
pub fn revcomp(seq: &[u8]) -> Vec<u8> {
    bio::alphabets::dna::revcomp(seq)
}
