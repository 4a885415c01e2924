//! Genomic variants catalog and range query

/* standard use */
use std::str::FromStr;

/* crate use */
use anyhow::Result;

/* local use */
use crate::error::Input;

/// Alteration a variant apply on reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Replace one reference base
    Substitution(u8),
    /// Remove this number of reference bases
    Deletion(usize),
    /// Add bases before position, not supported by encoder
    Insertion(Vec<u8>),
}

impl Kind {
    /// Single letter code use in variant tag
    pub fn code(&self) -> char {
        match self {
            Kind::Substitution(_) => 'S',
            Kind::Deletion(_) => 'D',
            Kind::Insertion(_) => 'I',
        }
    }
}

/// A variant on a chromosome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: Option<String>,
    pub pos: usize,
    pub kind: Kind,
}

impl Variant {
    pub fn new(id: Option<String>, pos: usize, kind: Kind) -> Self {
        Self { id, pos, kind }
    }

    /// Last reference position touched by variant, start plus length for deletion
    pub fn end(&self) -> usize {
        match self.kind {
            Kind::Deletion(len) => self.pos + len,
            _ => self.pos,
        }
    }

    /// Parse a variant from the five fields of a variant table line
    fn from_fields(id: &str, kind: &str, pos: &str, payload: &str) -> Result<Self> {
        let pos = usize::from_str(pos).map_err(|_| Input::InvalidVariantPosition {
            id: id.to_string(),
            pos: pos.to_string(),
        })?;

        let invalid_payload = || Input::InvalidVariantPayload {
            id: id.to_string(),
            payload: payload.to_string(),
        };

        let kind = match kind {
            "single" => match payload.as_bytes() {
                [base] => Kind::Substitution(*base),
                _ => anyhow::bail!(invalid_payload()),
            },
            "deletion" => match usize::from_str(payload) {
                Ok(len) if len > 0 => Kind::Deletion(len),
                _ => anyhow::bail!(invalid_payload()),
            },
            "insertion" => {
                if payload.is_empty() {
                    anyhow::bail!(invalid_payload());
                }
                Kind::Insertion(payload.as_bytes().to_vec())
            }
            _ => anyhow::bail!(Input::UnknownVariantKind {
                id: id.to_string(),
                kind: kind.to_string(),
            }),
        };

        let id = if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        };

        Ok(Self::new(id, pos, kind))
    }
}

/// Variants of all chromosomes, each list sorted by position
#[derive(Debug, Default)]
pub struct Variants {
    by_chrom: rustc_hash::FxHashMap<String, Vec<Variant>>,
}

impl Variants {
    /// Read variant table from an input stream.
    ///
    /// Each line is `id<TAB>kind<TAB>chromosome<TAB>position<TAB>payload` with kind one of
    /// `single`, `deletion` or `insertion`. Line with another number of field are ignored.
    pub fn from_stream<R>(input: R) -> Result<Self>
    where
        R: std::io::Read,
    {
        let mut by_chrom: rustc_hash::FxHashMap<String, Vec<Variant>> =
            rustc_hash::FxHashMap::default();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(input);

        for result in reader.records() {
            let record = result?;

            if record.len() != 5 {
                log::debug!("Skip variant line {:?}", record.position());
                continue;
            }

            let variant = Variant::from_fields(&record[0], &record[1], &record[3], &record[4])?;
            by_chrom
                .entry(record[2].to_string())
                .or_default()
                .push(variant);
        }

        for variants in by_chrom.values_mut() {
            variants.sort_by_key(|v| v.pos);
        }

        Ok(Self { by_chrom })
    }

    /// Build from already sorted per chromosome lists
    pub fn from_map(by_chrom: rustc_hash::FxHashMap<String, Vec<Variant>>) -> Self {
        Self { by_chrom }
    }

    /// Variants of a chromosome, empty if chromosome have no variant
    pub fn get(&self, chrom: &str) -> &[Variant] {
        self.by_chrom.get(chrom).map(|x| &x[..]).unwrap_or(&[])
    }

    /// Iterate over chromosome and its variants
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Variant>)> {
        self.by_chrom.iter()
    }

    /// Total number of variants
    pub fn len(&self) -> usize {
        self.by_chrom.values().map(|x| x.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index range of variants with position in `[left, ..)` whose end is lower than `right`.
///
/// Variants must be sorted by position.
pub fn candidates(variants: &[Variant], left: usize, right: usize) -> std::ops::Range<usize> {
    let begin = variants.partition_point(|v| v.pos < left);
    let len = variants[begin..]
        .iter()
        .take_while(|v| v.end() < right)
        .count();

    begin..begin + len
}

/// Variants starting in `[left, right)` and ending before `right`.
///
/// A variant starting inside the span of the previous kept variant is dropped.
pub fn overlapping(variants: &[Variant], left: usize, right: usize) -> Vec<&Variant> {
    let mut kept: Vec<&Variant> = Vec::new();

    for variant in &variants[candidates(variants, left, right)] {
        if let Some(prev) = kept.last() {
            if variant.pos <= prev.end() {
                continue;
            }
        }

        kept.push(variant);
    }

    kept
}
