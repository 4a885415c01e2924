//! Recompute alignment tags from reference sequence and cigar string

/* standard use */
use std::str::FromStr;

/* local use */
use crate::alignment::tags::Md;
use crate::alignment::{Alignment, Kind, Tags};
use crate::error;

/// Relation between reference and read in an alignment column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Match,
    Mismatch,
    /// Reference base absent from read
    Deletion,
    /// Read base absent from reference
    Insertion,
}

impl Column {
    fn in_read(&self) -> bool {
        matches!(self, Column::Match | Column::Mismatch | Column::Insertion)
    }
}

const GAP: u8 = b'-';

/// Reference and read aligned column by column
#[derive(Debug, Default)]
struct Columns {
    reference: Vec<u8>,
    read: Vec<u8>,
    relation: Vec<Column>,
    annotated: Vec<bool>,
}

impl Columns {
    fn push(&mut self, reference: u8, read: u8, relation: Column) {
        self.reference.push(reference);
        self.read.push(read);
        self.relation.push(relation);
        self.annotated.push(false);
    }

    fn len(&self) -> usize {
        self.relation.len()
    }
}

fn cigar_re() -> &'static regex::Regex {
    static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    RE.get_or_init(|| regex::Regex::new(r"(\d+)(\D)").unwrap()) // we ignore result this regex is static
}

/// Parse a cigar string in (length, kind) pairs
fn parse_cigar(cigar: &str) -> Result<Vec<(usize, Kind)>, error::Alignment> {
    let mut ops = Vec::new();
    let mut parsed = 0;

    for cap in cigar_re().captures_iter(cigar) {
        let len = usize::from_str(&cap[1])
            .map_err(|_| error::Alignment::MalformedCigar(cigar.to_string()))?;
        let code = cap[2].chars().next().unwrap_or('?');
        let kind = Kind::from_code(code).ok_or(error::Alignment::UnsupportedCigarOp(code))?;

        parsed += cap[0].len();
        ops.push((len, kind));
    }

    if parsed != cigar.len() {
        return Err(error::Alignment::MalformedCigar(cigar.to_string()));
    }

    Ok(ops)
}

/// Build alignment columns by walking cigar on reference from `pos`
fn align_columns(
    reference: &[u8],
    read: &[u8],
    pos: usize,
    cigar: &str,
) -> Result<Columns, error::Alignment> {
    let out_of_bound = || error::Alignment::ReferenceOutOfBound {
        pos,
        cigar: cigar.to_string(),
    };

    let mut columns = Columns::default();
    let mut ref_pos = pos;
    let mut read_pos = 0;

    for (len, kind) in parse_cigar(cigar)? {
        match kind {
            Kind::Match => {
                let ref_part = reference
                    .get(ref_pos..ref_pos + len)
                    .ok_or_else(out_of_bound)?;
                let read_part = read.get(read_pos..read_pos + len).ok_or(
                    error::Alignment::ReadLength {
                        expected: read_pos + len,
                        actual: read.len(),
                    },
                )?;

                for (r, q) in ref_part.iter().zip(read_part) {
                    let relation = if r == q {
                        Column::Match
                    } else {
                        Column::Mismatch
                    };
                    columns.push(*r, *q, relation);
                }

                ref_pos += len;
                read_pos += len;
            }
            Kind::Deletion => {
                let ref_part = reference
                    .get(ref_pos..ref_pos + len)
                    .ok_or_else(out_of_bound)?;

                for r in ref_part {
                    columns.push(*r, GAP, Column::Deletion);
                }

                ref_pos += len;
            }
            Kind::Insertion => {
                let read_part = read.get(read_pos..read_pos + len).ok_or(
                    error::Alignment::ReadLength {
                        expected: read_pos + len,
                        actual: read.len(),
                    },
                )?;

                for q in read_part {
                    columns.push(GAP, *q, Column::Insertion);
                }

                read_pos += len;
            }
            Kind::SpliceSkip => ref_pos += len,
        }
    }

    if read_pos != read.len() {
        return Err(error::Alignment::ReadLength {
            expected: read_pos,
            actual: read.len(),
        });
    }

    Ok(columns)
}

/// Mark columns altered by a named variant according to variant tag string
fn annotate(columns: &mut Columns, variants: &str) -> Result<(), error::Alignment> {
    if variants.is_empty() {
        return Ok(());
    }

    let mut index = 0;
    for entry in variants.split(',') {
        let malformed = || error::Alignment::MalformedVariantTag(entry.to_string());
        let outside = || error::Alignment::VariantTagOutOfAlignment(entry.to_string());

        let mut fields = entry.split('|');
        let offset = fields
            .next()
            .and_then(|x| usize::from_str(x).ok())
            .ok_or_else(malformed)?;
        let kind = fields.next().ok_or_else(malformed)?;
        if fields.next().is_none() || fields.next().is_some() {
            return Err(malformed());
        }

        for _ in 0..offset {
            while index < columns.len() && !columns.relation[index].in_read() {
                index += 1;
            }
            if index >= columns.len() {
                return Err(outside());
            }
            index += 1;
        }

        let altered = match kind {
            "S" => Column::Mismatch,
            "D" => Column::Deletion,
            "I" => Column::Insertion,
            _ => return Err(malformed()),
        };

        if altered == Column::Mismatch {
            if index >= columns.len() {
                return Err(outside());
            }
            columns.annotated[index] = true;
            index += 1;
        } else {
            while index < columns.len() && columns.relation[index] == altered {
                columns.annotated[index] = true;
                index += 1;
            }
        }
    }

    Ok(())
}

/// Recompute tags from reference and read sequence, alignment position and cigar.
///
/// Variant tag string is only use to know which mismatch are due to a named variant.
pub fn recompute(
    reference: &[u8],
    read: &[u8],
    pos: usize,
    cigar: &str,
    variants: &str,
) -> Result<Tags, error::Alignment> {
    let mut columns = align_columns(reference, read, pos, cigar)?;
    annotate(&mut columns, variants)?;

    log::trace!(
        "{} {}\n{}\n{}",
        pos,
        cigar,
        String::from_utf8_lossy(&columns.reference),
        String::from_utf8_lossy(&columns.read)
    );

    let mut md = Md::default();
    let mut mismatches = 0;
    let mut edits = 0;

    let mut i = 0;
    while i < columns.len() {
        match columns.relation[i] {
            Column::Match => {
                md.matches(1);
                i += 1;
            }
            Column::Mismatch => {
                md.mismatch(columns.reference[i]);
                edits += 1;
                if !columns.annotated[i] {
                    mismatches += 1;
                }
                i += 1;
            }
            Column::Insertion => {
                while i < columns.len() && columns.relation[i] == Column::Insertion {
                    edits += 1;
                    i += 1;
                }
            }
            Column::Deletion => {
                let begin = i;
                while i < columns.len() && columns.relation[i] == Column::Deletion {
                    edits += 1;
                    i += 1;
                }
                md.deletion(&columns.reference[begin..i]);
            }
        }
    }

    Ok(Tags {
        md: md.finish(),
        mismatches,
        edits,
        variants: variants.to_string(),
    })
}

/// Check tags of an alignment match tags recompute from reference
pub fn verify(reference: &[u8], alignment: &Alignment) -> Result<(), error::Alignment> {
    let cigar = alignment.cigar.to_string();
    let expected = recompute(
        reference,
        &alignment.read,
        alignment.pos,
        &cigar,
        &alignment.tags.variants,
    )?;

    if expected != alignment.tags {
        return Err(error::Alignment::Disagreement {
            pos: alignment.pos,
            cigar,
            md: alignment.tags.md.clone(),
            mismatches: alignment.tags.mismatches,
            edits: alignment.tags.edits,
            expected_md: expected.md,
            expected_mismatches: expected.mismatches,
            expected_edits: expected.edits,
        });
    }

    Ok(())
}
