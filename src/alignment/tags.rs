//! Render MD, XM, NM and Zs tags from annotated cigar

/* local use */
use crate::alignment::{Annotation, Kind, Op};

/// Edit summary of an alignment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tags {
    /// Mismatch position string (MD)
    pub md: String,
    /// Mismatch count (XM), unnamed substitutions only
    pub mismatches: usize,
    /// Edit count (NM), substituted, deleted and inserted bases
    pub edits: usize,
    /// Variant tag string (Zs), empty if no named variant
    pub variants: String,
}

/// Write match run, mismatch base and deleted bases in MD format
#[derive(Debug, Default)]
pub(crate) struct Md {
    run: usize,
    value: String,
}

impl Md {
    pub(crate) fn matches(&mut self, len: usize) {
        self.run += len;
    }

    pub(crate) fn mismatch(&mut self, reference: u8) {
        self.flush();
        self.value.push(reference as char);
    }

    pub(crate) fn deletion(&mut self, reference: &[u8]) {
        self.flush();
        self.value.push('^');
        self.value.extend(reference.iter().map(|b| *b as char));
    }

    pub(crate) fn finish(mut self) -> String {
        self.flush();
        self.value
    }

    fn flush(&mut self) {
        if self.run > 0 {
            self.value.push_str(&self.run.to_string());
            self.run = 0;
        }
    }
}

/// Compute tags of an annotated cigar.
///
/// Offset of a Zs entry is the number of read bases aligned since the previous entry.
pub fn render(ops: &[Op]) -> Tags {
    let mut md = Md::default();
    let mut mismatches = 0;
    let mut edits = 0;
    let mut entries: Vec<String> = Vec::new();
    let mut since_entry = 0;

    for op in ops {
        if op.kind == Kind::Insertion {
            edits += op.len;
        }

        for annotation in &op.annotations {
            match annotation {
                Annotation::Match(len) => {
                    md.matches(*len);
                    since_entry += len;
                }
                Annotation::Substitution { reference, id, .. } => {
                    md.mismatch(*reference);
                    edits += 1;

                    if let Some(id) = id {
                        entries.push(format!("{}|S|{}", since_entry, id));
                        since_entry = 0;
                    } else {
                        mismatches += 1;
                        since_entry += 1;
                    }
                }
                Annotation::Deletion { reference, id } => {
                    md.deletion(reference);
                    edits += reference.len();

                    if let Some(id) = id {
                        entries.push(format!("{}|D|{}", since_entry, id));
                        since_entry = 0;
                    }
                }
            }
        }
    }

    Tags {
        md: md.finish(),
        mismatches,
        edits,
        variants: entries.join(","),
    }
}
