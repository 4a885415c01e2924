//! Accumulate cigar operations, annotations and read sequence in lock-step

/* local use */
use crate::alignment::{Annotation, Cigar, Kind, Op};
use crate::error::Alignment;

/// Build cigar and read sequence while walking a transcript.
///
/// Reference bases are read from spliced transcript sequence, starting at the fragment offset.
/// Match bases and substitutions accumulate in a pending run flushed as a `M` operation when a
/// deletion or a splice skip is pushed, or at the end.
pub struct Builder<'a> {
    transcript: &'a [u8],
    cursor: usize,
    ops: Vec<Op>,
    run: Vec<Annotation>,
    run_len: usize,
    read: Vec<u8>,
}

impl<'a> Builder<'a> {
    pub fn new(transcript: &'a [u8], offset: usize, read_len: usize) -> Self {
        Self {
            transcript,
            cursor: offset,
            ops: Vec::new(),
            run: Vec::new(),
            run_len: 0,
            read: Vec::with_capacity(read_len),
        }
    }

    /// True if nothing was pushed
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.run_len == 0
    }

    /// Offset of next transcript base
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Copy `len` reference bases in read
    pub fn push_match(&mut self, len: usize) -> Result<(), Alignment> {
        if len == 0 {
            return Ok(());
        }

        let bases = self.take(len)?;
        self.read.extend_from_slice(bases);

        if let Some(Annotation::Match(prev)) = self.run.last_mut() {
            *prev += len;
        } else {
            self.run.push(Annotation::Match(len));
        }
        self.run_len += len;

        Ok(())
    }

    /// Replace next reference base by `base`, a base equal to reference is a match
    pub fn push_substitution(&mut self, base: u8, id: Option<String>) -> Result<(), Alignment> {
        let reference = self.take(1)?[0];
        if reference == base {
            self.cursor -= 1;
            return self.push_match(1);
        }

        self.read.push(base);
        self.run.push(Annotation::Substitution {
            reference,
            base,
            id,
        });
        self.run_len += 1;

        Ok(())
    }

    /// Skip `len` reference bases
    pub fn push_deletion(&mut self, len: usize, id: Option<String>) -> Result<(), Alignment> {
        self.flush();

        let reference = self.take(len)?.to_vec();
        self.ops.push(Op::new(
            len,
            Kind::Deletion,
            vec![Annotation::Deletion { reference, id }],
        ));

        Ok(())
    }

    /// Add an intron, transcript cursor doesn't move
    pub fn push_splice(&mut self, len: usize) {
        self.flush();

        self.ops.push(Op::new(len, Kind::SpliceSkip, Vec::new()));
    }

    /// Get cigar and read sequence
    pub fn finish(mut self) -> (Cigar, Vec<u8>) {
        self.flush();

        (Cigar(self.ops), self.read)
    }

    fn flush(&mut self) {
        if self.run_len > 0 {
            self.ops.push(Op::new(
                self.run_len,
                Kind::Match,
                std::mem::take(&mut self.run),
            ));
            self.run_len = 0;
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Alignment> {
        let transcript: &'a [u8] = self.transcript;

        match transcript.get(self.cursor..self.cursor + len) {
            Some(bases) => {
                self.cursor += len;
                Ok(bases)
            }
            None => Err(Alignment::TranscriptExhausted {
                missing: self.cursor + len - transcript.len(),
            }),
        }
    }
}
