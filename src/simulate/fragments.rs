//! Generate fragments

/* standard use */

/* crate use */
use rand::Rng;

/// A fragment sampled in a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    /// Offset of fragment in spliced transcript
    pub offset: usize,
    /// Mate at fragment end is read first
    pub swapped: bool,
}

/// An iterator produce `target` fragments of one transcript
pub struct Fragments<'a, R>
where
    R: Rng,
{
    target: u64,
    max_offset: usize,
    paired: bool,
    rng: &'a mut R,
}

impl<'a, R> Fragments<'a, R>
where
    R: Rng,
{
    /// Create a new Fragments, `fragment_len` must be lower or equal to `transcript_len`
    pub fn new(
        target: u64,
        transcript_len: usize,
        fragment_len: usize,
        paired: bool,
        rng: &'a mut R,
    ) -> Self {
        Self {
            target,
            max_offset: transcript_len.saturating_sub(fragment_len),
            paired,
            rng,
        }
    }
}

impl<'a, R> Iterator for Fragments<'a, R>
where
    R: Rng,
{
    type Item = Fragment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.target == 0 {
            return None;
        }
        self.target -= 1;

        let offset = self.rng.gen_range(0..=self.max_offset);
        let swapped = self.paired && self.rng.gen_bool(0.5);

        Some(Fragment { offset, swapped })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.target as usize, Some(self.target as usize))
    }
}
