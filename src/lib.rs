//! Simulate spliced RNA-seq reads from a genome, a gene annotation and a variant table, with the
//! true alignment of each read (cigar, MD, XM, NM and variant tags).

/* module declaration */
pub mod alignment;
pub mod cli;
pub mod error;
pub mod model;
pub mod references;
pub mod simulate;
pub mod transcripts;
pub mod variants;
