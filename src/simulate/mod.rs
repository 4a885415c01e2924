//! Simulate spliced reads

/* mod declaration */
pub mod fragments;
pub mod output;
pub mod sanity;

/* crate use */
use anyhow::Result;
use rand::seq::SliceRandom;
use rand::RngCore;
use rand::SeedableRng;
use rayon::prelude::*;

/* local use */
use crate::alignment::{verify, Encoder};
use crate::cli;
use crate::error;
use crate::model;
use crate::references::Genome;
use crate::transcripts::{Transcript, Transcripts};
use crate::variants::Variants;
use fragments::Fragments;
use output::{Pair, Writer};

/// Number of transcripts simulate in parallel before results are written
const BATCH_SIZE: usize = 64;

/// Read geometry and per read options shared by all workers
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub read_len: usize,
    pub frag_len: usize,
    pub paired: bool,
    pub error_rate: f64,
    pub sanity_check: bool,
}

fn open(path: &str) -> Result<Box<dyn std::io::Read>> {
    Ok(niffler::get_reader(Box::new(std::io::BufReader::new(std::fs::File::open(path)?)))?.0)
}

fn create(path: &str) -> Result<std::io::BufWriter<std::fs::File>> {
    Ok(std::io::BufWriter::new(std::fs::File::create(path)?))
}

/// main simulate function
#[cfg(not(tarpaulin_include))]
pub fn simulate(params: cli::simulate::Command) -> Result<()> {
    params.validate()?;

    let mut main_rng = rand::rngs::StdRng::seed_from_u64(params.seed);

    let frag_len = params.fragment_length.max(params.read_length);
    if frag_len != params.fragment_length {
        log::warn!(
            "Fragment length {} is lower than read length, fragment length set to {}",
            params.fragment_length,
            frag_len
        );
    }
    if params.error_rate != 0.0 {
        log::warn!(
            "Error rate {} is accepted but sequencing error aren't simulated",
            params.error_rate
        );
    }

    log::info!("Start read genome");
    let genome = Genome::from_stream(open(&params.genome_path)?)?;
    log::info!("End read genome, {} chromosomes", genome.len());

    log::info!("Start read annotation");
    let mut transcripts = Transcripts::from_stream(open(&params.annotation_path)?, frag_len)?;
    log::info!("End read annotation");

    log::info!("Start read variants");
    let variants = match &params.variants_path {
        Some(path) => Variants::from_stream(open(path)?)?,
        None => Variants::default(),
    };
    log::info!("End read variants, {} variants", variants.len());

    if params.sanity_check {
        log::info!("Start check input");
        sanity::check_input(&genome, &transcripts, &variants)?;
        log::info!("End check input");
    }

    transcripts.retain_in(&genome);

    let layout = Layout {
        read_len: params.read_length,
        frag_len,
        paired: !params.single_end,
        error_rate: params.error_rate,
        sanity_check: params.sanity_check,
    };

    let mut writer = Writer::new(
        create(&format!("{}.sam", params.output_base))?,
        create(&format!("{}_1.fa", params.output_base))?,
        if layout.paired {
            Some(create(&format!("{}_2.fa", params.output_base))?)
        } else {
            None
        },
    );

    run(
        &genome,
        &transcripts,
        &variants,
        params.expr_profile,
        params.num_fragment,
        &layout,
        &mut main_rng,
        &mut writer,
    )?;

    writer.finish()?;

    Ok(())
}

/// Distribute fragments over transcripts, encode reads in parallel and write them in transcript order
#[allow(clippy::too_many_arguments)]
pub fn run<W, R>(
    genome: &Genome,
    transcripts: &Transcripts,
    variants: &Variants,
    expression: model::Expression,
    nb_fragments: u64,
    layout: &Layout,
    rng: &mut R,
    writer: &mut Writer<W>,
) -> Result<()>
where
    W: std::io::Write,
    R: rand::Rng,
{
    let mut order: Vec<&Transcript> = transcripts.transcripts.iter().collect();
    order.shuffle(&mut *rng);

    let nb_transcripts = order.len().min(model::expression::MAX_TRANSCRIPTS);
    let counts = expression.counts(nb_transcripts, nb_fragments)?;
    log::info!(
        "{} fragments distributed over {} transcripts",
        nb_fragments,
        nb_transcripts
    );

    let plan: Vec<(&Transcript, u64, u64)> = order
        .into_iter()
        .zip(counts)
        .map(|(transcript, count)| (transcript, count, rng.next_u64()))
        .collect();

    log::info!("Start generate reads");
    for batch in plan.chunks(BATCH_SIZE) {
        let results = batch
            .par_iter()
            .map(|(transcript, count, seed)| {
                worker(
                    transcript,
                    genome,
                    variants,
                    *count,
                    layout,
                    rand::rngs::StdRng::seed_from_u64(*seed),
                )
            })
            .collect::<Result<Vec<Vec<Pair>>>>()?;

        for ((transcript, _, _), pairs) in batch.iter().zip(results) {
            for pair in pairs.iter() {
                writer.write_pair(&transcript.chrom, &transcript.id, pair)?;
            }
        }
    }
    log::info!("End generate reads, {} fragments written", writer.written());

    Ok(())
}

/// Encode all fragments of one transcript
fn worker(
    transcript: &Transcript,
    genome: &Genome,
    variants: &Variants,
    count: u64,
    layout: &Layout,
    mut rng: rand::rngs::StdRng,
) -> Result<Vec<Pair>> {
    let chrom = genome
        .get(&transcript.chrom)
        .ok_or_else(|| error::Input::MissingChromosome(transcript.chrom.clone()))?;
    let seq = transcript.sequence(chrom)?;

    let encoder = Encoder::new(
        &transcript.exons,
        &seq,
        variants.get(&transcript.chrom),
        layout.read_len,
        layout.error_rate,
    );

    let mut pairs = Vec::with_capacity(count as usize);
    for fragment in Fragments::new(
        count,
        transcript.length,
        layout.frag_len,
        layout.paired,
        &mut rng,
    ) {
        let start = encoder.encode(fragment.offset)?;
        let end = if layout.paired {
            Some(encoder.encode(fragment.offset + layout.frag_len - layout.read_len)?)
        } else {
            None
        };

        if layout.sanity_check {
            verify(chrom, &start)?;
            if let Some(end) = &end {
                verify(chrom, end)?;
            }
        }

        pairs.push(Pair {
            start,
            end,
            swapped: fragment.swapped,
        });
    }

    log::debug!("Transcript {} produce {} fragments", transcript.id, count);

    Ok(pairs)
}
