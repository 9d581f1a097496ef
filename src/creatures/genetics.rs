//! Gene strings: rolling wild genomes, naming species, and breeding.
//!
//! A genome is a fixed-length lowercase string. Wild creatures roll theirs
//! at spawn; bred offspring take each gene from one parent or the other,
//! with a small per-gene mutation chance.

use rand::prelude::*;
use rand::rngs::StdRng;

pub const GENOME_LEN: usize = 6;
pub const GENE_POOL: &[u8] = b"bcdfglmprstz";

/// Per-gene mutation chance used for breeding at the hut.
pub const MUTATION_CHANCE: f64 = 0.05;

pub fn wild_genome(rng: &mut StdRng) -> String {
    (0..GENOME_LEN)
        .map(|_| *GENE_POOL.choose(rng).unwrap() as char)
        .collect()
}

/// Cross two genomes: each position comes from one parent at random, then
/// may mutate into a fresh gene.
pub fn breed_with(a: &str, b: &str, rng: &mut StdRng, mutation_chance: f64) -> String {
    a.bytes()
        .zip(b.bytes())
        .map(|(ga, gb)| {
            let mut gene = if rng.gen_bool(0.5) { ga } else { gb };
            if rng.gen_bool(mutation_chance) {
                gene = *GENE_POOL.choose(rng).unwrap();
            }
            gene as char
        })
        .collect()
}

pub fn breed(a: &str, b: &str, rng: &mut StdRng) -> String {
    breed_with(a, b, rng, MUTATION_CHANCE)
}

const PREFIXES: [&str; 12] = [
    "Bram", "Cind", "Dusk", "Fern", "Glim", "Loam", "Moss", "Pebb", "Rill", "Sedge", "Tarn",
    "Zeph",
];
const SUFFIXES: [&str; 12] = [
    "let", "kin", "ling", "fang", "wing", "paw", "tail", "horn", "shade", "spark", "root", "mote",
];

/// Deterministic display name derived from the first and last gene.
pub fn species_name(genome: &str) -> String {
    let bytes = genome.as_bytes();
    let first = bytes.first().copied().unwrap_or(b'b');
    let last = bytes.last().copied().unwrap_or(b'b');
    let pi = GENE_POOL.iter().position(|&g| g == first).unwrap_or(0);
    let si = GENE_POOL.iter().position(|&g| g == last).unwrap_or(0);
    format!("{}{}", PREFIXES[pi % PREFIXES.len()], SUFFIXES[si % SUFFIXES.len()])
}
