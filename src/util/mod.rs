pub mod dna;
pub mod window;
