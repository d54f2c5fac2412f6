pub mod config;
pub mod decoder;
pub mod hmm;

pub use decoder::{Candidate, DecoderConfig, IncrementalDecoder, Lookahead};
pub use hmm::ParameterStore;
