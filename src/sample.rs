//! Struct `Sample` holds the feature columns (and, optionally, the target)
//! that a fitted tree is summarized against.

// Provides feature struct.
pub(crate) mod feature;
// Provides sample struct.
pub(crate) mod sample_struct;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::Sample;
pub use feature::Feature;
