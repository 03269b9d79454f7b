//! A lossless image codec built from three simple stages: a frequency-ordered
//! color palette, run-length encoding of every row of palette indices, and a
//! final zlib pass over the resulting text container.
pub mod coding;
pub mod compression;
