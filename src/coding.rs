pub mod deflate;
pub mod run_length;

#[cfg(test)]
pub mod passthrough_mock;
