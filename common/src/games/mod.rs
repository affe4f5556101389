mod session_rng;

pub mod snake;

#[cfg(test)]
pub(crate) mod test_support;

pub use session_rng::{RandomSource, SessionRng};
