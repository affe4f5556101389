use std::collections::VecDeque;

use super::RandomSource;

/// Replays scripted draws. Once a script runs dry index draws return 0 and
/// unit draws return 0.99, which selects food over a power-up.
#[derive(Default)]
pub(crate) struct ScriptedRandom {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
    index_draws: usize,
}

impl ScriptedRandom {
    pub(crate) fn with_indices(indices: &[usize]) -> Self {
        Self {
            indices: indices.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn push_units(&mut self, units: &[f64]) {
        self.units.extend(units.iter().copied());
    }

    pub(crate) fn index_draws(&self) -> usize {
        self.index_draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.99)
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.index_draws += 1;
        self.indices.pop_front().unwrap_or(0).min(upper - 1)
    }
}
