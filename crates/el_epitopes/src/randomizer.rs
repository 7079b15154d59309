use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::ThreadRng;

use crate::EpitopeSet;

/// One shuffled ordering of an epitope set, flattened without linkers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    group: String,
    epi_len: usize,
    index: usize, // 1-based within its group
    raw: String,
}

impl Draw {
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn epi_len(&self) -> usize {
        self.epi_len
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// FASTA header, e.g. `>tcell_9_3` for the third draw of `tcell`
    /// with epitope length 9.
    pub fn header(&self) -> String {
        format!(">{}_{}_{}", self.group, self.epi_len, self.index)
    }
}

pub struct Randomizer<R: Rng> {
    rng: R,
}

impl Default for Randomizer<ThreadRng> {
    fn default() -> Self {
        Randomizer { rng: rand::rng() }
    }
}

impl Randomizer<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Randomizer { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> Randomizer<R> {
    pub fn new(rng: R) -> Self {
        Randomizer { rng }
    }

    /// Shuffles `set` in place `n` times and records the flattened order
    /// after every shuffle. Each shuffle starts from the order left by the
    /// previous one.
    pub fn draw(&mut self, set: &mut EpitopeSet, n: usize) -> Vec<Draw> {
        let label = set.label();
        let group = set.name().to_string();
        let epi_len = set.epi_len();
        (1..=n).map(|index| {
            set.shuffle(&mut self.rng);
            let raw = set.flatten();
            debug!("{}: {}", label, raw);
            Draw { group: group.clone(), epi_len, index, raw }
        }).collect()
    }

    /// Draws `n` T-cell orderings followed by `n` B-cell orderings into a
    /// single pool, then splits that pool in half: the first `n` entries
    /// are the T-cell draws, the rest the B-cell draws.
    pub fn draw_pair(
        &mut self,
        tcell: &mut EpitopeSet,
        bcell: &mut EpitopeSet,
        n: usize,
    ) -> (Vec<Draw>, Vec<Draw>) {
        let mut pool = Vec::with_capacity(2 * n);
        pool.extend(self.draw(tcell, n));
        pool.extend(self.draw(bcell, n));
        let bcell_draws = pool.split_off(n);
        (pool, bcell_draws)
    }
}
