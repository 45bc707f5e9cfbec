//! Random 1:1 pairing of images across two pools.
//!
//! Pools are shuffled uniformly and zipped positionally; the shorter pool
//! decides how many pairs come out and the rest of the longer one is left
//! unpaired.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

use crate::config::PairingConfig;
use crate::error::PipelineResult;
use crate::types::Pair;

use super::discovery::FileDiscovery;

/// Result of pairing two pools.
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    /// The pairs, in random order
    pub pairs: Vec<Pair>,
    /// Sizes of the first and second pool before pairing
    pub pool_sizes: (usize, usize),
    /// Images of the longer pool that were never paired
    pub dropped: usize,
}

impl Pairing {
    /// True when either pool was empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Builds pairings from one or two source directories.
pub struct PairGenerator {
    discovery: FileDiscovery,
    seed: Option<u64>,
}

impl PairGenerator {
    /// Create a generator; uses `config.seed` when set.
    pub fn new(config: PairingConfig) -> Self {
        let seed = config.seed;
        Self {
            discovery: FileDiscovery::new(config),
            seed,
        }
    }

    /// Override the RNG seed for reproducible pairings.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Discover both pools and pair them.
    ///
    /// Without `dir2`, the images of `dir1` are split into two random halves.
    /// An empty pool yields an empty `Pairing`, not an error.
    pub fn generate(&self, dir1: &Path, dir2: Option<&Path>) -> PipelineResult<Pairing> {
        let pool_a = self.pool(dir1)?;
        let pool_b = match dir2 {
            Some(dir) => Some(self.pool(dir)?),
            None => None,
        };

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let pairing = match pool_b {
            Some(pool_b) => pair_pools(pool_a, pool_b, &mut rng),
            None => {
                let (pool_a, pool_b) = split_pool(pool_a, &mut rng);
                pair_pools(pool_a, pool_b, &mut rng)
            }
        };

        tracing::info!(
            "Paired {} image(s) from pools of {} and {} ({} left over)",
            pairing.pairs.len() * 2,
            pairing.pool_sizes.0,
            pairing.pool_sizes.1,
            pairing.dropped
        );
        Ok(pairing)
    }

    fn pool(&self, dir: &Path) -> PipelineResult<Vec<PathBuf>> {
        self.discovery.discover(dir)
    }
}

/// Split one pool into two disjoint random halves.
///
/// The second half receives `ceil(n/2)` elements and the first keeps
/// `floor(n/2)`.
pub fn split_pool<R: Rng + ?Sized>(
    mut pool: Vec<PathBuf>,
    rng: &mut R,
) -> (Vec<PathBuf>, Vec<PathBuf>) {
    pool.shuffle(rng);
    let half = pool.split_off(pool.len() / 2);
    (pool, half)
}

/// Pair two pools uniformly at random without replacement.
///
/// Output length is `min(|a|, |b|)`; `first` of every pair comes from `a`.
pub fn pair_pools<R: Rng + ?Sized>(
    mut a: Vec<PathBuf>,
    mut b: Vec<PathBuf>,
    rng: &mut R,
) -> Pairing {
    let pool_sizes = (a.len(), b.len());
    a.shuffle(rng);
    b.shuffle(rng);

    let pairs: Vec<Pair> = a.into_iter().zip(b).map(|(x, y)| Pair::new(x, y)).collect();
    let dropped = pool_sizes.0.max(pool_sizes.1) - pairs.len();

    Pairing {
        pairs,
        pool_sizes,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn paths(prefix: &str, n: usize) -> Vec<PathBuf> {
        (0..n)
            .map(|i| PathBuf::from(format!("/{prefix}/{i}.jpg")))
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_pair_count_is_min_of_pools() {
        for (n1, n2) in [(0, 3), (3, 0), (1, 1), (2, 5), (5, 2), (4, 4)] {
            let pairing = pair_pools(paths("a", n1), paths("b", n2), &mut rng());
            assert_eq!(pairing.pairs.len(), n1.min(n2), "pools {n1}x{n2}");
            assert_eq!(pairing.dropped, n1.max(n2) - n1.min(n2));
            assert_eq!(pairing.pool_sizes, (n1, n2));
        }
    }

    #[test]
    fn test_pairs_draw_one_from_each_pool_without_repeats() {
        let a = paths("a", 6);
        let b = paths("b", 9);
        let pairing = pair_pools(a.clone(), b.clone(), &mut rng());

        let a_set: HashSet<_> = a.into_iter().collect();
        let b_set: HashSet<_> = b.into_iter().collect();
        let mut firsts = HashSet::new();
        let mut seconds = HashSet::new();
        for pair in &pairing.pairs {
            assert!(a_set.contains(&pair.first));
            assert!(b_set.contains(&pair.second));
            assert!(firsts.insert(pair.first.clone()));
            assert!(seconds.insert(pair.second.clone()));
        }
        // The shorter pool is fully exhausted
        assert_eq!(firsts, a_set);
    }

    #[test]
    fn test_first_side_comes_from_first_pool_when_it_is_longer() {
        let a = vec![PathBuf::from("/d1/a.jpg"), PathBuf::from("/d1/b.jpg")];
        let b = vec![PathBuf::from("/d2/c.jpeg")];
        let pairing = pair_pools(a, b, &mut rng());

        assert_eq!(pairing.pairs.len(), 1);
        let name = pairing.pairs[0].output_name();
        assert!(name == "a_c.jpeg" || name == "b_c.jpeg", "got {name:?}");
        assert_eq!(pairing.dropped, 1);
    }

    #[test]
    fn test_split_pool_sizes_and_union() {
        for n in 0..9 {
            let pool = paths("x", n);
            let (a, b) = split_pool(pool.clone(), &mut rng());
            assert_eq!(a.len(), n / 2);
            assert_eq!(b.len(), n.div_ceil(2));

            let union: HashSet<_> = a.iter().chain(b.iter()).cloned().collect();
            let original: HashSet<_> = pool.into_iter().collect();
            assert_eq!(union, original);
            assert_eq!(a.len() + b.len(), union.len());
        }
    }

    #[test]
    fn test_seeded_pairing_is_reproducible() {
        let first = pair_pools(paths("a", 10), paths("b", 10), &mut StdRng::seed_from_u64(42));
        let second = pair_pools(paths("a", 10), paths("b", 10), &mut StdRng::seed_from_u64(42));
        assert_eq!(first.pairs, second.pairs);
    }

    #[test]
    fn test_generate_two_directories() {
        let d1 = tempfile::tempdir().unwrap();
        let d2 = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.jpg", "skip.png"] {
            std::fs::write(d1.path().join(name), b"x").unwrap();
        }
        std::fs::write(d2.path().join("c.jpeg"), b"x").unwrap();

        let generator = PairGenerator::new(PairingConfig::default());
        let pairing = generator.generate(d1.path(), Some(d2.path())).unwrap();
        assert_eq!(pairing.pool_sizes, (2, 1));
        assert_eq!(pairing.pairs.len(), 1);
        assert_eq!(pairing.pairs[0].second, d2.path().join("c.jpeg"));
    }

    #[test]
    fn test_generate_single_directory_splits() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            std::fs::write(dir.path().join(format!("{i}.JPG")), b"x").unwrap();
        }

        let generator = PairGenerator::new(PairingConfig::default()).with_seed(Some(3));
        let pairing = generator.generate(dir.path(), None).unwrap();
        assert_eq!(pairing.pool_sizes, (2, 3));
        assert_eq!(pairing.pairs.len(), 2);
        assert_eq!(pairing.dropped, 1);
        for pair in &pairing.pairs {
            assert_ne!(pair.first, pair.second);
        }
    }

    #[test]
    fn test_generate_empty_directory_yields_no_pairs() {
        let d1 = tempfile::tempdir().unwrap();
        let d2 = tempfile::tempdir().unwrap();
        std::fs::write(d2.path().join("c.jpg"), b"x").unwrap();

        let generator = PairGenerator::new(PairingConfig::default());
        let pairing = generator.generate(d1.path(), Some(d2.path())).unwrap();
        assert!(pairing.is_empty());
    }
}
