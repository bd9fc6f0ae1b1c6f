use rand::seq::SliceRandom;
use rand::Rng;

/// Up to `n` distinct elements of `pool`, chosen without replacement.
pub fn pick<T: Clone, R: Rng + ?Sized>(pool: &[T], n: usize, rng: &mut R) -> Vec<T> {
    pool.choose_multiple(rng, n).cloned().collect()
}

/// A uniformly random permutation (Fisher-Yates) of `items`.
pub fn shuffled<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_never_repeats() {
        let mut rng = StdRng::seed_from_u64(11);
        let pool: Vec<u32> = (0..10).collect();
        for _ in 0..200 {
            let mut drawn = pick(&pool, 3, &mut rng);
            assert_eq!(drawn.len(), 3);
            drawn.sort();
            drawn.dedup();
            assert_eq!(drawn.len(), 3);
        }
    }

    #[test]
    fn pick_from_small_pool_returns_what_exists() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(pick(&[1, 2], 3, &mut rng).len(), 2);
        assert!(pick::<u8, _>(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut out = shuffled(vec!['a', 'b', 'c', 'd'], &mut rng);
        out.sort();
        assert_eq!(out, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn shuffled_reaches_every_ordering() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(shuffled(vec![0, 1, 2, 3], &mut rng));
        }
        assert_eq!(seen.len(), 24);
    }
}
