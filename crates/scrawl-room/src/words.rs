//! The word pool and word-display helpers.

use rand::Rng;
use rand::seq::index;

/// The injected source of secret words.
///
/// Difficulty tiers are pooled at construction — sampling always draws
/// from the combined list.
#[derive(Debug, Clone)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The stock Italian lists shipped with the game.
    pub fn builtin() -> Self {
        const EASY: &[&str] = &[
            "casa", "gatto", "sole", "auto", "libro", "cane", "pizza", "mare", "fiore", "bici",
        ];
        const MEDIUM: &[&str] = &[
            "astronauta",
            "chitarra",
            "elefante",
            "computer",
            "ombrello",
            "telefono",
            "montagna",
            "biblioteca",
            "supermercato",
            "aeroplano",
        ];
        const HARD: &[&str] = &[
            "pescivendolo",
            "architetto",
            "paleontologia",
            "microscopia",
            "filosofia",
            "ingegneria",
            "astronomia",
            "neurologia",
            "botanica",
            "archeologia",
        ];
        Self::new(EASY.iter().chain(MEDIUM).chain(HARD).copied())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draws `count` distinct words, uniformly, without replacement.
    ///
    /// Uses `rand`'s index sampling — every `count`-subset of the pool
    /// is equally likely. (A comparator-based "random sort" is not an
    /// acceptable substitute; it biases toward the original order.)
    /// Asking for more words than the pool holds returns the whole
    /// pool in random order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        let amount = count.min(self.words.len());
        index::sample(rng, self.words.len(), amount)
            .iter()
            .map(|i| self.words[i].clone())
            .collect()
    }
}

/// The masked display of a secret word: one `_` per character.
pub fn masked(word: &str) -> String {
    word.chars().map(|_| '_').collect()
}

/// Character positions of `word` still eligible for a letter hint:
/// not whitespace and not already revealed.
pub(crate) fn hint_candidates(word: &str, revealed: &[usize]) -> Vec<usize> {
    word.chars()
        .enumerate()
        .filter(|(i, c)| !c.is_whitespace() && !revealed.contains(i))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_builtin_pool_combines_all_tiers() {
        let pool = WordPool::builtin();
        assert_eq!(pool.len(), 30);
    }

    #[test]
    fn test_sample_returns_distinct_words() {
        let pool = WordPool::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let words = pool.sample(&mut rng, 3);
            assert_eq!(words.len(), 3);
            assert_ne!(words[0], words[1]);
            assert_ne!(words[1], words[2]);
            assert_ne!(words[0], words[2]);
        }
    }

    #[test]
    fn test_sample_caps_at_pool_size() {
        let pool = WordPool::new(["a", "b"]);
        let mut rng = StdRng::seed_from_u64(7);
        let words = pool.sample(&mut rng, 5);
        assert_eq!(words.len(), 2);
    }

    /// Every word should be offered at roughly the same rate — the
    /// property a comparator shuffle would fail.
    #[test]
    fn test_sample_has_no_positional_bias() {
        let pool = WordPool::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = vec![0u32; pool.len()];

        let trials = 30_000;
        let per_draw = 3;
        for _ in 0..trials {
            for word in pool.sample(&mut rng, per_draw) {
                let i = pool.words.iter().position(|w| *w == word).unwrap();
                hits[i] += 1;
            }
        }

        // Expected hits per word: trials * per_draw / pool_size = 3000.
        // A uniform sampler stays well within ±15%; the original's
        // sort(() => 0.5 - random) shuffle fails this by a wide margin.
        let expected = (trials * per_draw as u32) / pool.len() as u32;
        for (i, &h) in hits.iter().enumerate() {
            assert!(
                (h as i64 - expected as i64).unsigned_abs() < (expected as u64 * 15) / 100,
                "word #{i} drawn {h} times, expected ≈{expected}"
            );
        }
    }

    #[test]
    fn test_masked_hides_every_character() {
        assert_eq!(masked("casa"), "____");
        assert_eq!(masked(""), "");
        assert_eq!(masked("a b"), "___");
    }

    #[test]
    fn test_masked_counts_chars_not_bytes() {
        assert_eq!(masked("caffè"), "_____");
    }

    #[test]
    fn test_hint_candidates_skip_whitespace_and_revealed() {
        let word = "la casa";
        let all = hint_candidates(word, &[]);
        assert_eq!(all, vec![0, 1, 3, 4, 5, 6]);

        let some = hint_candidates(word, &[0, 4]);
        assert_eq!(some, vec![1, 3, 5, 6]);
    }

    #[test]
    fn test_hint_candidates_exhausted() {
        let word = "ab";
        assert!(hint_candidates(word, &[0, 1]).is_empty());
    }
}
