//! Glyph substitution between traditional and simplified variants.

use std::collections::HashMap;
use std::sync::LazyLock;

use glyphfall_core::{AssertMode, GlitchSettings, random_number};
use rand::Rng;

/// Traditional and simplified forms swapped by a glitch.
const VARIANT_PAIRS: &[(char, char)] = &[
    ('體', '体'),
    ('靈', '灵'),
    ('愛', '爱'),
    ('學', '学'),
    ('覺', '觉'),
    ('見', '见'),
    ('書', '书'),
    ('夢', '梦'),
    ('氣', '气'),
    ('話', '话'),
    ('難', '难'),
    ('廣', '广'),
    ('國', '国'),
    ('電', '电'),
    ('網', '网'),
    ('進', '进'),
    ('圖', '图'),
    ('時', '时'),
    ('畫', '画'),
    ('幹', '干'),
    ('線', '线'),
    ('陰', '阴'),
    ('陽', '阳'),
    ('龍', '龙'),
    ('門', '门'),
    ('風', '风'),
    ('師', '师'),
];

/// Lookup in both directions, built once.
static VARIANTS: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    VARIANT_PAIRS
        .iter()
        .flat_map(|&(traditional, simplified)| {
            [(traditional, simplified), (simplified, traditional)]
        })
        .collect()
});

/// The other written form of `glyph`, if it has one.
pub fn variant(glyph: char) -> Option<char> {
    VARIANTS.get(&glyph).copied()
}

/// Which cells are glitched, re-rolled at random intervals.
///
/// Within one interval the decision for a cell is a pure function of the
/// interval seed and the cell position, so glitched glyphs hold still
/// between re-rolls instead of flickering every frame.
#[derive(Debug, Clone)]
pub struct Glitch {
    settings: GlitchSettings,
    seed: u64,
    next_reroll_ms: u64,
}

impl Glitch {
    pub fn new(settings: GlitchSettings) -> Self {
        Self {
            settings,
            seed: 0,
            next_reroll_ms: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    /// Pick a new glitch pattern if the current interval is over.
    pub fn refresh<R: Rng>(&mut self, now_ms: u64, rng: &mut R, mode: AssertMode) {
        if now_ms < self.next_reroll_ms {
            return;
        }

        self.seed = rng.random();
        let interval = random_number(
            rng,
            mode,
            self.settings.interval_min_ms,
            self.settings.interval_max_ms,
        );
        self.next_reroll_ms = now_ms + interval;
    }

    /// The glyph to draw at (`column`, `row`), possibly swapped for its variant.
    pub fn apply(&self, glyph: char, column: usize, row: usize) -> char {
        if !self.settings.enabled || self.roll(column, row) >= self.settings.probability {
            return glyph;
        }
        variant(glyph).unwrap_or(glyph)
    }

    /// Deterministic value in `[0, 1)` for a cell in the current interval.
    fn roll(&self, column: usize, row: usize) -> f32 {
        let mut z = self
            .seed
            .wrapping_add((column as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            .wrapping_add((row as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 40) as f32 / (1u64 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn glitch(probability: f32) -> Glitch {
        Glitch::new(GlitchSettings {
            probability,
            ..Default::default()
        })
    }

    #[test]
    fn test_variants_are_bidirectional() {
        assert_eq!(variant('國'), Some('国'));
        assert_eq!(variant('国'), Some('國'));
        assert_eq!(variant('龍'), Some('龙'));
        assert_eq!(variant('龙'), Some('龍'));
        assert_eq!(variant('天'), None);
    }

    #[test]
    fn test_every_pair_round_trips() {
        for &(traditional, simplified) in VARIANT_PAIRS {
            assert_eq!(variant(traditional), Some(simplified));
            assert_eq!(variant(simplified), Some(traditional));
        }
    }

    #[test]
    fn test_certain_glitch_swaps_known_glyphs() {
        let glitch = glitch(1.0);
        assert_eq!(glitch.apply('學', 3, 7), '学');
        assert_eq!(glitch.apply('学', 0, 0), '學');
        assert_eq!(glitch.apply('a', 0, 0), 'a');
    }

    #[test]
    fn test_zero_probability_never_swaps() {
        let glitch = glitch(0.0);
        for column in 0..50 {
            for row in 0..50 {
                assert_eq!(glitch.apply('電', column, row), '電');
            }
        }
    }

    #[test]
    fn test_disabled_never_swaps() {
        let mut glitch = glitch(1.0);
        glitch.set_enabled(false);
        assert!(!glitch.is_enabled());
        assert_eq!(glitch.apply('電', 0, 0), '電');
    }

    #[test]
    fn test_decision_is_stable_within_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut glitch = glitch(0.5);
        glitch.refresh(0, &mut rng, AssertMode::Fatal);

        let before: Vec<char> = (0..100).map(|row| glitch.apply('門', 1, row)).collect();
        glitch.refresh(100, &mut rng, AssertMode::Fatal);
        let after: Vec<char> = (0..100).map(|row| glitch.apply('門', 1, row)).collect();

        assert_eq!(before, after);
        assert!(before.contains(&'门'));
        assert!(before.contains(&'門'));
    }

    #[test]
    fn test_refresh_waits_for_interval() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut glitch = glitch(0.5);
        glitch.refresh(1_000, &mut rng, AssertMode::Fatal);

        let next = glitch.next_reroll_ms;
        assert!((1_750..=2_500).contains(&next));

        let seed = glitch.seed;
        glitch.refresh(next - 1, &mut rng, AssertMode::Fatal);
        assert_eq!(glitch.seed, seed);
        glitch.refresh(next, &mut rng, AssertMode::Fatal);
        assert!(glitch.next_reroll_ms > next);
    }
}
