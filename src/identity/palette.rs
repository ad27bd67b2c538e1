//! Fixed color palette for anonymous users

use rand::seq::SliceRandom;
use rand::Rng;

/// Colors handed out to new identities
pub const ANONYMOUS_COLORS: [&str; 10] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#f97316", "#84cc16",
    "#ec4899", "#6366f1",
];

/// Picks a palette color uniformly at random.
pub fn pick_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ANONYMOUS_COLORS
        .choose(rng)
        .copied()
        .unwrap_or(ANONYMOUS_COLORS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_is_from_palette() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(ANONYMOUS_COLORS.contains(&pick_color(&mut rng)));
        }
    }

    #[test]
    fn test_same_seed_same_color() {
        let a = pick_color(&mut StdRng::seed_from_u64(42));
        let b = pick_color(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_color_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(pick_color(&mut rng));
        }
        assert_eq!(seen.len(), ANONYMOUS_COLORS.len());
    }
}
