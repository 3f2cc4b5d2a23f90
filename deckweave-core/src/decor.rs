//! Decorative layer: particle batches, the reveal state machine, and the
//! selector list for reveal-animated elements.

use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Number of particles instantiated per host element.
pub const PARTICLES_PER_CONTAINER: usize = 20;

/// Minimum intersection ratio that triggers a reveal.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Elements that receive the reveal animation, containers before the
/// headings and badges nested inside them.
pub const ANIMATABLE_SELECTORS: &[&str] =
    &[".card", ".business-card", ".feature-image", ".badge", "h2"];

/// One decorative particle. All three values are independent uniform draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    /// Horizontal position in percent, `[0, 100)`.
    pub left_pct: f64,
    /// Size in pixels, `[1, 4)`.
    pub size_px: f64,
    /// Animation start delay in seconds, `[0, 15)`.
    pub delay_s: f64,
}

/// Draw one batch of particles for a single host element.
pub fn particle_batch<R: Rng>(rng: &mut R) -> Vec<Particle> {
    (0..PARTICLES_PER_CONTAINER)
        .map(|_| Particle {
            left_pct: rng.gen_range(0.0..100.0),
            size_px: rng.gen_range(1.0..4.0),
            delay_s: rng.gen_range(0.0..15.0),
        })
        .collect()
}

/// Render a batch as `.particle` elements with inline position, size, and
/// delay styles.
pub fn render_particles(particles: &[Particle]) -> String {
    let mut markup = String::new();
    for p in particles {
        markup.push_str(&format!(
            "<div class=\"particle\" style=\"left: {0:.2}%; width: {1:.2}px; height: {1:.2}px; animation-delay: {2:.2}s;\"></div>",
            p.left_pct, p.size_px, p.delay_s
        ));
    }
    markup
}

/// Tracks which elements have been observed and which have been revealed.
/// Both transitions are one-way: an element is observed at most once, and a
/// reveal never reverts.
#[derive(Debug, Default)]
pub struct RevealTracker {
    observed: HashSet<String>,
    revealed: HashSet<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element for observation. Returns true only the first time
    /// a given key is seen.
    pub fn observe(&mut self, key: &str) -> bool {
        self.observed.insert(key.to_string())
    }

    /// Record an intersection event. Returns true when this event reveals the
    /// element; below-threshold ratios and already-revealed elements are
    /// no-ops.
    pub fn record_intersection(&mut self, key: &str, ratio: f64) -> bool {
        if ratio < REVEAL_THRESHOLD || self.revealed.contains(key) {
            return false;
        }
        self.revealed.insert(key.to_string());
        true
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn batch_has_twenty_particles_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let batch = particle_batch(&mut rng);
        assert_eq!(batch.len(), PARTICLES_PER_CONTAINER);
        for p in &batch {
            assert!((0.0..100.0).contains(&p.left_pct));
            assert!((1.0..4.0).contains(&p.size_px));
            assert!((0.0..15.0).contains(&p.delay_s));
        }
    }

    #[test]
    fn batches_are_deterministic_under_a_fixed_seed() {
        let a = particle_batch(&mut StdRng::seed_from_u64(42));
        let b = particle_batch(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let c = particle_batch(&mut StdRng::seed_from_u64(43));
        assert_ne!(a, c);
    }

    #[test]
    fn consecutive_batches_from_one_rng_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = particle_batch(&mut rng);
        let second = particle_batch(&mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn rendered_particles_carry_inline_styles() {
        let mut rng = StdRng::seed_from_u64(3);
        let markup = render_particles(&particle_batch(&mut rng));
        assert_eq!(markup.matches("class=\"particle\"").count(), 20);
        assert_eq!(markup.matches("animation-delay:").count(), 20);
    }

    #[test]
    fn reveal_is_one_way_and_threshold_gated() {
        let mut tracker = RevealTracker::new();
        assert!(!tracker.record_intersection("card-1", 0.05));
        assert!(!tracker.is_revealed("card-1"));

        assert!(tracker.record_intersection("card-1", 0.4));
        assert!(tracker.is_revealed("card-1"));

        // Further events, above or below threshold, change nothing.
        assert!(!tracker.record_intersection("card-1", 0.9));
        assert!(!tracker.record_intersection("card-1", 0.0));
        assert!(tracker.is_revealed("card-1"));
    }

    #[test]
    fn observe_returns_true_once_per_key() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.observe("a"));
        assert!(!tracker.observe("a"));
        assert!(tracker.observe("b"));
        assert_eq!(tracker.observed_count(), 2);
    }
}
