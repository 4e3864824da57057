//! Tests for solver configuration defaults and builders

#[cfg(test)]
mod tests {
    use wavetile::SolverConfig;
    use wavetile::io::configuration::{
        BITS_PER_WORD, BITS_PER_WORD_LOG2, DEFAULT_NOISE, DEFAULT_TILE_WEIGHT,
        FALLBACK_TILE_WEIGHT,
    };

    // Tests a new configuration is unseeded with default noise
    // Verified by seeding new configurations with zero
    #[test]
    fn test_new_defaults() {
        let config = SolverConfig::new(4, 3);

        assert_eq!(config.cols, 4);
        assert_eq!(config.rows, 3);
        assert_eq!(config.seed, None);
        assert_eq!(config.noise, DEFAULT_NOISE);
        assert_eq!(config.cell_count(), 12);
    }

    // Tests builders override only their own field
    // Verified by resetting noise in with_seed
    #[test]
    fn test_builders() {
        let config = SolverConfig::new(2, 2).with_noise(0.5).with_seed(99);

        assert_eq!(config.seed, Some(99));
        assert!((config.noise - 0.5).abs() < f64::EPSILON);
    }

    // Tests word constants agree with each other
    // Verified by changing the word size alone
    #[test]
    fn test_word_constants_consistent() {
        assert_eq!(1 << BITS_PER_WORD_LOG2, BITS_PER_WORD);
        assert_eq!(BITS_PER_WORD, u32::BITS as usize);
        assert!(FALLBACK_TILE_WEIGHT > 0.0);
        assert!(DEFAULT_TILE_WEIGHT > 0.0);
    }
}
