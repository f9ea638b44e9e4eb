//! Bounded geometric envelope follower.
//!
//! Tracks an amplitude proxy that is already clamped into `[min, max]`.
//! Each sample the level is multiplied by the attack multiplier while rising
//! or the release multiplier while falling, and never steps past the input.
//! The multipliers are chosen so the level crosses the whole `[min, max]`
//! range in exactly the configured attack or release time.

use libm::powf;

/// Envelope follower with per-sample compound attack and release.
///
/// # Example
///
/// ```rust
/// use ambifx_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::new(0.5, 2.0);
/// env.set_times(48000.0, 0.1, 0.2);
///
/// let level = env.next(2.0);
/// assert!(level > 1.0 && level <= 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current level
    level: f32,
    /// Lower bound of the tracked range
    min: f32,
    /// Upper bound of the tracked range
    max: f32,
    /// Per-sample growth factor while rising (> 1)
    attack_mult: f32,
    /// Per-sample decay factor while falling (< 1)
    release_mult: f32,
}

impl EnvelopeFollower {
    /// Creates a follower for amplitudes in `[min, max]`, resting at 1.0.
    ///
    /// Multipliers start at 1.0 (frozen) until [`set_times`](Self::set_times) is called.
    pub const fn new(min: f32, max: f32) -> Self {
        Self {
            level: 1.0,
            min,
            max,
            attack_mult: 1.0,
            release_mult: 1.0,
        }
    }

    /// Sets the time to rise from `min` to `max` and to fall back, in seconds.
    pub fn set_times(&mut self, sample_rate: f32, attack_secs: f32, release_secs: f32) {
        let attack_count = sample_rate * attack_secs;
        let release_count = sample_rate * release_secs;

        self.attack_mult = powf(self.max / self.min, 1.0 / attack_count);
        self.release_mult = powf(self.min / self.max, 1.0 / release_count);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            attack_mult = self.attack_mult,
            release_mult = self.release_mult,
            "envelope times set"
        );
    }

    /// Advances one sample toward `amplitude` and returns the new level.
    #[inline]
    pub fn next(&mut self, amplitude: f32) -> f32 {
        if amplitude > self.level {
            self.level = (self.level * self.attack_mult).min(amplitude);
        } else if amplitude < self.level {
            self.level = (self.level * self.release_mult).max(amplitude);
        }
        self.level
    }

    /// Clamps a raw amplitude into the tracked range.
    #[inline]
    pub fn clamp(&self, amplitude: f32) -> f32 {
        amplitude.clamp(self.min, self.max)
    }

    /// Current level.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Per-sample attack multiplier.
    pub fn attack_mult(&self) -> f32 {
        self.attack_mult
    }

    /// Per-sample release multiplier.
    pub fn release_mult(&self) -> f32 {
        self.release_mult
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower() -> EnvelopeFollower {
        let mut env = EnvelopeFollower::new(0.5, 2.0);
        env.set_times(48000.0, 0.1, 0.2);
        env
    }

    #[test]
    fn attack_crosses_range_in_attack_time() {
        let mut env = follower();
        // 0.5 → 2.0 takes 4800 samples; from rest at 1.0 it takes half that
        for _ in 0..2350 {
            env.next(2.0);
        }
        assert!(env.level() < 2.0);
        for _ in 0..100 {
            env.next(2.0);
        }
        assert_eq!(env.level(), 2.0);
    }

    #[test]
    fn release_never_undershoots() {
        let mut env = follower();
        for _ in 0..20000 {
            let level = env.next(0.5);
            assert!(level >= 0.5);
        }
        assert_eq!(env.level(), 0.5);
    }

    #[test]
    fn equal_amplitude_holds() {
        let mut env = follower();
        for _ in 0..100 {
            assert_eq!(env.next(1.0), 1.0);
        }
    }

    #[test]
    fn multipliers_are_reciprocal_ratios() {
        let env = follower();
        let full_attack = powf(env.attack_mult(), 4800.0);
        let full_release = powf(env.release_mult(), 9600.0);
        assert!((full_attack - 4.0).abs() < 0.01, "{full_attack}");
        assert!((full_release - 0.25).abs() < 0.001, "{full_release}");
    }

    #[test]
    fn set_times_keeps_current_level() {
        let mut env = follower();
        for _ in 0..1000 {
            env.next(2.0);
        }
        let level = env.level();
        env.set_times(96000.0, 0.1, 0.2);
        assert_eq!(env.level(), level);
        assert!((powf(env.attack_mult(), 9600.0) - 4.0).abs() < 0.01);
    }

    #[test]
    fn clamp_bounds() {
        let env = follower();
        assert_eq!(env.clamp(0.0), 0.5);
        assert_eq!(env.clamp(10.0), 2.0);
        assert_eq!(env.clamp(1.3), 1.3);
    }
}
