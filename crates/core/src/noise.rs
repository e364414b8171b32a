//! Source de bruit injectable
//!
//! Toute l'aléa du moteur (nombre d'off-targets, variance biologique des
//! expériences, sous-scores de sécurité) passe par [`NoiseSource`]. Aucun
//! générateur global n'est utilisé: les tests fixent un seed ou une valeur
//! constante.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Capacité de tirage aléatoire
pub trait NoiseSource {
    /// Tirage uniforme dans [0, 1)
    fn uniform(&mut self) -> f64;

    /// Graine dérivée pour un sous-générateur (scoring parallèle)
    fn next_seed(&mut self) -> u64;

    /// Tirage uniforme dans [low, high)
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.uniform()
    }

    /// Perturbation symétrique dans [-amplitude, amplitude)
    fn jitter(&mut self, amplitude: f64) -> f64 {
        self.range(-amplitude, amplitude)
    }
}

impl<R: RngCore> NoiseSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_seed(&mut self) -> u64 {
        self.next_u64()
    }
}

/// Crée un générateur déterministe à partir d'un seed
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Bruit constant, utile pour figer les tirages dans les tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn uniform(&mut self) -> f64 {
        self.0.clamp(0.0, 1.0)
    }

    fn next_seed(&mut self) -> u64 {
        (self.uniform() * 1_000_000.0) as u64
    }
}
