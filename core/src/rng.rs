//! Deterministic random number generation for synthetic fixtures.
//!
//! RULE: fixture generation never touches a platform RNG.
//! Every collection gets its own stream derived from one master seed
//! (master_seed XOR slot index), so growing one collection's generator
//! never shifts another collection's records.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for one fixture collection.
pub struct FixtureRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl FixtureRng {
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Whole-dinar amount in [min, max).
    pub fn amount_between(&mut self, min: f64, max: f64) -> f64 {
        (min + self.next_f64() * (max - min)).floor()
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }
}

/// All fixture RNGs for one synthetic population.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_slot(&self, slot: FixtureSlot) -> FixtureRng {
        FixtureRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries, only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum FixtureSlot {
    Stores = 0,
    Payouts = 1,
    Transactions = 2,
    Documents = 3,
}

impl FixtureSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stores => "stores",
            Self::Payouts => "payouts",
            Self::Transactions => "transactions",
            Self::Documents => "documents",
        }
    }
}
