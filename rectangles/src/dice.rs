use rand::Rng;
use serde::{Deserialize, Serialize};

/// Two six-sided dice. Serialized as a plain array, e.g. `[3, 5]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll(pub [u8; 2]);

impl DiceRoll {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self([rng.gen_range(1..=6), rng.gen_range(1..=6)])
    }

    pub fn sum(&self) -> u8 {
        self.0[0].saturating_add(self.0[1])
    }

    /// A face that can't come up on a six-sided die, if any.
    pub fn invalid_face(&self) -> Option<u8> {
        self.0.into_iter().find(|face| !(1..=6).contains(face))
    }
}
