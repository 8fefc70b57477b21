// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::Rng;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Light pseudo-random colour for a newly created brush
    pub fn random_brush<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(128..=255),
            g: rng.gen_range(128..=255),
            b: rng.gen_range(128..=255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_brush_is_seeded_and_light() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..64 {
            let colour = Colour::random_brush(&mut a);
            assert_eq!(colour, Colour::random_brush(&mut b));
            assert!(colour.r >= 128 && colour.g >= 128 && colour.b >= 128);
        }
    }
}
