//! Quadrature transition decoding

/// Step for each `(previous << 2) | current` transition, where a pin-pair
/// state is `(A << 1) | B`.
///
/// Gray-code neighbours step ±1. No change and double transitions (both pins
/// flipped, i.e. a missed sample or contact bounce) step 0.
pub const QUADRATURE_TABLE: [i8; 16] = [
    0, 1, -1, 0, //
    -1, 0, 0, 1, //
    1, 0, 0, -1, //
    0, -1, 1, 0,
];

/// Raw counts produced by one detent of a full-quadrature encoder.
pub const COUNTS_PER_DETENT: i32 = 4;

/// Pin-pair state: `(A << 1) | B`.
#[inline]
#[allow(clippy::arithmetic_side_effects)]
pub const fn pin_state(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | (b as u8)
}

/// Table step for a transition between two pin-pair states. Only the low
/// two bits of each state are used.
#[inline]
#[allow(clippy::arithmetic_side_effects)] // both operands masked to two bits
pub fn step(previous: u8, current: u8) -> i8 {
    let index = usize::from(((previous & 0b11) << 2) | (current & 0b11));
    QUADRATURE_TABLE.get(index).copied().unwrap_or(0)
}

/// Decoder state: the last pin-pair state seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    previous: u8,
}

impl QuadratureDecoder {
    /// Decoder assuming both pins start low.
    pub const fn new() -> Self {
        Self { previous: 0 }
    }

    /// Seed the previous state without producing a step.
    pub fn reset(&mut self, a: bool, b: bool) {
        self.previous = pin_state(a, b);
    }

    /// Feed the current pin levels and return the signed step.
    pub fn decode(&mut self, a: bool, b: bool) -> i8 {
        let current = pin_state(a, b);
        let delta = step(self.previous, current);
        self.previous = current;
        delta
    }

    /// Last pin-pair state seen.
    pub fn previous_state(&self) -> u8 {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    #[test]
    fn one_detent_forward_is_plus_four() {
        let mut d = QuadratureDecoder::new();
        let total: i32 = FORWARD.iter().map(|(a, b)| i32::from(d.decode(*a, *b))).sum();
        assert_eq!(total, COUNTS_PER_DETENT);
    }

    #[test]
    fn one_detent_reverse_is_minus_four() {
        let mut d = QuadratureDecoder::new();
        let total: i32 = FORWARD
            .iter()
            .rev()
            .skip(1)
            .chain([(false, false)].iter())
            .map(|(a, b)| i32::from(d.decode(*a, *b)))
            .sum();
        assert_eq!(total, -COUNTS_PER_DETENT);
    }

    #[test]
    fn double_transition_is_no_motion() {
        // 00 -> 11 and 01 -> 10 skip a state
        assert_eq!(step(0b00, 0b11), 0);
        assert_eq!(step(0b01, 0b10), 0);
        assert_eq!(step(0b11, 0b00), 0);
        assert_eq!(step(0b10, 0b01), 0);
    }

    #[test]
    fn same_state_is_no_motion() {
        for s in 0..4u8 {
            assert_eq!(step(s, s), 0);
        }
    }

    #[test]
    #[allow(clippy::arithmetic_side_effects)]
    fn table_is_antisymmetric() {
        for p in 0..4u8 {
            for c in 0..4u8 {
                assert_eq!(step(p, c), -step(c, p));
            }
        }
    }

    #[test]
    fn reset_seeds_without_step() {
        let mut d = QuadratureDecoder::new();
        d.reset(true, true);
        assert_eq!(d.previous_state(), 0b11);
        assert_eq!(d.decode(true, false), 1);
    }
}
