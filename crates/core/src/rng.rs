//! Small helpers over the seeded generator so every random draw stays reproducible.

use rand_chacha::rand_core::Rng;

pub fn roll_below<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        return 0;
    }
    (rng.next_u64() % u64::from(bound)) as u32
}

pub fn roll_percent<R: Rng + ?Sized>(rng: &mut R, percent: u32) -> bool {
    roll_below(rng, 100) < percent
}

pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.next_u64() & 1 == 1
}

pub fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    items.get(roll_below(rng, items.len() as u32) as usize).copied()
}
