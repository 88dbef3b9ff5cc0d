/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Sources of direction orderings, used to break ties between equally good
//! headings.

use rand::seq::SliceRandom;

use crate::glyph::Direction;

/// Produces a fresh ordering of the four directions on every call.
pub trait DirectionSource {
    /// The four directions in some order.
    fn shuffled(&mut self) -> [Direction; 4];
}

/// Uniformly random orderings drawn from `R`.
#[derive(Debug, Clone)]
pub struct RandomDirections<R> {
    rng: R,
}

impl<R: rand::Rng> RandomDirections<R> {
    /// Wrap a random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Give the generator back.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: rand::Rng> DirectionSource for RandomDirections<R> {
    fn shuffled(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
    }
}

/// Replays a fixed list of orderings, cycling when it runs out. Useful to pin
/// tie-breaks in tests.
#[derive(Debug, Clone)]
pub struct FixedDirections {
    orders: Vec<[Direction; 4]>,
    next: usize,
}

impl FixedDirections {
    /// Cycle through `orders`. An empty list behaves like the canonical order.
    pub fn new(orders: Vec<[Direction; 4]>) -> Self {
        Self { orders, next: 0 }
    }

    /// Always return the same ordering.
    pub fn repeating(order: [Direction; 4]) -> Self {
        Self::new(vec![order])
    }

    /// Always return north, east, south, west.
    pub fn canonical() -> Self {
        Self::repeating(Direction::ALL)
    }
}

impl DirectionSource for FixedDirections {
    fn shuffled(&mut self) -> [Direction; 4] {
        if self.orders.is_empty() {
            return Direction::ALL;
        }
        let order = self.orders[self.next % self.orders.len()];
        self.next += 1;
        order
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_random_is_a_permutation() {
        let mut source = RandomDirections::new(rand_pcg::Pcg64::seed_from_u64(42));
        for _ in 0..100 {
            let mut order = source.shuffled();
            order.sort();
            assert_eq!(order, Direction::ALL);
        }
    }

    #[test]
    fn test_same_seed_same_orders() {
        let mut a = RandomDirections::new(rand_pcg::Pcg64::seed_from_u64(7));
        let mut b = RandomDirections::new(rand_pcg::Pcg64::seed_from_u64(7));
        for _ in 0..20 {
            assert_eq!(a.shuffled(), b.shuffled());
        }
    }

    #[test]
    fn test_fixed_cycles() {
        use Direction::*;
        let mut source = FixedDirections::new(vec![
            [West, South, East, North],
            [East, North, West, South],
        ]);
        assert_eq!(source.shuffled(), [West, South, East, North]);
        assert_eq!(source.shuffled(), [East, North, West, South]);
        assert_eq!(source.shuffled(), [West, South, East, North]);
        assert_eq!(FixedDirections::new(Vec::new()).shuffled(), Direction::ALL);
    }
}
