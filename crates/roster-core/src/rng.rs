// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::date::Date;

const MODULUS: i64 = 2147483647;
const MULTIPLIER: i64 = 16807;

/// The Park-Miller "minimal standard" multiplicative congruential generator.
/// Not remotely secure: it exists so that everyone sees the same order on the
/// same day.
pub struct ParkMiller {
    state: i64,
}

impl ParkMiller {
    /// Initialize the generator. The seed is reduced modulo 2^31 - 1 and moved
    /// into `(0, 2^31 - 1)`, since a zero state would stay zero forever.
    pub fn from_seed(seed: i64) -> Self {
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS - 1;
        }
        Self { state }
    }

    /// Seeded with the day code of `date`.
    pub fn for_date(date: Date) -> Self {
        Self::from_seed(date.seed())
    }

    pub fn next_state(&mut self) -> i64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        self.state
    }

    /// Generate a number in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_state() - 1) as f64 / (MODULUS - 1) as f64
    }

    // Generate an index in `[0, bound)`.
    fn next_index(&mut self, bound: usize) -> usize {
        let j = (self.next_f64() * bound as f64).floor() as usize;
        j.min(bound - 1)
    }
}

/// Fisher-Yates, from the last index down. The input is left untouched.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut ParkMiller) -> Vec<T> {
    let mut v = items.to_vec();
    for i in (1..v.len()).rev() {
        let j = rng.next_index(i + 1);
        v.swap(i, j);
    }
    v
}

/// Shuffle with a generator seeded from `date`: the same input gives the same
/// order all day.
pub fn daily_shuffle<T: Clone>(items: &[T], date: Date) -> Vec<T> {
    let mut rng = ParkMiller::for_date(date);
    shuffle(items, &mut rng)
}
