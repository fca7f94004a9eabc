// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

#[cfg(test)]
mod random_operations_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rampart::Sequence;

    const BIGNUM: usize = 100_000;

    #[test]
    fn test_random_operations_match_vec() {
        let mut seq = Sequence::from_elem(BIGNUM, &1337usize).expect("Failed to from_elem(..)");
        let mut model = vec![1337usize; BIGNUM];
        let mut rng = StdRng::seed_from_u64(101);

        for i in 0..BIGNUM {
            match rng.random_range(1..=3u8) {
                1 => {
                    seq.push(i).expect("Failed to push(..)");
                    model.push(i);
                }
                2 => {
                    assert_eq!(seq.is_empty(), model.is_empty());
                    assert_eq!(seq.back(), model.last());
                    assert_eq!(seq.pop(), model.pop());
                }
                _ => {
                    if !model.is_empty() {
                        let index = rng.random_range(0..model.len());
                        assert_eq!(seq[index], model[index]);
                        seq[index] = 228;
                        model[index] = 228;
                    }
                }
            }

            assert_eq!(seq.len(), model.len());
        }

        assert_eq!(seq.as_slice(), model.as_slice());
    }

    #[test]
    fn test_random_resizes_match_vec() {
        let mut seq = Sequence::new();
        let mut model: Vec<u32> = Vec::new();
        let mut rng = StdRng::seed_from_u64(228);

        for _ in 0..2_000 {
            let len = rng.random_range(0..512usize);
            let value = rng.random::<u32>();

            seq.resize(len, &value).expect("Failed to resize(..)");
            model.resize(len, value);

            assert_eq!(seq.as_slice(), model.as_slice());
            assert!(seq.capacity() >= model.len());
        }
    }
}
