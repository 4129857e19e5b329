//! Random ticket number allocation.
//!
//! This module implements the number pool resolver: given a raffle's
//! capacity and the set of numbers held by active reservations, it draws
//! distinct unused numbers uniformly at random.
//!
//! The resolver is a pure function of its inputs. It holds no state and may
//! be called concurrently from any number of reservation attempts; conflicts
//! between concurrent winners are resolved by the database's uniqueness
//! constraint, not here.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::ticket::TicketNumber;

/// Multiplier on `count` bounding the rejection-sampling phase before the
/// resolver falls back to sampling the enumerated free set.
const REJECTION_DRAW_FACTOR: u32 = 8;

/// Selects `count` distinct unused ticket numbers in `[1, capacity]`.
///
/// Numbers already in `excluded` are never returned. Excluded numbers
/// outside `[1, capacity]` are ignored when computing availability.
///
/// The draw is uniform: while inventory is plentiful, rejection sampling is
/// used; once a bounded number of draws have been rejected the resolver
/// enumerates the remaining free numbers and samples those directly, so the
/// call always terminates deterministically instead of looping on a nearly
/// sold-out raffle.
///
/// # Errors
///
/// - [`Error::Validation`] if `count` is zero or `capacity` is zero.
/// - [`Error::InsufficientInventory`] if fewer than `count` numbers are free.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rifa::allocator::select_numbers;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let numbers = select_numbers(100, &HashSet::new(), 3, &mut rng).unwrap();
/// assert_eq!(numbers.len(), 3);
/// ```
pub fn select_numbers(
    capacity: u32,
    excluded: &HashSet<TicketNumber>,
    count: u32,
    rng: &mut impl Rng,
) -> Result<Vec<TicketNumber>> {
    if count == 0 {
        return Err(Error::Validation {
            field: "cantidad".into(),
            message: "must request at least one ticket".into(),
        });
    }
    if capacity == 0 {
        return Err(Error::Validation {
            field: "total_boletos".into(),
            message: "capacity must be at least 1".into(),
        });
    }

    let held_in_range = excluded
        .iter()
        .filter(|n| n.within_capacity(capacity))
        .count() as u32;
    let available = capacity - held_in_range;
    if count > available {
        return Err(Error::InsufficientInventory {
            requested: count,
            available,
        });
    }

    let mut selected: Vec<TicketNumber> = Vec::with_capacity(count as usize);
    let mut selected_set: HashSet<TicketNumber> = HashSet::with_capacity(count as usize);

    // Phase 1: rejection sampling. Cheap while the raffle is mostly unsold.
    let max_draws = count.saturating_mul(REJECTION_DRAW_FACTOR).max(64);
    let mut draws = 0;
    while selected.len() < count as usize && draws < max_draws {
        draws += 1;
        let value = rng.gen_range(1..=capacity);
        let number = TicketNumber::try_from(value)?;
        if excluded.contains(&number) || selected_set.contains(&number) {
            continue;
        }
        selected_set.insert(number);
        selected.push(number);
    }

    // Phase 2: the pool is crowded. Enumerate what is actually free and
    // sample the remainder from it; this bounds total work by the capacity.
    if selected.len() < count as usize {
        let remaining = count as usize - selected.len();
        let mut extra = (1..=capacity)
            .filter_map(|value| TicketNumber::try_from(value).ok())
            .filter(|n| !excluded.contains(n) && !selected_set.contains(n))
            .choose_multiple(rng, remaining);

        // The availability pre-check guarantees enough free numbers exist.
        debug_assert_eq!(extra.len(), remaining);
        if extra.len() < remaining {
            return Err(Error::InsufficientInventory {
                requested: count,
                available: (selected.len() + extra.len()) as u32,
            });
        }
        selected.append(&mut extra);
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xB01E70)
    }

    fn excluded(values: &[u32]) -> HashSet<TicketNumber> {
        values
            .iter()
            .map(|v| TicketNumber::try_from(*v).unwrap())
            .collect()
    }

    #[test]
    fn test_select_from_empty_pool() {
        let numbers = select_numbers(10, &HashSet::new(), 3, &mut rng()).unwrap();
        assert_eq!(numbers.len(), 3);
        for n in &numbers {
            assert!(n.value() >= 1 && n.value() <= 10);
        }
    }

    #[test]
    fn test_select_returns_distinct_numbers() {
        let numbers = select_numbers(50, &HashSet::new(), 50, &mut rng()).unwrap();
        let unique: HashSet<_> = numbers.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_select_avoids_excluded() {
        let held = excluded(&[1, 2, 3, 4, 5]);
        let numbers = select_numbers(10, &held, 5, &mut rng()).unwrap();
        assert_eq!(numbers.len(), 5);
        for n in &numbers {
            assert!(!held.contains(n), "drew an excluded number {n}");
        }
    }

    #[test]
    fn test_select_exactly_the_free_numbers() {
        // 10 capacity, 7 held: the 3 free numbers must all be selected.
        let held = excluded(&[1, 2, 3, 4, 5, 6, 7]);
        let mut numbers = select_numbers(10, &held, 3, &mut rng()).unwrap();
        numbers.sort();
        let values: Vec<u32> = numbers.iter().map(|n| n.value()).collect();
        assert_eq!(values, vec![8, 9, 10]);
    }

    #[test]
    fn test_select_insufficient_inventory() {
        let held = excluded(&[1, 2, 3]);
        let result = select_numbers(5, &held, 3, &mut rng());
        match result {
            Err(Error::InsufficientInventory {
                requested,
                available,
            }) => {
                assert_eq!(requested, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected InsufficientInventory, got {other:?}"),
        }
    }

    #[test]
    fn test_select_full_raffle() {
        let held: HashSet<_> = (1..=5)
            .map(|v| TicketNumber::try_from(v).unwrap())
            .collect();
        let result = select_numbers(5, &held, 1, &mut rng());
        assert!(matches!(
            result,
            Err(Error::InsufficientInventory {
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn test_select_zero_count_rejected() {
        let result = select_numbers(10, &HashSet::new(), 0, &mut rng());
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_select_zero_capacity_rejected() {
        let result = select_numbers(0, &HashSet::new(), 1, &mut rng());
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_excluded_outside_capacity_ignored() {
        // Numbers above capacity in the excluded set must not shrink the
        // available count.
        let held = excluded(&[100, 200, 300]);
        let numbers = select_numbers(10, &held, 10, &mut rng()).unwrap();
        assert_eq!(numbers.len(), 10);
    }

    #[test]
    fn test_nearly_sold_out_terminates() {
        // 1000 capacity with 999 held forces the enumeration fallback.
        let held: HashSet<_> = (1..=999)
            .map(|v| TicketNumber::try_from(v).unwrap())
            .collect();
        let numbers = select_numbers(1000, &held, 1, &mut rng()).unwrap();
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].value(), 1000);
    }

    #[test]
    fn test_full_capacity_request() {
        let numbers = select_numbers(64, &HashSet::new(), 64, &mut rng()).unwrap();
        assert_eq!(numbers.len(), 64);
        let unique: HashSet<_> = numbers.iter().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn test_deterministic_with_seeded_rng() {
        let a = select_numbers(100, &HashSet::new(), 5, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = select_numbers(100, &HashSet::new(), 5, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    proptest! {
        // PROPERTY: every successful selection is distinct, in range, and
        // disjoint from the excluded set.
        #[test]
        fn prop_selection_is_valid(
            capacity in 1u32..500,
            held_fraction in 0u32..100,
            count in 1u32..20,
            seed in any::<u64>(),
        ) {
            let held: HashSet<TicketNumber> = (1..=capacity)
                .filter(|v| v % 100 < held_fraction)
                .map(|v| TicketNumber::try_from(v).unwrap())
                .collect();
            let mut rng = StdRng::seed_from_u64(seed);

            match select_numbers(capacity, &held, count, &mut rng) {
                Ok(numbers) => {
                    prop_assert_eq!(numbers.len(), count as usize);
                    let unique: HashSet<_> = numbers.iter().copied().collect();
                    prop_assert_eq!(unique.len(), count as usize);
                    for n in &numbers {
                        prop_assert!(n.value() >= 1 && n.value() <= capacity);
                        prop_assert!(!held.contains(n));
                    }
                }
                Err(Error::InsufficientInventory { available, .. }) => {
                    prop_assert!(count > available);
                }
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
        }

        // PROPERTY: the resolver never mutates its inputs and never succeeds
        // when the free pool is too small.
        #[test]
        fn prop_never_over_allocates(
            capacity in 1u32..100,
            count in 1u32..200,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = select_numbers(capacity, &HashSet::new(), count, &mut rng);
            if count > capacity {
                prop_assert!(matches!(result, Err(Error::InsufficientInventory { .. })));
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}
