//! Concurrency tests for number allocation.
//!
//! These tests deliberately race multiple connections against one database
//! file to verify the core guarantee: a ticket number is never handed to two
//! buyers, no matter how the draws interleave. The per-number primary key
//! plus the bounded retry loop is what makes this hold.

use std::collections::HashSet;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use rifa::config::PurchaseConfig;
use rifa::{
    Config, ConfigBuilder, Database, DatabaseConfig, Error, Raffle, ReservationManager,
    ReserveRequest, TicketNumber,
};

fn no_minimum_config() -> Config {
    ConfigBuilder::new()
        .skip_files()
        .skip_env()
        .with_config(Config {
            purchase: Some(PurchaseConfig {
                min_purchase_cents: Some(0),
                quantity_presets: None,
            }),
            ..Default::default()
        })
        .build()
        .unwrap()
}

fn setup_raffle(dir: &TempDir, capacity: u32) -> i64 {
    let mut db = Database::open(DatabaseConfig::new(dir.path().join("rifa.db"))).unwrap();
    let raffle = Raffle::builder("Rifa Concurrente", "rifa-concurrente", 10_000, capacity)
        .build()
        .unwrap();
    db.create_raffle(&raffle).unwrap().id()
}

fn reserve_from_thread(
    db_path: std::path::PathBuf,
    raffle_id: i64,
    quantity: u32,
    seed: u64,
) -> Result<Vec<TicketNumber>, Error> {
    let mut db = Database::open(DatabaseConfig::new(db_path))?;
    let config = no_minimum_config();
    let outcome = ReservationManager::new(&mut db, &config).reserve(
        &ReserveRequest {
            raffle_id,
            quantity,
            buyer_name: format!("Comprador {seed}"),
            buyer_contact: format!("555000{seed:04}"),
        },
        &mut StdRng::seed_from_u64(seed),
    )?;
    Ok(outcome.reservation.numbers().to_vec())
}

#[test]
fn concurrent_buyers_never_share_a_number() {
    let dir = TempDir::new().unwrap();
    let raffle_id = setup_raffle(&dir, 40);
    let db_path = dir.path().join("rifa.db");

    // 10 buyers of 4 tickets each exactly fill the raffle; every draw
    // overlaps heavily with the others.
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let db_path = db_path.clone();
            thread::spawn(move || reserve_from_thread(db_path, raffle_id, 4, i))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let mut all_numbers = HashSet::new();
    let mut successes = 0;
    for result in results {
        match result {
            Ok(numbers) => {
                successes += 1;
                for n in numbers {
                    assert!(all_numbers.insert(n), "number {n} allocated twice");
                }
            }
            // Heavy contention may exhaust an attempt budget; losing cleanly
            // is acceptable, losing a number is not.
            Err(Error::AllocationFailed { .. } | Error::InsufficientInventory { .. }) => {}
            Err(e) => panic!("unexpected error under contention: {e}"),
        }
    }

    assert!(successes >= 8, "only {successes} of 10 buyers succeeded");

    // The database agrees with what the winners report
    let db = Database::open(DatabaseConfig::new(db_path)).unwrap();
    let held = db.held_numbers(raffle_id).unwrap();
    assert_eq!(held, all_numbers);
    assert_eq!(db.get_raffle(raffle_id).unwrap().sold() as usize, held.len());
}

#[test]
fn exact_fit_single_ticket_buyers_all_win() {
    let dir = TempDir::new().unwrap();
    let raffle_id = setup_raffle(&dir, 6);
    let db_path = dir.path().join("rifa.db");

    // 6 buyers of one ticket each against 6 remaining numbers. Writers are
    // serialized by the immediate transaction and every attempt re-reads the
    // held set, so none of them may lose.
    let handles: Vec<_> = (0..6)
        .map(|i| {
            let db_path = db_path.clone();
            thread::spawn(move || reserve_from_thread(db_path, raffle_id, 1, 300 + i))
        })
        .collect();

    let mut all_numbers = HashSet::new();
    for handle in handles {
        let numbers = handle.join().unwrap().unwrap();
        assert_eq!(numbers.len(), 1);
        for n in numbers {
            assert!(all_numbers.insert(n), "number {n} allocated twice");
        }
    }
    assert_eq!(all_numbers.len(), 6);

    // The raffle is now full; one more single-ticket request fails cleanly
    let err = reserve_from_thread(db_path.clone(), raffle_id, 1, 399).unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientInventory {
            requested: 1,
            available: 0
        }
    ));

    let db = Database::open(DatabaseConfig::new(db_path)).unwrap();
    let raffle = db.get_raffle(raffle_id).unwrap();
    assert_eq!(raffle.sold(), 6);
    assert_eq!(raffle.remaining(), 0);
}

#[test]
fn overselling_is_impossible() {
    let dir = TempDir::new().unwrap();
    let raffle_id = setup_raffle(&dir, 10);
    let db_path = dir.path().join("rifa.db");

    // 8 buyers of 2 tickets each want 16 from a pool of 10
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let db_path = db_path.clone();
            thread::spawn(move || reserve_from_thread(db_path, raffle_id, 2, 100 + i))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();

    assert!(successes <= 5, "{successes} buyers got tickets from a pool of 10");

    let db = Database::open(DatabaseConfig::new(db_path)).unwrap();
    let raffle = db.get_raffle(raffle_id).unwrap();
    assert!(raffle.sold() <= raffle.capacity());
    assert_eq!(
        db.held_numbers(raffle_id).unwrap().len(),
        raffle.sold() as usize
    );

    // Once full, one more request fails with a clean inventory error
    if raffle.remaining() == 0 {
        let err = reserve_from_thread(dir.path().join("rifa.db"), raffle_id, 1, 999).unwrap_err();
        assert!(matches!(err, Error::InsufficientInventory { .. }));
    }
}

#[test]
fn folios_stay_unique_under_contention() {
    let dir = TempDir::new().unwrap();
    let raffle_id = setup_raffle(&dir, 60);
    let db_path = dir.path().join("rifa.db");

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let db_path = db_path.clone();
            thread::spawn(move || reserve_from_thread(db_path, raffle_id, 3, 200 + i))
        })
        .collect();

    for handle in handles {
        // Plenty of inventory; every buyer should succeed
        handle.join().unwrap().unwrap();
    }

    let db = Database::open(DatabaseConfig::new(db_path)).unwrap();
    let reservations = db.list_reservations(Some(raffle_id)).unwrap();
    assert_eq!(reservations.len(), 12);

    let folios: HashSet<_> = reservations
        .iter()
        .map(|r| r.folio().as_str().to_string())
        .collect();
    assert_eq!(folios.len(), 12, "duplicate folios issued");
}
