//! End-to-end reservation lifecycle tests.
//!
//! These tests drive the public library API the way the CLI does: create a
//! raffle, reserve numbers, attach a payment reference, confirm or expire,
//! and check the buyer-facing status report along the way.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use rifa::config::PurchaseConfig;
use rifa::{
    expire, mark_paid, status_by_contact, status_by_folio, submit_payment_reference, Config,
    ConfigBuilder, Database, DatabaseConfig, Error, Raffle, RaffleState, ReservationManager,
    ReservationState, ReserveRequest,
};

fn open_db(dir: &TempDir) -> Database {
    Database::open(DatabaseConfig::new(dir.path().join("rifa.db"))).unwrap()
}

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

fn create_raffle(db: &mut Database, capacity: u32) -> i64 {
    let raffle = Raffle::builder("Rifa Moto 2026", "rifa-moto", 10_000, capacity)
        .build()
        .unwrap();
    db.create_raffle(&raffle).unwrap().id()
}

fn reserve(db: &mut Database, config: &Config, raffle_id: i64, quantity: u32, seed: u64) -> i64 {
    let outcome = ReservationManager::new(db, config)
        .reserve(
            &ReserveRequest {
                raffle_id,
                quantity,
                buyer_name: "Ana Torres".to_string(),
                buyer_contact: "5512345678".to_string(),
            },
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
    outcome.reservation.id()
}

#[test]
fn full_purchase_flow() {
    let dir = TempDir::new().unwrap();
    let mut db = open_db(&dir);
    let config = no_minimum_config();
    let raffle_id = create_raffle(&mut db, 100);

    // Buyer reserves 3 tickets
    let reservation_id = reserve(&mut db, &config, raffle_id, 3, 1);
    let reservation = db.get_reservation(reservation_id).unwrap();
    assert_eq!(reservation.state(), ReservationState::Pending);
    assert_eq!(reservation.amount_cents(), 30_000);
    assert_eq!(db.get_raffle(raffle_id).unwrap().sold(), 3);

    // Buyer submits their transfer reference
    let updated = submit_payment_reference(&mut db, reservation_id, "BBVA-00123").unwrap();
    assert_eq!(updated.payment_reference(), Some("BBVA-00123"));
    assert_eq!(updated.state(), ReservationState::Pending);

    // Admin confirms the payment
    let outcome = mark_paid(&mut db, reservation_id, None).unwrap();
    assert!(!outcome.already_paid);
    assert_eq!(outcome.reservation.state(), ReservationState::Paid);
    // The earlier reference survives confirmation
    assert_eq!(outcome.reservation.payment_reference(), Some("BBVA-00123"));

    // Counter unchanged by payment; numbers still held
    assert_eq!(db.get_raffle(raffle_id).unwrap().sold(), 3);
    assert_eq!(db.held_numbers(raffle_id).unwrap().len(), 3);

    // Audit trail holds a reservation and a payment entry
    let activities = db.list_activities(10).unwrap();
    assert_eq!(activities.len(), 2);
}

#[test]
fn reserve_three_then_expire_on_capacity_ten() {
    let dir = TempDir::new().unwrap();
    let mut db = open_db(&dir);
    let config = no_minimum_config();
    let raffle_id = create_raffle(&mut db, 10);

    let reservation_id = reserve(&mut db, &config, raffle_id, 3, 2);
    let raffle = db.get_raffle(raffle_id).unwrap();
    assert_eq!(raffle.sold(), 3);
    assert_eq!(raffle.remaining(), 7);

    let outcome = expire(&mut db, reservation_id).unwrap();
    assert_eq!(outcome.released, 3);
    assert_eq!(outcome.counter.current, 0);
    assert!(!outcome.counter.clamped);

    let raffle = db.get_raffle(raffle_id).unwrap();
    assert_eq!(raffle.sold(), 0);
    assert_eq!(raffle.remaining(), 10);
    assert!(db.held_numbers(raffle_id).unwrap().is_empty());

    // The full pool is sellable again
    reserve(&mut db, &config, raffle_id, 10, 3);
    assert_eq!(db.get_raffle(raffle_id).unwrap().remaining(), 0);
}

#[test]
fn paid_reservations_survive_expiry_attempts() {
    let dir = TempDir::new().unwrap();
    let mut db = open_db(&dir);
    let config = no_minimum_config();
    let raffle_id = create_raffle(&mut db, 10);

    let reservation_id = reserve(&mut db, &config, raffle_id, 2, 4);
    mark_paid(&mut db, reservation_id, None).unwrap();

    let err = expire(&mut db, reservation_id).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidStateTransition {
            from: ReservationState::Paid,
            ..
        }
    ));
    assert_eq!(db.held_numbers(raffle_id).unwrap().len(), 2);
    assert_eq!(db.get_raffle(raffle_id).unwrap().sold(), 2);
}

#[test]
fn mark_paid_is_idempotent_across_sessions() {
    let dir = TempDir::new().unwrap();
    let mut db = open_db(&dir);
    let config = no_minimum_config();
    let raffle_id = create_raffle(&mut db, 10);
    let reservation_id = reserve(&mut db, &config, raffle_id, 1, 5);

    mark_paid(&mut db, reservation_id, Some("REF-1")).unwrap();
    drop(db);

    // A second admin session confirms again
    let mut db = open_db(&dir);
    let second = mark_paid(&mut db, reservation_id, Some("REF-2")).unwrap();
    assert!(second.already_paid);
    // The original reference stands
    assert_eq!(second.reservation.payment_reference(), Some("REF-1"));

    // Exactly one payment activity in the trail
    let payments = db
        .list_activities(50)
        .unwrap()
        .into_iter()
        .filter(|a| a.kind() == rifa::ActivityKind::PaymentConfirmed)
        .count();
    assert_eq!(payments, 1);
}

#[test]
fn status_report_follows_the_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut db = open_db(&dir);
    let config = no_minimum_config();
    let raffle_id = create_raffle(&mut db, 100);

    let paid = reserve(&mut db, &config, raffle_id, 2, 6);
    let pending = reserve(&mut db, &config, raffle_id, 1, 7);
    let lapsed = reserve(&mut db, &config, raffle_id, 1, 8);
    mark_paid(&mut db, paid, None).unwrap();
    expire(&mut db, lapsed).unwrap();

    let report = status_by_contact(&db, "5512345678", None).unwrap();
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.paid_cents, 20_000);
    assert_eq!(report.pending_cents, 10_000);

    let pending_folio = db.get_reservation(pending).unwrap().folio().clone();
    let status = status_by_folio(&db, pending_folio.as_str()).unwrap();
    assert_eq!(status.reservation.state(), ReservationState::Pending);
    assert_eq!(status.raffle_name, "Rifa Moto 2026");
}

#[test]
fn paused_raffle_rejects_but_keeps_existing_reservations() {
    let dir = TempDir::new().unwrap();
    let mut db = open_db(&dir);
    let config = no_minimum_config();
    let raffle_id = create_raffle(&mut db, 100);

    let reservation_id = reserve(&mut db, &config, raffle_id, 2, 9);
    db.set_raffle_state(raffle_id, RaffleState::Paused).unwrap();

    let err = ReservationManager::new(&mut db, &config)
        .reserve(
            &ReserveRequest {
                raffle_id,
                quantity: 1,
                buyer_name: "Otro".to_string(),
                buyer_contact: "5550000000".to_string(),
            },
            &mut StdRng::seed_from_u64(10),
        )
        .unwrap_err();
    assert!(matches!(err, Error::RaffleInactive { .. }));

    // Existing reservations can still be confirmed while paused
    let outcome = mark_paid(&mut db, reservation_id, None).unwrap();
    assert_eq!(outcome.reservation.state(), ReservationState::Paid);
}

#[test]
fn reservations_persist_across_reopen() {
    let dir = TempDir::new().unwrap();
    let reservation_id;
    {
        let mut db = open_db(&dir);
        let config = no_minimum_config();
        let raffle_id = create_raffle(&mut db, 100);
        reservation_id = reserve(&mut db, &config, raffle_id, 3, 11);
    }

    let db = open_db(&dir);
    let reservation = db.get_reservation(reservation_id).unwrap();
    assert_eq!(reservation.quantity(), 3);
    assert_eq!(reservation.state(), ReservationState::Pending);
    assert_eq!(db.held_numbers(reservation.raffle_id()).unwrap().len(), 3);
}
