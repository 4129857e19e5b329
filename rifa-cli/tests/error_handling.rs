//! Error-path tests: exit codes and user-facing messages for sold-out
//! raffles, purchase rules, and configuration problems.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_sold_out_exits_with_semantic_failure() {
    let env = TestEnv::new();
    env.crear_rifa("rifa-chica", 10_000, 5);
    env.apartar("rifa-chica", 5, "5512345678");

    env.command()
        .arg("apartar")
        .arg("--rifa")
        .arg("rifa-chica")
        .arg("--cantidad")
        .arg("1")
        .arg("--nombre")
        .arg("Otro")
        .arg("--telefono")
        .arg("5550000000")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("insufficient inventory"));
}

#[test]
fn test_minimum_purchase_enforced_from_config() {
    let env = TestEnv::bare();
    env.write_config("purchase:\n  min_purchase_cents: 50000\n");
    env.crear_rifa("rifa-moto", 10_000, 100);

    // 3 x $100.00 = $300.00, below the configured $500.00 floor
    env.command()
        .arg("apartar")
        .arg("--rifa")
        .arg("rifa-moto")
        .arg("--cantidad")
        .arg("3")
        .arg("--nombre")
        .arg("Ana")
        .arg("--telefono")
        .arg("555")
        .assert()
        .failure()
        .code(1);

    // 5 tickets meet it
    env.apartar("rifa-moto", 5, "5512345678");
}

#[test]
fn test_unknown_raffle_slug() {
    let env = TestEnv::new();
    env.crear_rifa("rifa-moto", 10_000, 100);

    env.command()
        .arg("apartar")
        .arg("--rifa")
        .arg("no-existe")
        .arg("--cantidad")
        .arg("1")
        .arg("--nombre")
        .arg("Ana")
        .arg("--telefono")
        .arg("555")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no-existe"));
}

#[test]
fn test_unknown_folio() {
    let env = TestEnv::new();
    env.crear_rifa("rifa-moto", 10_000, 100);

    env.command()
        .arg("pagar")
        .arg("RIFA-2026-ZZ99")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("RIFA-2026-ZZ99"));
}

#[test]
fn test_invalid_estado_value() {
    let env = TestEnv::new();
    env.crear_rifa("rifa-moto", 10_000, 100);

    env.command()
        .arg("estado")
        .arg("rifa-moto")
        .arg("cerrada")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("cerrada"));
}

#[test]
fn test_duplicate_slug_rejected() {
    let env = TestEnv::new();
    env.crear_rifa("rifa-moto", 10_000, 100);

    env.command()
        .arg("crear")
        .arg("--nombre")
        .arg("Rifa Repetida")
        .arg("--slug")
        .arg("rifa-moto")
        .arg("--precio")
        .arg("10000")
        .arg("--boletos")
        .arg("50")
        .assert()
        .failure();
}

#[test]
fn test_malformed_config_is_rejected() {
    let env = TestEnv::bare();
    env.write_config("unknown_setting: true\n");

    env.command()
        .arg("rifas")
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_pago_without_methods() {
    let env = TestEnv::new();

    env.command()
        .arg("pago")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sin metodos de pago"));
}

#[test]
fn test_pago_prints_configured_methods() {
    let env = TestEnv::bare();
    env.write_config(concat!(
        "payment_methods:\n",
        "  - tipo: transferencia\n",
        "    banco: BBVA\n",
        "    clabe: \"012345678901234567\"\n",
        "    titular: Maria Lopez\n",
        "  - tipo: deposito\n",
        "    banco: Banorte\n",
        "    tarjeta: \"4152313412345678\"\n",
        "    titular: Juan Perez\n",
    ));

    env.command()
        .arg("pago")
        .assert()
        .success()
        .stdout(predicate::str::contains("BBVA"))
        .stdout(predicate::str::contains("012345678901234567"))
        .stdout(predicate::str::contains("Banorte"))
        .stdout(predicate::str::contains("Juan Perez"));
}
