//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the rifa reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the raffles table.
///
/// `boletos_vendidos` is a denormalized counter covering pending and paid
/// reservations; it is adjusted in the same transaction as any reservation
/// change and reconciled (clamped) on expiry.
pub const CREATE_RAFFLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rifas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        precio_boleto INTEGER NOT NULL,
        total_boletos INTEGER NOT NULL,
        boletos_vendidos INTEGER NOT NULL DEFAULT 0,
        estado TEXT NOT NULL DEFAULT 'activa',
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// One row per reservation (a buyer's batch of numbers). `numero_boleto`
/// stores the display rendering of the numbers; the authoritative per-number
/// ownership lives in `boleto_numeros`.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS boletos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        rifa_id INTEGER NOT NULL REFERENCES rifas(id),
        numero_boleto TEXT NOT NULL,
        folio TEXT NOT NULL UNIQUE,
        comprador_nombre TEXT NOT NULL,
        comprador_telefono TEXT NOT NULL,
        estado TEXT NOT NULL DEFAULT 'pendiente',
        monto_pagado INTEGER NOT NULL,
        referencia_pago TEXT NOT NULL DEFAULT 'PENDIENTE',
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the per-number ownership table.
///
/// The composite primary key (`rifa_id`, `numero`) is what makes concurrent
/// double-allocation impossible: two transactions inserting the same number
/// for the same raffle cannot both commit. Rows exist only while the owning
/// reservation is pending or paid; expiry deletes them.
pub const CREATE_NUMBERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS boleto_numeros (
        rifa_id INTEGER NOT NULL REFERENCES rifas(id),
        numero INTEGER NOT NULL,
        boleto_id INTEGER NOT NULL REFERENCES boletos(id),
        PRIMARY KEY (rifa_id, numero)
    )";

/// SQL statement to create the activity log table.
///
/// Append-only audit trail. `metadata` holds a JSON object.
pub const CREATE_ACTIVITIES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS actividades (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tipo TEXT NOT NULL,
        descripcion TEXT NOT NULL,
        monto INTEGER NOT NULL DEFAULT 0,
        metadata TEXT NOT NULL DEFAULT '{}',
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create an index on the reservations' raffle column.
///
/// This index speeds up per-raffle listings and held-number queries.
pub const CREATE_RESERVATION_RAFFLE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_boletos_rifa ON boletos(rifa_id)";

/// SQL statement to create an index on the buyer contact column.
///
/// This index speeds up status lookups by phone number.
pub const CREATE_RESERVATION_CONTACT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_boletos_telefono ON boletos(comprador_telefono)";

/// SQL statement to create an index on the numbers table's reservation column.
///
/// This index speeds up releasing a reservation's numbers on expiry.
pub const CREATE_NUMBERS_RESERVATION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_boleto_numeros_boleto ON boleto_numeros(boleto_id)";

/// SQL statement to create an index on the activity log's timestamp column.
///
/// This index speeds up recent-activity listings.
pub const CREATE_ACTIVITY_CREATED_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_actividades_created ON actividades(created_at)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation row.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO boletos
    (rifa_id, numero_boleto, folio, comprador_nombre, comprador_telefono,
     estado, monto_pagado, referencia_pago, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement to insert one per-number ownership row.
pub const INSERT_NUMBER: &str = r"
    INSERT INTO boleto_numeros (rifa_id, numero, boleto_id)
    VALUES (?, ?, ?)
";

/// SQL statement to delete all per-number rows of a reservation.
///
/// Used when a reservation expires and its numbers return to the pool.
pub const DELETE_RESERVATION_NUMBERS: &str = r"
    DELETE FROM boleto_numeros
    WHERE boleto_id = ?
";
