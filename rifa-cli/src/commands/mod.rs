//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the rifa data directory and database
//! - `crear`: Register a new raffle
//! - `rifas`: List registered raffles
//! - `estado`: Change a raffle's lifecycle state
//! - `apartar`: Reserve random ticket numbers for a buyer
//! - `referencia`: Attach a buyer's payment reference to a reservation
//! - `pagar`: Confirm payment of a reservation
//! - `vencer`: Expire a pending reservation and release its numbers
//! - `verificar`: Look up reservations by phone or folio
//! - `boletos`: List reservations for a raffle
//! - `actividad`: Show the recent activity log
//! - `pago`: Show configured payment methods

pub mod actividad;
pub mod apartar;
pub mod boletos;
pub mod crear;
pub mod estado;
pub mod init;
pub mod pagar;
pub mod pago;
pub mod referencia;
pub mod rifas;
pub mod vencer;
pub mod verificar;

pub use actividad::ActividadCommand;
pub use apartar::ApartarCommand;
pub use boletos::BoletosCommand;
pub use crear::CrearCommand;
pub use estado::EstadoCommand;
pub use init::InitCommand;
pub use pagar::PagarCommand;
pub use pago::PagoCommand;
pub use referencia::ReferenciaCommand;
pub use rifas::RifasCommand;
pub use vencer::VencerCommand;
pub use verificar::VerificarCommand;
