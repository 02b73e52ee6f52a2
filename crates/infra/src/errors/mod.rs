//! Infrastructure error handling.
//!
//! Driver errors are converted into [`SectorGridError`] through the
//! [`InfraError`] newtype so the mapping rules live in one place.
//!
//! [`SectorGridError`]: sectorgrid_domain::SectorGridError

mod conversions;

pub use conversions::InfraError;
