// Mappers module - concrete bank-switching implementations
//
// Contains the mapper registry and the individual mapper implementations.
// The registry maps numeric iNES mapper ids to constructors so that loading
// stays free of global mutable registration state.

mod mapper0;
mod mapper1;

pub use mapper0::Mapper0;
pub use mapper1::Mapper1;

use super::{Cartridge, Mapper};

/// Error type for mapper creation
#[derive(Debug)]
pub enum MapperError {
    /// The requested mapper id is not supported
    UnsupportedMapper(u8),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(id) => {
                write!(f, "mapper {} is not supported", id)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Create the mapper instance for a loaded cartridge
///
/// The mapper id comes from the iNES header. An unknown id is a fatal
/// configuration error: there is no sensible fallback for an unimplemented
/// banking scheme.
///
/// # Errors
/// Returns `MapperError::UnsupportedMapper` for ids without an
/// implementation.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.mapper {
        0 => Ok(Box::new(Mapper0::new(cartridge))),
        1 => Ok(Box::new(Mapper1::new(cartridge))),
        id => Err(MapperError::UnsupportedMapper(id)),
    }
}
