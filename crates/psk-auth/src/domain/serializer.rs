//! # Serializer Adapter
//!
//! Converts values to and from bytes in the agreed [`SerializationMode`].
//!
//! The mode is fixed when the serializer is built and is not recorded in the
//! output, so a peer decoding with a different mode gets a
//! `SecurityError::Deserialization`, never an authentication failure.

use crate::domain::errors::SecurityError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::SerializationMode;
use tracing::trace;

/// Mode-bound encoder/decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Serializer {
    mode: SerializationMode,
}

impl Serializer {
    /// Creates a serializer for `mode`.
    pub fn new(mode: SerializationMode) -> Self {
        Self { mode }
    }

    /// The mode this serializer speaks.
    pub fn mode(&self) -> SerializationMode {
        self.mode
    }

    /// Encodes `value`.
    ///
    /// # Errors
    ///
    /// `SecurityError::Serialization` if the value cannot be represented.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, SecurityError> {
        trace!(serializer = %self.mode, "Serializing");

        match self.mode {
            SerializationMode::Binary => {
                bincode::serialize(value).map_err(|e| self.serialization_error(e))
            }
            SerializationMode::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| self.serialization_error(e)),
        }
    }

    /// Decodes a `T` from `bytes`.
    ///
    /// # Errors
    ///
    /// `SecurityError::Deserialization` if the bytes are not a valid `T` in
    /// this mode.
    pub fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SecurityError> {
        trace!(serializer = %self.mode, len = bytes.len(), "De-serializing");

        match self.mode {
            SerializationMode::Binary => {
                bincode::deserialize(bytes).map_err(|e| self.deserialization_error(e))
            }
            SerializationMode::Yaml => {
                serde_yaml::from_slice(bytes).map_err(|e| self.deserialization_error(e))
            }
        }
    }

    fn serialization_error(&self, err: impl std::fmt::Display) -> SecurityError {
        SecurityError::Serialization {
            mode: self.mode,
            message: err.to_string(),
        }
    }

    fn deserialization_error(&self, err: impl std::fmt::Display) -> SecurityError {
        SecurityError::Deserialization {
            mode: self.mode,
            message: err.to_string(),
        }
    }
}
