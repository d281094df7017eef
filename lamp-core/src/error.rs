//! Fehler-Typen des Command Handlers
//!
//! Alle Fehler sind lokal zu einem Handler-Aufruf und nie fatal.
//! Unbekannte Opcodes sind bewusst KEIN Fehler (werden ignoriert).

use core::fmt;

use crate::traits::ActuatorError;
use crate::types::NodeAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampError {
    /// Payload passt nicht zur erwarteten Länge des Opcodes
    ///
    /// `opcode` ist `None` wenn die Nachricht nicht einmal ein Opcode-Byte enthält.
    MalformedMessage {
        opcode: Option<u8>,
        expected: usize,
        actual: usize,
    },
    /// PWM-Treiber hat das Schreiben abgelehnt
    ActuatorWriteFailed(ActuatorError),
    /// Anwendungs-Nachricht vor (oder nach fehlgeschlagenem) Provisioning
    NotProvisioned,
    /// Adresse wurde bereits vergeben und ist unveränderlich
    AlreadyProvisioned(NodeAddress),
    /// Adresse liegt nicht im Unicast-Bereich
    InvalidAddress(NodeAddress),
}

impl fmt::Display for LampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedMessage {
                opcode: Some(op),
                expected,
                actual,
            } => write!(
                f,
                "malformed message: opcode {op:#04x} expects {expected} payload bytes, got {actual}"
            ),
            Self::MalformedMessage { opcode: None, .. } => {
                write!(f, "malformed message: missing opcode")
            }
            Self::ActuatorWriteFailed(e) => write!(f, "actuator write failed: {e}"),
            Self::NotProvisioned => write!(f, "node is not provisioned"),
            Self::AlreadyProvisioned(addr) => {
                write!(f, "node already provisioned as {:#06x}", addr.value())
            }
            Self::InvalidAddress(addr) => {
                write!(f, "{:#06x} is not a unicast address", addr.value())
            }
        }
    }
}

impl From<ActuatorError> for LampError {
    fn from(e: ActuatorError) -> Self {
        Self::ActuatorWriteFailed(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LampError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LampError::MalformedMessage {
                opcode,
                expected,
                actual,
            } => defmt::write!(
                fmt,
                "MalformedMessage {{ opcode: {}, expected: {}, actual: {} }}",
                opcode,
                expected,
                actual
            ),
            LampError::ActuatorWriteFailed(e) => {
                defmt::write!(fmt, "ActuatorWriteFailed({})", e)
            }
            LampError::NotProvisioned => defmt::write!(fmt, "NotProvisioned"),
            LampError::AlreadyProvisioned(addr) => {
                defmt::write!(fmt, "AlreadyProvisioned({})", addr)
            }
            LampError::InvalidAddress(addr) => defmt::write!(fmt, "InvalidAddress({})", addr),
        }
    }
}
