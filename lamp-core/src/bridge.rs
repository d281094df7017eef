//! Ereignisse vom Mesh-Stack
//!
//! Der Mesh-Stack läuft extern (Gateway). Er liefert Provisioning-Ereignisse
//! und Anwendungs-Nachrichten, die hier in `MeshEvent`s übersetzt werden.
//!
//! Provisioning-Reports haben ein eigenes kleines Format:
//!
//! | Bytes                      | Ereignis                    |
//! |----------------------------|-----------------------------|
//! | `[0x00]`                   | Provisioning gestartet      |
//! | `[0x01, addr_lo, addr_hi]` | Provisioning abgeschlossen  |
//! | `[0xFF]`                   | Provisioning fehlgeschlagen |

use heapless::Vec;

use crate::error::LampError;
use crate::message::LampCommand;
use crate::types::NodeAddress;

/// Maximale Länge einer Access-Nachricht (Opcode + Payload) im Mesh
pub const MAX_ACCESS_MESSAGE_LEN: usize = 380;

/// Puffer für eine Anwendungs-Nachricht
pub type MessageBuffer = Vec<u8, MAX_ACCESS_MESSAGE_LEN>;

const REPORT_STARTED: u8 = 0x00;
const REPORT_COMPLETE: u8 = 0x01;
const REPORT_FAILED: u8 = 0xFF;

/// Ereignis vom Mesh-Stack an den Lampen-Task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshEvent {
    ProvisioningStarted,
    Provisioned(NodeAddress),
    ProvisioningFailed,
    /// Rohe Anwendungs-Nachricht (Opcode + Payload)
    Message(MessageBuffer),
}

impl MeshEvent {
    /// Kopiert eine rohe Nachricht in ein `MeshEvent::Message`
    ///
    /// Nachrichten über `MAX_ACCESS_MESSAGE_LEN` kann kein Mesh-Stack liefern
    /// und werden als `MalformedMessage` abgelehnt.
    pub fn message(bytes: &[u8]) -> Result<Self, LampError> {
        Vec::from_slice(bytes)
            .map(MeshEvent::Message)
            .map_err(|_| LampError::MalformedMessage {
                opcode: bytes.first().copied(),
                expected: MAX_ACCESS_MESSAGE_LEN,
                actual: bytes.len(),
            })
    }

    /// Dekodiert einen Provisioning-Report
    ///
    /// Gibt `None` zurück wenn der Report nicht dem Format entspricht.
    pub fn from_provisioning_report(report: &[u8]) -> Option<Self> {
        match report {
            [REPORT_STARTED] => Some(MeshEvent::ProvisioningStarted),
            [REPORT_COMPLETE, lo, hi] => Some(MeshEvent::Provisioned(NodeAddress(
                u16::from_le_bytes([*lo, *hi]),
            ))),
            [REPORT_FAILED] => Some(MeshEvent::ProvisioningFailed),
            _ => None,
        }
    }

    /// Übersetzt einen Preset-Namen ("red", "green", "purple") in eine
    /// "set color" Nachricht
    ///
    /// Die Nachricht durchläuft danach denselben Weg wie jede andere,
    /// inklusive Provisioning-Prüfung im Lampen-Knoten.
    pub fn from_preset(name: &[u8]) -> Option<Self> {
        let name = core::str::from_utf8(name).ok()?;
        let command = LampCommand::try_from(name).ok()?;
        Some(MeshEvent::Message(command.encode()))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MeshEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MeshEvent::ProvisioningStarted => defmt::write!(fmt, "ProvisioningStarted"),
            MeshEvent::Provisioned(addr) => defmt::write!(fmt, "Provisioned({})", addr),
            MeshEvent::ProvisioningFailed => defmt::write!(fmt, "ProvisioningFailed"),
            MeshEvent::Message(bytes) => defmt::write!(fmt, "Message({=[u8]})", &bytes[..]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioning_reports() {
        assert_eq!(
            MeshEvent::from_provisioning_report(&[0x00]),
            Some(MeshEvent::ProvisioningStarted)
        );
        assert_eq!(
            MeshEvent::from_provisioning_report(&[0x01, 0xA3, 0x00]),
            Some(MeshEvent::Provisioned(NodeAddress(0x00A3)))
        );
        assert_eq!(
            MeshEvent::from_provisioning_report(&[0xFF]),
            Some(MeshEvent::ProvisioningFailed)
        );
    }

    #[test]
    fn test_invalid_provisioning_reports() {
        assert_eq!(MeshEvent::from_provisioning_report(&[]), None);
        assert_eq!(MeshEvent::from_provisioning_report(&[0x01, 0xA3]), None);
        assert_eq!(MeshEvent::from_provisioning_report(&[0x00, 0x00]), None);
        assert_eq!(MeshEvent::from_provisioning_report(&[0x42]), None);
    }

    #[test]
    fn test_message_copies_bytes() {
        let event = MeshEvent::message(&[0x01, 10, 20, 30]).unwrap();
        match event {
            MeshEvent::Message(bytes) => assert_eq!(&bytes[..], &[0x01, 10, 20, 30]),
            _ => panic!("Expected Message variant"),
        }
    }

    #[test]
    fn test_preset_becomes_set_color_message() {
        let event = MeshEvent::from_preset(b"green").unwrap();
        assert_eq!(event, MeshEvent::message(&[0x01, 0, 255, 0]).unwrap());

        assert_eq!(MeshEvent::from_preset(b"orange"), None);
        assert_eq!(MeshEvent::from_preset(&[0xFF, 0xFE]), None);
    }

    #[test]
    fn test_oversized_message_is_rejected() {
        let bytes = [0x01u8; MAX_ACCESS_MESSAGE_LEN + 1];
        assert!(matches!(
            MeshEvent::message(&bytes),
            Err(LampError::MalformedMessage {
                opcode: Some(0x01),
                ..
            })
        ));
    }
}
