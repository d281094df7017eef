//! Wire-Format der Anwendungs-Nachrichten
//!
//! Eine Nachricht besteht aus einem Opcode-Byte gefolgt von der
//! Opcode-spezifischen Payload:
//!
//! | Opcode | Bedeutung  | Payload            |
//! |--------|------------|--------------------|
//! | `0x01` | set color  | `r`, `g`, `b`      |
//! | `0x02` | get status | leer               |
//!
//! Alle anderen Opcodes werden stillschweigend ignoriert.
//!
//! Zusätzlich gibt es benannte Farb-Presets ("red", "green", "purple"),
//! die zu einem "set color" Kommando werden.

use rgb::RGB8;

use crate::bridge::MessageBuffer;
use crate::error::LampError;

/// Bekannte Opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    SetColor = 0x01,
    GetStatus = 0x02,
}

impl Opcode {
    /// Exakte Payload-Länge für diesen Opcode
    pub const fn payload_len(self) -> usize {
        match self {
            Opcode::SetColor => 3,
            Opcode::GetStatus => 0,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Opcode::SetColor),
            0x02 => Ok(Opcode::GetStatus),
            other => Err(other),
        }
    }
}

/// Dekodiertes Kommando
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampCommand {
    /// Setze die Lampe auf eine Farbe
    SetColor(RGB8),
    /// Antworte mit dem aktuellen Zustand
    GetStatus,
}

impl LampCommand {
    /// Dekodiert Opcode + Payload
    ///
    /// - `Ok(Some(_))` bei bekanntem Opcode mit passender Payload
    /// - `Ok(None)` bei unbekanntem Opcode (kein Fehler!)
    /// - `Err(MalformedMessage)` wenn die Payload-Länge nicht stimmt
    pub fn decode(opcode: u8, payload: &[u8]) -> Result<Option<Self>, LampError> {
        let Ok(op) = Opcode::try_from(opcode) else {
            return Ok(None);
        };

        if payload.len() != op.payload_len() {
            return Err(LampError::MalformedMessage {
                opcode: Some(opcode),
                expected: op.payload_len(),
                actual: payload.len(),
            });
        }

        let command = match op {
            Opcode::SetColor => LampCommand::SetColor(RGB8 {
                r: payload[0],
                g: payload[1],
                b: payload[2],
            }),
            Opcode::GetStatus => LampCommand::GetStatus,
        };
        Ok(Some(command))
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            LampCommand::SetColor(_) => Opcode::SetColor,
            LampCommand::GetStatus => Opcode::GetStatus,
        }
    }

    /// Kodiert das Kommando als rohe Nachricht (Opcode + Payload)
    pub fn encode(&self) -> MessageBuffer {
        let mut message = MessageBuffer::new();
        let (payload, len) = match self {
            LampCommand::SetColor(color) => ([color.r, color.g, color.b], 3),
            LampCommand::GetStatus => ([0; 3], 0),
        };
        // Opcode + höchstens 3 Bytes passen immer in den Puffer
        let _ = message.push(self.opcode() as u8);
        let _ = message.extend_from_slice(&payload[..len]);
        message
    }
}

impl core::convert::TryFrom<&str> for LampCommand {
    type Error = ();

    /// Farb-Preset nach Namen (Groß-/Kleinschreibung egal)
    fn try_from(name: &str) -> Result<Self, Self::Error> {
        const PRESETS: [(&str, RGB8); 3] = [
            ("red", RGB8 { r: 255, g: 0, b: 0 }),
            ("green", RGB8 { r: 0, g: 255, b: 0 }),
            ("purple", RGB8 { r: 128, g: 0, b: 128 }),
        ];

        PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name.trim()))
            .map(|(_, color)| LampCommand::SetColor(*color))
            .ok_or(())
    }
}

/// Trennt eine rohe Nachricht in Opcode und Payload
pub fn split_message(message: &[u8]) -> Result<(u8, &[u8]), LampError> {
    match message.split_first() {
        Some((&opcode, payload)) => Ok((opcode, payload)),
        None => Err(LampError::MalformedMessage {
            opcode: None,
            expected: 1,
            actual: 0,
        }),
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LampCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LampCommand::SetColor(color) => {
                defmt::write!(fmt, "SetColor({}, {}, {})", color.r, color.g, color.b)
            }
            LampCommand::GetStatus => defmt::write!(fmt, "GetStatus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_set_color() {
        let cmd = LampCommand::decode(0x01, &[10, 20, 30]).unwrap();
        assert_eq!(
            cmd,
            Some(LampCommand::SetColor(RGB8 { r: 10, g: 20, b: 30 }))
        );
    }

    #[test]
    fn test_decode_set_color_short_payload() {
        let result = LampCommand::decode(0x01, &[5]);
        assert_eq!(
            result,
            Err(LampError::MalformedMessage {
                opcode: Some(0x01),
                expected: 3,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_decode_set_color_trailing_bytes() {
        let result = LampCommand::decode(0x01, &[1, 2, 3, 4]);
        assert!(matches!(
            result,
            Err(LampError::MalformedMessage { actual: 4, .. })
        ));
    }

    #[test]
    fn test_decode_get_status() {
        assert_eq!(
            LampCommand::decode(0x02, &[]),
            Ok(Some(LampCommand::GetStatus))
        );
        assert!(LampCommand::decode(0x02, &[0]).is_err());
    }

    #[test]
    fn test_decode_unknown_opcode_is_ignored() {
        assert_eq!(LampCommand::decode(0x05, &[]), Ok(None));
        assert_eq!(LampCommand::decode(0x00, &[1, 2, 3]), Ok(None));
        assert_eq!(LampCommand::decode(0xFF, &[]), Ok(None));
    }

    #[test]
    fn test_color_presets() {
        assert_eq!(
            LampCommand::try_from("red"),
            Ok(LampCommand::SetColor(RGB8 { r: 255, g: 0, b: 0 }))
        );
        assert_eq!(
            LampCommand::try_from("green"),
            Ok(LampCommand::SetColor(RGB8 { r: 0, g: 255, b: 0 }))
        );
        assert_eq!(
            LampCommand::try_from("Purple"),
            Ok(LampCommand::SetColor(RGB8 { r: 128, g: 0, b: 128 }))
        );
        assert_eq!(LampCommand::try_from("blue"), Err(()));
        assert_eq!(LampCommand::try_from(""), Err(()));
    }

    #[test]
    fn test_encode_matches_wire_format() {
        let purple = LampCommand::try_from("purple").unwrap();
        assert_eq!(&purple.encode()[..], &[0x01, 128, 0, 128]);
        assert_eq!(&LampCommand::GetStatus.encode()[..], &[0x02]);

        let message = purple.encode();
        let (opcode, payload) = split_message(&message).unwrap();
        assert_eq!(LampCommand::decode(opcode, payload), Ok(Some(purple)));
    }

    #[test]
    fn test_split_message() {
        assert_eq!(split_message(&[0x01, 1, 2]), Ok((0x01, &[1u8, 2][..])));
        assert_eq!(split_message(&[0x05]), Ok((0x05, &[] as &[u8])));
        assert!(matches!(
            split_message(&[]),
            Err(LampError::MalformedMessage { opcode: None, .. })
        ));
    }
}
