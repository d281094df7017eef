//! Core Types für die Mesh-Lampe
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

/// Netzwerk-Adresse eines Mesh-Knotens (16 Bit)
///
/// `0x0000` ist der "nicht zugewiesen"-Wert. Gültige Knoten-Adressen
/// liegen im Unicast-Bereich `0x0001..=0x7FFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAddress(pub u16);

impl NodeAddress {
    /// Adresse vor Abschluss des Provisionings
    pub const UNASSIGNED: Self = Self(0x0000);

    /// Höchste Unicast-Adresse (darüber beginnen Virtual/Group-Adressen)
    pub const MAX_UNICAST: u16 = 0x7FFF;

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Prüft ob die Adresse einem einzelnen Knoten zugewiesen werden darf
    pub const fn is_unicast(self) -> bool {
        self.0 != 0 && self.0 <= Self::MAX_UNICAST
    }
}

impl From<u16> for NodeAddress {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Zustand der Lampe
///
/// Wird beim Start mit Nullen erzeugt und lebt so lange wie der Prozess.
/// Die Farbe ändert sich nur durch "set color", die Adresse genau einmal
/// durch das Provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LampState {
    pub color: RGB8,
    pub address: NodeAddress,
}

impl LampState {
    pub const fn new() -> Self {
        Self {
            color: RGB8 { r: 0, g: 0, b: 0 },
            address: NodeAddress::UNASSIGNED,
        }
    }

    /// Momentaufnahme für eine Status-Antwort (Opcode 0x02)
    pub fn status(&self) -> StatusReply {
        StatusReply {
            color: self.color,
            address: self.address,
        }
    }
}

/// PWM-Kanal einer Farbe
///
/// Der Wert entspricht der `channelId` gegenüber der Treiber-Schicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    /// Alle Kanäle in Schreib-Reihenfolge (r, g, b)
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Wählt den passenden Farbanteil aus
    pub fn pick(self, color: RGB8) -> u8 {
        match self {
            Channel::Red => color.r,
            Channel::Green => color.g,
            Channel::Blue => color.b,
        }
    }
}

/// Antwort auf "get status"
///
/// Wire-Format (5 Bytes): `[r, g, b, addr_lo, addr_hi]`
/// Die Adresse ist Little-Endian wie alle Mehr-Byte-Felder im Mesh-Access-Layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReply {
    pub color: RGB8,
    pub address: NodeAddress,
}

impl StatusReply {
    pub const ENCODED_LEN: usize = 5;

    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let [lo, hi] = self.address.0.to_le_bytes();
        [self.color.r, self.color.g, self.color.b, lo, hi]
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for NodeAddress {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u16:#x}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LampState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "LampState {{ rgb: ({}, {}, {}), address: {} }}",
            self.color.r,
            self.color.g,
            self.color.b,
            self.address
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Channel::Red => defmt::write!(fmt, "Red"),
            Channel::Green => defmt::write!(fmt, "Green"),
            Channel::Blue => defmt::write!(fmt, "Blue"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusReply {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusReply {{ rgb: ({}, {}, {}), address: {} }}",
            self.color.r,
            self.color.g,
            self.color.b,
            self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamp_state_starts_zeroed() {
        let state = LampState::new();
        assert_eq!(state.color, RGB8 { r: 0, g: 0, b: 0 });
        assert_eq!(state.address, NodeAddress::UNASSIGNED);
        assert_eq!(state, LampState::default());
    }

    #[test]
    fn test_node_address_unicast_range() {
        assert!(!NodeAddress(0x0000).is_unicast());
        assert!(NodeAddress(0x0001).is_unicast());
        assert!(NodeAddress(0x7FFF).is_unicast());
        assert!(!NodeAddress(0x8000).is_unicast());
        assert!(!NodeAddress(0xFFFF).is_unicast());
    }

    #[test]
    fn test_status_reply_encoding_is_little_endian() {
        let reply = StatusReply {
            color: RGB8 { r: 10, g: 20, b: 30 },
            address: NodeAddress(0x12A3),
        };
        assert_eq!(reply.encode(), [10, 20, 30, 0xA3, 0x12]);
    }

    #[test]
    fn test_channel_pick() {
        let color = RGB8 { r: 1, g: 2, b: 3 };
        assert_eq!(Channel::Red.pick(color), 1);
        assert_eq!(Channel::Green.pick(color), 2);
        assert_eq!(Channel::Blue.pick(color), 3);
        assert_eq!(Channel::Blue.id(), 2);
    }
}
