//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

use crate::error::LampError;
use crate::message::LampCommand;
use crate::types::{LampState, StatusReply};

/// Seiteneffekt den der Aufrufer nach `handle_command()` ausführen muss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Farbe auf die PWM-Ausgänge schreiben
    WriteColor(RGB8),
    /// Status-Antwort an den Absender senden
    Reply(StatusReply),
}

/// Command Handler: Opcode + Payload → Zustandsänderung + Effekt
///
/// Ändert `state` nur bei gültigem "set color". Bei Fehler bleibt der
/// Zustand unverändert. Unbekannte Opcodes liefern `Ok(None)`.
///
/// # Beispiele
///
/// ```
/// # use rgb::RGB8;
/// # use lamp_core::{Effect, LampState, handle_command};
/// let mut state = LampState::new();
/// let effect = handle_command(&mut state, 0x01, &[10, 20, 30]).unwrap();
/// assert_eq!(effect, Some(Effect::WriteColor(RGB8 { r: 10, g: 20, b: 30 })));
/// assert_eq!(state.color, RGB8 { r: 10, g: 20, b: 30 });
/// ```
pub fn handle_command(
    state: &mut LampState,
    opcode: u8,
    payload: &[u8],
) -> Result<Option<Effect>, LampError> {
    let Some(command) = LampCommand::decode(opcode, payload)? else {
        return Ok(None);
    };

    let effect = match command {
        LampCommand::SetColor(color) => {
            state.color = color;
            Effect::WriteColor(color)
        }
        LampCommand::GetStatus => Effect::Reply(state.status()),
    };
    Ok(Some(effect))
}

/// Skaliert einen Farbwert (0-255) auf die Duty-Auflösung des Treibers
///
/// Ergebnis ist proportional zu `value / 255`, d.h. 0 → 0 und 255 → `max_duty`.
pub fn scale_duty(value: u8, max_duty: u16) -> u16 {
    ((value as u32 * max_duty as u32) / u8::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeAddress;

    #[test]
    fn test_set_color_updates_state() {
        let mut state = LampState::new();
        let effect = handle_command(&mut state, 0x01, &[10, 20, 30]).unwrap();
        assert_eq!(state.color, RGB8 { r: 10, g: 20, b: 30 });
        assert_eq!(
            effect,
            Some(Effect::WriteColor(RGB8 { r: 10, g: 20, b: 30 }))
        );
    }

    #[test]
    fn test_short_payload_leaves_state_untouched() {
        let mut state = LampState::new();
        state.color = RGB8 { r: 1, g: 2, b: 3 };
        let before = state;

        assert!(handle_command(&mut state, 0x01, &[5]).is_err());
        assert!(handle_command(&mut state, 0x01, &[5, 6]).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_unknown_opcode_is_noop() {
        let mut state = LampState::new();
        let before = state;
        assert_eq!(handle_command(&mut state, 0x05, &[]), Ok(None));
        assert_eq!(handle_command(&mut state, 0x7F, &[9, 9, 9]), Ok(None));
        assert_eq!(state, before);
    }

    #[test]
    fn test_get_status_echoes_state() {
        let mut state = LampState::new();
        state.color = RGB8 { r: 7, g: 8, b: 9 };
        state.address = NodeAddress(0x00A3);

        let effect = handle_command(&mut state, 0x02, &[]).unwrap();
        assert_eq!(
            effect,
            Some(Effect::Reply(StatusReply {
                color: RGB8 { r: 7, g: 8, b: 9 },
                address: NodeAddress(0x00A3),
            }))
        );
    }

    #[test]
    fn test_set_color_is_idempotent() {
        let mut once = LampState::new();
        handle_command(&mut once, 0x01, &[40, 50, 60]).unwrap();

        let mut twice = LampState::new();
        handle_command(&mut twice, 0x01, &[40, 50, 60]).unwrap();
        handle_command(&mut twice, 0x01, &[40, 50, 60]).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_scale_duty() {
        assert_eq!(scale_duty(0, 255), 0);
        assert_eq!(scale_duty(255, 255), 255);
        assert_eq!(scale_duty(128, 255), 128);
        assert_eq!(scale_duty(255, 1023), 1023);
        assert_eq!(scale_duty(51, 1000), 200);
    }
}
