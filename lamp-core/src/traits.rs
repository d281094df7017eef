//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use core::fmt;

use rgb::RGB8;

use crate::types::Channel;

/// Fehler eines einzelnen PWM-Kanals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// Treiber ist (noch) nicht initialisiert
    NotReady,
    /// Treiber hat den Duty-Wert abgelehnt
    WriteRejected,
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "driver not ready"),
            Self::WriteRejected => write!(f, "write rejected"),
        }
    }
}

/// Fehler beim Ansteuern der Lampe: welcher Kanal und warum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorError {
    pub channel: Channel,
    pub kind: PwmError,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel {} ({:?}): {}", self.channel.id(), self.channel, self.kind)
    }
}

/// Trait für einen PWM-Ausgang
///
/// Abstrahiert einen Kanal des PWM-Treibers. Der Duty-Cycle ist
/// proportional zu `value / 255` über eine feste Periode.
///
/// # Implementierungen
/// - **Production:** LedcPwmChannel (ESP32 LEDC Peripheral)
/// - **Testing:** MockPwmChannel (in-memory Mock)
pub trait PwmChannel {
    /// Setzt den Duty-Cycle (0 = aus, 255 = voll an)
    fn set_duty(&mut self, value: u8) -> Result<(), PwmError>;
}

/// Trait für den RGB-Aktor der Lampe
///
/// Nimmt drei Intensitäten entgegen und treibt die drei Ausgänge.
/// Der Command Handler kennt nur diesen Trait, nie den konkreten Treiber.
pub trait LampActuator {
    /// Schreibt eine RGB-Farbe auf die drei Kanäle
    ///
    /// # Fehlerbehandlung
    /// Gibt `ActuatorError` mit dem ersten fehlgeschlagenen Kanal zurück
    fn write(&mut self, color: RGB8) -> Result<(), ActuatorError>;
}

/// RGB-Aktor aus drei unabhängigen PWM-Kanälen
///
/// Schreibt immer alle drei Kanäle, auch wenn einer fehlschlägt,
/// damit die übrigen Kanäle den neuen Wert trotzdem bekommen.
pub struct PwmRgbWriter<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R: PwmChannel, G: PwmChannel, B: PwmChannel> PwmRgbWriter<R, G, B> {
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }

    /// Gibt die Kanäle wieder frei (z.B. für Assertions in Tests)
    pub fn into_channels(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut dyn PwmChannel {
        match channel {
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
        }
    }
}

impl<R: PwmChannel, G: PwmChannel, B: PwmChannel> LampActuator for PwmRgbWriter<R, G, B> {
    fn write(&mut self, color: RGB8) -> Result<(), ActuatorError> {
        let mut first_error = None;

        for channel in Channel::ALL {
            let value = channel.pick(color);
            if let Err(kind) = self.channel_mut(channel).set_duty(value) {
                first_error.get_or_insert(ActuatorError { channel, kind });
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for PwmError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PwmError::NotReady => defmt::write!(fmt, "driver not ready"),
            PwmError::WriteRejected => defmt::write!(fmt, "write rejected"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ActuatorError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "channel {=u8} ({}): {}",
            self.channel.id(),
            self.channel,
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingChannel {
        last: Option<u8>,
        fail_with: Option<PwmError>,
    }

    impl RecordingChannel {
        fn ok() -> Self {
            Self {
                last: None,
                fail_with: None,
            }
        }

        fn failing(kind: PwmError) -> Self {
            Self {
                last: None,
                fail_with: Some(kind),
            }
        }
    }

    impl PwmChannel for RecordingChannel {
        fn set_duty(&mut self, value: u8) -> Result<(), PwmError> {
            if let Some(kind) = self.fail_with {
                return Err(kind);
            }
            self.last = Some(value);
            Ok(())
        }
    }

    #[test]
    fn test_pwm_rgb_writer_routes_each_component() {
        let mut writer = PwmRgbWriter::new(
            RecordingChannel::ok(),
            RecordingChannel::ok(),
            RecordingChannel::ok(),
        );

        writer.write(RGB8 { r: 10, g: 20, b: 30 }).unwrap();

        let (r, g, b) = writer.into_channels();
        assert_eq!(r.last, Some(10));
        assert_eq!(g.last, Some(20));
        assert_eq!(b.last, Some(30));
    }

    #[test]
    fn test_pwm_rgb_writer_reports_first_failure_and_writes_rest() {
        let mut writer = PwmRgbWriter::new(
            RecordingChannel::ok(),
            RecordingChannel::failing(PwmError::NotReady),
            RecordingChannel::failing(PwmError::WriteRejected),
        );

        let result = writer.write(RGB8 { r: 1, g: 2, b: 3 });
        assert_eq!(
            result,
            Err(ActuatorError {
                channel: Channel::Green,
                kind: PwmError::NotReady,
            })
        );

        let (r, _, _) = writer.into_channels();
        assert_eq!(r.last, Some(1));
    }
}
