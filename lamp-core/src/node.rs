//! Lampen-Knoten: besitzt Zustand, Provisioning und Aktor
//!
//! `LampNode` ist die einzige Stelle die `LampState` verändert. Ereignisse
//! werden nacheinander und vollständig abgearbeitet (ein Schreiber).
//!
//! Die Adresse existiert nur einmal, in `ProvisioningState`. `state()` setzt
//! den `LampState` daraus und aus der zuletzt gesetzten Farbe zusammen.

use rgb::RGB8;

use crate::bridge::MeshEvent;
use crate::error::LampError;
use crate::logic::{Effect, handle_command};
use crate::message::{Opcode, split_message};
use crate::provisioning::ProvisioningState;
use crate::traits::LampActuator;
use crate::types::{LampState, NodeAddress, StatusReply};

/// Ergebnis eines verarbeiteten Ereignisses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Farbe gesetzt und auf die PWM-Ausgänge geschrieben
    ColorApplied(RGB8),
    /// Status-Antwort muss an den Absender gehen
    Reply(StatusReply),
    /// Unbekannter Opcode, nichts passiert
    Ignored,
    /// Provisioning-Zustand hat sich geändert
    Provisioning(ProvisioningState),
}

pub struct LampNode<A> {
    color: RGB8,
    provisioning: ProvisioningState,
    actuator: A,
}

impl<A: LampActuator> LampNode<A> {
    /// Erstellt einen Knoten mit Null-Zustand (aus, keine Adresse)
    pub fn new(actuator: A) -> Self {
        Self {
            color: LampState::new().color,
            provisioning: ProvisioningState::Unprovisioned,
            actuator,
        }
    }

    pub fn state(&self) -> LampState {
        LampState {
            color: self.color,
            address: self.provisioning.address(),
        }
    }

    pub fn provisioning(&self) -> ProvisioningState {
        self.provisioning
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn into_actuator(self) -> A {
        self.actuator
    }

    /// Schreibt den aktuellen Zustand auf die Ausgänge
    ///
    /// Beim Boot aufrufen, damit die Hardware zum Null-Zustand passt.
    pub fn sync_outputs(&mut self) -> Result<(), LampError> {
        self.actuator.write(self.color)?;
        Ok(())
    }

    pub fn on_provisioning_started(&mut self) {
        self.provisioning.start();
    }

    /// Provisioning abgeschlossen: Adresse einmalig übernehmen
    pub fn on_provisioned(&mut self, address: NodeAddress) -> Result<NodeAddress, LampError> {
        self.provisioning.complete(address)
    }

    pub fn on_provisioning_failed(&mut self) {
        self.provisioning.fail();
    }

    /// Verarbeitet eine rohe Anwendungs-Nachricht (Opcode + Payload)
    pub fn handle_message(&mut self, message: &[u8]) -> Result<Outcome, LampError> {
        let (opcode, payload) = split_message(message)?;
        self.handle(opcode, payload)
    }

    /// Verarbeitet eine Anwendungs-Nachricht
    ///
    /// Unbekannte Opcodes werden in jedem Zustand ignoriert. Bekannte
    /// Kommandos akzeptiert nur ein provisionierter Knoten. Bei "set color"
    /// enthält der Zustand die neue Farbe auch dann, wenn der Treiber das
    /// Schreiben ablehnt; der Fehler wird zurückgegeben.
    pub fn handle(&mut self, opcode: u8, payload: &[u8]) -> Result<Outcome, LampError> {
        if Opcode::try_from(opcode).is_err() {
            return Ok(Outcome::Ignored);
        }
        if !self.provisioning.is_provisioned() {
            return Err(LampError::NotProvisioned);
        }

        let mut state = self.state();
        let effect = handle_command(&mut state, opcode, payload)?;
        self.color = state.color;

        match effect {
            Some(Effect::WriteColor(color)) => {
                self.actuator.write(color)?;
                Ok(Outcome::ColorApplied(color))
            }
            Some(Effect::Reply(reply)) => Ok(Outcome::Reply(reply)),
            None => Ok(Outcome::Ignored),
        }
    }

    /// Zentraler Einstiegspunkt für alle Ereignisse des Mesh-Stacks
    pub fn handle_event(&mut self, event: &MeshEvent) -> Result<Outcome, LampError> {
        match event {
            MeshEvent::ProvisioningStarted => {
                self.on_provisioning_started();
                Ok(Outcome::Provisioning(self.provisioning))
            }
            MeshEvent::Provisioned(address) => {
                self.on_provisioned(*address)?;
                Ok(Outcome::Provisioning(self.provisioning))
            }
            MeshEvent::ProvisioningFailed => {
                self.on_provisioning_failed();
                Ok(Outcome::Provisioning(self.provisioning))
            }
            MeshEvent::Message(bytes) => self.handle_message(bytes),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Outcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Outcome::ColorApplied(c) => {
                defmt::write!(fmt, "ColorApplied({}, {}, {})", c.r, c.g, c.b)
            }
            Outcome::Reply(reply) => defmt::write!(fmt, "Reply({})", reply),
            Outcome::Ignored => defmt::write!(fmt, "Ignored"),
            Outcome::Provisioning(state) => defmt::write!(fmt, "Provisioning({})", state),
        }
    }
}
