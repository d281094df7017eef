// Lampen-Task - Einziger Besitzer von LampState und den PWM-Ausgängen
use defmt::{debug, error, info, warn};
use lamp_core::{LampActuator, LampError, LampNode, MeshEvent, Outcome};

use crate::hal::LampPwm;
use crate::{MeshEventReceiver, StatusReplySender};

/// Lampen-Logik - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// Arbeitet Mesh-Ereignisse strikt nacheinander ab:
/// - Provisioning-Ereignisse setzen (einmalig) die Knoten-Adresse
/// - "set color" schreibt auf die PWM-Ausgänge
/// - "get status" schickt eine Antwort zurück an die Bridge
///
/// Jeder Fehler wird geloggt, keiner beendet den Task.
///
/// # Parameter
/// - `node`: Lampen-Knoten mit Aktor (Hardware oder Mock)
/// - `events`: Channel Receiver für Mesh-Ereignisse
/// - `replies`: Channel Sender für Status-Antworten
pub async fn lamp_logic<A: LampActuator>(
    mut node: LampNode<A>,
    events: MeshEventReceiver,
    replies: StatusReplySender,
) -> ! {
    loop {
        let event = events.receive().await;
        debug!("Lamp: Event received: {}", event);

        match node.handle_event(&event) {
            Ok(Outcome::ColorApplied(color)) => {
                info!("Lamp: Color set to ({}, {}, {})", color.r, color.g, color.b);
            }
            Ok(Outcome::Reply(reply)) => {
                info!("Lamp: Status requested: {}", reply);
                if replies.try_send(reply).is_err() {
                    warn!("Lamp: Reply queue full, status reply dropped");
                }
            }
            Ok(Outcome::Ignored) => {
                // Unbekannte Opcodes sind kein Fehler
                debug!("Lamp: Unknown opcode ignored");
            }
            Ok(Outcome::Provisioning(state)) => {
                if matches!(event, MeshEvent::ProvisioningFailed) {
                    warn!("Lamp: Provisioning failed, node stays inert");
                } else {
                    info!("Lamp: Provisioning state: {}", state);
                }
            }
            Err(e @ LampError::ActuatorWriteFailed(_)) => {
                error!("Lamp: {}", e);
            }
            Err(e) => {
                warn!("Lamp: Event rejected: {}", e);
            }
        }
    }
}

/// Lampen-Task - Embassy Task für den Lampen-Knoten
///
/// Erstellt den Knoten mit Null-Zustand, bringt die Ausgänge in den
/// passenden Zustand (alles aus) und ruft dann `lamp_logic()` auf.
///
/// # Parameter
/// - `pwm`: Initialisierter RGB-Aktor (drei LEDC-Kanäle)
/// - `events`: Channel Receiver für Mesh-Ereignisse
/// - `replies`: Channel Sender für Status-Antworten
#[embassy_executor::task]
pub async fn lamp_task(pwm: LampPwm, events: MeshEventReceiver, replies: StatusReplySender) {
    let mut node = LampNode::new(pwm);

    if let Err(e) = node.sync_outputs() {
        error!("Lamp: Failed to initialize outputs: {}", e);
    }
    info!("Lamp: Ready, waiting for provisioning: {}", node.state());

    lamp_logic(node, events, replies).await
}
