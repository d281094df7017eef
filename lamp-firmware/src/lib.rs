// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von lamp-core
pub use lamp_core::{LampError, LampNode, MeshEvent, Outcome, StatusReply};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::{MESH_EVENT_QUEUE_DEPTH, STATUS_REPLY_QUEUE_DEPTH};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Der Lampen-Task ist der einzige Besitzer von LampState. Alle anderen Tasks
// sprechen nur über diese Channels mit ihm (ein Schreiber, keine Locks).

/// Channel für Mesh-Ereignisse (Bridge → Lampen-Task)
pub type MeshEventChannel = Channel<NoopRawMutex, MeshEvent, MESH_EVENT_QUEUE_DEPTH>;

/// Sender für Mesh-Ereignisse (MQTT-Bridge)
pub type MeshEventSender = Sender<'static, NoopRawMutex, MeshEvent, MESH_EVENT_QUEUE_DEPTH>;

/// Receiver für Mesh-Ereignisse (Lampen-Task)
pub type MeshEventReceiver = Receiver<'static, NoopRawMutex, MeshEvent, MESH_EVENT_QUEUE_DEPTH>;

/// Channel für Status-Antworten (Lampen-Task → Bridge)
pub type StatusReplyChannel = Channel<NoopRawMutex, StatusReply, STATUS_REPLY_QUEUE_DEPTH>;

/// Sender für Status-Antworten (Lampen-Task)
pub type StatusReplySender = Sender<'static, NoopRawMutex, StatusReply, STATUS_REPLY_QUEUE_DEPTH>;

/// Receiver für Status-Antworten (MQTT-Bridge)
pub type StatusReplyReceiver =
    Receiver<'static, NoopRawMutex, StatusReply, STATUS_REPLY_QUEUE_DEPTH>;
