// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (Bridge ↔ Lampe).

pub mod lamp;
pub mod mqtt;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use lamp::{lamp_logic, lamp_task};
pub use mqtt::mqtt_bridge_task;
pub use wifi::{connection_task, net_task};
