//! Lamp Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Zustand, Wire-Format, Traits und Pure Functions
//! der Mesh-Lampe.

#![no_std]

pub mod bridge;
pub mod error;
pub mod logic;
pub mod message;
pub mod node;
pub mod provisioning;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use bridge::{MAX_ACCESS_MESSAGE_LEN, MeshEvent, MessageBuffer};
pub use error::LampError;
pub use logic::{Effect, handle_command, scale_duty};
pub use message::{LampCommand, Opcode, split_message};
pub use node::{LampNode, Outcome};
pub use provisioning::ProvisioningState;
pub use traits::{ActuatorError, LampActuator, PwmChannel, PwmError, PwmRgbWriter};
pub use types::{Channel, LampState, NodeAddress, StatusReply};
