//! Provisioning-Lebenszyklus
//!
//! Das Provisioning-Protokoll selbst gehört dem Mesh-Stack. Diese
//! State-Machine reagiert nur auf dessen Ereignisse:
//!
//! ```text
//! Unprovisioned ──start──▶ Provisioning ──complete(addr)──▶ Provisioned
//!       ▲                       │
//!       │                     fail
//!       │                       ▼
//!       └────────(start)───── Failed
//! ```

use crate::error::LampError;
use crate::types::NodeAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvisioningState {
    #[default]
    Unprovisioned,
    Provisioning,
    Provisioned(NodeAddress),
    Failed,
}

impl ProvisioningState {
    /// Mesh-Stack hat mit dem Provisioning begonnen
    ///
    /// Ein bereits provisionierter Knoten bleibt unverändert.
    pub fn start(&mut self) {
        if !self.is_provisioned() {
            *self = ProvisioningState::Provisioning;
        }
    }

    /// Provisioning abgeschlossen: Adresse übernehmen
    ///
    /// Die Adresse ist danach für die Lebensdauer des Prozesses fest.
    pub fn complete(&mut self, address: NodeAddress) -> Result<NodeAddress, LampError> {
        if let ProvisioningState::Provisioned(current) = *self {
            return Err(LampError::AlreadyProvisioned(current));
        }
        if !address.is_unicast() {
            return Err(LampError::InvalidAddress(address));
        }
        *self = ProvisioningState::Provisioned(address);
        Ok(address)
    }

    /// Provisioning fehlgeschlagen: Knoten bleibt inaktiv
    pub fn fail(&mut self) {
        if !self.is_provisioned() {
            *self = ProvisioningState::Failed;
        }
    }

    pub fn is_provisioned(&self) -> bool {
        matches!(self, ProvisioningState::Provisioned(_))
    }

    /// Zugewiesene Adresse oder `NodeAddress::UNASSIGNED`
    pub fn address(&self) -> NodeAddress {
        match self {
            ProvisioningState::Provisioned(addr) => *addr,
            _ => NodeAddress::UNASSIGNED,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProvisioningState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ProvisioningState::Unprovisioned => defmt::write!(fmt, "Unprovisioned"),
            ProvisioningState::Provisioning => defmt::write!(fmt, "Provisioning"),
            ProvisioningState::Provisioned(addr) => defmt::write!(fmt, "Provisioned({})", addr),
            ProvisioningState::Failed => defmt::write!(fmt, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut prov = ProvisioningState::default();
        assert_eq!(prov, ProvisioningState::Unprovisioned);

        prov.start();
        assert_eq!(prov, ProvisioningState::Provisioning);

        assert_eq!(prov.complete(NodeAddress(0x00A3)), Ok(NodeAddress(0x00A3)));
        assert_eq!(prov.address(), NodeAddress(0x00A3));
    }

    #[test]
    fn test_address_is_immutable_once_set() {
        let mut prov = ProvisioningState::default();
        prov.complete(NodeAddress(0x0010)).unwrap();

        assert_eq!(
            prov.complete(NodeAddress(0x0020)),
            Err(LampError::AlreadyProvisioned(NodeAddress(0x0010)))
        );
        prov.fail();
        prov.start();
        assert_eq!(prov, ProvisioningState::Provisioned(NodeAddress(0x0010)));
    }

    #[test]
    fn test_failure_keeps_address_unset() {
        let mut prov = ProvisioningState::default();
        prov.start();
        prov.fail();
        assert_eq!(prov, ProvisioningState::Failed);
        assert_eq!(prov.address(), NodeAddress::UNASSIGNED);
        assert!(!prov.is_provisioned());
    }

    #[test]
    fn test_restart_after_failure() {
        let mut prov = ProvisioningState::Failed;
        prov.start();
        assert_eq!(prov, ProvisioningState::Provisioning);
    }

    #[test]
    fn test_rejects_non_unicast_address() {
        let mut prov = ProvisioningState::Provisioning;
        assert_eq!(
            prov.complete(NodeAddress::UNASSIGNED),
            Err(LampError::InvalidAddress(NodeAddress::UNASSIGNED))
        );
        assert_eq!(
            prov.complete(NodeAddress(0xC000)),
            Err(LampError::InvalidAddress(NodeAddress(0xC000)))
        );
        assert_eq!(prov, ProvisioningState::Provisioning);
    }
}
