// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus lamp-core,
// damit der Command Handler nie einen konkreten Treiber sieht.

pub mod pwm;

pub use pwm::{LampPwm, LedcPwmChannel, init_lamp_pwm};
