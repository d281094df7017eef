// PWM-Kanäle für die RGB-Lampe (LEDC Peripheral)
//
// Verbindet die LEDC-Kanäle des ESP32-C6 mit dem PwmChannel-Trait aus lamp-core.

use defmt::{Debug2Format, error, info};
use embedded_hal::pwm::SetDutyCycle;
use esp_hal::gpio::DriveMode;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::time::Rate;
use lamp_core::{PwmChannel, PwmError, PwmRgbWriter, scale_duty};
use static_cell::StaticCell;

use crate::config::PWM_FREQUENCY_KHZ;

/// PWM-Kanal auf Basis eines beliebigen `SetDutyCycle`-Treibers
///
/// `None` bedeutet: Kanal konnte nicht konfiguriert werden. Jeder
/// Schreibversuch liefert dann `PwmError::NotReady`, statt still zu scheitern.
pub struct LedcPwmChannel<P> {
    pwm: Option<P>,
}

impl<P: SetDutyCycle> LedcPwmChannel<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm: Some(pwm) }
    }

    /// Platzhalter für einen Kanal dessen Initialisierung fehlschlug
    pub fn unavailable() -> Self {
        Self { pwm: None }
    }
}

impl<P: SetDutyCycle> PwmChannel for LedcPwmChannel<P> {
    fn set_duty(&mut self, value: u8) -> Result<(), PwmError> {
        let pwm = self.pwm.as_mut().ok_or(PwmError::NotReady)?;
        let duty = scale_duty(value, pwm.max_duty_cycle());
        pwm.set_duty_cycle(duty).map_err(|_| PwmError::WriteRejected)
    }
}

/// Konkreter LEDC-Kanal (Low-Speed-Modus, 'static)
pub type LedcChannel = channel::Channel<'static, LowSpeed>;

/// RGB-Aktor der Lampe: drei LEDC-Kanäle an einem gemeinsamen Timer
pub type LampPwm = PwmRgbWriter<
    LedcPwmChannel<LedcChannel>,
    LedcPwmChannel<LedcChannel>,
    LedcPwmChannel<LedcChannel>,
>;

/// Initialisiert LEDC-Timer und drei Kanäle für Rot, Grün und Blau
///
/// Alle Kanäle teilen sich einen Timer (8 Bit Auflösung, feste Periode).
/// Fehler werden geloggt; betroffene Kanäle melden danach `NotReady`.
///
/// # Parameter
/// - `ledc_peripheral`: LEDC Peripheral
/// - `red`, `green`, `blue`: GPIO-Ausgänge der drei Farbkanäle
pub fn init_lamp_pwm(
    ledc_peripheral: esp_hal::peripherals::LEDC<'static>,
    red: impl PeripheralOutput<'static>,
    green: impl PeripheralOutput<'static>,
    blue: impl PeripheralOutput<'static>,
) -> LampPwm {
    let mut ledc = Ledc::new(ledc_peripheral);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    // Timer muss 'static sein, da die Kanäle ihn für immer referenzieren
    static PWM_TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();
    let pwm_timer = PWM_TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));

    let timer_config = timer::config::Config {
        duty: timer::config::Duty::Duty8Bit,
        clock_source: timer::LSClockSource::APBClk,
        frequency: Rate::from_khz(PWM_FREQUENCY_KHZ),
    };
    if let Err(e) = pwm_timer.configure(timer_config) {
        error!("PWM: Timer configuration failed: {}", Debug2Format(&e));
        return PwmRgbWriter::new(
            LedcPwmChannel::unavailable(),
            LedcPwmChannel::unavailable(),
            LedcPwmChannel::unavailable(),
        );
    }
    let pwm_timer: &'static timer::Timer<'static, LowSpeed> = pwm_timer;

    let configure = |mut ch: LedcChannel, name: &'static str| {
        let config = channel::config::Config {
            timer: pwm_timer,
            duty_pct: 0,
            drive_mode: DriveMode::PushPull,
        };
        match ch.configure(config) {
            Ok(()) => LedcPwmChannel::new(ch),
            Err(e) => {
                error!(
                    "PWM: Channel {} configuration failed: {}",
                    name,
                    Debug2Format(&e)
                );
                LedcPwmChannel::unavailable()
            }
        }
    };

    let writer = PwmRgbWriter::new(
        configure(ledc.channel(channel::Number::Channel0, red), "red"),
        configure(ledc.channel(channel::Number::Channel1, green), "green"),
        configure(ledc.channel(channel::Number::Channel2, blue), "blue"),
    );

    info!("PWM: LEDC ready ({} kHz, 8 bit)", PWM_FREQUENCY_KHZ);
    writer
}
