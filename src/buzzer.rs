//! A device abstraction for a passive piezo buzzer on a PWM channel B output.
//!
//! See [`PwmBuzzer`] for usage.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::Timer;

use crate::hardware::Tone;

/// PWM counter rate the divider aims for.
const TICK_HZ: u32 = 1_000_000;

/// Lowest pitch whose period still fits the 16-bit counter at [`TICK_HZ`].
const MIN_FREQUENCY_HZ: u32 = 16;

/// Highest pitch the counter can still shape into a square wave.
const MAX_FREQUENCY_HZ: u32 = TICK_HZ / 2;

/// A buzzer driven by a square wave at the note's pitch.
///
/// The slice runs with a 1 µs tick; each note sets `top` to the note's period and the
/// compare value to half of it, so the duty cycle stays at 50%.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use embassy_time::Duration;
/// use memory_matrix::buzzer::PwmBuzzer;
/// use memory_matrix::hardware::Tone;
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// async fn example(p: embassy_rp::Peripherals) {
///     let pwm = embassy_rp::pwm::Pwm::new_output_b(
///         p.PWM_SLICE2,
///         p.PIN_21,
///         embassy_rp::pwm::Config::default(),
///     );
///     let mut buzzer = PwmBuzzer::new(pwm);
///     buzzer.play(Tone::new(440, Duration::from_millis(250))).await;
/// }
/// ```
pub struct PwmBuzzer<'d> {
    pwm: Pwm<'d>,
    cfg: Config,
}

impl<'d> PwmBuzzer<'d> {
    /// Take over a slice whose B output drives the buzzer, silent until the first note.
    #[must_use]
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let clk = clk_sys_freq();
        let div_int = u8::try_from(clk / TICK_HZ).unwrap_or(u8::MAX).max(1);

        let mut cfg = Config::default();
        cfg.phase_correct = false;
        cfg.divider = div_int.into();
        cfg.enable = false;
        pwm.set_config(&cfg);

        #[cfg(feature = "defmt")]
        defmt::info!("buzzer clk={}Hz div={}", clk, div_int);

        Self { pwm, cfg }
    }

    /// Sound `tone` and return once it has finished. A frequency of 0 rests instead.
    pub async fn play(&mut self, tone: Tone) {
        if tone.frequency_hz == 0 {
            self.silence();
        } else {
            self.start(tone.frequency_hz);
        }
        Timer::after(tone.duration).await;
        self.silence();
    }

    fn start(&mut self, frequency_hz: u32) {
        let frequency_hz = frequency_hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ);
        let period = TICK_HZ.checked_div(frequency_hz).unwrap_or(TICK_HZ);
        let top = u16::try_from(period.saturating_sub(1)).unwrap_or(u16::MAX);
        self.cfg.top = top;
        self.cfg.compare_b = top / 2;
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);
    }

    /// Stop the square wave.
    pub fn silence(&mut self) {
        self.cfg.compare_b = 0;
        self.cfg.enable = false;
        self.pwm.set_config(&self.cfg);
    }
}
