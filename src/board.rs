//! The physical game board: every collaborator trait implemented on Pico peripherals.
//!
//! # Wiring
//!
//! | Part                     | Pins                                   |
//! |--------------------------|----------------------------------------|
//! | WS2812 matrix data       | GPIO7 (PIO0, state machine 0, DMA 0)   |
//! | Confirm button (A)       | GPIO5 to GND                           |
//! | Cancel button (B)        | GPIO6 to GND                           |
//! | Green / red indicator    | GPIO11 / GPIO13                        |
//! | Buzzer                   | GPIO21 (PWM slice 2, channel B)        |
//! | Joystick Y / X           | GPIO26 (ADC0) / GPIO27 (ADC1)          |
//! | SSD1306 128x64 OLED      | I2C1 at 400 kHz, SDA GPIO14, SCL GPIO15, 0x3C |

use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio::{Common, Pio};
use embassy_rp::pio_programs::ws2812::{Grb, PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::Peripherals;
use embassy_time::{Delay, Instant};
use embedded_hal_async::delay::DelayNs;
use ssd1306::mode::{BufferedGraphicsMode, DisplayConfig};
use ssd1306::prelude::{DisplayRotation, DisplaySize128x64, I2CInterface};
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::button::Button;
use crate::buzzer::PwmBuzzer;
use crate::config::{AXIS_CENTER, LED_COUNT};
use crate::hardware::{
    Axis, ButtonId, Buttons, Buzzer, Indicator, Indicators, Joystick, LedMatrix, StatusDisplay,
    Tone,
};
use crate::matrix::Frame;
use crate::status_screen::draw_status;
use irqs::Irqs;

/// I2C address of the OLED.
pub const OLED_ADDRESS: u8 = 0x3C;

/// I2C clock for the OLED bus.
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Joystick samples folded into the random seed.
const SEED_SAMPLES: usize = 8;

#[allow(unsafe_code, reason = "bind_interrupts! emits the interrupt vector entries")]
mod irqs {
    use embassy_rp::bind_interrupts;
    use embassy_rp::peripherals::PIO0;
    use embassy_rp::{adc, pio};

    bind_interrupts!(pub struct Irqs {
        PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
        ADC_IRQ_FIFO => adc::InterruptHandler;
    });
}

type Oled = Ssd1306<
    I2CInterface<I2c<'static, I2C1, i2c::Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// The Pico wired up as described in the [module docs](self).
///
/// The game treats drivers as infallible, so driver errors stop here: a failed ADC
/// read reports a centered stick and a failed OLED update is logged and dropped. If the
/// OLED does not answer at startup the board runs without it.
pub struct PicoBoard {
    // Owns the PIO instruction memory holding the WS2812 program.
    _pio: Common<'static, PIO0>,
    strip: PioWs2812<'static, PIO0, 0, LED_COUNT, Grb>,
    adc: Adc<'static, adc::Async>,
    joystick_x: adc::Channel<'static>,
    joystick_y: adc::Channel<'static>,
    confirm: Button<'static>,
    cancel: Button<'static>,
    success: Output<'static>,
    failure: Output<'static>,
    buzzer: PwmBuzzer<'static>,
    oled: Option<Oled>,
    delay: Delay,
}

impl PicoBoard {
    /// Claim the game's peripherals and bring every part up.
    #[must_use]
    pub fn new(p: Peripherals) -> Self {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(p.PIO0, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let strip = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);

        let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
        let joystick_y = adc::Channel::new_pin(p.PIN_26, Pull::None);
        let joystick_x = adc::Channel::new_pin(p.PIN_27, Pull::None);

        let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, pwm::Config::default());

        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;
        let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
        let interface = I2CDisplayInterface::new_custom_address(i2c, OLED_ADDRESS);
        let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let oled = match oled.init() {
            Ok(()) => Some(oled),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("oled: no response at {=u8:#x}, running without it", OLED_ADDRESS);
                None
            }
        };

        Self {
            _pio: common,
            strip,
            adc,
            joystick_x,
            joystick_y,
            confirm: Button::new(p.PIN_5),
            cancel: Button::new(p.PIN_6),
            success: Output::new(p.PIN_11, Level::Low),
            failure: Output::new(p.PIN_13, Level::Low),
            buzzer: PwmBuzzer::new(pwm),
            oled,
            delay: Delay,
        }
    }

    /// A seed for the game's random source from joystick noise and the uptime clock.
    pub async fn entropy_seed(&mut self) -> u64 {
        let mut seed = Instant::now().as_ticks();
        for _ in 0..SEED_SAMPLES {
            let x = self.read_axis(Axis::Horizontal).await;
            let y = self.read_axis(Axis::Vertical).await;
            seed = seed.rotate_left(13)
                ^ u64::from(x)
                ^ (u64::from(y) << 16)
                ^ Instant::now().as_ticks();
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("board: seed {=u64:#x}", seed);
        seed
    }
}

impl LedMatrix for PicoBoard {
    async fn write_frame(&mut self, frame: &Frame) {
        self.strip.write(&frame.0).await;
    }
}

impl Joystick for PicoBoard {
    async fn read_axis(&mut self, axis: Axis) -> u16 {
        let channel = match axis {
            Axis::Horizontal => &mut self.joystick_x,
            Axis::Vertical => &mut self.joystick_y,
        };
        match self.adc.read(channel).await {
            Ok(reading) => reading,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("joystick: {} read failed, treating as centered", axis);
                AXIS_CENTER
            }
        }
    }
}

impl Buttons for PicoBoard {
    fn is_pressed(&mut self, button: ButtonId) -> bool {
        match button {
            ButtonId::Confirm => self.confirm.is_pressed(),
            ButtonId::Cancel => self.cancel.is_pressed(),
        }
    }
}

impl Indicators for PicoBoard {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        let output = match indicator {
            Indicator::Success => &mut self.success,
            Indicator::Failure => &mut self.failure,
        };
        output.set_level(Level::from(on));
    }
}

impl Buzzer for PicoBoard {
    async fn play_tone(&mut self, tone: Tone) {
        self.buzzer.play(tone).await;
    }
}

impl StatusDisplay for PicoBoard {
    async fn show_text(&mut self, line1: &str, line2: &str) {
        #[cfg(feature = "defmt")]
        defmt::info!("oled: {=str} / {=str}", line1, line2);
        let Some(oled) = self.oled.as_mut() else {
            return;
        };
        let shown = draw_status(oled, line1, line2).and_then(|()| oled.flush());
        if shown.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("oled: update failed");
        }
    }
}

impl DelayNs for PicoBoard {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }
}
