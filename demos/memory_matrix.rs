#![allow(missing_docs)]
//! Memory Matrix firmware: the memory game on a Pico with a 5x5 WS2812 matrix,
//! joystick, two buttons, status LEDs, a buzzer, and an SSD1306 OLED.
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]
#![allow(clippy::future_not_send, reason = "single-threaded")]

use core::{convert::Infallible, panic};
use embassy_executor::Spawner;
use memory_matrix::Result;
use memory_matrix::board::PicoBoard;
use memory_matrix::game::Game;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Every part of the game hangs off one board value; see `board` for the wiring.
    let mut board = PicoBoard::new(p);

    // Joystick noise and boot timing differ from one power-up to the next.
    let rng = SmallRng::seed_from_u64(board.entropy_seed().await);

    defmt::info!("memory matrix: starting");
    Game::new(rng).run(&mut board).await
}
