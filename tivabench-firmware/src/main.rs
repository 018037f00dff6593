//! Bench rig firmware for the TM4C123G LaunchPad
//!
//! Brings up the board, then hands control to one of the demo loops.
//! The active demo is compiled in; change [`DEMO`] and reflash to switch.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::info;
use tivabench_core::DemoMode;
use tm4c123x::Peripherals;
use {defmt_rtt as _, panic_probe as _};

mod board;
mod bus;
mod demos;

/// The demo loop to run after bring-up.
const DEMO: DemoMode = DemoMode::FullSystem;

#[entry]
fn main() -> ! {
    info!("tivabench starting");

    let p = Peripherals::take().unwrap();
    let board = board::Board::init(p);
    info!("board initialized, sysclk {} Hz", board::SYSTEM_HZ);

    demos::run(DEMO, board)
}
