//! Demo loops, one per [`DemoMode`]
//!
//! Every loop is infinite and polled; a missing sensor is logged once and
//! the loop degrades to a heartbeat instead of wedging the rig.

use core::fmt::Write;

use defmt::{info, warn};
use heapless::String;
use tivabench_core::{BusError, DemoMode};
use tivabench_drivers::color::{DetectedColor, Tcs34727};
use tivabench_drivers::display::Lcd;
use tivabench_drivers::imu::Mpu6050;
use tivabench_hal::DelayMs;

use crate::board::Board;

/// First and last assignable device addresses; below and above are
/// reserved by the protocol.
const PROBE_FIRST: u8 = 0x08;
const PROBE_LAST: u8 = 0x77;

const SWEEP_ANGLES: [i16; 8] = [0, -45, 0, 45, 0, -90, 0, 90];

pub fn run(mode: DemoMode, board: Board) -> ! {
    info!("demo: {}", mode.label());
    match mode {
        DemoMode::Delay => heartbeat(board),
        DemoMode::BusProbe => bus_probe(board),
        DemoMode::Imu => imu_stream(board),
        DemoMode::ColorSensor => color_to_led(board),
        DemoMode::Servo => servo_sweep(board),
        DemoMode::Lcd => lcd_banner(board),
        DemoMode::FullSystem => full_system(board),
    }
}

/// Blink the green channel forever. Also the degraded mode when a demo's
/// sensor is absent.
fn heartbeat(mut board: Board) -> ! {
    loop {
        board.rgb.show(DetectedColor::Green);
        board.delay.delay_ms(500);
        board.rgb.off();
        board.delay.delay_ms(500);
    }
}

/// Walk the assignable address range and log every device that
/// acknowledges a register read.
fn bus_probe(mut board: Board) -> ! {
    loop {
        let mut found = 0u8;
        for addr in PROBE_FIRST..=PROBE_LAST {
            match board.bus.read_reg(addr, 0x00) {
                Ok(_) => {
                    info!("device at 0x{=u8:02x}", addr);
                    found += 1;
                }
                Err(BusError::NoAck) => {}
                Err(BusError::Timeout) => warn!("bus timeout at 0x{=u8:02x}", addr),
            }
        }
        info!("probe complete, {} device(s)", found);
        board.delay.delay_ms(2000);
    }
}

fn imu_stream(mut board: Board) -> ! {
    let mut imu = Mpu6050::new(&mut board.bus);
    if let Err(e) = imu.init() {
        warn!("imu init failed: {}", e);
        drop(imu);
        heartbeat(board);
    }

    loop {
        match (imu.tilt_angles(), imu.gyro_dps()) {
            (Ok(tilt), Ok(gyro)) => {
                info!(
                    "roll {=f32} pitch {=f32} | gyro {=f32} {=f32} {=f32}",
                    tilt.roll, tilt.pitch, gyro[0], gyro[1], gyro[2]
                );
            }
            _ => warn!("imu sample failed"),
        }
        board.delay.delay_ms(50);
    }
}

fn color_to_led(mut board: Board) -> ! {
    let mut sensor = Tcs34727::new(&mut board.bus);
    if let Err(e) = sensor.init(&mut board.delay) {
        warn!("color sensor init failed: {}", e);
        drop(sensor);
        heartbeat(board);
    }

    loop {
        match sensor.detect() {
            Ok(color) => board.rgb.show(color),
            Err(_) => {
                warn!("color sample failed");
                board.rgb.off();
            }
        }
        board.delay.delay_ms(100);
    }
}

fn servo_sweep(mut board: Board) -> ! {
    loop {
        for angle in SWEEP_ANGLES {
            board.servo.drive(angle);
            board.delay.delay_ms(1000);
        }
    }
}

fn lcd_banner(mut board: Board) -> ! {
    let mut lcd = Lcd::new(&mut board.bus);
    if lcd.init(&mut board.delay).is_err() {
        warn!("lcd init failed");
        drop(lcd);
        heartbeat(board);
    }

    let mut uptime_s = 0u32;
    loop {
        let mut line: String<16> = String::new();
        let _ = write!(line, "up {}s", uptime_s);
        let shown = lcd
            .set_cursor(0, 3)
            .and_then(|_| lcd.write_str("tivabench"))
            .and_then(|_| lcd.set_cursor(1, 0))
            .and_then(|_| lcd.write_str(&line));
        if shown.is_err() {
            warn!("lcd write failed");
        }
        board.delay.delay_ms(1000);
        uptime_s = uptime_s.wrapping_add(1);
    }
}

/// Everything at once: tilt drives the servo, the color sensor drives the
/// RGB LED, the LCD shows the live readings. SW1 holds the servo at
/// center, SW2 blanks the LCD backlight while held.
fn full_system(mut board: Board) -> ! {
    let imu_ok = {
        let mut imu = Mpu6050::new(&mut board.bus);
        match imu.init() {
            Ok(()) => true,
            Err(e) => {
                warn!("imu init failed: {}", e);
                false
            }
        }
    };
    let color_ok = {
        let mut sensor = Tcs34727::new(&mut board.bus);
        match sensor.init(&mut board.delay) {
            Ok(()) => true,
            Err(e) => {
                warn!("color sensor init failed: {}", e);
                false
            }
        }
    };
    let lcd_ok = {
        let mut lcd = Lcd::new(&mut board.bus);
        lcd.init(&mut board.delay).is_ok()
    };
    if !lcd_ok {
        warn!("lcd init failed");
    }

    let mut backlight = true;
    loop {
        let mut roll = 0f32;
        let mut pitch = 0f32;
        if imu_ok {
            let mut imu = Mpu6050::new(&mut board.bus);
            if let Ok(tilt) = imu.tilt_angles() {
                roll = tilt.roll;
                pitch = tilt.pitch;
                if board.sw1.is_pressed() {
                    board.servo.center();
                } else {
                    board.servo.drive(roll as i16);
                }
            }
        }

        let mut color = DetectedColor::None;
        if color_ok {
            let mut sensor = Tcs34727::new(&mut board.bus);
            if let Ok(detected) = sensor.detect() {
                color = detected;
            }
        }
        board.rgb.show(color);

        if lcd_ok {
            let mut lcd = Lcd::new(&mut board.bus);
            let want_backlight = !board.sw2.is_pressed();
            if want_backlight != backlight {
                backlight = want_backlight;
                let _ = lcd.set_backlight(backlight);
            }

            let mut top: String<16> = String::new();
            let _ = write!(top, "R{:+04} P{:+04}", roll as i32, pitch as i32);
            let _ = lcd
                .set_cursor(0, 0)
                .and_then(|_| lcd.write_str(&top))
                .and_then(|_| lcd.set_cursor(1, 0))
                .and_then(|_| lcd.write_str(color_label(color)));
        }

        board.delay.delay_ms(100);
    }
}

fn color_label(color: DetectedColor) -> &'static str {
    match color {
        DetectedColor::Red => "red   ",
        DetectedColor::Green => "green ",
        DetectedColor::Blue => "blue  ",
        DetectedColor::None => "none  ",
    }
}
