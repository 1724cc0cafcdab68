//! Tricorder Main Application
//!
//! Entry point for the STM32G474-based sensor tricorder.
//! Brings up the buses and peripherals, then runs the UI loop as the only
//! task until a fault stops it.

#![no_std]
#![no_main]

use defmt::{error, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::{hz, khz, Hertz};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::{bind_interrupts, i2c, peripherals};
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::options::{ColorOrder, Orientation, Rotation};
use mipidsi::Builder;
use {defmt_rtt as _, panic_probe as _};

use tricorder_firmware::drivers::display::Renderer;
use tricorder_firmware::drivers::ds3231::Ds3231;
use tricorder_firmware::drivers::ft6x36::{Ft6x36, TouchTransform};
use tricorder_firmware::drivers::lidar_lite::{LidarLite, Profile};
use tricorder_firmware::drivers::ltr390::Ltr390;
use tricorder_firmware::drivers::pa1010d::Pa1010d;
use tricorder_firmware::drivers::tea5767::Tea5767;
use tricorder_firmware::hal::gpio::RgbLed;
use tricorder_firmware::hal::i2c::{I2cAddress, I2cDevice, SharedI2c};
use tricorder_firmware::hal::pwm::{Backlight, DutyCycle, Piezo};
use tricorder_firmware::prelude::*;
use tricorder_firmware::radio::controller::RadioController;
use tricorder_firmware::radio::state::TunerSettings;
use tricorder_firmware::sensors::SensorHub;
use tricorder_firmware::ui::ui_loop::{Frontend, UiLoop};

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Tricorder Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    // I2C1: every sensor, the tuner and the touch controller
    // PB8 = SCL, PB9 = SDA
    let i2c = I2c::new(
        p.I2C1,
        p.PB8,
        p.PB9,
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    let bus: SharedI2c<_> = Mutex::new(i2c);
    info!("I2C1 initialized at {} Hz", I2C_FREQUENCY_HZ);

    // Display on SPI1, write only
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(DISPLAY_SPI_HZ);
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, spi_config);
    let cs = Output::new(p.PB6, Level::High, Speed::VeryHigh);
    let dc = Output::new(p.PB7, Level::Low, Speed::VeryHigh);
    let rst = Output::new(p.PB0, Level::High, Speed::Low);
    let spi_device = unwrap!(ExclusiveDevice::new_no_delay(spi, cs));

    let mut spi_buffer = [0u8; 512];
    let di = SpiInterface::new(spi_device, dc, &mut spi_buffer);
    let panel = unwrap!(Builder::new(ILI9341Rgb565, di)
        .reset_pin(rst)
        .display_size(SCREEN_HEIGHT as u16, SCREEN_WIDTH as u16)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .color_order(ColorOrder::Bgr)
        .init(&mut Delay)
        .map_err(|_| Error::Display));
    let mut renderer = Renderer::new(panel);
    unwrap!(renderer.clear());
    info!("Display initialized");

    // Backlight on TIM3 CH1, piezo on TIM2 CH1
    let backlight_pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
        None,
        None,
        None,
        khz(1),
        CountingMode::EdgeAlignedUp,
    );
    let mut backlight = Backlight::new(backlight_pwm);
    backlight.set(DutyCycle::from_percent(BACKLIGHT_PERCENT));

    let piezo_pwm = SimplePwm::new(
        p.TIM2,
        Some(PwmPin::new_ch1(p.PA0, OutputType::PushPull)),
        None,
        None,
        None,
        hz(BEEP_CUE_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let piezo = Piezo::new(piezo_pwm);

    let led = RgbLed::new(
        Output::new(p.PC0, Level::Low, Speed::Low),
        Output::new(p.PC1, Level::Low, Speed::Low),
        Output::new(p.PC2, Level::Low, Speed::Low),
    );

    // Sensors
    let mut light = Ltr390::new(I2cDevice::new(&bus, I2cAddress::LTR390), Delay);
    unwrap!(light.init().await);

    let mut gps = Pa1010d::new(I2cDevice::new(&bus, I2cAddress::GPS));
    unwrap!(gps.init().await);

    let mut clock = Ds3231::new(I2cDevice::new(&bus, I2cAddress::DS3231));
    if unwrap!(clock.lost_power().await) {
        warn!("RTC lost power, time is not valid until it is set");
    }

    let mut range = LidarLite::new(I2cDevice::new(&bus, I2cAddress::LIDAR), Delay);
    unwrap!(range.configure(Profile::Default).await);

    let mut touch = Ft6x36::new(
        I2cDevice::new(&bus, I2cAddress::TOUCH),
        TouchTransform::LANDSCAPE,
    );
    unwrap!(touch.init().await);
    info!("Sensors initialized");

    let tuner = Tea5767::new(
        I2cDevice::new(&bus, I2cAddress::TEA5767),
        TunerSettings::default(),
        default_frequency(),
    );

    let mut ui = UiLoop::new(
        SensorHub::new(light, gps, clock, range),
        RadioController::new(tuner),
        Frontend {
            surface: renderer,
            cues: piezo,
            indicator: led,
            touch,
            delay: Delay,
        },
    );
    unwrap!(ui.start().await);

    let fault = ui.run().await;
    error!("Tricorder halted: {}", fault);
    core::future::pending::<()>().await;
}
