// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    otg_fs::{UsbBus, USB},
    pac,
    prelude::*,
    rcc::{HSEClock, HSEClockMode, PLL48CLK},
    serial::{Config as SerialConfig, Serial},
};
use stm32f7xx_hal as hal;
use usb_device::bus::UsbBusAllocator;

use airpointer::config::Config;
use airpointer::control::ReportScheduler;
use airpointer::hw::{pins::BoardPins, HostTransport, Led, UsbMouse, Usart};

const CONFIG: Config = Config::DEFAULT;

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks: 8 MHz ST-LINK MCO into HSE, 216 MHz core, 48 MHz for USB
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc
        .cfgr
        .hse(HSEClock::new(8.MHz(), HSEClockMode::Bypass))
        .use_pll()
        .use_pll48clk(PLL48CLK::Pllq)
        .sysclk(216.MHz())
        .freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
    let mut delay = cortex_m::delay::Delay::new(cp.SYST, clocks.sysclk().raw());

    // USART3 (DBG)
    let usart_cfg = SerialConfig {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let mut console = Usart::new(serial);
    console.println("airpointer up");

    // USB OTG FS
    let usb = USB::new(
        dp.OTG_FS_GLOBAL,
        dp.OTG_FS_DEVICE,
        dp.OTG_FS_PWRCLK,
        (pins.usb.dm, pins.usb.dp),
        &clocks,
    );
    let ep_memory = cortex_m::singleton!(: [u32; 1024] = [0; 1024]).unwrap();
    let usb_alloc: &'static UsbBusAllocator<UsbBus<USB>> =
        cortex_m::singleton!(: UsbBusAllocator<UsbBus<USB>> = UsbBus::new(usb, ep_memory)).unwrap();
    let mut mouse = match UsbMouse::new(usb_alloc) {
        Ok(mouse) => mouse,
        Err(e) => {
            let _ = writeln!(console, "usb init failed: {e}\r");
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    #[cfg(not(feature = "radar"))]
    {
        use airpointer::control::{BiasCalibrator, GyroPointer, MotionMapper};
        use airpointer::drivers::{drv2605::effect, Drv2605, Mpu6050};
        use airpointer::hw::I2cBus;
        use hal::i2c::{BlockingI2c, Mode};

        // I2C1 (MPU-6050, DRV2605L)
        let i2c = BlockingI2c::i2c1(
            dp.I2C1,
            (pins.i2c1.scl, pins.i2c1.sda),
            Mode::fast(CONFIG.i2c_frequency_hz.Hz()),
            &clocks,
            &mut rcc.apb1,
            50_000,
        );
        let mut mpu = Mpu6050::new(I2cBus::new(i2c), CONFIG.gyro_address);

        while let Err(e) = mpu.probe().and_then(|_| mpu.wake()) {
            let _ = writeln!(console, "mpu6050 at {:#04x}: {e}\r", mpu.address());
            for _ in 0..50 {
                mouse.service();
                delay.delay_ms(10);
            }
        }
        if let Ok(m) = mpu.read_motion() {
            let _ = writeln!(
                console,
                "accel {} {} {} gyro {} {} {} temp {:.2} C\r",
                m.accel.x,
                m.accel.y,
                m.accel.z,
                m.gyro.x,
                m.gyro.y,
                m.gyro.z,
                m.temperature_c()
            );
        }

        // Calibrate with the sensor at rest
        let mut led = Led::active_high(pins.leds.red);
        led.on();
        let calibrator = BiasCalibrator::new(CONFIG.calibration);
        let bias = loop {
            match calibrator.calibrate(&mut mpu, &mut mouse, &mut delay) {
                Ok(bias) => break bias,
                Err(e) => {
                    let _ = writeln!(console, "calibration failed: {e}, retrying\r");
                }
            }
        };
        led.off();
        let _ = writeln!(console, "bias {} {} {}\r", bias.x, bias.y, bias.z);

        // Haptic click, if a DRV2605L is fitted
        let mut bus = mpu.free();
        let mut haptic = Drv2605::new(&mut bus);
        match haptic.init_lra() {
            Ok(()) => {
                if let Err(e) = haptic.play_effect(effect::STRONG_CLICK) {
                    let _ = writeln!(console, "haptic effect failed: {e}\r");
                }
            }
            Err(_) => console.println("no haptic driver"),
        }

        let mut pointer = GyroPointer::new(
            Mpu6050::new(bus, CONFIG.gyro_address),
            MotionMapper::new(bias, CONFIG.mapper),
        );
        ReportScheduler::new(mouse, delay, console, &CONFIG).run(&mut pointer)
    }

    #[cfg(feature = "radar")]
    {
        use airpointer::control::RadarPointer;
        use airpointer::hw::SerialRx;

        // USART2 (LD2450)
        let radar_cfg = SerialConfig {
            baud_rate: CONFIG.radar.baud_rate.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART2,
            (pins.usart2.tx, pins.usart2.rx),
            &clocks,
            radar_cfg,
        );
        let mut radar = RadarPointer::new(SerialRx::new(serial), &CONFIG.radar);

        let mut led = Led::active_high(pins.leds.green);
        led.on();
        let _ = writeln!(console, "radar at {} baud\r", CONFIG.radar.baud_rate);
        ReportScheduler::new(mouse, delay, console, &CONFIG).run(&mut radar)
    }
}
