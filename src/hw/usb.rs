// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USB full-speed HID mouse.
//!
//! `UsbMouse` owns the device state machine and a single boot-style mouse interface. The host
//! enumerates it as a standard relative pointer, so no driver is needed on the host side.
//!
//! `service()` must run at least every few milliseconds or enumeration stalls. The report loop
//! calls it once per tick.

use usb_device::bus::{UsbBus, UsbBusAllocator};
use usb_device::device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid};
use usb_device::UsbError;
use usbd_hid::descriptor::{MouseReport, SerializedDescriptor};
use usbd_hid::hid_class::HIDClass;

use crate::error::TransportError;
use crate::hw::{HostTransport, PointerReport};

/// pid.codes test VID/PID.
const VID_PID: UsbVidPid = UsbVidPid(0x1209, 0x0001);

/// Interrupt endpoint polling interval requested from the host.
const POLL_MS: u8 = 10;

pub struct UsbMouse<'a, B: UsbBus> {
    device: UsbDevice<'a, B>,
    hid: HIDClass<'a, B>,
}

impl<'a, B: UsbBus> UsbMouse<'a, B> {
    pub fn new(alloc: &'a UsbBusAllocator<B>) -> Result<Self, TransportError> {
        let hid = HIDClass::new(alloc, MouseReport::desc(), POLL_MS);
        let device = UsbDeviceBuilder::new(alloc, VID_PID)
            .strings(&[StringDescriptors::default()
                .manufacturer("airpointer")
                .product("Motion Pointer")
                .serial_number("0001")])
            .map_err(|_| TransportError::Usb)?
            .device_class(0)
            .build();
        Ok(Self { device, hid })
    }

    #[inline]
    pub fn state(&self) -> UsbDeviceState {
        self.device.state()
    }
}

impl<B: UsbBus> HostTransport for UsbMouse<'_, B> {
    fn service(&mut self) {
        self.device.poll(&mut [&mut self.hid]);
    }

    fn is_ready(&mut self) -> bool {
        self.device.state() == UsbDeviceState::Configured
    }

    fn submit_pointer_report(&mut self, report: PointerReport) -> Result<(), TransportError> {
        let report = MouseReport {
            buttons: report.buttons,
            x: report.dx,
            y: report.dy,
            wheel: report.wheel,
            pan: report.pan,
        };
        match self.hid.push_input(&report) {
            Ok(_) => Ok(()),
            Err(UsbError::WouldBlock) => Err(TransportError::Busy),
            Err(_) => Err(TransportError::Usb),
        }
    }
}
