use avr_device::atmega328p::CPU;

// SMCR: SM2:0 at bits 3:1, SE at bit 0
const SE: u8 = 1 << 0;
const SM_POWER_DOWN: u8 = 0b010 << 1;

pub struct Power {
    _private: (),
}

impl Power {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for Power {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::hal::DeepSleep for Power {
    fn enter_deepest_sleep(&mut self) -> ! {
        // Mode and enable in one write; SMCR has no other bits
        unsafe {
            (*CPU::ptr()).smcr.write(|w| w.bits(SM_POWER_DOWN | SE));
        }
        // Interrupts are off, so only a reset ends this. Loop anyway in case
        // something wakes the core without resetting it.
        loop {
            avr_device::asm::sleep();
        }
    }
}
