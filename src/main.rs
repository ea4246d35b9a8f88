#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

#[cfg(all(feature = "self-test", feature = "framework"))]
compile_error!("enable only one of the `self-test` and `framework` features");

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("zombie_sram is AVR firmware; build it with `cargo build-avr`");
}

#[cfg(target_arch = "avr")]
mod image {
    use panic_halt as _;

    // Straight out of reset, ahead of the C runtime start-up: r1 (the zero
    // register the compiler relies on) holds garbage and .data/.bss are not
    // set up yet. SP already points at RAMEND after any reset.
    //
    // Code reachable from `early_entry` must not read statics or anything
    // LLVM places in .rodata, which on AVR is copied to RAM along with .data.
    core::arch::global_asm!(
        ".pushsection .init0,\"ax\",@progbits",
        "    eor r1, r1",
        "    call {entry}",
        ".popsection",
        entry = sym early_entry,
    );

    #[cfg(not(feature = "framework"))]
    use self_test::early_entry;

    #[cfg(feature = "framework")]
    use framework::early_entry;

    #[cfg(not(feature = "framework"))]
    mod self_test {
        use zombie_sram::drivers::{DiagLeds, Reporter};
        use zombie_sram::hal::{board, DeepSleep, Delay, HwWatchdog, Power, Usart};
        use zombie_sram::{retained, Dispatcher, PatternEngine, SelfTest};

        pub(super) unsafe extern "C" fn early_entry() {
            let mut engine = PatternEngine::new(retained::pattern_arena());
            let mut test = SelfTest::new(
                Reporter::new(Usart::new(), Delay::new()),
                DiagLeds::new(board::LedOk::new_output(), board::LedFail::new_output()),
            );

            Dispatcher::new(HwWatchdog::new(), Power::new()).self_test(&mut test, &mut engine)
        }

        #[avr_device::entry]
        fn main() -> ! {
            // early_entry never returns in this image
            Power::new().enter_deepest_sleep()
        }
    }

    #[cfg(feature = "framework")]
    mod framework {
        use embedded_hal::digital::v2::OutputPin;
        use zombie_sram::hal::{board, HwWatchdog, Power, Watchdog};
        use zombie_sram::{Application, BootPath, Dispatcher};

        /// Placeholder user code: a short pulse on PD0 per wake.
        struct Heartbeat;

        impl Application for Heartbeat {
            fn wake<W: Watchdog>(&mut self, _watchdog: &mut W) {
                // I/O registers are back at reset values, set the pin up again
                let mut pin = board::WakePin::new_output();
                pin.set_high().ok();
                for _ in 0..100 {
                    avr_device::asm::nop();
                }
                pin.set_low().ok();
            }
        }

        /// Watchdog wakes are served from here and never reach the runtime
        /// start-up, so globals set by the startup hook stay as they were.
        /// A cold start returns and carries on into `main`.
        pub(super) unsafe extern "C" fn early_entry() {
            let dispatcher = Dispatcher::new(HwWatchdog::new(), Power::new());
            if dispatcher.classify() == BootPath::WarmWake {
                dispatcher.enter(BootPath::WarmWake, &mut Heartbeat)
            }
        }

        #[avr_device::entry]
        fn main() -> ! {
            Dispatcher::new(HwWatchdog::new(), Power::new()).enter(BootPath::ColdStart, &mut Heartbeat)
        }
    }
}
