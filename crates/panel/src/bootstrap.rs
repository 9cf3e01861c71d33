//! HAL bring-up.
//!
//! Order matters:
//!   1. Display surface (window or headless buffer) at the native resolution
//!   2. Pointer: drives the focus group, draws the cursor
//!   3. Wheel: display events only, scrolls the page
//!   4. Keyboard: drives the focus group
//!   5. Focus group handed to the screen navigator

use platform::{DisplaySurface, Indev, InputDevice, InputGroup, InputKind};
use touch_system::asset::{BuiltinImage, ImageSource};
use touch_system::tree::NodeId;
use touch_emulator::Emulator;

/// Ordered bring-up steps.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. display: surface at native resolution",
    "2. pointer: group + display bound, builtin cursor",
    "3. wheel: display bound",
    "4. keyboard: group + display bound",
    "5. group: focus ring for the settings rows",
];

/// Cursor drawn at the pointer position.
pub const POINTER_CURSOR: ImageSource = ImageSource::Builtin(BuiltinImage::Cursor);

/// Display, registered input devices and the shared focus group.
pub struct Hal<S> {
    /// Frame sink and event pump.
    pub surface: S,
    /// Input devices in registration order.
    pub indevs: Vec<Indev>,
    /// Focus ring shared by group-bound devices.
    pub group: InputGroup<NodeId>,
}

impl<S: DisplaySurface> Hal<S> {
    /// Registers the three reference devices on `surface`.
    pub fn new(
        surface: S,
        pointer: impl InputDevice + 'static,
        wheel: impl InputDevice + 'static,
        keyboard: impl InputDevice + 'static,
    ) -> Self {
        let size = surface.size();
        tracing::info!(width = size.width, height = size.height, "display ready");

        let indevs = vec![
            Indev::new(pointer).bind_group().bind_display().with_cursor(POINTER_CURSOR),
            Indev::new(wheel).bind_display(),
            Indev::new(keyboard).bind_display().bind_group(),
        ];
        for indev in &indevs {
            tracing::info!(
                kind = indev.kind().name(),
                display = indev.is_display_bound(),
                group = indev.is_group_bound(),
                "input device registered"
            );
        }

        let hal = Self::with_indevs(surface, indevs);
        for step in BOOT_SEQUENCE_STEPS {
            tracing::debug!(step = *step, "bring-up step done");
        }
        hal
    }

    /// HAL with a caller-supplied device set.
    pub fn with_indevs(surface: S, indevs: Vec<Indev>) -> Self {
        tracing::debug!(devices = indevs.len(), "focus group created");
        Self {
            surface,
            indevs,
            group: InputGroup::new(),
        }
    }

    /// First registered device of `kind`.
    pub fn indev(&self, kind: InputKind) -> Option<&Indev> {
        self.indevs.iter().find(|indev| indev.kind() == kind)
    }

    /// Cursor of the first pointer that has one.
    pub fn cursor(&self) -> Option<&ImageSource> {
        self.indevs.iter().find_map(Indev::cursor)
    }
}

/// Brings up the HAL on an emulator.
pub fn hal_init(emulator: Emulator) -> Hal<Emulator> {
    tracing::info!(headless = emulator.is_headless(), scale = emulator.config().scale, "emulator hal init");
    let pointer = emulator.pointer();
    let wheel = emulator.wheel();
    let keyboard = emulator.keyboard();
    Hal::new(emulator, pointer, wheel, keyboard)
}
