//! Display Surface
//!
//! The passive sink the polling engine renders into. Layout, fonts and
//! widgets live with the implementation; the engine only sets values.

use crate::classify::TemperatureBand;

/// Named text fields on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Vehicle speed readout
    Speed,
    /// Throttle percentage readout
    Throttle,
    /// Engine RPM readout
    Rpm,
    /// Coolant temperature readout
    Temperature,
}

impl TextField {
    /// Every field, in on-screen order
    pub const ALL: [TextField; 4] = [
        TextField::Speed,
        TextField::Throttle,
        TextField::Rpm,
        TextField::Temperature,
    ];
}

/// Presentation flags. They only affect the surface, never the polling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Draw frame borders to help place the UI elements
    pub debug_layout: bool,
    /// Anchor the layout at the bottom of the screen
    pub bottom_orientation: bool,
}

/// Sink for rendered dashboard values
pub trait DisplaySurface {
    /// Set the text of one field
    fn set_text(&mut self, field: TextField, value: &str);

    /// Set the throttle bar level (0-100)
    fn set_progress(&mut self, value: u8);

    /// Apply the temperature band's color
    fn set_classification(&mut self, band: TemperatureBand);

    /// Called once after all values of a tick have been set
    fn refresh(&mut self) {}

    /// Close the surface. The engine calls this at most once per session.
    fn teardown(&mut self);
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn set_text(&mut self, field: TextField, value: &str) {
        (**self).set_text(field, value)
    }

    fn set_progress(&mut self, value: u8) {
        (**self).set_progress(value)
    }

    fn set_classification(&mut self, band: TemperatureBand) {
        (**self).set_classification(band)
    }

    fn refresh(&mut self) {
        (**self).refresh()
    }

    fn teardown(&mut self) {
        (**self).teardown()
    }
}
