//! Simulation clock shared between components.

use std::cell::Cell;
use std::rc::Rc;

/// Current simulation time, shared by all components of one simulation.
///
/// Time only moves forward and is advanced by the simulation driver.
#[derive(Clone, Default)]
pub struct SimClock {
    time: Rc<Cell<f64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current simulation time.
    pub fn time(&self) -> f64 {
        self.time.get()
    }

    /// Moves the clock forward by `delta` seconds.
    pub fn advance(&self, delta: f64) {
        assert!(delta >= 0., "simulation time can't go backwards");
        self.time.set(self.time.get() + delta);
    }
}

/// A facade for accessing the simulation clock from a named component.
#[derive(Clone)]
pub struct ComponentContext {
    name: String,
    clock: SimClock,
}

impl ComponentContext {
    pub fn new(name: &str, clock: SimClock) -> Self {
        Self {
            name: name.to_owned(),
            clock,
        }
    }

    /// Returns the name of component associated with this context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current simulation time.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }
}
