// gas_law/mod.rs
// Ideal Gas Law feedback: which quantity is held constant, the temperature
// and pressure models, and the notifications raised when a state cannot be held.

pub mod controller;
pub mod pressure;
pub mod temperature;


pub use controller::GasLawController;
pub use pressure::{ideal_pressure, PressureModel};
pub use temperature::TemperatureModel;

use crossbeam::channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldConstant {
    #[default]
    Nothing,
    Volume,
    Temperature,
    PressureViaVolume,
    PressureViaTemperature,
}

impl HoldConstant {
    /// Modes that cannot be held without particles.
    pub fn needs_particles(&self) -> bool {
        matches!(
            self,
            HoldConstant::Temperature | HoldConstant::PressureViaVolume | HoldConstant::PressureViaTemperature
        )
    }

    pub fn holds_pressure(&self) -> bool {
        matches!(self, HoldConstant::PressureViaVolume | HoldConstant::PressureViaTemperature)
    }

    /// Modes that own the temperature; the heater is ignored in these.
    pub fn owns_temperature(&self) -> bool {
        matches!(self, HoldConstant::Temperature | HoldConstant::PressureViaTemperature)
    }

    /// Modes in which the user may not change the container width.
    pub fn owns_volume(&self) -> bool {
        matches!(self, HoldConstant::Volume | HoldConstant::PressureViaVolume)
    }

    /// Notification raised when this mode meets an empty container.
    fn empty_container_oops(&self) -> Option<Oops> {
        match self {
            HoldConstant::Temperature => Some(Oops::TemperatureUndefinedEmptyContainer),
            HoldConstant::PressureViaVolume | HoldConstant::PressureViaTemperature => {
                Some(Oops::PressureUndefinedEmptyContainer)
            }
            HoldConstant::Nothing | HoldConstant::Volume => None,
        }
    }
}

/// A state the controller cannot hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Oops {
    TemperatureUndefinedEmptyContainer,
    PressureUndefinedEmptyContainer,
    PressureHeldConstantVolumeTooLarge,
    PressureHeldConstantVolumeTooSmall,
    MaximumTemperatureExceeded,
}

impl Oops {
    pub fn message(&self) -> &'static str {
        match self {
            Oops::TemperatureUndefinedEmptyContainer => {
                "Temperature cannot be held constant when the container is empty."
            }
            Oops::PressureUndefinedEmptyContainer => {
                "Pressure cannot be held constant when the container is empty."
            }
            Oops::PressureHeldConstantVolumeTooLarge => {
                "Pressure cannot be held constant. Volume would be too large."
            }
            Oops::PressureHeldConstantVolumeTooSmall => {
                "Pressure cannot be held constant. Volume would be too small."
            }
            Oops::MaximumTemperatureExceeded => {
                "Temperature is very high. The maximum temperature has been exceeded."
            }
        }
    }
}

/// Fan-out of Oops notifications to any number of subscribers.
#[derive(Default)]
pub struct OopsNotifier {
    subscribers: Vec<Sender<Oops>>,
}

impl OopsNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<Oops> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to every live subscriber; disconnected ones are dropped.
    pub fn notify(&mut self, oops: Oops) {
        tracing::info!(?oops, "{}", oops.message());
        self.subscribers.retain(|tx| tx.send(oops).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
