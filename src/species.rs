use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Particle species. Heavy and Light populate the ideal-gas screens; the two
/// diffusion species populate the diffusion container.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum ParticleType {
    Heavy,
    Light,
    Diffusion1,
    Diffusion2,
}

impl ParticleType {
    pub const IDEAL_GAS: [ParticleType; 2] = [ParticleType::Heavy, ParticleType::Light];
    pub const DIFFUSION: [ParticleType; 2] = [ParticleType::Diffusion1, ParticleType::Diffusion2];

    pub fn is_diffusion(&self) -> bool {
        matches!(self, ParticleType::Diffusion1 | ParticleType::Diffusion2)
    }

    /// Position of a diffusion species in per-species arrays.
    pub fn diffusion_index(&self) -> Option<usize> {
        match self {
            ParticleType::Diffusion1 => Some(0),
            ParticleType::Diffusion2 => Some(1),
            ParticleType::Heavy | ParticleType::Light => None,
        }
    }

    fn props(&self) -> SpeciesProps {
        get_species_props(*self)
    }

    /// Default mass in AMU.
    pub fn mass(&self) -> f64 {
        self.props().mass
    }

    /// Default radius in pm.
    pub fn radius(&self) -> f64 {
        self.props().radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeciesProps {
    pub mass: f64,
    pub radius: f64,
}

pub static SPECIES_PROPERTIES: Lazy<HashMap<ParticleType, SpeciesProps>> = Lazy::new(|| {
    use ParticleType::*;
    let mut m = HashMap::new();
    m.insert(
        Heavy,
        SpeciesProps {
            mass: 28.0,
            radius: 125.0,
        },
    );
    m.insert(
        Light,
        SpeciesProps {
            mass: 4.0,
            radius: 62.5,
        },
    );
    m.insert(
        Diffusion1,
        SpeciesProps {
            mass: 28.0,
            radius: 125.0,
        },
    );
    m.insert(
        Diffusion2,
        SpeciesProps {
            mass: 4.0,
            radius: 62.5,
        },
    );
    m
});

pub fn get_species_props(species: ParticleType) -> SpeciesProps {
    SPECIES_PROPERTIES
        .get(&species)
        .copied()
        .unwrap_or(SpeciesProps {
            mass: 28.0,
            radius: 125.0,
        })
}

/// Largest default radius, used to size placement margins.
pub fn max_radius() -> f64 {
    SPECIES_PROPERTIES
        .values()
        .map(|p| p.radius)
        .fold(0.0_f64, f64::max)
}
