//! Species, Diets and Genes
//!
//! Classification shared by every living thing in the ecosystem.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of living entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Plant,
    Rabbit,
    Fox,
}

impl Species {
    /// Returns all species variants.
    pub fn all() -> &'static [Species] {
        &[Species::Plant, Species::Rabbit, Species::Fox]
    }

    /// What members of this species eat unless configured otherwise.
    pub fn default_diet(self) -> Diet {
        match self {
            Species::Plant => Diet::empty(),
            Species::Rabbit => Diet::PLANT,
            Species::Fox => Diet::RABBIT,
        }
    }

    /// True for species that move and think.
    pub fn is_animal(self) -> bool {
        !matches!(self, Species::Plant)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Plant => write!(f, "plant"),
            Species::Rabbit => write!(f, "rabbit"),
            Species::Fox => write!(f, "fox"),
        }
    }
}

bitflags! {
    /// Set of species a creature may feed on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Diet: u8 {
        const PLANT  = 1 << 0;
        const RABBIT = 1 << 1;
        const FOX    = 1 << 2;
    }
}

impl Diet {
    /// The single flag standing for `species`.
    pub fn of(species: Species) -> Diet {
        match species {
            Species::Plant => Diet::PLANT,
            Species::Rabbit => Diet::RABBIT,
            Species::Fox => Diet::FOX,
        }
    }

    pub fn includes(self, species: Species) -> bool {
        self.contains(Diet::of(species))
    }

    /// Builds a diet from a list of species.
    pub fn from_species(species: &[Species]) -> Diet {
        species.iter().fold(Diet::empty(), |diet, s| diet | Diet::of(*s))
    }

    /// Species contained in this diet, in declaration order.
    pub fn species(self) -> impl Iterator<Item = Species> {
        Species::all().iter().copied().filter(move |s| self.includes(*s))
    }
}

/// Biological sex, the only heritable attribute tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

/// Genotype assigned at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genes {
    pub sex: Sex,
}

impl Genes {
    pub fn new(sex: Sex) -> Self {
        Self { sex }
    }
}
