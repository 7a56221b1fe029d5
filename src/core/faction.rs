//! Factions and per-faction storage.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the four influence tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Emperor,
    Guild,
    Fremen,
    BeneGesserit,
}

impl Faction {
    /// All factions in track order.
    pub const ALL: [Faction; 4] = [
        Faction::Emperor,
        Faction::Guild,
        Faction::Fremen,
        Faction::BeneGesserit,
    ];

    /// Track name as written in audit lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Faction::Emperor => "emperor",
            Faction::Guild => "guild",
            Faction::Fremen => "fremen",
            Faction::BeneGesserit => "bene_gesserit",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-size per-faction storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactionMap<T> {
    emperor: T,
    guild: T,
    fremen: T,
    bene_gesserit: T,
}

impl<T> FactionMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Faction) -> T) -> Self {
        Self {
            emperor: factory(Faction::Emperor),
            guild: factory(Faction::Guild),
            fremen: factory(Faction::Fremen),
            bene_gesserit: factory(Faction::BeneGesserit),
        }
    }

    /// Iterate over (Faction, &T) pairs in track order.
    pub fn iter(&self) -> impl Iterator<Item = (Faction, &T)> {
        Faction::ALL.into_iter().map(move |f| (f, &self[f]))
    }

    /// Iterate over the values in track order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        Faction::ALL.into_iter().map(move |f| &self[f])
    }
}

impl<T> Index<Faction> for FactionMap<T> {
    type Output = T;

    fn index(&self, faction: Faction) -> &T {
        match faction {
            Faction::Emperor => &self.emperor,
            Faction::Guild => &self.guild,
            Faction::Fremen => &self.fremen,
            Faction::BeneGesserit => &self.bene_gesserit,
        }
    }
}

impl<T> IndexMut<Faction> for FactionMap<T> {
    fn index_mut(&mut self, faction: Faction) -> &mut T {
        match faction {
            Faction::Emperor => &mut self.emperor,
            Faction::Guild => &mut self.guild,
            Faction::Fremen => &mut self.fremen,
            Faction::BeneGesserit => &mut self.bene_gesserit,
        }
    }
}
