use std::{collections::HashMap, ops::Index};

use crate::player::{Player, PlayerId};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerritoryId(pub usize);

#[derive(Clone, Debug)]
pub struct Territory {
    name: String,
    continent: Option<String>,
    neighbors: Vec<TerritoryId>,
    owner: Option<PlayerId>,
    armies: u32,
}

impl Territory {
    fn new(name: &str, continent: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            continent: continent.map(str::to_owned),
            neighbors: Vec::new(),
            owner: None,
            armies: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn continent(&self) -> Option<&str> {
        self.continent.as_deref()
    }

    pub fn neighbors(&self) -> &[TerritoryId] {
        &self.neighbors
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn armies(&self) -> u32 {
        self.armies
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }
}

/// Registry of territories and the adjacency between them.
#[derive(Clone, Debug, Default)]
pub struct World {
    territories: Vec<Territory>,
    by_name: HashMap<String, TerritoryId>,
}

impl Index<TerritoryId> for World {
    type Output = Territory;

    fn index(&self, index: TerritoryId) -> &Self::Output {
        &self.territories[index.0]
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a territory up by name, creating it when unseen. A known continent is never
    /// overwritten, an unknown one is filled in.
    pub fn get_or_create_territory(&mut self, name: &str, continent: Option<&str>) -> TerritoryId {
        if let Some(&id) = self.by_name.get(name) {
            let territory = &mut self.territories[id.0];
            if territory.continent.is_none() {
                territory.continent = continent.map(str::to_owned);
            }

            return id;
        }

        let id = TerritoryId(self.territories.len());
        self.territories.push(Territory::new(name, continent));
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Adds `neighbor` to the end of `territory`'s neighbor list. Returns `false` if the
    /// edge already existed.
    pub(crate) fn add_neighbor(&mut self, territory: TerritoryId, neighbor: TerritoryId) -> bool {
        let neighbors = &mut self.territories[territory.0].neighbors;
        if neighbors.contains(&neighbor) {
            return false;
        }

        neighbors.push(neighbor);
        true
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TerritoryId> {
        (0..self.territories.len()).map(TerritoryId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territories
            .iter()
            .enumerate()
            .map(|(i, territory)| (TerritoryId(i), territory))
    }

    pub fn find(&self, name: &str) -> Option<TerritoryId> {
        self.by_name.get(name).copied()
    }

    pub fn neighbors(&self, territory: TerritoryId) -> &[TerritoryId] {
        &self[territory].neighbors
    }

    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self[a].neighbors.contains(&b)
    }

    pub fn unclaimed(&self) -> Vec<TerritoryId> {
        self.iter()
            .filter(|(_, territory)| !territory.is_claimed())
            .map(|(id, _)| id)
            .collect()
    }

    /// Continent names in the order they were first declared.
    pub fn continents(&self) -> Vec<&str> {
        let mut continents: Vec<&str> = Vec::new();
        for continent in self.territories.iter().filter_map(Territory::continent) {
            if !continents.contains(&continent) {
                continents.push(continent);
            }
        }

        continents
    }

    pub fn change_armies(&mut self, territory: TerritoryId, delta: i32) {
        let territory = &mut self.territories[territory.0];
        territory.armies = territory
            .armies
            .checked_add_signed(delta)
            .unwrap_or_else(|| panic!("Army count driven negative on {}.", territory.name));
    }

    pub(crate) fn set_occupant(&mut self, territory: TerritoryId, owner: PlayerId, armies: u32) {
        let territory = &mut self.territories[territory.0];
        territory.owner = Some(owner);
        territory.armies = armies;
    }

    /// Enemy territories the player can reach from a territory holding more than one army.
    pub fn territories_for_attack(&self, player: &Player) -> Vec<TerritoryId> {
        let mut included = vec![false; self.territories.len()];
        let mut targets = Vec::new();

        for &territory in player.controlled() {
            if self[territory].armies <= 1 {
                continue;
            }

            for &neighbor in self.neighbors(territory) {
                if self[neighbor].owner != Some(player.id) && !included[neighbor.0] {
                    included[neighbor.0] = true;
                    targets.push(neighbor);
                }
            }
        }

        targets
    }

    /// Neighbors of `territory` held by `player` with more than one army, or with any
    /// armies when `require_multiple_armies` is unset.
    pub fn surrounding_territories(
        &self,
        player: &Player,
        territory: TerritoryId,
        require_multiple_armies: bool,
    ) -> Vec<TerritoryId> {
        let minimum = if require_multiple_armies { 1 } else { 0 };
        self.neighbors(territory)
            .iter()
            .copied()
            .filter(|&x| self[x].owner == Some(player.id) && self[x].armies > minimum)
            .collect()
    }

    /// Territories that can receive armies from an adjacent friendly territory holding
    /// more than one army.
    pub fn territories_to_fortify(&self, player: &Player) -> Vec<TerritoryId> {
        let mut included = vec![false; self.territories.len()];
        let mut targets = Vec::new();

        for &territory in player.controlled() {
            if self[territory].armies <= 1 {
                continue;
            }

            for &neighbor in self.neighbors(territory) {
                if self[neighbor].owner == Some(player.id) && !included[neighbor.0] {
                    included[neighbor.0] = true;
                    targets.push(neighbor);
                }
            }
        }

        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> World {
        let mut world = World::new();
        let a = world.get_or_create_territory("A", Some("North"));
        let b = world.get_or_create_territory("B", None);
        let c = world.get_or_create_territory("C", Some("South"));
        for (x, y) in [(a, b), (b, c), (c, a)] {
            world.add_neighbor(x, y);
            world.add_neighbor(y, x);
        }

        world
    }

    #[test]
    fn continent_is_back_filled_once() {
        let mut world = triangle();
        let b = world.get_or_create_territory("B", Some("South"));
        assert_eq!(world[b].continent(), Some("South"));

        world.get_or_create_territory("B", Some("North"));
        assert_eq!(world[b].continent(), Some("South"));
        assert_eq!(world.len(), 3);
        assert_eq!(world.continents(), ["North", "South"]);
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut world = triangle();
        let (a, b) = (TerritoryId(0), TerritoryId(1));
        assert!(!world.add_neighbor(a, b));
        assert_eq!(world.neighbors(a), [b, TerritoryId(2)]);
        assert!(world.are_adjacent(b, a));
    }

    #[test]
    fn change_armies_applies_signed_delta() {
        let mut world = triangle();
        let a = TerritoryId(0);
        world.change_armies(a, 5);
        world.change_armies(a, -2);
        assert_eq!(world[a].armies(), 3);
    }

    #[test]
    #[should_panic(expected = "Army count driven negative")]
    fn change_armies_rejects_negative_count() {
        let mut world = triangle();
        world.change_armies(TerritoryId(2), -1);
    }

    #[test]
    fn fresh_world_is_unclaimed() {
        let world = triangle();
        assert_eq!(world.unclaimed(), world.ids().collect::<Vec<_>>());
        assert_eq!(world.find("C"), Some(TerritoryId(2)));
        assert_eq!(world.find("D"), None);
    }
}
