//! Reads the pipe-delimited game definition format:
//!
//! ```text
//! Title
//! <human count>|name|name...
//! <computer count>|name|name...
//! territory|continent|neighbor|neighbor...
//! ```

use std::{fs, path::Path};

use tracing::{debug, warn};

use crate::{
    config::RulesConfig,
    error::LoadError,
    map::{TerritoryId, World},
    player::PlayerKind,
    state::GameState,
};

pub fn from_path(path: impl AsRef<Path>, rules: RulesConfig) -> Result<GameState, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    from_str(&text, rules)
}

pub fn from_str(text: &str, rules: RulesConfig) -> Result<GameState, LoadError> {
    check_dice_caps(&rules)?;

    let lines = text.lines().collect::<Vec<_>>();
    let territory_lines = lines
        .iter()
        .enumerate()
        .skip(3)
        .filter(|(_, line)| !line.trim().is_empty())
        .collect::<Vec<_>>();

    if lines.len() < 4 || territory_lines.is_empty() {
        return Err(LoadError::MissingSections);
    }

    let title = lines[0].trim();
    let mut roster = parse_players(lines[1], 2, PlayerKind::Human)?;
    roster.extend(parse_players(lines[2], 3, PlayerKind::Computer)?);

    let mut world = World::new();
    for (index, line) in territory_lines {
        parse_territory(&mut world, line, index + 1)?;
    }

    if world.len() > rules.max_territories {
        return Err(LoadError::TooManyTerritories {
            count: world.len(),
            max: rules.max_territories,
        });
    }

    if let Some((_, territory)) = world.iter().find(|(_, t)| t.continent().is_none()) {
        return Err(LoadError::MissingContinent {
            territory: territory.name().to_owned(),
        });
    }

    let continents = world.continents().len();
    if continents > rules.max_continents {
        return Err(LoadError::TooManyContinents {
            count: continents,
            max: rules.max_continents,
        });
    }

    if !(rules.min_players..=rules.max_players).contains(&roster.len()) {
        return Err(LoadError::PlayerCount {
            count: roster.len(),
            min: rules.min_players,
            max: rules.max_players,
        });
    }

    if world.len() < roster.len() {
        return Err(LoadError::TooFewTerritories {
            territories: world.len(),
            players: roster.len(),
        });
    }

    make_symmetric(&mut world);
    debug!(
        title,
        territories = world.len(),
        players = roster.len(),
        "loaded game definition"
    );

    Ok(GameState::new(title, world, roster, rules))
}

fn check_dice_caps(rules: &RulesConfig) -> Result<(), LoadError> {
    let compared = rules.max_attack_dice.min(rules.max_defend_dice);
    if compared == 0 || compared > 2 {
        return Err(LoadError::DiceCaps {
            attack: rules.max_attack_dice,
            defend: rules.max_defend_dice,
        });
    }

    Ok(())
}

fn parse_players(
    line: &str,
    line_number: usize,
    kind: PlayerKind,
) -> Result<Vec<(String, PlayerKind)>, LoadError> {
    let kind_name = if kind.is_human() { "human" } else { "computer" };
    let mut items = line.split('|').map(str::trim);

    let count = items.next().unwrap_or_default();
    let declared = count
        .parse::<usize>()
        .map_err(|_| LoadError::InvalidPlayerCount {
            line: line_number,
            value: count.to_owned(),
        })?;

    let names = items.collect::<Vec<_>>();
    if names.len() < declared {
        return Err(LoadError::TooFewNames {
            line: line_number,
            kind: kind_name,
            declared,
            provided: names.len(),
        });
    }
    if names.len() > declared {
        return Err(LoadError::TooManyNames {
            line: line_number,
            kind: kind_name,
            declared,
            extra: names.len() - declared,
        });
    }

    names
        .into_iter()
        .map(|name| {
            if name.is_empty() {
                Err(LoadError::BlankName { line: line_number })
            } else {
                Ok((name.to_owned(), kind))
            }
        })
        .collect()
}

fn parse_territory(world: &mut World, line: &str, line_number: usize) -> Result<(), LoadError> {
    let items = line.split('|').map(str::trim).collect::<Vec<_>>();

    let name = items[0];
    if name.is_empty() {
        return Err(LoadError::BlankTerritoryName { line: line_number });
    }

    let continent = items.get(1).copied().filter(|x| !x.is_empty());
    let neighbors = items
        .iter()
        .skip(2)
        .copied()
        .filter(|x| !x.is_empty())
        .collect::<Vec<_>>();

    if neighbors.is_empty() {
        return Err(LoadError::NoNeighbors {
            line: line_number,
            territory: name.to_owned(),
        });
    }
    if neighbors.contains(&name) {
        return Err(LoadError::SelfAdjacent {
            line: line_number,
            territory: name.to_owned(),
        });
    }

    let territory = world.get_or_create_territory(name, continent);
    for neighbor in neighbors {
        let neighbor = world.get_or_create_territory(neighbor, None);
        world.add_neighbor(territory, neighbor);
    }

    Ok(())
}

/// Appends every missing reverse edge, in registry order.
fn make_symmetric(world: &mut World) {
    let missing = world
        .iter()
        .flat_map(|(id, territory)| territory.neighbors().iter().map(move |&n| (id, n)))
        .filter(|&(id, neighbor)| !world.are_adjacent(neighbor, id))
        .collect::<Vec<(TerritoryId, TerritoryId)>>();

    for (territory, neighbor) in missing {
        warn!(
            from = world[neighbor].name(),
            to = world[territory].name(),
            "adding missing reverse edge"
        );
        world.add_neighbor(neighbor, territory);
    }
}
