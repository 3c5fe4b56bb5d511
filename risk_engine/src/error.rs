use derive_more::{Display, Error};

/// Reasons a game definition cannot be turned into a game.
#[derive(Debug, Display, Error)]
pub enum LoadError {
    #[display("game definition needs a title, two player lines and at least one territory")]
    MissingSections,

    #[display("line {line}: `{value}` is not a player count")]
    InvalidPlayerCount { line: usize, value: String },

    #[display("line {line}: {declared} {kind} players were declared but only {provided} names were provided")]
    TooFewNames {
        line: usize,
        kind: &'static str,
        declared: usize,
        provided: usize,
    },

    #[display("line {line}: {declared} {kind} players were declared but {extra} too many names were provided")]
    TooManyNames {
        line: usize,
        kind: &'static str,
        declared: usize,
        extra: usize,
    },

    #[display("line {line}: player names cannot be blank")]
    BlankName { line: usize },

    #[display("line {line}: territory names cannot be blank")]
    BlankTerritoryName { line: usize },

    #[display("line {line}: territory `{territory}` must have at least one neighbor")]
    NoNeighbors { line: usize, territory: String },

    #[display("line {line}: territory `{territory}` lists itself as a neighbor")]
    SelfAdjacent { line: usize, territory: String },

    #[display("{count} territories exceed the limit of {max}")]
    TooManyTerritories { count: usize, max: usize },

    #[display("{count} continents exceed the limit of {max}")]
    TooManyContinents { count: usize, max: usize },

    #[display("territory `{territory}` is never declared with a continent")]
    MissingContinent { territory: String },

    #[display("{count} players is outside the allowed range of {min} to {max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[display("{territories} territories cannot seat {players} players")]
    TooFewTerritories { territories: usize, players: usize },

    #[display("dice caps of {attack} attacking and {defend} defending are not supported")]
    DiceCaps { attack: u32, defend: u32 },

    #[display("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
