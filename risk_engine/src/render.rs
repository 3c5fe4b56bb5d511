use std::{
    collections::{HashMap, VecDeque},
    io::{self, Write},
};

pub const PLAYER_COLORS: [&str; 6] = [
    "#e66a6a", "#6ab2e6", "#97e699", "#f3f57a", "#edb277", "#d39ef0",
];

pub const CONTINENT_COLORS: [&str; 10] = [
    "#c9d6df", "#f7d9c4", "#d4e6b5", "#e2cfea", "#fdf1b8", "#b8e0d2", "#f4c2c2", "#d6d2c4",
    "#c5cae9", "#ffe0b2",
];

/// A territory as the renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TerritoryView {
    pub name: String,
    pub continent: String,
    pub continent_color: &'static str,
    pub neighbors: Vec<String>,
    pub owner: Option<String>,
    pub owner_color: Option<&'static str>,
    pub armies: u32,
}

impl TerritoryView {
    pub fn army_label(&self) -> String {
        if self.armies == 1 {
            "1 army".to_owned()
        } else {
            format!("{} armies", self.armies)
        }
    }
}

pub trait Renderer {
    fn render(&mut self, title: &str, territories: &[TerritoryView]) -> io::Result<()>;
}

pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _: &str, _: &[TerritoryView]) -> io::Result<()> {
        Ok(())
    }
}

/// Lists the map breadth first from the first territory.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, title: &str, territories: &[TerritoryView]) -> io::Result<()> {
        writeln!(self.out, "== {title} ==")?;

        for index in breadth_first_order(territories) {
            let territory = &territories[index];
            let occupier = match (&territory.owner, territory.owner_color) {
                (Some(owner), Some(color)) => format!("{owner} ({color})"),
                (Some(owner), None) => owner.clone(),
                _ => "unoccupied".to_owned(),
            };

            writeln!(
                self.out,
                "{} [{} {}]: {}, {}",
                territory.name,
                territory.continent,
                territory.continent_color,
                territory.army_label(),
                occupier
            )?;
        }

        self.out.flush()
    }
}

/// Visit order of a breadth-first walk from the first territory. Territories the walk
/// cannot reach follow in registry order.
fn breadth_first_order(territories: &[TerritoryView]) -> Vec<usize> {
    let index_of = territories
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect::<HashMap<_, _>>();

    let mut visited = vec![false; territories.len()];
    let mut order = Vec::with_capacity(territories.len());

    for start in 0..territories.len() {
        if visited[start] {
            continue;
        }

        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for neighbor in &territories[current].neighbors {
                if let Some(&next) = index_of.get(neighbor.as_str()) {
                    if !visited[next] {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    order
}
