use risk_engine::{
    record::Attack, GameState, MoveAttack, MoveFortify, PlayerBot, PlayerId, TerritoryId,
};

use crate::prompt::Prompt;

/// Asks a person for every decision through a [`Prompt`].
pub struct HumanPlayer<P: Prompt> {
    prompt: P,
}

impl<P: Prompt> HumanPlayer<P> {
    pub fn new(prompt: P) -> Self {
        Self { prompt }
    }

    pub fn into_prompt(self) -> P {
        self.prompt
    }

    /// Menu choice. A single option is taken without asking.
    fn choose(&mut self, state: &GameState, header: &str, options: &[TerritoryId]) -> TerritoryId {
        assert!(!options.is_empty(), "Nothing to choose from.");
        if options.len() == 1 {
            return options[0];
        }

        let mut query = format!("{header}\n");
        for (i, &option) in options.iter().enumerate() {
            query.push_str(&format!("  {i}) {}\n", describe(state, option)));
        }
        query.push_str("> ");

        let index = self.prompt.retrieve_number(&query, options.len() as u32 - 1);
        options[index as usize]
    }

    /// A count in `[min, max]`. Asked again while the answer is below `min`.
    fn choose_count(&mut self, query: &str, min: u32, max: u32) -> u32 {
        if min == max {
            return min;
        }

        loop {
            let count = self.prompt.retrieve_number(query, max);
            if count >= min {
                return count;
            }
        }
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.prompt
            .retrieve_number(&format!("{question} (0 = no, 1 = yes) "), 1)
            == 1
    }

    fn distribute(
        &mut self,
        state: &GameState,
        player: PlayerId,
        armies: u32,
    ) -> Vec<(TerritoryId, u32)> {
        let controlled = state.player(player).controlled().to_vec();
        let mut placements: Vec<(TerritoryId, u32)> = Vec::new();
        let mut pending = armies;

        while pending > 0 {
            let header = format!(
                "{}, you have {pending} armies to place. Choose a territory:",
                state.player(player).name
            );
            let territory = self.choose(state, &header, &controlled);
            let count = self.choose_count(
                &format!("How many armies? (1 to {pending}) "),
                1,
                pending,
            );

            match placements.iter_mut().find(|(t, _)| *t == territory) {
                Some((_, placed)) => *placed += count,
                None => placements.push((territory, count)),
            }
            pending -= count;
        }

        placements
    }
}

/// One line per battle with the losses on each side.
fn battle_report(state: &GameState, battle: &Attack) -> String {
    let attacker = &state.player(battle.player).name;
    let defender = &state.player(battle.defender).name;
    let target = state.territory(battle.attack.defending_territory);

    let mut report = format!(
        "{attacker} attacked {} from {} ({} vs {} dice): {attacker} lost {}, {defender} lost {}.",
        target.name(),
        state.territory(battle.attack.attacking_territory).name(),
        battle.attack_dice,
        battle.defend_dice,
        battle.attacker_lost,
        battle.defender_lost,
    );
    if target.owner() == Some(battle.player) {
        report.push_str(&format!(" {attacker} now holds {}.", target.name()));
    }

    report
}

fn describe(state: &GameState, territory: TerritoryId) -> String {
    let territory = state.territory(territory);
    match territory.armies() {
        1 => format!("{} (1 army)", territory.name()),
        n => format!("{} ({n} armies)", territory.name()),
    }
}

impl<P: Prompt> PlayerBot for HumanPlayer<P> {
    fn query_claim_territory(
        &mut self,
        state: &GameState,
        player: PlayerId,
        available: &[TerritoryId],
    ) -> TerritoryId {
        let header = format!("{}, claim a territory:", state.player(player).name);
        self.choose(state, &header, available)
    }

    fn query_place_initial_armies(
        &mut self,
        state: &GameState,
        player: PlayerId,
    ) -> Vec<(TerritoryId, u32)> {
        self.distribute(state, player, state.player(player).army_count)
    }

    fn query_distribute_troops(
        &mut self,
        state: &GameState,
        player: PlayerId,
        armies: u32,
    ) -> Vec<(TerritoryId, u32)> {
        self.distribute(state, player, armies)
    }

    fn query_attack(&mut self, state: &GameState, player: PlayerId) -> Option<MoveAttack> {
        let targets = state.territories_for_attack(player);
        if targets.is_empty() {
            return None;
        }

        let name = &state.player(player).name;
        if !self.confirm(&format!("{name}, attack?")) {
            return None;
        }

        let target = self.choose(state, "Choose a territory to attack:", &targets);
        let sources = state.surrounding_territories(player, target, true);
        let source = self.choose(state, "Choose a territory to attack from:", &sources);

        Some(MoveAttack {
            attacking_territory: source,
            defending_territory: target,
        })
    }

    fn query_attack_dice(&mut self, _: &GameState, _: PlayerId, _: MoveAttack, max: u32) -> u32 {
        self.choose_count(&format!("How many dice to attack with? (1 to {max}) "), 1, max)
    }

    fn query_defend(
        &mut self,
        state: &GameState,
        defender: PlayerId,
        attack: MoveAttack,
        max: u32,
    ) -> u32 {
        let query = format!(
            "{}, {} is under attack. How many dice to defend with? (1 to {max}) ",
            state.player(defender).name,
            state.territory(attack.defending_territory).name()
        );
        self.choose_count(&query, 1, max)
    }

    fn query_continue_attack(&mut self, state: &GameState, _: PlayerId, attack: MoveAttack) -> bool {
        let question = format!(
            "Keep attacking {} from {}?",
            describe(state, attack.defending_territory),
            describe(state, attack.attacking_territory)
        );
        self.confirm(&question)
    }

    fn query_troops_after_attack(
        &mut self,
        state: &GameState,
        _: PlayerId,
        attack: MoveAttack,
        max: u32,
    ) -> u32 {
        let query = format!(
            "{} conquered. How many more armies to move in? (0 to {max}) ",
            state.territory(attack.defending_territory).name()
        );
        self.prompt.retrieve_number(&query, max)
    }

    fn query_fortify(&mut self, state: &GameState, player: PlayerId) -> Option<MoveFortify> {
        let targets = state.territories_to_fortify(player);
        if targets.is_empty() {
            return None;
        }

        let name = &state.player(player).name;
        if !self.confirm(&format!("{name}, fortify?")) {
            return None;
        }

        let target = self.choose(state, "Choose a territory to fortify:", &targets);
        let sources = state.surrounding_territories(player, target, true);
        let source = self.choose(state, "Choose a territory to move armies from:", &sources);

        let max = state.territory(source).armies() - 1;
        let armies = self.choose_count(&format!("How many armies? (1 to {max}) "), 1, max);

        Some(MoveFortify {
            source_territory: source,
            target_territory: target,
            armies,
        })
    }

    fn notify_battle(&mut self, state: &GameState, _: PlayerId, battle: &Attack) {
        self.prompt.report(&battle_report(state, battle));
    }
}
