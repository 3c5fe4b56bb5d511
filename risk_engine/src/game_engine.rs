use enum_map::EnumMap;
use tracing::{debug, info, instrument, warn};

use crate::{
    map::TerritoryId,
    player::{PlayerBot, PlayerId, PlayerKind},
    random::RandomSource,
    record::{Attack, GameResult, MoveAttack, MoveFortify, Record, StartTurn},
    render::{NullRenderer, Renderer},
    state::GameState,
};

pub struct GameEngine<'a, R: RandomSource> {
    state: GameState,
    bots: EnumMap<PlayerKind, Box<dyn PlayerBot + 'a>>,
    renderer: Box<dyn Renderer + 'a>,
    rng: R,
    recording: Vec<Record>,
    turns: u32,
}

impl<'a, R: RandomSource> GameEngine<'a, R> {
    pub fn new(
        state: GameState,
        human: Box<dyn PlayerBot + 'a>,
        computer: Box<dyn PlayerBot + 'a>,
        rng: R,
    ) -> Self {
        Self {
            state,
            bots: EnumMap::from_array([human, computer]),
            renderer: Box::new(NullRenderer),
            rng,
            recording: Vec::new(),
            turns: 0,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer + 'a>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn recording(&self) -> &[Record] {
        &self.recording
    }

    /// Turns started so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Sets up the board and plays until someone wins or the turn limit is hit.
    pub fn run(&mut self) -> GameResult {
        self.initial_placement();
        self.play()
    }

    /// Deals starting armies, lets players claim territories in turn order and then
    /// place the rest of their pools.
    #[instrument(skip_all, fields(title = self.state.title()))]
    pub fn initial_placement(&mut self) {
        let starting_armies = self.state.allocate_armies();
        let active = self.state.active().to_vec();
        self.commit(Record::StartGame {
            players: active.clone(),
            starting_armies,
        });

        for i in 0..self.state.world().len() {
            let player = active[i % active.len()];
            let available = self.state.world().unclaimed();
            let kind = self.state.player(player).kind;

            let territory = self.bots[kind].query_claim_territory(&self.state, player, &available);
            assert!(
                available.contains(&territory),
                "Tried to claim a territory that is not available."
            );

            self.state.claim_territory(player, territory);
            self.commit(Record::ClaimTerritory(player, territory));
        }

        for player in active {
            let pool = self.state.player(player).army_count;
            if pool == 0 {
                continue;
            }

            let kind = self.state.player(player).kind;
            let placements = self.bots[kind].query_place_initial_armies(&self.state, player);
            self.distribute(player, pool, placements);
        }
    }

    /// Runs turns from the first active player until one player remains.
    pub fn play(&mut self) -> GameResult {
        let Some(&first) = self.state.active().first() else {
            panic!("Tried to play a game without players.");
        };

        let mut current = first;
        loop {
            if let Some(winner) = self.state.winner() {
                self.commit(Record::Winner(winner));
                return GameResult::Success(winner);
            }

            if self.state.rules().max_turns.is_some_and(|max| self.turns >= max) {
                warn!(turns = self.turns, "turn limit reached, cancelling game");
                return GameResult::Cancelled;
            }

            self.turn(current);
            current = self.next_player(current);
        }
    }

    /// One full turn: reinforce, attack, fortify. Fortification is skipped once the game
    /// is won.
    #[instrument(skip_all, fields(player = player.0))]
    pub fn turn(&mut self, player: PlayerId) {
        assert!(
            self.state.active().contains(&player),
            "Tried to play the turn of an inactive player."
        );
        self.turns += 1;

        self.reinforce_phase(player);
        self.attack_phase(player);

        if self.state.winner().is_none() {
            self.fortify_phase(player);
        }
    }

    fn next_player(&self, current: PlayerId) -> PlayerId {
        let active = self.state.active();
        let position = active
            .iter()
            .position(|&x| x == current)
            .unwrap_or(active.len() - 1);

        active[(position + 1) % active.len()]
    }

    fn reinforce_phase(&mut self, player: PlayerId) {
        let reinforcements = self.state.calculate_reinforcements(player, &mut self.rng);
        self.commit(Record::StartTurn(StartTurn {
            player,
            turn: self.turns,
            territories_held: self.state.player(player).controlled().len() as u32,
            reinforcements: reinforcements.total(),
        }));

        if let Some(card) = reinforcements.card {
            self.commit(Record::DrewCard(player, card));
            if reinforcements.bonus > 0 {
                self.commit(Record::TradedCards {
                    player,
                    card,
                    bonus: reinforcements.bonus,
                });
            }
        }

        let pool = self.state.player(player).army_count;
        let kind = self.state.player(player).kind;
        let placements = self.bots[kind].query_distribute_troops(&self.state, player, pool);
        self.distribute(player, pool, placements);
    }

    fn distribute(&mut self, player: PlayerId, pool: u32, placements: Vec<(TerritoryId, u32)>) {
        assert_eq!(
            placements.iter().map(|&(_, count)| count).sum::<u32>(),
            pool,
            "Distribution does not match the armies available."
        );

        for (territory, count) in placements {
            if count == 0 {
                continue;
            }

            self.state.place_armies(player, territory, count);
            self.commit(Record::PlaceArmies(player, territory, count));
        }
    }

    fn attack_phase(&mut self, player: PlayerId) {
        let kind = self.state.player(player).kind;

        while !self.state.territories_for_attack(player).is_empty() {
            let Some(attack) = self.bots[kind].query_attack(&self.state, player) else {
                break;
            };
            self.validate_attack(player, attack);

            loop {
                let conquered = self.battle(player, attack);
                if conquered || self.state.winner().is_some() {
                    break;
                }

                if self.state.territory(attack.attacking_territory).armies() <= 1 {
                    break;
                }

                if !self.bots[kind].query_continue_attack(&self.state, player, attack) {
                    break;
                }
            }

            if self.state.winner().is_some() {
                return;
            }
        }
    }

    fn validate_attack(&self, player: PlayerId, attack: MoveAttack) {
        let from = self.state.territory(attack.attacking_territory);
        let to = self.state.territory(attack.defending_territory);

        assert_eq!(
            from.owner(),
            Some(player),
            "Tried to attack from a territory the player does not hold."
        );
        assert!(
            to.owner().is_some_and(|x| x != player),
            "Tried to attack a territory without an enemy occupant."
        );
        assert!(from.armies() > 1, "Tried to attack from a single army.");
        assert!(
            from.neighbors().contains(&attack.defending_territory),
            "Tried to attack a territory that is not adjacent."
        );
    }

    /// Fights one battle. Returns whether the target fell.
    fn battle(&mut self, player: PlayerId, attack: MoveAttack) -> bool {
        let MoveAttack {
            attacking_territory: from,
            defending_territory: to,
        } = attack;
        let kind = self.state.player(player).kind;

        let max_attack = self.state.max_attack_dice(from);
        let attack_dice = self.bots[kind].query_attack_dice(&self.state, player, attack, max_attack);
        assert!(
            (1..=max_attack).contains(&attack_dice),
            "Tried to attack with an invalid number of dice."
        );

        let Some(defender) = self.state.territory(to).owner() else {
            panic!("Tried to attack unoccupied territory.");
        };
        let defender_kind = self.state.player(defender).kind;
        let max_defend = self.state.max_defend_dice(to);
        let defend_dice =
            self.bots[defender_kind].query_defend(&self.state, defender, attack, max_defend);
        assert!(
            (1..=max_defend).contains(&defend_dice),
            "Tried to defend with an invalid number of dice."
        );

        let outcome =
            self.state
                .attack_territory(&mut self.rng, from, to, attack_dice, defend_dice);
        let report = Attack {
            player,
            defender,
            attack,
            attack_dice,
            defend_dice,
            attacker_lost: outcome.attacker_lost,
            defender_lost: outcome.defender_lost,
        };
        self.commit(Record::Attack(report));

        if outcome.conquered {
            self.commit(Record::TerritoryConquered {
                player,
                territory: to,
                armies: attack_dice,
            });

            if let Some(eliminated) = outcome.defender_eliminated {
                self.commit(Record::PlayerEliminated {
                    player: eliminated,
                    by: player,
                });
            }
        }

        if self.state.winner().is_some() {
            return true;
        }

        self.report_battle(&report);
        if !outcome.conquered {
            return false;
        }

        let max = self.state.territory(from).armies() - 1;
        if max > 0 {
            let armies = self.bots[kind].query_troops_after_attack(&self.state, player, attack, max);
            assert!(armies <= max, "Tried to move too many armies after attack.");

            if armies > 0 {
                self.state.move_armies(from, to, armies);
                self.commit(Record::MoveAfterAttack(
                    player,
                    MoveFortify {
                        source_territory: from,
                        target_territory: to,
                        armies,
                    },
                ));
            }
        }

        true
    }

    fn report_battle(&mut self, report: &Attack) {
        let attacker_kind = self.state.player(report.player).kind;
        let defender_kind = self.state.player(report.defender).kind;

        self.bots[attacker_kind].notify_battle(&self.state, report.player, report);
        if defender_kind != attacker_kind {
            self.bots[defender_kind].notify_battle(&self.state, report.defender, report);
        }
    }

    fn fortify_phase(&mut self, player: PlayerId) {
        let kind = self.state.player(player).kind;
        let Some(fortify) = self.bots[kind].query_fortify(&self.state, player) else {
            return;
        };

        let MoveFortify {
            source_territory,
            target_territory,
            armies,
        } = fortify;
        assert_eq!(
            self.state.territory(source_territory).owner(),
            Some(player),
            "Tried to fortify from a territory the player does not hold."
        );
        assert!(armies > 0, "Tried to fortify with no armies.");

        self.state
            .fortify_territory(source_territory, target_territory, armies);
        self.commit(Record::Fortify(player, fortify));
    }

    fn commit(&mut self, record: Record) {
        self.log(&record);

        let changes_map = matches!(
            record,
            Record::ClaimTerritory(..)
                | Record::PlaceArmies(..)
                | Record::Attack(..)
                | Record::MoveAfterAttack(..)
                | Record::Fortify(..)
        );
        self.recording.push(record);

        if changes_map {
            let snapshot = self.state.snapshot();
            if let Err(err) = self.renderer.render(self.state.title(), &snapshot) {
                warn!(%err, "failed to render map");
            }
        }
    }

    fn log(&self, record: &Record) {
        let name = |player: PlayerId| self.state.player(player).name.as_str();
        let territory = |territory: TerritoryId| self.state.territory(territory).name();

        match *record {
            Record::StartGame {
                ref players,
                starting_armies,
            } => info!(players = players.len(), starting_armies, "game started"),
            Record::ClaimTerritory(player, t) => {
                debug!(player = name(player), territory = territory(t), "claimed territory")
            }
            Record::PlaceArmies(player, t, count) => debug!(
                player = name(player),
                territory = territory(t),
                count,
                "placed armies"
            ),
            Record::StartTurn(r) => debug!(
                player = name(r.player),
                turn = r.turn,
                held = r.territories_held,
                reinforcements = r.reinforcements,
                "turn started"
            ),
            Record::DrewCard(player, card) => debug!(player = name(player), ?card, "drew card"),
            Record::TradedCards {
                player,
                card,
                bonus,
            } => info!(player = name(player), ?card, bonus, "traded cards"),
            Record::Attack(r) => debug!(
                from = territory(r.attack.attacking_territory),
                to = territory(r.attack.defending_territory),
                attack_dice = r.attack_dice,
                defend_dice = r.defend_dice,
                attacker_lost = r.attacker_lost,
                defender_lost = r.defender_lost,
                "battle"
            ),
            Record::TerritoryConquered {
                player,
                territory: t,
                armies,
            } => info!(
                player = name(player),
                territory = territory(t),
                armies,
                "conquered"
            ),
            Record::MoveAfterAttack(player, m) | Record::Fortify(player, m) => debug!(
                player = name(player),
                from = territory(m.source_territory),
                to = territory(m.target_territory),
                armies = m.armies,
                "moved armies"
            ),
            Record::PlayerEliminated { player, by } => {
                info!(player = name(player), by = name(by), "eliminated")
            }
            Record::Winner(player) => info!(player = name(player), "winner"),
        }
    }
}
