use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use risk_bots::{ComputerPlayer, HumanPlayer, ScriptedPrompt};
use risk_engine::{
    loader, GameEngine, GameResult, GameState, LoadedDice, Record, RulesConfig,
};

const WORLD_WAR_2: &str = include_str!("../../fixtures/world_war_2.txt");
const REVOLUTIONARY_WAR: &str = include_str!("../../fixtures/revolutionary_war.txt");

fn revolutionary_war_midgame() -> GameState {
    let mut state = loader::from_str(REVOLUTIONARY_WAR, RulesConfig::default()).unwrap();
    let france = state.find_player("France").unwrap();
    let america = state.find_player("America").unwrap();
    let britain = state.find_player("Great Britain").unwrap();

    for (name, owner, armies) in [
        ("Maine", america, 1),
        ("Pennsylvania", britain, 1),
        ("New Hampshire", france, 10),
        ("Massachusetts", france, 1),
        ("New York", france, 10),
        ("Connecticut", france, 1),
    ] {
        let territory = state.find_territory(name).unwrap();
        state.occupy(owner, territory, armies);
    }

    state
}

#[test]
fn human_sweeps_the_colonies() {
    let state = revolutionary_war_midgame();
    let france = state.find_player("France").unwrap();
    let america = state.find_player("America").unwrap();
    let britain = state.find_player("Great Britain").unwrap();

    // Reinforce New Hampshire with all 3, attack Maine with 3 dice and move nothing
    // extra, then attack Pennsylvania from New York with 3 dice.
    let mut prompt = ScriptedPrompt::new([0, 3, 1, 0, 3, 0, 1, 3]);
    let dice = LoadedDice::new([6, 6, 6, 1, 6, 6, 6, 1]);

    let mut engine = GameEngine::new(
        state,
        Box::new(HumanPlayer::new(&mut prompt)),
        Box::new(ComputerPlayer::new()),
        dice,
    );

    assert_eq!(engine.play(), GameResult::Success(france));
    assert_eq!(engine.turns(), 1);
    assert_eq!(engine.rng().remaining(), 0);
    assert_eq!(engine.recording().last(), Some(&Record::Winner(france)));

    let state = engine.state();
    assert_eq!(state.active(), [france]);
    assert_eq!(state.eliminated(), [america, britain]);
    assert_eq!(state.player(france).controlled().len(), 6);
    assert_eq!(
        state.territory(state.find_territory("Maine").unwrap()).armies(),
        3
    );
    assert_eq!(
        state
            .territory(state.find_territory("New Hampshire").unwrap())
            .armies(),
        10
    );

    drop(engine);
    assert_eq!(prompt.remaining(), 0);

    // Only the first battle is reported; the deciding one ends the game silently.
    assert_eq!(
        prompt.reports(),
        ["France attacked Maine from New Hampshire (3 vs 1 dice): France lost 0, America lost 1. France now holds Maine."]
    );
}

#[test]
fn humans_claim_and_place_from_prompts() {
    let state = loader::from_str(REVOLUTIONARY_WAR, RulesConfig::default()).unwrap();

    // France claims New York then New Hampshire, and splits 33 armies 30 / 3.
    let mut france_prompt = ScriptedPrompt::new([3, 0, 0, 30, 1, 3]);
    // America claims Maine then Connecticut, Great Britain Pennsylvania and the last
    // territory left. America stacks Connecticut, Britain splits 20 / 13.
    let mut others_prompt = ScriptedPrompt::new([0, 3, 1, 1, 33, 0, 20, 1, 13]);

    let mut engine = GameEngine::new(
        state,
        Box::new(HumanPlayer::new(&mut france_prompt)),
        Box::new(HumanPlayer::new(&mut others_prompt)),
        LoadedDice::default(),
    );
    engine.initial_placement();

    let state = engine.state();
    let france = state.find_player("France").unwrap();
    let america = state.find_player("America").unwrap();
    let britain = state.find_player("Great Britain").unwrap();

    for (name, owner, armies) in [
        ("New York", france, 31),
        ("New Hampshire", france, 4),
        ("Maine", america, 1),
        ("Connecticut", america, 34),
        ("Pennsylvania", britain, 21),
        ("Massachusetts", britain, 14),
    ] {
        let territory = state.territory(state.find_territory(name).unwrap());
        assert_eq!(territory.owner(), Some(owner), "{name}");
        assert_eq!(territory.armies(), armies, "{name}");
    }
    assert!(state.players().iter().all(|x| x.army_count == 0));

    let claims = engine
        .recording()
        .iter()
        .filter(|x| matches!(x, Record::ClaimTerritory(..)))
        .count();
    assert_eq!(claims, 6);

    drop(engine);
    assert_eq!(france_prompt.remaining(), 0);
    assert_eq!(others_prompt.remaining(), 0);
}

#[test]
fn initial_placement_spends_every_pool() {
    let state = loader::from_str(WORLD_WAR_2, RulesConfig::default()).unwrap();
    let mut engine = GameEngine::new(
        state,
        Box::new(ComputerPlayer::new()),
        Box::new(ComputerPlayer::new()),
        Xoshiro256StarStar::seed_from_u64(7),
    );

    engine.initial_placement();

    let state = engine.state();
    assert!(state.world().unclaimed().is_empty());
    assert!(state.players().iter().all(|x| x.army_count == 0));
    assert!(state
        .players()
        .iter()
        .all(|x| (5..=6).contains(&x.controlled().len())));
    assert_eq!(
        state.world().iter().map(|(_, t)| t.armies()).sum::<u32>(),
        6 * 20
    );

    let claims = engine
        .recording()
        .iter()
        .filter(|x| matches!(x, Record::ClaimTerritory(..)))
        .count();
    assert_eq!(claims, 35);
}

#[test]
fn computers_play_to_the_end() {
    for seed in 0..4 {
        let rules = RulesConfig::default().with_max_turns(400);
        let state = loader::from_str(WORLD_WAR_2, rules).unwrap();
        let mut engine = GameEngine::new(
            state,
            Box::new(ComputerPlayer::new()),
            Box::new(ComputerPlayer::new()),
            Xoshiro256StarStar::seed_from_u64(seed),
        );

        let result = engine.run();
        let state = engine.state();

        match result {
            GameResult::Success(winner) => {
                assert_eq!(state.active(), [winner]);
                assert_eq!(state.player(winner).controlled().len(), 35);
                assert_eq!(state.eliminated().len(), 5);
            }
            GameResult::Cancelled => assert_eq!(engine.turns(), 400),
        }

        assert_eq!(state.active().len() + state.eliminated().len(), 6);
        assert!(state
            .world()
            .iter()
            .all(|(_, t)| t.owner().is_some() && t.armies() > 0));
        assert_eq!(
            state
                .players()
                .iter()
                .map(|x| x.controlled().len())
                .sum::<usize>(),
            35
        );
    }
}
