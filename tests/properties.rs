//! Run invariants under arbitrary input sequences

use pile_stack::consts::FRAME_DT;
use pile_stack::platform::{RapierWorld, RecordingRenderer};
use pile_stack::sim::{TickInput, spread};
use pile_stack::{Game, Settings};
use proptest::prelude::*;

type StackGame = Game<RapierWorld, RecordingRenderer>;

#[derive(Debug, Clone)]
enum Op {
    Spawn,
    Frame(TickInput),
    Restart,
}

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), prop::bool::weighted(0.05)).prop_map(|(left, right, drop)| {
        TickInput { left, right, drop }
    })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Spawn),
        40 => tick_input().prop_map(Op::Frame),
        1 => Just(Op::Restart),
    ]
}

fn new_game(seed: u64) -> StackGame {
    let settings = Settings {
        seed,
        ..Settings::default()
    };
    Game::new(settings, RapierWorld::default(), RecordingRenderer::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_at_most_one_pending(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..400),
    ) {
        let mut game = new_game(seed);
        for op in ops {
            match op {
                Op::Spawn => { game.spawn_next(); }
                Op::Frame(input) => game.frame(&input, FRAME_DT),
                Op::Restart => game.restart(),
            }
            let run = game.run();
            prop_assert!(run.suspended_count() <= 1);
            prop_assert_eq!(run.pending.is_some(), run.suspended_count() == 1);
        }
    }

    #[test]
    fn prop_score_never_drops_within_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(tick_input(), 1..600),
    ) {
        let mut game = new_game(seed);
        let mut runs = game.scores().runs();
        let mut score = game.run().score;
        let mut bar = game.run().bar_level;
        for input in inputs {
            game.frame(&input, FRAME_DT);
            if game.scores().runs() != runs {
                runs = game.scores().runs();
            } else {
                prop_assert!(game.run().score >= score);
                prop_assert!(game.run().bar_level <= bar);
            }
            score = game.run().score;
            bar = game.run().bar_level;
        }
    }

    #[test]
    fn prop_high_score_never_drops(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..600),
    ) {
        let mut game = new_game(seed);
        let mut high = game.scores().high_score();
        for op in ops {
            match op {
                Op::Spawn => { game.spawn_next(); }
                Op::Frame(input) => game.frame(&input, FRAME_DT),
                Op::Restart => game.restart(),
            }
            let now = game.scores().high_score();
            prop_assert!(now >= high);
            prop_assert!(now >= game.run().score);
            high = now;
        }
    }

    #[test]
    fn prop_small_samples_have_no_spread(x in -1.0e6f32..1.0e6) {
        prop_assert_eq!(spread(&[]), 0.0);
        prop_assert_eq!(spread(&[x]), 0.0);
    }
}
