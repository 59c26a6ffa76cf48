criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_river_hand,
        estimating_flop_equity,
        playing_flop_chain,
        deciding_flop_action,
}

fn evaluating_river_hand(c: &mut criterion::Criterion) {
    c.bench_function("evaluate a 7-card Hand", |b| {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let hand = Deck::new().deal(7, rng).expect("fresh deck");
        b.iter(|| Bitwise.rank(hand))
    });
}

fn estimating_flop_equity(c: &mut criterion::Criterion) {
    let state = flop();
    let equity = Config::default().equity(Arc::new(Bitwise));
    c.bench_function("estimate Flop showdown equity", |b| {
        let ref mut rng = SmallRng::seed_from_u64(0);
        b.iter(|| equity.estimate(HERO, &state, rng))
    });
}

fn playing_flop_chain(c: &mut criterion::Criterion) {
    let state = flop();
    c.bench_function("play a Flop call and check down", |b| {
        b.iter(|| {
            let mut next = state.play(&Action::Call(50)).expect("legal call");
            while let Some(action) = next.legal().into_iter().find(Action::is_passive) {
                next = next.play(&action).expect("legal passive action");
            }
            next
        })
    });
}

fn deciding_flop_action(c: &mut criterion::Criterion) {
    let state = flop();
    let config = Config {
        seed: Some(0),
        ..Config::default()
    };
    let search = Search::new(HERO, config, Arc::new(Bitwise), Registry::default());
    c.bench_function("decide a Flop action with 250 tokens", |b| {
        b.iter(|| search.decide(&state, 250))
    });
}

const HERO: PlayerId = PlayerId::from_raw(0);
const VILLAIN: PlayerId = PlayerId::from_raw(1);

fn flop() -> State {
    State::try_from(Snapshot {
        seats: vec![
            Seat::from((HERO, 1000)).with_cards(Hole::try_from("As Ah").expect("hole")),
            Seat::from((VILLAIN, 950)).with_stake(50),
        ],
        board: Hand::try_from("Ks Qd 2c")
            .and_then(Board::try_from)
            .expect("board"),
        pot: 100,
        street: Street::Flop,
        dealer: VILLAIN,
        n_raises: 1,
        next: Some(HERO),
        bettor: Some(VILLAIN),
        acted: vec![VILLAIN],
        ..Snapshot::default()
    })
    .expect("valid flop")
}

use rand::SeedableRng;
use rand::rngs::SmallRng;
use searchbot::Config;
use searchbot::cards::Bitwise;
use searchbot::cards::Board;
use searchbot::cards::Deck;
use searchbot::cards::Hand;
use searchbot::cards::Hole;
use searchbot::cards::Ranker;
use searchbot::cards::Street;
use searchbot::models::Registry;
use searchbot::search::Search;
use searchbot::table::Action;
use searchbot::table::PlayerId;
use searchbot::table::Seat;
use searchbot::table::Snapshot;
use searchbot::table::State;
use std::sync::Arc;
