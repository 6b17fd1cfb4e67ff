//! End-to-end tests: parse a spot string, run the worker pool, check the
//! resulting equities land near a known reference within Monte Carlo noise.

use pokercalc_core::pool;
use pokercalc_core::spot::Spot;

fn equities(spot_str: &str, games: u64, threads: usize) -> Vec<f64> {
    let spot = Spot::parse(spot_str).expect("spot should parse");
    let result = pool::run(&spot, games, threads);
    (0..spot.num_players)
        .map(|p| result.players[p].equity_fraction(result.games_run))
        .collect()
}

#[test]
fn pocket_sevens_vs_broadway_heads_up() {
    let eq = equities("2P AcKd 7h7s", 300_000, 4);
    assert!((eq[0] - 0.446).abs() < 0.02, "eq0={}", eq[0]);
    assert!((eq[1] - 0.554).abs() < 0.02, "eq1={}", eq[1]);
}

#[test]
fn one_known_card_vs_fully_random() {
    let eq = equities("2P 3d", 300_000, 4);
    assert!((eq[0] - 0.425).abs() < 0.02, "eq0={}", eq[0]);
    assert!((eq[1] - 0.575).abs() < 0.02, "eq1={}", eq[1]);
}

#[test]
fn pocket_kings_three_way_fully_determined_board() {
    let eq = equities("3P KhKs - 8c 4d 7c Ts Qs", 300_000, 4);
    assert!((eq[0] - 0.704).abs() < 0.03, "eq0={}", eq[0]);
    assert!((eq[1] - 0.148).abs() < 0.03, "eq1={}", eq[1]);
    assert!((eq[2] - 0.148).abs() < 0.03, "eq2={}", eq[2]);
}

#[test]
fn three_way_flop_board() {
    let eq = equities("3P Ac Td 7h - 5h 6h 9c", 300_000, 4);
    assert!((eq[0] - 0.313).abs() < 0.03, "eq0={}", eq[0]);
    assert!((eq[1] - 0.216).abs() < 0.03, "eq1={}", eq[1]);
    assert!((eq[2] - 0.471).abs() < 0.03, "eq2={}", eq[2]);
}

#[test]
fn equities_sum_to_one_for_every_bench_spot() {
    let spots = [
        "2P 3d",
        "3P KhKs - Ac Ad 7c Ts Qs",
        "4P AcTc TdTh - 5h 6h 9c",
        "5P 2c3d KsTc AhTd - 4d 5d 9c 9d",
        "6P Ac Ad KsKd 3c - 2c 2h 7c 7h 8c",
        "7P Ad Kc QhJh 3s4s - 2c 2h 7c 5h 8c",
        "8P - Ac Ah 3d 7h 8c",
        "9P",
        "4P AhAd AcTh 7c6s 2h3h - 2c 3c 4c",
        "4P AhAd AcTh 7c6s 2h3h",
    ];
    for s in spots {
        let spot = Spot::parse(s).unwrap_or_else(|e| panic!("{s} failed to parse: {e}"));
        assert!(spot.ready, "{s} should be ready");
        let result = pool::run(&spot, 2_000, 2);
        let sum: f64 = (0..spot.num_players)
            .map(|p| result.players[p].equity_fraction(result.games_run))
            .sum();
        assert!((sum - 1.0).abs() < 1e-9, "{s}: sum={sum}");
    }
}

#[test]
fn determinism_across_repeated_runs() {
    let spot = Spot::parse("6P Ac Ad KsKd 3c - 2c 2h 7c 7h 8c").unwrap();
    let a = pool::run(&spot, 50_000, 4);
    let b = pool::run(&spot, 50_000, 4);
    assert_eq!(a.players, b.players);
}

#[test]
fn rejects_malformed_spot_strings() {
    assert!(Spot::parse("1P").is_err());
    assert!(Spot::parse("2P AcAc").is_err());
    assert!(Spot::parse("2P - 2c 3c").is_err());
    assert!(Spot::parse("2P Zz").is_err());
}
