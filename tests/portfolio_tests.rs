use std::collections::HashMap;

use flowwager_core::domain::MarketId;
use flowwager_core::portfolio::{build, ValuationSource, Valuer};
use flowwager_core::testkit::domain::{market, position, resolved_market};
use rust_decimal_macros::dec;

fn valuer() -> Valuer {
    Valuer::new(dec!(2.5)).unwrap()
}

#[test]
fn worked_scenario_from_the_contract_distribution_rules() {
    // Pools 300/700, total 1000, fee 2.5%, unresolved market.
    let mut m = market(1);
    m.total_option_a_shares = dec!(300);
    m.total_option_b_shares = dec!(700);
    m.total_pool = dec!(1000);

    let p = position(1, dec!(150), dec!(0), dec!(150));
    let view = valuer().value(&m, &p, None);

    assert_eq!(view.current_value, dec!(146.25));
    assert_eq!(view.pnl, dec!(-3.75));
    assert_eq!(view.pnl_percentage, dec!(-2.5));
}

#[test]
fn claimable_entry_beats_the_share_ratio_estimate() {
    // Share-ratio over this market computes 487.50; the contract says
    // 500 (it may apply resolution rules the formula does not model).
    let mut m = resolved_market(1);
    m.total_option_a_shares = dec!(500);
    m.total_option_b_shares = dec!(500);
    m.total_pool = dec!(1000);

    let p = position(1, dec!(500), dec!(0), dec!(450));

    let naive = valuer().value(&m, &p, None);
    assert_eq!(naive.current_value, dec!(487.50));

    let authoritative = valuer().value(&m, &p, Some(dec!(500)));
    assert_eq!(authoritative.current_value, dec!(500));
    assert_eq!(authoritative.source, ValuationSource::Claimable);
}

#[test]
fn every_position_in_a_shareless_market_is_valued_at_its_stake() {
    let m = market(1); // empty pools

    for invested in [dec!(0.01), dec!(1), dec!(1000)] {
        let view = valuer().value(&m, &position(1, invested, dec!(0), invested), None);
        assert_eq!(view.current_value, invested);
        assert_eq!(view.pnl, dec!(0));
    }
}

#[test]
fn aggregates_split_realized_from_unrealized() {
    let mut won = resolved_market(1);
    won.total_option_a_shares = dec!(100);
    won.total_option_b_shares = dec!(300);
    won.total_pool = dec!(400);

    let mut lost = resolved_market(2);
    lost.total_option_a_shares = dec!(200);
    lost.total_option_b_shares = dec!(200);
    lost.total_pool = dec!(400);

    let mut open = market(3);
    open.total_option_a_shares = dec!(50);
    open.total_option_b_shares = dec!(50);
    open.total_pool = dec!(100);

    let markets: HashMap<_, _> = [won, lost, open].map(|m| (m.id, m)).into();
    let claimables: HashMap<_, _> = [
        (MarketId::new(1), dec!(150)), // invested 100 -> +50 realized
        (MarketId::new(2), dec!(0)),   // invested 80  -> -80 realized
    ]
    .into();

    let positions = vec![
        position(1, dec!(50), dec!(0), dec!(100)),
        position(2, dec!(40), dec!(0), dec!(80)),
        position(3, dec!(10), dec!(0), dec!(10)), // unrealized
    ];

    let portfolio = build(&valuer(), &positions, &markets, &claimables);
    let summary = &portfolio.summary;

    assert_eq!(summary.resolved_count, 2);
    assert_eq!(summary.realized_pnl, dec!(-30));
    assert_eq!(summary.wins, 1);
    assert_eq!(summary.losses, 1);
    assert_eq!(summary.win_rate(), Some(dec!(50)));
    assert_eq!(summary.unmatched, 0);
    assert_eq!(summary.total_invested, dec!(190));
}

#[test]
fn positions_without_market_records_never_enter_aggregates() {
    let markets: HashMap<_, _> = [market(1)].map(|m| (m.id, m)).into();
    let claimables = HashMap::new();

    let positions = vec![
        position(1, dec!(10), dec!(0), dec!(10)),
        position(99, dec!(500), dec!(0), dec!(500)), // stale: no market
    ];

    let portfolio = build(&valuer(), &positions, &markets, &claimables);

    assert_eq!(portfolio.views.len(), 1);
    assert_eq!(portfolio.summary.unmatched, 1);
    // The stale 500 must not appear anywhere.
    assert_eq!(portfolio.summary.total_invested, dec!(10));
}
