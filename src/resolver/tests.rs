use super::consensus::{detect_discrepancy, select_consensus};
use super::types::{ResolverAnswer, ResolverEndpoint};

fn answer(resolver: &str, values: &[&str]) -> ResolverAnswer {
    ResolverAnswer {
        resolver: resolver.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

#[test]
fn test_discrepancy_is_order_independent() {
    let answers = vec![
        answer("cloudflare", &["1.1.1.1", "2.2.2.2"]),
        answer("google", &["2.2.2.2", "1.1.1.1"]),
    ];
    assert!(!detect_discrepancy(&answers));
}

#[test]
fn test_discrepancy_detects_differing_sets() {
    let answers = vec![
        answer("cloudflare", &["93.184.216.34"]),
        answer("google", &["192.0.2.66"]),
    ];
    assert!(detect_discrepancy(&answers));
}

#[test]
fn test_discrepancy_needs_two_non_empty_votes() {
    let answers = vec![
        answer("cloudflare", &["93.184.216.34"]),
        answer("google", &[]),
        answer("quad9", &[]),
    ];
    assert!(!detect_discrepancy(&answers));

    let all_empty = vec![answer("cloudflare", &[]), answer("google", &[])];
    assert!(!detect_discrepancy(&all_empty));
}

#[test]
fn test_discrepancy_ignores_empty_votes_between_agreeing_answers() {
    // one resolver down, the other two agree: not a discrepancy
    let answers = vec![
        answer("cloudflare", &["93.184.216.34"]),
        answer("google", &[]),
        answer("quad9", &["93.184.216.34"]),
    ];
    assert!(!detect_discrepancy(&answers));
    assert_eq!(select_consensus(&answers), vec!["93.184.216.34"]);
}

#[test]
fn test_consensus_majority_wins() {
    let answers = vec![
        answer("cloudflare", &["93.184.216.34"]),
        answer("google", &["192.0.2.66"]),
        answer("quad9", &["93.184.216.34"]),
    ];
    assert_eq!(select_consensus(&answers), vec!["93.184.216.34"]);
    assert!(detect_discrepancy(&answers));
}

#[test]
fn test_consensus_tie_break_is_first_in_resolver_order() {
    let answers = vec![
        answer("cloudflare", &["192.0.2.66"]),
        answer("google", &["93.184.216.34"]),
    ];
    // both groups have one vote; cloudflare was encountered first
    assert_eq!(select_consensus(&answers), vec!["192.0.2.66"]);
}

#[test]
fn test_consensus_groups_by_set_not_order() {
    let answers = vec![
        answer("cloudflare", &["1.1.1.1", "2.2.2.2"]),
        answer("google", &["2.2.2.2", "1.1.1.1"]),
        answer("quad9", &["9.9.9.9"]),
    ];
    // the two order-variant answers form one group of two and win;
    // the winner keeps the first member's original order
    assert_eq!(select_consensus(&answers), vec!["1.1.1.1", "2.2.2.2"]);
}

#[test]
fn test_consensus_of_all_empty_is_empty() {
    let answers = vec![answer("cloudflare", &[]), answer("google", &[])];
    assert!(select_consensus(&answers).is_empty());
}

#[test]
fn test_endpoint_parse() {
    let endpoint = ResolverEndpoint::parse("local=http://127.0.0.1:8053/dns-query").unwrap();
    assert_eq!(endpoint.name, "local");
    assert_eq!(endpoint.url, "http://127.0.0.1:8053/dns-query");

    assert!(ResolverEndpoint::parse("no-equals-sign").is_err());
    assert!(ResolverEndpoint::parse("=https://example.com").is_err());
    assert!(ResolverEndpoint::parse("name=ftp://example.com").is_err());
}
