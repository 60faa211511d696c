use super::*;
use crate::input::RaterType::{Manager, Peer, SelfRater};
use crate::input::RawResponse;
use crate::pipeline::stage1_aggregate::{run_stage1, screen_responses};
use crate::test_support::{rating, template};

fn ceiling(responses: &[RawResponse]) -> Option<CurrentCeiling> {
    let template = template();
    let screened = screen_responses(&template, responses);
    let out = run_stage1(&template, &screened.rows);
    run_stage6(&template, &out.competencies, &out.items)
}

#[test]
fn test_lowest_competency_with_weakest_item() {
    let out = ceiling(&[
        rating(Peer, "p", "comm", "comm-1", 4),
        rating(Peer, "p", "comm", "comm-2", 4),
        rating(Peer, "p", "lead", "lead-1", 2),
        rating(Peer, "p", "lead", "lead-2", 3),
        rating(Manager, "m", "exec", "exec-1", 3),
        rating(SelfRater, "s", "lead", "lead-1", 5),
    ])
    .expect("ceiling");

    assert_eq!(out.competency_id, "lead");
    assert_eq!(out.score, 2.5);
    assert_eq!(out.subtitle, "Leadership: Emerging capability");
    assert!(out.narrative.contains("2.50 on a 1-5 scale"));
    assert!(out.narrative.contains("\"Sets clear direction\" (2.00)"));

    let item = out.lowest_item.expect("lowest item");
    assert_eq!(item.question_id, "lead-1");
    assert_eq!(item.score, 2.0);
}

#[test]
fn test_ties_break_on_item_then_id() {
    let out = ceiling(&[
        rating(Peer, "p", "comm", "comm-1", 2),
        rating(Peer, "p", "comm", "comm-2", 4),
        rating(Peer, "p", "exec", "exec-1", 3),
    ])
    .unwrap();
    assert_eq!(out.competency_id, "comm");

    let out = ceiling(&[
        rating(Peer, "p", "lead", "lead-1", 3),
        rating(Peer, "p", "lead", "lead-2", 3),
        rating(Peer, "p", "exec", "exec-1", 3),
    ])
    .unwrap();
    assert_eq!(out.competency_id, "exec");
}

#[test]
fn test_self_scores_stand_in_without_others() {
    let out = ceiling(&[
        rating(SelfRater, "s", "comm", "comm-1", 5),
        rating(SelfRater, "s", "exec", "exec-1", 4),
    ])
    .unwrap();
    assert_eq!(out.competency_id, "exec");
    assert_eq!(out.score, 4.0);
    assert_eq!(out.subtitle, "Execution: Established capability, relative low point");
}

#[test]
fn test_none_without_ratings() {
    assert!(ceiling(&[]).is_none());
}
