use super::*;
use crate::input::RaterType::{Peer, SelfRater};
use crate::input::RawResponse;
use crate::pipeline::stage1_aggregate::{run_stage1, screen_responses};
use crate::pipeline::stage2_gap::run_stage2;
use crate::test_support::{rating, template};

fn window(template: &TemplateConfig, responses: &[RawResponse]) -> JohariWindow {
    let screened = screen_responses(template, responses);
    let aggregates = run_stage1(template, &screened.rows);
    let gaps = run_stage2(template, &aggregates.competencies, 0.5);
    run_stage5(template, &aggregates.competencies, &gaps, 0.5)
}

#[test]
fn test_quadrant_mapping() {
    let template = template();
    let out = window(
        &template,
        &[
            // aligned and high
            rating(SelfRater, "s", "comm", "comm-1", 4),
            rating(Peer, "p", "comm", "comm-1", 4),
            // self higher than others
            rating(SelfRater, "s", "lead", "lead-1", 5),
            rating(Peer, "p", "lead", "lead-1", 2),
            // others higher than self
            rating(SelfRater, "s", "exec", "exec-1", 2),
            rating(Peer, "p", "exec", "exec-1", 5),
        ],
    );
    assert_eq!(out.open_area, vec!["Communication"]);
    assert_eq!(out.blind_spot, vec!["Leadership"]);
    assert_eq!(out.hidden_area, vec!["Execution"]);
    assert!(out.unknown_area.is_empty());
}

#[test]
fn test_missing_sides_and_low_alignment_are_unknown() {
    let template = template();
    let out = window(
        &template,
        &[
            rating(SelfRater, "s", "comm", "comm-1", 1),
            rating(Peer, "p", "comm", "comm-1", 1),
            rating(SelfRater, "s", "lead", "lead-1", 4),
            rating(Peer, "p", "exec", "exec-1", 4),
        ],
    );
    assert_eq!(
        out.unknown_area,
        vec!["Communication", "Leadership", "Execution"]
    );
}

#[test]
fn test_every_competency_exactly_once() {
    let template = template();
    let cases: Vec<Vec<RawResponse>> = vec![
        vec![],
        vec![rating(SelfRater, "s", "comm", "comm-1", 5)],
        vec![
            rating(SelfRater, "s", "comm", "comm-1", 3),
            rating(Peer, "p", "comm", "comm-1", 3),
            rating(SelfRater, "s", "exec", "exec-1", 1),
            rating(Peer, "p", "exec", "exec-1", 5),
        ],
    ];
    for responses in cases {
        let out = window(&template, &responses);
        let mut all = out
            .open_area
            .iter()
            .chain(&out.blind_spot)
            .chain(&out.hidden_area)
            .chain(&out.unknown_area)
            .cloned()
            .collect::<Vec<_>>();
        all.sort();
        assert_eq!(all, vec!["Communication", "Execution", "Leadership"]);
        assert_eq!(out.len(), template.competencies.len());
    }
}
