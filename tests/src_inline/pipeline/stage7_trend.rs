use chrono::{TimeZone, Utc};

use super::*;
use crate::input::RaterType::{Manager, Peer, SelfRater};
use crate::input::RawResponse;
use crate::model::categories::TrendDirection;
use crate::model::thresholds::ScoringThresholds;
use crate::pipeline::compute_results;
use crate::pipeline::stage1_aggregate::{run_stage1, screen_responses};
use crate::test_support::{approx, rating, snapshot, template};

fn current(responses: &[RawResponse]) -> Vec<ComputedCompetencyScore> {
    let template = template();
    let screened = screen_responses(&template, responses);
    let mut out = run_stage1(&template, &screened.rows);
    template
        .competencies
        .iter()
        .filter_map(|def| out.competencies.remove(&def.id))
        .collect()
}

fn prior(responses: Vec<RawResponse>) -> PriorAssessment {
    let at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
    let mut snap = snapshot(responses);
    snap.assessment_id = "asmt-1".to_string();
    let results = compute_results(&snap, &ScoringThresholds::default_v1(), at).unwrap();
    PriorAssessment {
        assessment_id: "asmt-1".to_string(),
        subject_id: "emp-7".to_string(),
        status: AssessmentStatus::Completed,
        completed_at: Some(at),
        results: Some(results),
    }
}

#[test]
fn test_changes_and_overall_direction() {
    let before = prior(vec![
        rating(Peer, "p", "comm", "comm-1", 3),
        rating(Peer, "p", "lead", "lead-1", 4),
        rating(Peer, "p", "exec", "exec-1", 5),
    ]);
    let now = current(&[
        rating(Peer, "p", "comm", "comm-1", 4),
        rating(Manager, "m", "lead", "lead-1", 4),
        rating(SelfRater, "s", "exec", "exec-1", 1),
    ]);

    let trend = run_stage7("emp-7", &now, Some(&before), 0.2).expect("trend");
    assert_eq!(trend.previous_assessment_id, "asmt-1");
    assert!(trend.previous_completed_at.is_some());
    assert_eq!(trend.competency_changes.len(), 2);

    let comm = &trend.competency_changes[0];
    assert_eq!(comm.competency_name, "Communication");
    assert_eq!(comm.change, 1.0);
    assert!(approx(comm.change_percent, 100.0 / 3.0));
    assert_eq!(comm.direction, TrendDirection::Improved);

    let lead = &trend.competency_changes[1];
    assert_eq!(lead.change, 0.0);
    assert_eq!(lead.direction, TrendDirection::Stable);

    assert!(approx(trend.overall_change, 0.5));
    assert_eq!(trend.overall_direction, TrendDirection::Improved);
}

#[test]
fn test_decline() {
    let before = prior(vec![rating(Peer, "p", "comm", "comm-1", 4)]);
    let now = current(&[rating(Peer, "p", "comm", "comm-1", 3)]);
    let trend = run_stage7("emp-7", &now, Some(&before), 0.2).unwrap();
    assert_eq!(trend.competency_changes[0].direction, TrendDirection::Declined);
    assert_eq!(trend.overall_direction, TrendDirection::Declined);
    assert!(approx(trend.competency_changes[0].change_percent, -25.0));
}

#[test]
fn test_unqualified_prior_gives_no_trend() {
    let now = current(&[rating(Peer, "p", "comm", "comm-1", 3)]);
    assert!(run_stage7("emp-7", &now, None, 0.2).is_none());

    let mut closed = prior(vec![rating(Peer, "p", "comm", "comm-1", 4)]);
    closed.status = AssessmentStatus::Closed;
    assert!(run_stage7("emp-7", &now, Some(&closed), 0.2).is_none());

    let other_subject = prior(vec![rating(Peer, "p", "comm", "comm-1", 4)]);
    assert!(run_stage7("emp-8", &now, Some(&other_subject), 0.2).is_none());

    let mut no_results = prior(vec![]);
    no_results.results = None;
    assert!(run_stage7("emp-7", &now, Some(&no_results), 0.2).is_none());
}

#[test]
fn test_no_overlap_still_reports_stable() {
    let before = prior(vec![rating(Peer, "p", "exec", "exec-1", 4)]);
    let now = current(&[rating(Peer, "p", "comm", "comm-1", 3)]);
    let trend = run_stage7("emp-7", &now, Some(&before), 0.2).unwrap();
    assert!(trend.competency_changes.is_empty());
    assert_eq!(trend.overall_change, 0.0);
    assert_eq!(trend.overall_direction, TrendDirection::Stable);
}
