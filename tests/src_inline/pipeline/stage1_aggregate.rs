use super::*;
use crate::input::RaterType::{DirectReport, Manager, Peer, SelfRater};
use crate::test_support::{approx, rating, template};

fn aggregate(responses: &[RawResponse]) -> (Stage1Output, Vec<DataQualityIssue>) {
    let template = template();
    let screened = screen_responses(&template, responses);
    (run_stage1(&template, &screened.rows), screened.issues)
}

#[test]
fn test_three_rater_scenario() {
    let responses = vec![
        rating(SelfRater, "s", "comm", "comm-1", 4),
        rating(Peer, "p1", "comm", "comm-1", 3),
        rating(Peer, "p2", "comm", "comm-1", 5),
    ];
    let (out, issues) = aggregate(&responses);
    assert!(issues.is_empty());

    let comm = &out.competencies["comm"];
    assert_eq!(comm.others_average, 4.0);
    assert_eq!(comm.overall_average, 4.0);
    assert_eq!(comm.self_score, Some(4.0));
    assert_eq!(comm.gap, Some(0.0));
    assert_eq!(
        comm.response_distribution,
        BTreeMap::from([(3, 1), (4, 1), (5, 1)])
    );
    assert!(approx(comm.rater_agreement, 0.75));
    assert_eq!(comm.scores[&SelfRater], 4.0);
    assert_eq!(comm.scores[&Peer], 4.0);
    assert_eq!(comm.rater_count, 2);

    let item = &out.items["comm-1"];
    assert_eq!(item.others_average, 4.0);
    assert_eq!(item.competency_name, "Communication");
    assert_eq!(item.question_text, "Explains ideas clearly");
}

#[test]
fn test_average_excludes_self() {
    let responses = vec![
        rating(SelfRater, "s", "lead", "lead-1", 1),
        rating(Manager, "m", "lead", "lead-1", 5),
        rating(DirectReport, "d", "lead", "lead-1", 3),
    ];
    let (out, _) = aggregate(&responses);
    let lead = &out.competencies["lead"];
    assert_eq!(lead.others_average, 4.0);
    assert_eq!(lead.self_score, Some(1.0));
    assert_eq!(lead.gap, Some(-3.0));
    assert_eq!(lead.others_count, 2);
    assert_eq!(lead.self_count, 1);
}

#[test]
fn test_distribution_counts_every_non_null_rating() {
    let mut null_rating = rating(Peer, "p3", "comm", "comm-2", 1);
    null_rating.rating = None;
    let responses = vec![
        rating(SelfRater, "s", "comm", "comm-1", 2),
        rating(SelfRater, "s", "comm", "comm-2", 2),
        rating(Peer, "p1", "comm", "comm-1", 4),
        rating(Peer, "p2", "comm", "comm-2", 4),
        null_rating,
    ];
    let (out, issues) = aggregate(&responses);
    let comm = &out.competencies["comm"];
    let total: u32 = comm.response_distribution.values().sum();
    assert_eq!(total, comm.self_count + comm.others_count);
    assert_eq!(total, 4);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].flag, DataQualityFlag::MissingRating);

    let item_total: u32 = out.items["comm-2"].response_distribution.values().sum();
    assert_eq!(item_total, 2);
}

#[test]
fn test_unknown_ids_are_dropped_with_flags() {
    let responses = vec![
        rating(Peer, "p1", "ghost", "comm-1", 3),
        rating(Peer, "p1", "comm", "ghost-q", 3),
        rating(Peer, "p1", "comm", "lead-1", 3),
        rating(Peer, "p1", "comm", "comm-1", 9),
        rating(Peer, "p1", "comm", "comm-1", 2),
    ];
    let (out, issues) = aggregate(&responses);
    let flags = issues.iter().map(|i| i.flag).collect::<Vec<_>>();
    assert_eq!(
        flags,
        vec![
            DataQualityFlag::UnknownCompetency,
            DataQualityFlag::UnknownQuestion,
            DataQualityFlag::QuestionCompetencyMismatch,
            DataQualityFlag::RatingOutOfRange,
        ]
    );
    assert_eq!(out.competencies["comm"].others_count, 1);
    assert_eq!(out.competencies["comm"].others_average, 2.0);
    assert_eq!(out.competencies["lead"].others_count, 0);
}

#[test]
fn test_disallowed_rater_type_is_dropped() {
    let mut template = template();
    template.rater_types = vec![SelfRater, Peer];
    let responses = vec![
        rating(Manager, "m", "comm", "comm-1", 1),
        rating(Peer, "p", "comm", "comm-1", 5),
    ];
    let screened = screen_responses(&template, &responses);
    assert_eq!(screened.rows.len(), 1);
    assert_eq!(screened.issues[0].flag, DataQualityFlag::RaterTypeNotAllowed);
    let out = run_stage1(&template, &screened.rows);
    assert_eq!(out.competencies["comm"].others_average, 5.0);
}

#[test]
fn test_agreement_uses_per_rater_means() {
    let responses = vec![
        rating(Peer, "p1", "comm", "comm-1", 2),
        rating(Peer, "p1", "comm", "comm-2", 4),
        rating(Peer, "p2", "comm", "comm-1", 3),
        rating(Peer, "p2", "comm", "comm-2", 3),
    ];
    let (out, _) = aggregate(&responses);
    assert_eq!(out.competencies["comm"].rater_agreement, 1.0);
    assert_eq!(out.competencies["comm"].rater_count, 2);
    assert!(approx(out.items["comm-1"].rater_agreement, 1.0 - 0.5 / 4.0));
}

#[test]
fn test_single_rater_has_full_agreement() {
    let responses = vec![rating(Manager, "m", "exec", "exec-1", 2)];
    let (out, _) = aggregate(&responses);
    assert_eq!(out.competencies["exec"].rater_agreement, 1.0);
}

#[test]
fn test_empty_and_self_only_competencies() {
    let responses = vec![rating(SelfRater, "s", "exec", "exec-1", 5)];
    let (out, _) = aggregate(&responses);

    let exec = &out.competencies["exec"];
    assert_eq!(exec.others_average, 0.0);
    assert_eq!(exec.self_score, Some(5.0));
    assert_eq!(exec.gap, None);
    assert_eq!(exec.rater_agreement, 0.0);

    let comm = &out.competencies["comm"];
    assert_eq!(comm.self_score, None);
    assert!(comm.response_distribution.is_empty());
    assert!(comm.scores.is_empty());
    assert_eq!(out.items.len(), 5);
}
