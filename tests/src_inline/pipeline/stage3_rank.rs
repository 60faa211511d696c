use super::*;

fn item(question_id: &str, score: f64, others_count: u32) -> ComputedItemScore {
    ComputedItemScore {
        question_id: question_id.to_string(),
        question_text: format!("Question {question_id}"),
        competency_id: "comm".to_string(),
        competency_name: "Communication".to_string(),
        scores: BTreeMap::new(),
        overall_average: score,
        others_average: score,
        self_score: None,
        gap: None,
        response_distribution: BTreeMap::new(),
        rater_agreement: 1.0,
        self_count: 0,
        others_count,
        rater_count: others_count,
    }
}

fn items(list: Vec<ComputedItemScore>) -> BTreeMap<String, ComputedItemScore> {
    list.into_iter()
        .map(|i| (i.question_id.clone(), i))
        .collect()
}

fn ids(list: &[RankedItem]) -> Vec<&str> {
    list.iter().map(|i| i.question_id.as_str()).collect()
}

#[test]
fn test_top_and_bottom_order() {
    let input = items(vec![
        item("q1", 3.0, 2),
        item("q2", 4.5, 2),
        item("q3", 1.5, 2),
        item("q4", 4.0, 2),
    ]);
    let out = run_stage3(&input, 2);
    assert_eq!(ids(&out.top_items), vec!["q2", "q4"]);
    assert_eq!(ids(&out.bottom_items), vec!["q3", "q1"]);
    assert_eq!(out.top_items[0].competency_name, "Communication");
}

#[test]
fn test_ties_break_on_question_id() {
    let input = items(vec![
        item("b", 3.0, 1),
        item("c", 3.0, 1),
        item("a", 3.0, 1),
    ]);
    let out = run_stage3(&input, 5);
    assert_eq!(ids(&out.top_items), vec!["a", "b", "c"]);
    assert_eq!(ids(&out.bottom_items), vec!["a", "b", "c"]);
    let again = run_stage3(&input, 5);
    assert_eq!(ids(&again.top_items), ids(&out.top_items));
}

#[test]
fn test_unrated_items_are_not_ranked() {
    let input = items(vec![item("q1", 0.0, 0), item("q2", 2.0, 1)]);
    let out = run_stage3(&input, 5);
    assert_eq!(ids(&out.top_items), vec!["q2"]);
    assert_eq!(ids(&out.bottom_items), vec!["q2"]);
}
