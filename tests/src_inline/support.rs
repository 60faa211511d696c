use crate::input::{
    AssessmentSnapshot, AssessmentStatus, CompetencyDef, QuestionDef, RaterType, RawResponse,
    TemplateConfig,
};

pub fn question(id: &str, text: &str) -> QuestionDef {
    QuestionDef {
        id: id.to_string(),
        text: text.to_string(),
        reverse_scored: false,
        is_cci: false,
    }
}

pub fn template() -> TemplateConfig {
    let mut hesitates = question("lead-2", "Hesitates to make decisions");
    hesitates.is_cci = true;
    hesitates.reverse_scored = true;
    let mut delivers = question("exec-1", "Delivers on commitments");
    delivers.is_cci = true;

    TemplateConfig {
        competencies: vec![
            CompetencyDef {
                id: "comm".to_string(),
                name: "Communication".to_string(),
                questions: vec![
                    question("comm-1", "Explains ideas clearly"),
                    question("comm-2", "Listens actively"),
                ],
            },
            CompetencyDef {
                id: "lead".to_string(),
                name: "Leadership".to_string(),
                questions: vec![question("lead-1", "Sets clear direction"), hesitates],
            },
            CompetencyDef {
                id: "exec".to_string(),
                name: "Execution".to_string(),
                questions: vec![delivers],
            },
        ],
        scale_min: 1,
        scale_max: 5,
        scale_labels: Default::default(),
        anonymize_responses: true,
        rater_types: RaterType::all().to_vec(),
    }
}

pub fn rating(
    rater_type: RaterType,
    rater_id: &str,
    competency_id: &str,
    question_id: &str,
    value: i32,
) -> RawResponse {
    RawResponse {
        rater_id: Some(rater_id.to_string()),
        rater_type,
        competency_id: competency_id.to_string(),
        question_id: question_id.to_string(),
        rating: Some(value),
        comment: None,
    }
}

pub fn snapshot(responses: Vec<RawResponse>) -> AssessmentSnapshot {
    AssessmentSnapshot {
        assessment_id: "asmt-2".to_string(),
        subject_id: "emp-7".to_string(),
        status: AssessmentStatus::Open,
        template: template(),
        responses,
        invitations: Vec::new(),
        prior: None,
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
