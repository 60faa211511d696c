use crate::model::categories::JohariQuadrant;
use crate::model::flags::flag_order;
use crate::model::results::ComputedAssessmentResults;
use crate::report::{format_f64_2, format_signed_2, join_or_dash};

pub fn render_report_text(assessment_id: &str, results: &ComputedAssessmentResults) -> String {
    let mut out = String::new();

    out.push_str("Multi-Rater Assessment Report\n");
    out.push_str("=============================\n\n");
    out.push_str(&format!("Assessment: {}\n", assessment_id));
    out.push_str(&format!("Computed at: {}\n", results.computed_at.to_rfc3339()));
    out.push_str(&format!(
        "Overall score: {}\n\n",
        format_f64_2(results.overall_score)
    ));

    out.push_str("1. Rater coverage\n");
    for (rater_type, rate) in &results.response_rate_by_type {
        out.push_str(&format!(
            "{}: {}/{} ({}%)\n",
            rater_type,
            rate.completed,
            rate.invited,
            format_f64_2(rate.rate)
        ));
    }
    out.push('\n');

    out.push_str("2. Competencies\n");
    for c in &results.competency_scores {
        let self_part = match c.self_score {
            Some(s) => format_f64_2(s),
            None => "-".to_string(),
        };
        let gap_part = match c.gap {
            Some(g) => format_signed_2(g),
            None => "-".to_string(),
        };
        out.push_str(&format!(
            "{}: others {} (n={}), self {}, gap {}, agreement {}\n",
            c.competency_name,
            format_f64_2(c.others_average),
            c.others_count,
            self_part,
            gap_part,
            format_f64_2(c.rater_agreement)
        ));
    }
    out.push('\n');

    out.push_str("3. Self-perception gaps\n");
    if results.gap_analysis.is_empty() {
        out.push_str("No competency has both a self rating and ratings from others.\n");
    }
    for g in &results.gap_analysis {
        out.push_str(&format!(
            "[{}] {} ({})\n",
            g.classification.as_str(),
            g.interpretation,
            format_signed_2(g.gap)
        ));
    }
    out.push('\n');

    out.push_str("4. Johari window\n");
    let window = &results.johari_window;
    for (quadrant, names) in [
        (JohariQuadrant::OpenArea, &window.open_area),
        (JohariQuadrant::BlindSpot, &window.blind_spot),
        (JohariQuadrant::HiddenArea, &window.hidden_area),
        (JohariQuadrant::UnknownArea, &window.unknown_area),
    ] {
        out.push_str(&format!("{}: {}\n", quadrant.as_str(), join_or_dash(names)));
    }
    out.push('\n');

    out.push_str("5. Strengths and development areas\n");
    let names = |list: &[crate::model::results::CompetencyHighlight]| {
        list.iter()
            .map(|h| format!("{} ({})", h.competency_name, format_f64_2(h.score)))
            .collect::<Vec<_>>()
    };
    out.push_str(&format!(
        "Strengths: {}\n",
        join_or_dash(&names(results.strengths.as_slice()))
    ));
    out.push_str(&format!(
        "Development areas: {}\n",
        join_or_dash(&names(results.development_areas.as_slice()))
    ));
    let items = |list: &[crate::model::results::RankedItem]| {
        list.iter()
            .map(|i| format!("{} ({})", i.question_text, format_f64_2(i.score)))
            .collect::<Vec<_>>()
    };
    out.push_str(&format!(
        "Top items: {}\n",
        join_or_dash(&items(results.top_items.as_slice()))
    ));
    out.push_str(&format!(
        "Bottom items: {}\n\n",
        join_or_dash(&items(results.bottom_items.as_slice()))
    ));

    if let Some(cci) = &results.cci_result {
        out.push_str("6. Confidence index\n");
        out.push_str(&format!(
            "CCI: {} ({})\n\n",
            format_f64_2(cci.score),
            cci.band.as_str()
        ));
    }

    if let Some(ceiling) = &results.current_ceiling {
        out.push_str("7. Current ceiling\n");
        out.push_str(&format!("{}\n{}\n\n", ceiling.subtitle, ceiling.narrative));
    }

    if let Some(trend) = &results.trend {
        out.push_str("8. Trend\n");
        out.push_str(&format!(
            "Compared with {}: overall {} ({})\n",
            trend.previous_assessment_id,
            format_signed_2(trend.overall_change),
            trend.overall_direction.as_str()
        ));
        for change in &trend.competency_changes {
            out.push_str(&format!(
                "{}: {} -> {} ({}, {}%)\n",
                change.competency_name,
                format_f64_2(change.previous_score),
                format_f64_2(change.current_score),
                change.direction.as_str(),
                format_signed_2(change.change_percent)
            ));
        }
        out.push('\n');
    }

    if !results.data_quality.is_empty() {
        out.push_str("Data quality\n");
        for flag in flag_order() {
            let count: u32 = results
                .data_quality
                .iter()
                .filter(|issue| issue.flag == *flag)
                .map(|issue| issue.count)
                .sum();
            if count > 0 {
                out.push_str(&format!("{}: {}\n", flag.as_str(), count));
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
