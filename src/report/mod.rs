pub mod text;

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn format_signed_2(v: f64) -> String {
    if v > 0.0 {
        format!("+{:.2}", v)
    } else {
        format!("{:.2}", v)
    }
}

pub fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
