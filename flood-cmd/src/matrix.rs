//! Text rendering of the risk lookup matrix.

use flood_outlook::risk::{classify, risk_level_text};

/// One row per impact, one column per likelihood.
pub fn render_matrix() -> String {
    let mut out = String::from("impact\\likelihood      1         2         3         4\n");
    for impact in 1..=4u8 {
        out.push_str(&format!("{impact:<17}"));
        for likelihood in 1..=4u8 {
            let level = classify(impact, likelihood);
            out.push_str(&format!(" {:<9}", format!("{level} {}", short(level))));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out
}

fn short(level: u8) -> &'static str {
    match risk_level_text(level) {
        "Very low" => "VL",
        "Low" => "L",
        "Medium" => "M",
        "High" => "H",
        _ => "?",
    }
}
