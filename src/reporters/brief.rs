//! Brief reporter: level bars and quick wins

use super::{is_achieved, levels, top_opportunities};
use crate::models::{AnalysisResult, NOT_YET_L1};

const BAR_CELLS: usize = 10;
const QUICK_WINS: usize = 3;

pub fn render(result: &AnalysisResult) -> String {
    let mut lines = vec![format!("## Agent Readiness: {}", result.repo_name), String::new()];

    let level = if result.achieved_level > 0 {
        format!("Level {}", result.achieved_level)
    } else {
        NOT_YET_L1.to_string()
    };
    lines.push(format!(
        "**{}** | {:.1}% ({}/{})",
        level, result.pass_rate, result.total_passed, result.total_criteria
    ));
    lines.push(String::new());

    for (level, score) in levels(result) {
        let check = if is_achieved(result, level) { "✅" } else { "⬜" };
        lines.push(format!("L{} {} [{}] {:.0}%", level, check, bar(score), score));
    }
    lines.push(String::new());

    let wins = top_opportunities(result, QUICK_WINS);
    if !wins.is_empty() {
        lines.push("**Quick Wins:**".to_string());
        for win in wins {
            lines.push(format!("- {}: {}", win.id, win.reason));
        }
    }

    lines.join("\n")
}

/// Ten-cell bar, one filled cell per full 10%
fn bar(score: f64) -> String {
    let filled = ((score / 10.0) as usize).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}
