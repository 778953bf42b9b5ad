use storage::ProgressReport;
use verbs_core::time::format_mmss;

use super::service::SessionOutcome;

const BANNER_WIDTH: usize = 30;

fn banner(title: &str) -> [String; 3] {
    let rule = "=".repeat(BANNER_WIDTH);
    [rule.clone(), title.to_string(), rule]
}

/// Lifetime statistics shown before and after a finite session.
#[must_use]
pub fn progress_report_lines(report: &ProgressReport) -> Vec<String> {
    let mut lines = banner("PROGRESS STATISTICS").to_vec();
    lines.push(format!("Sessions completed: {}", report.sessions_completed));
    lines.push(format!(
        "Overall accuracy: {:.1}%",
        report.overall_accuracy_percent
    ));
    lines.push(format!(
        "Overall total time: {}",
        format_mmss(report.overall_time_s)
    ));
    lines.push(format!(
        "Average time per session: {}",
        format_mmss(report.average_session_time_s)
    ));

    lines.push(String::new());
    lines.push("Last 5 sessions:".to_string());
    lines.push(format!("  Accuracy: {:.1}%", report.recent_accuracy_percent));
    lines.push(format!("  Total time: {}", format_mmss(report.recent_time_s)));

    if !report.tough.is_empty() {
        lines.push(String::new());
        lines.push("Tough verbs (lowest accuracy, asked at least 3 times):".to_string());
        for verb in &report.tough {
            lines.push(format!(
                "  - {} ({}): {:.1}% over {} asks",
                verb.german, verb.infinitive, verb.accuracy_percent, verb.times_asked
            ));
        }
    }
    lines
}

#[must_use]
pub fn final_result_lines(outcome: &SessionOutcome) -> Vec<String> {
    let mut lines = banner("FINAL RESULT").to_vec();
    lines.push(format!(
        "Total correct answers: {}/{}",
        outcome.total_correct, outcome.total_questions
    ));
    lines.push(format!("Accuracy: {:.1}%", outcome.accuracy_percent()));
    lines.push(format!("Total time: {}", format_mmss(outcome.total_time_s)));
    lines.push(format!(
        "Average time per verb prompt: {}",
        format_mmss(outcome.average_time_per_verb_s())
    ));
    if outcome.rounds_run > 0 {
        lines.push(format!(
            "Repeat rounds: {}/{}",
            outcome.rounds_run, outcome.max_rounds
        ));
    }
    lines
}

/// Recap of first-pass mistakes, field by field.
#[must_use]
pub fn mistakes_recap_lines(outcome: &SessionOutcome) -> Vec<String> {
    if outcome.first_pass_mistakes.is_empty() {
        if outcome.verbs_asked == 0 {
            return Vec::new();
        }
        return vec!["Perfect first round! No mistakes!".to_string()];
    }

    let mut lines = vec![
        "Mistakes recap (from the first round):".to_string(),
        "-".repeat(37),
    ];
    for attempt in &outcome.first_pass_mistakes {
        let verb = &attempt.verb;
        lines.push(format!("- German: {}", verb.german));
        lines.push(format!(
            "  Correct: {} | {} | {}",
            verb.infinitive, verb.past_simple, verb.past_participle
        ));
        for miss in attempt.misses() {
            lines.push(format!(
                "  {}: you='{}' -> correct='{}'",
                miss.field, miss.answer, miss.expected
            ));
        }
        lines.push(format!("  Time: {}", format_mmss(attempt.elapsed_s)));
        lines.push(String::new());
    }
    lines
}
