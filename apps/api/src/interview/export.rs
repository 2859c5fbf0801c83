//! Markdown export of a finished interview report.

use std::fmt::{self, Write};

use crate::interview::scoring::{turn_score, Report, ScoringWeights};
use crate::interview::session::{Session, Turn};

/// Renders the report and per-question breakdown. `None` until the report exists.
pub fn render_report_markdown(session: &Session) -> Option<String> {
    let report = session.report.as_ref()?;
    let mut out = String::new();
    write_report(&mut out, session, report).ok()?;
    Some(out)
}

fn write_report(out: &mut String, session: &Session, report: &Report) -> fmt::Result {
    let weights = ScoringWeights::default();

    writeln!(out, "# {} Proficiency Assessment Report\n", session.config.topic)?;
    writeln!(out, "- **Overall score:** {:.1}/100", report.overall_score)?;
    writeln!(out, "- **Proficiency level:** {}", report.proficiency.label())?;
    writeln!(out, "- **Questions answered:** {}", session.history.len())?;
    writeln!(
        out,
        "- **Generated:** {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;

    writeln!(out, "## Score breakdown\n")?;
    writeln!(out, "| Criterion | Average | Weight |")?;
    writeln!(out, "|---|---|---|")?;
    for (name, average, weight) in [
        ("Correctness", report.averages.correctness, weights.correctness),
        ("Efficiency", report.averages.efficiency, weights.efficiency),
        ("Clarity", report.averages.clarity, weights.clarity),
        ("Mastery", report.averages.mastery, weights.mastery),
    ] {
        writeln!(out, "| {name} | {average:.1} | {:.0}% |", weight * 100.0)?;
    }

    write_list(out, "## Strengths", &report.strengths)?;
    write_list(out, "## Areas for improvement", &report.improvements)?;

    writeln!(out, "\n## Recommendation\n\n{}", report.recommendation_text)?;

    writeln!(out, "\n## Question breakdown")?;
    for (i, turn) in session.history.iter().enumerate() {
        write_turn(out, i + 1, turn, &weights)?;
    }
    Ok(())
}

fn write_turn(out: &mut String, number: usize, turn: &Turn, weights: &ScoringWeights) -> fmt::Result {
    writeln!(
        out,
        "\n### Question {} ({}): {:.1}/100\n\n{}\n\n**Answer:** {}\n\n**Feedback:** {}",
        number,
        turn.difficulty_level.replace('_', "/"),
        turn_score(turn, weights),
        turn.question_text,
        turn.answer_text,
        turn.evaluation.feedback_text
    )?;
    // Per-answer lists are optional in the evaluation; skip the headings when absent.
    if !turn.evaluation.strengths.is_empty() {
        write_list(out, "#### Strengths", &turn.evaluation.strengths)?;
    }
    if !turn.evaluation.improvements.is_empty() {
        write_list(out, "#### To improve", &turn.evaluation.improvements)?;
    }
    Ok(())
}

fn write_list(out: &mut String, heading: &str, items: &[String]) -> fmt::Result {
    writeln!(out, "\n{heading}\n")?;
    if items.is_empty() {
        writeln!(out, "_None noted._")?;
    }
    for item in items {
        writeln!(out, "- {item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::interview::scoring::{ProficiencyLevel, Report, ScoreBreakdown};
    use crate::interview::session::{Phase, SessionConfig};
    use crate::interview::testing::turn_with_scores;

    #[test]
    fn test_no_report_no_export() {
        let session = Session::create(SessionConfig::default()).unwrap();
        assert!(render_report_markdown(&session).is_none());
    }

    #[test]
    fn test_export_contains_scores_and_breakdown() {
        let mut session = Session::create(SessionConfig::default()).unwrap();
        session.history.push(turn_with_scores(90.0, 70.0, 50.0, 30.0));
        session.phase = Phase::Complete;
        session.report = Some(Report {
            overall_score: 70.0,
            averages: ScoreBreakdown {
                correctness: 90.0,
                efficiency: 70.0,
                clarity: 50.0,
                mastery: 30.0,
            },
            proficiency: ProficiencyLevel::Intermediate,
            strengths: vec!["Lookup functions".to_string()],
            improvements: vec![],
            recommendation_text: "Practice LET and LAMBDA.".to_string(),
            generated_at: Utc::now(),
        });

        let md = render_report_markdown(&session).unwrap();
        assert!(md.starts_with("# Microsoft Excel Proficiency Assessment Report"));
        assert!(md.contains("**Overall score:** 70.0/100"));
        assert!(md.contains("**Proficiency level:** Intermediate"));
        assert!(md.contains("| Correctness | 90.0 | 40% |"));
        assert!(md.contains("- Lookup functions"));
        assert!(md.contains("_None noted._"));
        assert!(md.contains("### Question 1 (intermediate)"));
        assert!(md.contains("Practice LET and LAMBDA."));
        assert!(!md.contains("#### Strengths"));
    }

    #[test]
    fn test_export_lists_per_question_feedback() {
        let mut session = Session::create(SessionConfig::default()).unwrap();
        let mut turn = turn_with_scores(80.0, 80.0, 80.0, 80.0);
        turn.evaluation.strengths = vec!["Picked XLOOKUP".to_string()];
        turn.evaluation.improvements = vec!["Handle missing keys".to_string()];
        session.history.push(turn);
        session.phase = Phase::Complete;
        session.report = Some(Report {
            overall_score: 80.0,
            averages: ScoreBreakdown {
                correctness: 80.0,
                efficiency: 80.0,
                clarity: 80.0,
                mastery: 80.0,
            },
            proficiency: ProficiencyLevel::Advanced,
            strengths: vec![],
            improvements: vec![],
            recommendation_text: "Keep going.".to_string(),
            generated_at: Utc::now(),
        });

        let md = render_report_markdown(&session).unwrap();
        assert!(md.contains("#### Strengths\n\n- Picked XLOOKUP"));
        assert!(md.contains("#### To improve\n\n- Handle missing keys"));
    }
}
