use crate::models::{Issue, Report, StageSection};

/// Renders the plain text milestone report.
///
/// Each stage gets a `"{name} - {points} Points"` header, a dashed underline
/// of the same width, one title line and one URL line per issue (or `None`),
/// then a blank line. The report ends with `Total: {open} / {open + closed}`.
pub fn render(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();

    for section in &report.stages {
        render_section(section, &mut lines);
    }

    lines.push(format!(
        "Total: {} / {}",
        format_points(report.totals.open),
        format_points(report.totals.total())
    ));

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn render_section(section: &StageSection, lines: &mut Vec<String>) {
    let header = format!(
        "{} - {} Points",
        section.name,
        format_points(section.total_points)
    );
    let underline = "-".repeat(header.chars().count());
    lines.push(header);
    lines.push(underline);

    if section.issues.is_empty() {
        lines.push("None".to_string());
    } else {
        for issue in &section.issues {
            lines.push(issue_line(issue));
            lines.push(issue.html_url.clone());
        }
    }

    lines.push(String::new());
}

fn issue_line(issue: &Issue) -> String {
    let assignee = issue
        .assignee
        .as_ref()
        .map(|a| format!(" {}", a.login))
        .unwrap_or_default();

    format!(
        "{}#{}: {} [{} pts]{}",
        issue.repo_name,
        issue.number,
        issue.title,
        format_points(issue.points()),
        assignee
    )
}

/// Shortest decimal form: `3`, `0.5`.
pub fn format_points(value: f64) -> String {
    // adding 0.0 turns -0.0 into 0.0
    (value + 0.0).to_string()
}
