use std::fmt::Write as _;

use chrono::NaiveTime;
use console::style;

use crate::agenda::{derive_timeline, AgendaItem, AnalysisResult};
use crate::chat::{ChatMessage, ChatRole};

/// Render the agenda header, stakeholders and timeline as terminal text.
pub fn render_analysis(analysis: &AnalysisResult, anchor: NaiveTime) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", style("PROPOSED MEETING").cyan().bold());
    let _ = writeln!(out, "{}", style(&analysis.title).bold());
    if let Some(date) = analysis.date.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "{}", style(date).dim());
    }
    let _ = writeln!(out, "{}\n", analysis.summary);

    if !analysis.stakeholders.is_empty() {
        let _ = writeln!(out, "{}", style("Key Stakeholders").bold().underlined());
        for person in &analysis.stakeholders {
            let _ = writeln!(
                out,
                "  {} {}  {}",
                style("•").cyan(),
                style(&person.name).bold(),
                style(&person.role).cyan()
            );
            let _ = writeln!(out, "    {}", style(&person.relevance).dim());
        }
        out.push('\n');
    }

    out.push_str(&render_timeline(&analysis.agenda, anchor));
    out
}

/// Timeline section; empty string for an empty agenda.
pub fn render_timeline(items: &[AgendaItem], anchor: NaiveTime) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", style("Timeline Agenda").bold().underlined());
    for (item, slot) in items.iter().zip(derive_timeline(items, anchor)) {
        let _ = write!(
            out,
            "  {} {}",
            style(format!("{} - {}", slot.start_label(), slot.end_label())).cyan(),
            style(format!("({} min)", item.duration_minutes)).dim()
        );
        if let Some(speaker) = item.speaker.as_deref().filter(|s| !s.trim().is_empty()) {
            let _ = write!(out, "  {}", style(speaker).yellow());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "    {}", style(&item.topic).bold());
        let _ = writeln!(out, "    {}", item.description);
    }
    out
}

pub fn render_message(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => format!("{} {}", style("you ›").magenta().bold(), message.text),
        ChatRole::Model => format!("{} {}", style("assistant ›").green().bold(), message.text),
    }
}
