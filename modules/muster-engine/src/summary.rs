//! Plain-text render model of a gathering. The presentation layer decides
//! how to display it; this is the canonical wording.

use muster_common::{Gathering, UserId};

fn mention_line(users: &[UserId]) -> String {
    if users.is_empty() {
        return "no one yet".to_string();
    }
    users
        .iter()
        .map(|u| format!("<@{u}>"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Multi-line summary: schedule, game, capacity, description, rosters.
pub fn render(gathering: &Gathering) -> String {
    let mut lines = vec![
        format!("**{}**", gathering.title),
        format!(
            "When: {} (<t:{}:R>)",
            gathering.start.format("%d.%m.%Y %H:%M"),
            gathering.start.timestamp()
        ),
        format!("Game: {}", gathering.game),
        format!(
            "Players: {}/{}",
            gathering.roster.confirmed.len(),
            gathering.capacity
        ),
    ];

    if let Some(end) = gathering.end {
        let minutes = (end - gathering.start).num_minutes();
        lines.push(format!("Duration: {minutes} minutes"));
    }
    if !gathering.description.is_empty() {
        lines.push(format!("About: {}", gathering.description));
    }
    if let Some(link) = &gathering.link {
        lines.push(format!("Rules: {link}"));
    }

    lines.push(format!("Confirmed: {}", mention_line(&gathering.roster.confirmed)));
    lines.push(format!("Tentative: {}", mention_line(&gathering.roster.tentative)));
    lines.push(format!("Declined: {}", mention_line(&gathering.roster.declined)));
    if !gathering.roster.waitlisted.is_empty() {
        lines.push(format!("Waitlist: {}", mention_line(&gathering.roster.waitlisted)));
    }

    lines.join("\n")
}
