use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use cardcount_core::game::dice::{DiceTally, ROLL_RANGE};
use cardcount_core::game::tracker::ResourceTracker;
use cardcount_core::model::resource::Resource;

/// Renders the resource table, turn order and dice statistics as Markdown.
pub fn render_markdown(run_id: &str, tracker: &ResourceTracker) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Resource Summary: {run_id}\n");
    let _ = writeln!(
        out,
        "Phase: {} | States: {} | Current player: {}\n",
        tracker.phase(),
        tracker.hypothesis_count(),
        tracker
            .current_player()
            .map(|player| player.as_str())
            .unwrap_or("-")
    );

    out.push_str("| Player |");
    for resource in Resource::ALL {
        let _ = write!(out, " {} |", capitalize(resource.as_str()));
    }
    out.push_str(" Total |\n|--------|");
    for _ in Resource::ALL {
        out.push_str("-----|");
    }
    out.push_str("-------|\n");

    let players = tracker.ordered_players();
    for player in &players {
        let summary = tracker.summary(player);
        let _ = write!(out, "| {player} |");
        for range in summary.resources {
            let _ = write!(out, " {range} |");
        }
        let _ = writeln!(out, " {} |", tracker.total(player));
    }
    if players.is_empty() {
        out.push_str("\n_No players observed._\n");
    }

    out.push_str("\n## Turn Order\n\n");
    if tracker.turn_order().is_empty() {
        out.push_str("Not established.\n");
    } else {
        for (position, player) in tracker.turn_order().iter().enumerate() {
            let _ = writeln!(out, "{}. {player}", position + 1);
        }
    }

    let dice = tracker.dice();
    let _ = writeln!(out, "\n## Dice ({} rolls)\n", dice.total());
    out.push_str("| Roll | Count | Share | Expected | Heat |\n");
    out.push_str("|------|-------|-------|----------|------|\n");
    for sum in ROLL_RANGE {
        let expected = DiceTally::expected_probability(sum);
        let share = dice
            .share(sum)
            .map(|share| format!("{:.1}%", share * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let heat = dice
            .heat(sum)
            .map(|heat| heat.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "| {sum} | {count} | {share} | {expected:.1}% | {heat} |",
            count = dice.count(sum),
            expected = expected * 100.0,
        );
    }

    let metrics = tracker.metrics();
    out.push_str("\n## Tracker\n\n");
    let _ = writeln!(out, "- Actions recorded: {}", metrics.records);
    let _ = writeln!(out, "- Actions rejected: {}", metrics.rejected);
    let _ = writeln!(out, "- Recoveries: {}", metrics.recoveries);
    let _ = writeln!(out, "- Hypotheses eliminated: {}", metrics.eliminated);
    let _ = writeln!(out, "- Duplicates collapsed: {}", metrics.duplicates_collapsed);
    let _ = writeln!(out, "- Total mismatches: {}", metrics.total_mismatches);
    let _ = writeln!(out, "- Cap truncations: {}", metrics.truncations);
    let _ = writeln!(out, "- Peak states: {}", metrics.peak_hypotheses);

    out
}

pub fn write_markdown(
    path: impl AsRef<Path>,
    run_id: &str,
    tracker: &ResourceTracker,
) -> std::io::Result<()> {
    fs::write(path.as_ref(), render_markdown(run_id, tracker))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardcount_core::action::ActionEvent;
    use cardcount_core::model::hand::Hand;
    use cardcount_core::model::player::PlayerId;

    fn pid(name: &str) -> PlayerId {
        PlayerId::new(name).unwrap()
    }

    #[test]
    fn uncertain_counts_render_as_ranges() {
        let mut tracker = ResourceTracker::default();
        tracker.seed([
            (pid("Ann"), Hand::new()),
            (pid("Ben"), Hand::from_counts([0, 1, 2, 0, 0])),
        ]);
        tracker.record_second_settlement(pid("Ben"));
        tracker
            .record(ActionEvent::DiceRoll {
                player: pid("Ben"),
                roll: 7,
            })
            .unwrap();
        tracker
            .record(ActionEvent::RobberyUnknown {
                robber: pid("Ann"),
                victim: pid("Ben"),
            })
            .unwrap();

        let report = render_markdown("demo", &tracker);
        assert!(report.starts_with("# Resource Summary: demo"));
        assert!(report.contains("Phase: main | States: 2 | Current player: Ben"));
        assert!(report.contains("| Player | Lumber | Brick | Wool | Grain | Ore | Total |"));
        assert!(report.contains("| Ann | 0 | 0-1 | 0-1 | 0 | 0 | 1 |"));
        assert!(report.contains("| Ben | 0 | 0-1 | 1-2 | 0 | 0 | 2 |"));
        assert!(report.contains("1. Ben"));
        assert!(report.contains("| 7 | 1 | 100.0% | 16.7% | hot |"));
        assert!(report.contains("- Peak states: 2"));
    }

    #[test]
    fn empty_tracker_renders_placeholders() {
        let report = render_markdown("empty", &ResourceTracker::default());
        assert!(report.contains("_No players observed._"));
        assert!(report.contains("Not established."));
        assert!(report.contains("| 2 | 0 | - | 2.8% | - |"));
    }
}
