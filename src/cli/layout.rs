//! Column layout for printing the roster.

use dialoguer::console::Term;

use history_purge::people::Member;

/// Gap after each roster cell.
const CELL_GAP: &str = "    ";

/// Width of stdout, or 80 columns when it isn't a terminal.
pub fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(80)
}

/// Numbered roster in as many columns as fit in `width`.
///
/// Numbers are 1-based to match the selection prompt, and names are
/// dot-padded on the left to a common width.
pub fn format_roster(members: &[Member], width: usize) -> String {
    let longest = members
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0);
    let digits = members.len().to_string().len();
    let columns = (width / (longest + digits + 1 + CELL_GAP.len())).max(1);

    let mut out = String::new();
    for (i, member) in members.iter().enumerate() {
        let number = i + 1;
        let padding = ".".repeat(longest - member.name.chars().count());
        out.push_str(&format!("{number:>digits$}:{padding}{}{CELL_GAP}", member.name));
        if number % columns == 0 {
            out.push('\n');
        }
    }
    if members.len() % columns != 0 {
        out.push('\n');
    }
    out
}
