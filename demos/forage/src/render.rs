//! ASCII rendering of market snapshots.

use std::fmt::Write;

use em_market::MarketSnapshot;

/// Draw the grid and a one-line status per agent.
///
/// Agents are shown by their roster number (`1`–`9`, then `*`), red food as
/// `R`, green food as `g`, empty cells as `.`.
pub fn render(snapshot: &MarketSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "── {} ──", snapshot.step);

    for y in 0..snapshot.bounds.height {
        for x in 0..snapshot.bounds.width {
            let pos = em_core::Position::new(x, y);
            let glyph = match snapshot.agents.iter().position(|a| a.alive && a.position == pos) {
                Some(i) if i < 9 => char::from(b'1' + i as u8),
                Some(_) => '*',
                None => match snapshot.cell(pos) {
                    Some(c) if c.red_food > 0 => 'R',
                    Some(c) if c.green_food > 0 => 'g',
                    _ => '.',
                },
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }

    for (i, agent) in snapshot.agents.iter().enumerate() {
        let action = agent
            .latest_action
            .as_ref()
            .map(|a| a.kind.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "{:>2} {:<8} {:<12} energy {:>4}  {}",
            i + 1,
            agent.name,
            agent.persona,
            agent.energy,
            action
        );
        if let Some(trade) = &agent.latest_trade {
            let _ = write!(out, "  [last trade {} -> {}: {}]", trade.from, trade.to, trade.status);
        }
        out.push('\n');
    }
    out
}
