// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use hatch_storage::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print store statistics in the specified format
pub fn print_stats(stats: &Stats, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_stats(stats)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
    }
    Ok(())
}

pub fn render_stats(stats: &Stats) -> String {
    let checkpoint = if stats.checkpointed {
        format!("generation {}", stats.checkpoint_version)
    } else {
        "none".to_string()
    };

    let mut out = String::new();
    let rows = [
        ("Device", stats.device.display().to_string()),
        ("Blocks", stats.device_blocks.to_string()),
        ("Generation", stats.generation.to_string()),
        ("Nodes", stats.node_count.to_string()),
        ("Edges", stats.edge_count.to_string()),
        (
            "Log segment",
            format!("{}..{}", stats.log_segment.start, stats.log_segment.end),
        ),
        (
            "Log capacity",
            format!("{} entries", stats.log_capacity_remaining),
        ),
        ("Checkpoint", checkpoint),
    ];
    for (label, value) in rows {
        out.push_str(&format!("{:<14}{}\n", format!("{}:", label), value));
    }
    if stats.halted {
        out.push_str("Status:       halted\n");
    }
    out
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
