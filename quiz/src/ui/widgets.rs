//! Small text widgets shared by the views and the interactive loops.

/// A fixed-width bar like `[████░░░░░░]`.
pub fn progress_bar(value: u64, max: u64, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value.min(max) as f64 / max as f64) * width as f64).round() as usize
    };
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// `★★☆` style star rating.
pub fn stars(earned: u32, max: u32) -> String {
    let earned = earned.min(max) as usize;
    format!("{}{}", "★".repeat(earned), "☆".repeat(max as usize - earned))
}

/// `♥♥♡` style heart row.
pub fn hearts(left: u32, max: u32) -> String {
    let left = left.min(max) as usize;
    format!("{}{}", "♥".repeat(left), "♡".repeat(max as usize - left))
}

/// Options as a numbered list, one per line.
pub fn numbered(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("  {}) {o}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
