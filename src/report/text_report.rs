// ==========================================
// PV 设计评审引擎 - 文本报告渲染
// ==========================================
// 布局: 抬头 → 摘要 → 关键数值 → Saudi/IEC 快照 → 建议
// 限制: 每节详情前 3 条; 已覆盖前 6 条; 缺口前 9 条; 建议前 10 条
// ==========================================

use crate::domain::report::ReviewPayload;
use std::fmt::Write;

const WRAP_WIDTH: usize = 100;
const MAX_SECTION_DETAILS: usize = 3;
const MAX_COMPLIANT: usize = 6;
const MAX_GAPS: usize = 9;
const MAX_RECOMMENDATIONS: usize = 10;

pub const NO_RECOMMENDATIONS: &str = "No critical actions required based on the provided inputs.";

/// 按词折行
pub fn wrap_lines(text: &str, max_len: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= max_len {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn push_wrapped(out: &mut String, indent: &str, text: &str) {
    for line in wrap_lines(text, WRAP_WIDTH) {
        let _ = writeln!(out, "{}{}", indent, line);
    }
}

/// 渲染文本报告
pub fn render_text(payload: &ReviewPayload) -> String {
    let mut out = String::new();

    // ===== 抬头 =====
    let _ = writeln!(out, "{}", payload.project_name);
    let _ = writeln!(out, "PV Design Review Report");
    let _ = writeln!(out, "Site: {}", payload.place);
    let _ = writeln!(out, "Date: {}", payload.date_str);
    let _ = writeln!(out, "{}", "-".repeat(WRAP_WIDTH));

    // ===== 摘要 =====
    let _ = writeln!(out, "\nSummary");
    for section in &payload.section_status {
        let _ = writeln!(out, "{} — {}", section.title, section.level);
        for detail in section.details.iter().take(MAX_SECTION_DETAILS) {
            push_wrapped(&mut out, "  ", &format!("- {}", detail));
        }
    }

    // ===== 关键数值 =====
    let _ = writeln!(out, "\nKey Numbers");
    for (key, value) in payload.numbers.entries() {
        let _ = writeln!(out, "  {}: {}", key, value);
    }

    // ===== 标准快照 =====
    let _ = writeln!(out, "\nSaudi/IEC Snapshot");
    let _ = writeln!(out, "  Compliant / Covered:");
    for item in payload.compliant.iter().take(MAX_COMPLIANT) {
        push_wrapped(&mut out, "    ", &format!("• {}", item));
    }
    let _ = writeln!(out, "  Gaps / Actions required:");
    for item in payload.gaps.iter().take(MAX_GAPS) {
        push_wrapped(&mut out, "    ", &format!("• {}", item));
    }

    // ===== 建议 =====
    let _ = writeln!(out, "\nRecommendations");
    if payload.recommendations.is_empty() {
        push_wrapped(&mut out, "  ", &format!("• {}", NO_RECOMMENDATIONS));
    }
    for item in payload.recommendations.iter().take(MAX_RECOMMENDATIONS) {
        push_wrapped(&mut out, "  ", &format!("• {}", item));
    }

    out
}
