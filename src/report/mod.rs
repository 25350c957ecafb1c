// ==========================================
// PV 设计评审引擎 - 报告层
// ==========================================
// 职责: 将 ReviewPayload 排版为可读报告（分页 PDF 渲染由外部完成）
// ==========================================

pub mod text_report;

pub use text_report::{render_text, wrap_lines, NO_RECOMMENDATIONS};
