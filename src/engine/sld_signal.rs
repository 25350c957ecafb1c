// ==========================================
// PV 设计评审引擎 - SLD 文本信号提取
// ==========================================
// 职责: SLD 文档字节 → 前 N 页文本 → 正则匹配 DC 最大电压 / 每串组件数
// 红线: 永不向调用方抛错,任何解析失败降级为"信号缺失 + 说明"
// ==========================================

use crate::config::ReviewConfig;
use crate::domain::signal::{SldOutcome, SldSignal};
use crate::importer::error::ImportResult;
use regex::{Regex, RegexBuilder};
use std::str::FromStr;
use thiserror::Error;
use tracing::instrument;

// ==========================================
// 匹配规则（顺序即优先级,首个命中者胜出）
// ==========================================
const VMAX_PATTERNS: &[&str] = &[
    r"(?:DC\s*MAX|DC\s*MAXIMUM|VDC\s*MAX|V\s*MAX|MAX\s*DC)\s*[:=]?\s*(\d{3,4})\s*V",
    r"(?:Vmax|V\s*max)\s*[:=]?\s*(\d{3,4})\s*V",
    r"(\d{3,4})\s*V\s*(?:DC\s*MAX|VDC\s*MAX|MAX\s*DC)",
];

const MPS_PATTERNS: &[&str] = &[
    r"(?:MODULES\s*/\s*STRING|MODULES\s*PER\s*STRING|MOD\s*/\s*STR)\s*[:=]?\s*(\d{1,3})",
    r"\bMPS\b\s*[:=]?\s*(\d{1,3})",
    r"(?:STRING)\s*[:=]?\s*(\d{1,3})\s*(?:MODULES|MOD)",
];

// ==========================================
// 文本提取能力
// ==========================================

/// 文本提取失败类别
#[derive(Error, Debug)]
pub enum TextExtractionError {
    #[error("文档为空")]
    EmptyInput,

    #[error("文档无法解析: {0}")]
    InvalidDocument(String),

    #[error("页面文本提取失败 (页 {page}): {message}")]
    PageText { page: u32, message: String },
}

impl TextExtractionError {
    /// 失败类别名（写入说明文字）
    pub fn category(&self) -> &'static str {
        match self {
            TextExtractionError::EmptyInput => "EmptyInput",
            TextExtractionError::InvalidDocument(_) => "InvalidDocument",
            TextExtractionError::PageText { .. } => "PageTextError",
        }
    }
}

/// 外部文本提取能力
///
/// 实现者: PdfTextExtractor; 测试中可替换为固定文本
pub trait TextExtractor: Send + Sync {
    /// 提取前 max_pages 页文本（页间以换行分隔）
    fn extract_text(&self, document: &[u8], max_pages: usize)
        -> Result<String, TextExtractionError>;
}

/// 基于 lopdf 的 PDF 文本提取
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(
        &self,
        document: &[u8],
        max_pages: usize,
    ) -> Result<String, TextExtractionError> {
        if document.is_empty() {
            return Err(TextExtractionError::EmptyInput);
        }

        let doc = lopdf::Document::load_mem(document)
            .map_err(|e| TextExtractionError::InvalidDocument(e.to_string()))?;

        let mut text = String::new();
        for page in doc.get_pages().keys().take(max_pages) {
            let page_text =
                doc.extract_text(&[*page])
                    .map_err(|e| TextExtractionError::PageText {
                        page: *page,
                        message: e.to_string(),
                    })?;
            text.push('\n');
            text.push_str(&page_text);
        }
        Ok(text)
    }
}

// ==========================================
// SldSignalExtractor
// ==========================================
pub struct SldSignalExtractor {
    text_extractor: Box<dyn TextExtractor>,
    max_pages: usize,
    vmax_patterns: Vec<Regex>,
    mps_patterns: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> ImportResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(Into::into)
        })
        .collect()
}

/// 阿拉伯-印度数字（U+0660..U+0669 / U+06F0..U+06F9）转 ASCII
fn ascii_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            other => other,
        })
        .collect()
}

/// 按优先级匹配,返回首个可解析的捕获值
///
/// 捕获但无法解析时继续尝试下一条规则
fn first_parsed<T: FromStr>(patterns: &[Regex], text: &str) -> Option<T> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| ascii_digits(m.as_str()).parse::<T>().ok())
    })
}

impl SldSignalExtractor {
    /// 使用 PDF 文本提取构建
    pub fn new(config: &ReviewConfig) -> ImportResult<Self> {
        Self::with_text_extractor(config, Box::new(PdfTextExtractor))
    }

    pub fn with_text_extractor(
        config: &ReviewConfig,
        text_extractor: Box<dyn TextExtractor>,
    ) -> ImportResult<Self> {
        Ok(Self {
            text_extractor,
            max_pages: config.sld_max_pages,
            vmax_patterns: compile(VMAX_PATTERNS)?,
            mps_patterns: compile(MPS_PATTERNS)?,
        })
    }

    /// 提取 SLD 信号（尽力而为）
    #[instrument(skip(self, document), fields(bytes = document.len()))]
    pub fn extract(&self, document: &[u8]) -> SldSignal {
        let text = match self.text_extractor.extract_text(document, self.max_pages) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(category = e.category(), error = %e, "SLD 文本提取不可用");
                return SldSignal::absent(SldOutcome::Unavailable(e.category().to_string()));
            }
        };

        if text.trim().is_empty() {
            tracing::warn!("SLD 文本为空，疑似扫描件");
            return SldSignal::absent(SldOutcome::EmptyText);
        }

        self.extract_from_text(&text)
    }

    /// 对已提取文本执行匹配
    pub fn extract_from_text(&self, text: &str) -> SldSignal {
        let inverter_vmax = first_parsed::<f64>(&self.vmax_patterns, text);
        let modules_per_string = first_parsed::<u32>(&self.mps_patterns, text);

        tracing::info!(
            inverter_vmax = ?inverter_vmax,
            modules_per_string = ?modules_per_string,
            "SLD 信号匹配完成"
        );

        let outcome = SldOutcome::Extracted;
        SldSignal {
            inverter_vmax,
            modules_per_string,
            notes: outcome.note(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedText(&'static str);

    impl TextExtractor for FixedText {
        fn extract_text(&self, _: &[u8], _: usize) -> Result<String, TextExtractionError> {
            Ok(self.0.to_string())
        }
    }

    fn extractor_with(text: &'static str) -> SldSignalExtractor {
        SldSignalExtractor::with_text_extractor(&ReviewConfig::default(), Box::new(FixedText(text)))
            .unwrap()
    }

    #[test]
    fn test_vmax_pattern_forms() {
        let ex = extractor_with("");
        for (text, expected) in [
            ("INVERTER DC MAX: 1100V", 1100.0),
            ("Vmax = 1500 V", 1500.0),
            ("rated 1000V DC MAX input", 1000.0),
            ("vdc max=1100 v", 1100.0),
        ] {
            assert_eq!(ex.extract_from_text(text).inverter_vmax, Some(expected), "{}", text);
        }
    }

    #[test]
    fn test_mps_pattern_forms() {
        let ex = extractor_with("");
        for (text, expected) in [
            ("MODULES/STRING: 22", 22),
            ("mps: 18", 18),
            ("STRING: 20 MODULES", 20),
            ("Modules per string = 24", 24),
        ] {
            assert_eq!(ex.extract_from_text(text).modules_per_string, Some(expected), "{}", text);
        }
    }

    #[test]
    fn test_pattern_priority_first_match_wins() {
        // 第一条规则（DC MAX: xxxV）优先于第三条（xxxV DC MAX）,与出现位置无关
        let ex = extractor_with("");
        let sig = ex.extract_from_text("1500V DC MAX / DC MAX: 1100V");
        assert_eq!(sig.inverter_vmax, Some(1100.0));

        let sig = ex.extract_from_text("STRING: 20 MODULES, MPS 18");
        assert_eq!(sig.modules_per_string, Some(18));
    }

    #[test]
    fn test_arabic_indic_digits_are_read() {
        let sig = extractor_with("").extract_from_text("DC MAX: ١١٠٠V  MPS: ۲۲");
        assert_eq!(sig.inverter_vmax, Some(1100.0));
        assert_eq!(sig.modules_per_string, Some(22));
    }

    #[test]
    fn test_unparsable_capture_falls_through_to_next_pattern() {
        // 天城文数字可被 \d 匹配但无法解析,应继续尝试后续规则
        let sig = extractor_with("").extract_from_text("DC MAX: ११००V  MPS: 22 ; Vmax = 1100 V");
        assert_eq!(sig.inverter_vmax, Some(1100.0));
        assert_eq!(sig.modules_per_string, Some(22));
    }

    #[test]
    fn test_no_match_leaves_fields_absent() {
        let sig = extractor_with("").extract_from_text("PV ARRAY LAYOUT SHEET 2");
        assert!(sig.inverter_vmax.is_none());
        assert!(sig.modules_per_string.is_none());
        assert_eq!(sig.outcome, SldOutcome::Extracted);
    }

    #[test]
    fn test_whitespace_text_is_empty_outcome() {
        let sig = extractor_with("  \n \n").extract(b"%PDF-1.4");
        assert_eq!(sig.outcome, SldOutcome::EmptyText);
        assert_eq!(sig.notes, "SLD text extraction empty (scan/image likely).");
    }

    #[test]
    fn test_corrupt_pdf_is_soft_failure() {
        let ex = SldSignalExtractor::new(&ReviewConfig::default()).unwrap();
        let sig = ex.extract(b"definitely not a pdf");

        assert!(sig.inverter_vmax.is_none());
        assert!(sig.modules_per_string.is_none());
        assert!(matches!(sig.outcome, SldOutcome::Unavailable(_)));
        assert!(sig.notes.starts_with("SLD extraction unavailable ("));
    }

    /// 构建每页一行文本的 PDF
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_native_pdf_signals_extracted() {
        let pdf = pdf_with_pages(&["INVERTER DC MAX: 1100V", "MODULES/STRING: 22"]);
        let ex = SldSignalExtractor::new(&ReviewConfig::default()).unwrap();

        let sig = ex.extract(&pdf);

        assert_eq!(sig.outcome, SldOutcome::Extracted);
        assert_eq!(sig.inverter_vmax, Some(1100.0));
        assert_eq!(sig.modules_per_string, Some(22));
        assert_eq!(sig.notes, "SLD signals extracted from text (best-effort).");
    }

    #[test]
    fn test_pages_beyond_limit_are_ignored() {
        let pdf = pdf_with_pages(&["DC MAX: 1100V", "SHEET 2", "SHEET 3", "MODULES/STRING: 22"]);
        let ex = SldSignalExtractor::new(&ReviewConfig::default()).unwrap();

        let sig = ex.extract(&pdf);

        // 默认只读前 3 页
        assert_eq!(sig.inverter_vmax, Some(1100.0));
        assert!(sig.modules_per_string.is_none());

        let text = PdfTextExtractor.extract_text(&pdf, 4).unwrap();
        assert!(text.contains("MODULES/STRING: 22"));
    }

    #[test]
    fn test_empty_bytes_is_soft_failure() {
        let ex = SldSignalExtractor::new(&ReviewConfig::default()).unwrap();
        let sig = ex.extract(&[]);
        assert_eq!(sig.outcome, SldOutcome::Unavailable("EmptyInput".to_string()));
    }
}
