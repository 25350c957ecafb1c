// ==========================================
// PV 设计评审引擎 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 规范字段（有序别名表 + 大小写不敏感查找）+ 类型转换
// 规则: 别名按顺序尝试,首个命中者胜出
// ==========================================

use crate::domain::bom_table::{BomTable, CellValue};
use crate::domain::signal::BomField;
use crate::importer::error::{ImportError, ImportResult};

// ==========================================
// 别名表（顺序即优先级）
// ==========================================
pub const VOC_STC_ALIASES: &[&str] = &["Voc_STC", "Voc", "Module_Voc", "PV_Voc"];
pub const TEMP_COEFF_ALIASES: &[&str] =
    &["TempCoeff", "Temp_Coeff", "Voc_TempCoeff", "TempCoeff_Voc"];
pub const MODULES_PER_STRING_ALIASES: &[&str] =
    &["ModulesPerString", "Modules_per_string", "MPS", "PanelsPerString"];
pub const INVERTER_VMAX_ALIASES: &[&str] =
    &["Inverter_Vmax", "InverterVmax", "DC_Vmax", "Vmax_DC"];
pub const INVERTER_NAME_ALIASES: &[&str] =
    &["Inverter", "InverterModel", "INV_Model", "Inverter_Model"];

/// 目标字段的别名表
pub fn aliases_for(field: BomField) -> &'static [&'static str] {
    match field {
        BomField::VocStc => VOC_STC_ALIASES,
        BomField::TempCoeff => TEMP_COEFF_ALIASES,
        BomField::ModulesPerString => MODULES_PER_STRING_ALIASES,
        BomField::InverterVmax => INVERTER_VMAX_ALIASES,
        BomField::InverterName => INVERTER_NAME_ALIASES,
    }
}

/// 大小写不敏感查找列
///
/// # 返回
/// - Some(index): 首个命中别名对应的列下标（同名列取表中第一列）
/// - None: 无任何别名命中
pub fn find_column(columns: &[String], aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        let alias = alias.to_lowercase();
        columns
            .iter()
            .position(|col| col.trim().to_lowercase() == alias)
    })
}

// ==========================================
// FieldMapper - 取值 + 类型转换
// ==========================================
pub struct FieldMapper;

/// 命中的列及其首个非缺失值
pub struct MappedValue<'a> {
    pub column: &'a str,
    pub row_number: usize,
    pub cell: &'a CellValue,
}

impl FieldMapper {
    /// 定位字段的源列,并取首个非缺失值
    ///
    /// 列不存在或全部缺失时返回 None（由调用方套用默认值）
    pub fn locate<'a>(&self, table: &'a BomTable, field: BomField) -> Option<MappedValue<'a>> {
        let index = find_column(table.columns(), aliases_for(field))?;
        let column = table.columns()[index].as_str();

        match table.first_present(index) {
            Some((row_number, cell)) => Some(MappedValue {
                column,
                row_number,
                cell,
            }),
            None => {
                tracing::debug!(field = %field, column, "列存在但无有效值");
                None
            }
        }
    }

    /// 解析浮点数
    pub fn parse_f64(&self, value: &MappedValue<'_>, field: BomField) -> ImportResult<f64> {
        match value.cell {
            CellValue::Number(v) => Ok(*v),
            other => Err(ImportError::TypeConversionError {
                row: value.row_number,
                field: format!("{} ({})", field, value.column),
                message: format!("无法解析为浮点数: {}", other.as_text()),
            }),
        }
    }

    /// 解析正整数（小数按截断处理）
    pub fn parse_positive_u32(
        &self,
        value: &MappedValue<'_>,
        field: BomField,
    ) -> ImportResult<u32> {
        let conversion_error = |message: String| ImportError::TypeConversionError {
            row: value.row_number,
            field: format!("{} ({})", field, value.column),
            message,
        };

        let number = match value.cell {
            CellValue::Number(v) => *v,
            other => {
                return Err(conversion_error(format!(
                    "无法解析为整数: {}",
                    other.as_text()
                )))
            }
        };

        let truncated = number.trunc();
        if truncated < 1.0 || truncated > u32::MAX as f64 {
            return Err(conversion_error(format!("组串组件数必须为正整数: {}", number)));
        }
        Ok(truncated as u32)
    }

    /// 提取字符串字段
    pub fn parse_string(&self, value: &MappedValue<'_>) -> String {
        value.cell.as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_column_case_insensitive() {
        let columns = cols(&["item", "VOC_STC", "mps"]);
        assert_eq!(find_column(&columns, VOC_STC_ALIASES), Some(1));
        assert_eq!(find_column(&columns, MODULES_PER_STRING_ALIASES), Some(2));
        assert_eq!(find_column(&columns, INVERTER_VMAX_ALIASES), None);
    }

    #[test]
    fn test_first_matching_alias_wins() {
        // "Voc" 在表中更靠前,但 "Voc_STC" 别名优先级更高
        let columns = cols(&["Voc", "Module_Voc", "Voc_STC"]);
        assert_eq!(find_column(&columns, VOC_STC_ALIASES), Some(2));

        let columns = cols(&["PV_Voc", "Module_Voc"]);
        assert_eq!(find_column(&columns, VOC_STC_ALIASES), Some(1));
    }

    #[test]
    fn test_locate_skips_empty_column() {
        let table = BomTable::from_text_rows(&["Voc_STC"], &[vec![""], vec![""]]);
        assert!(FieldMapper.locate(&table, BomField::VocStc).is_none());
    }

    #[test]
    fn test_parse_f64_rejects_text() {
        let table = BomTable::from_text_rows(&["Voc"], &[vec!["abc"]]);
        let value = FieldMapper.locate(&table, BomField::VocStc).unwrap();

        let err = FieldMapper.parse_f64(&value, BomField::VocStc).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 1, .. }));
    }

    #[test]
    fn test_parse_positive_u32() {
        let table = BomTable::from_text_rows(&["MPS"], &[vec!["22.0"]]);
        let value = FieldMapper.locate(&table, BomField::ModulesPerString).unwrap();
        assert_eq!(
            FieldMapper.parse_positive_u32(&value, BomField::ModulesPerString).unwrap(),
            22
        );

        let table = BomTable::from_text_rows(&["MPS"], &[vec!["0"]]);
        let value = FieldMapper.locate(&table, BomField::ModulesPerString).unwrap();
        assert!(FieldMapper
            .parse_positive_u32(&value, BomField::ModulesPerString)
            .is_err());
    }
}
