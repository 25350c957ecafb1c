// ==========================================
// PV 设计评审引擎 - BoM 信号提取
// ==========================================
// 职责: 列名自由的 BoM 表格 → 规范 BomSignal
// 规则: 缺失（列不存在 / 全部缺失）→ 默认值; 存在但无法转换 → 硬错误
// 红线: 纯函数,无副作用
// ==========================================

use crate::config::{BomDefaults, ReviewConfig};
use crate::domain::bom_table::BomTable;
use crate::domain::signal::{BomField, BomSignal, SourceProvenance, ValueSource};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use tracing::instrument;

/// 温度系数归一化: 绝对值超过阈值视为百分数
pub fn normalize_temp_coeff(value: f64, percent_threshold: f64) -> f64 {
    if value.abs() > percent_threshold {
        value / 100.0
    } else {
        value
    }
}

// ==========================================
// BomSignalExtractor
// ==========================================
pub struct BomSignalExtractor {
    mapper: FieldMapper,
    defaults: BomDefaults,
    percent_threshold: f64,
}

impl BomSignalExtractor {
    pub fn new(config: &ReviewConfig) -> Self {
        Self {
            mapper: FieldMapper,
            defaults: config.bom_defaults.clone(),
            percent_threshold: config.temp_coeff_percent_threshold,
        }
    }

    /// 提取 BoM 信号
    ///
    /// # 返回
    /// - Ok(BomSignal): 五个字段全部有值,来源记录列名或 DEFAULT
    /// - Err(TypeConversionError): 存在的值无法转换为目标类型
    #[instrument(skip(self, table), fields(columns = table.columns().len()))]
    pub fn extract(&self, table: &BomTable) -> ImportResult<BomSignal> {
        let (voc_stc, voc_src) = self.read_f64(table, BomField::VocStc, self.defaults.voc_stc)?;
        let (raw_tc, tc_src) =
            self.read_f64(table, BomField::TempCoeff, self.defaults.temp_coeff)?;
        let (mps, mps_src) = self.read_modules_per_string(table)?;
        let (vmax, vmax_src) =
            self.read_f64(table, BomField::InverterVmax, self.defaults.inverter_vmax)?;
        let (name, name_src) = self.read_name(table);

        let temp_coeff = normalize_temp_coeff(raw_tc, self.percent_threshold);
        if temp_coeff != raw_tc {
            tracing::debug!(raw = raw_tc, normalized = temp_coeff, "温度系数按百分数归一化");
        }

        let source_provenance = SourceProvenance {
            voc_stc: voc_src,
            temp_coeff: tc_src,
            modules_per_string: mps_src,
            inverter_vmax: vmax_src,
            inverter_name: name_src,
        };

        let defaulted: Vec<&str> = BomField::ALL
            .iter()
            .filter(|f| source_provenance.get(**f).is_default())
            .map(|f| f.as_str())
            .collect();
        if !defaulted.is_empty() {
            tracing::warn!(fields = ?defaulted, "BoM 字段缺失，使用默认值");
        }

        Ok(BomSignal {
            voc_stc,
            temp_coeff,
            modules_per_string: mps,
            inverter_vmax: vmax,
            inverter_name: name,
            source_provenance,
        })
    }

    fn read_f64(
        &self,
        table: &BomTable,
        field: BomField,
        default: f64,
    ) -> ImportResult<(f64, ValueSource)> {
        match self.mapper.locate(table, field) {
            None => Ok((default, ValueSource::Default)),
            Some(value) => {
                let v = self.mapper.parse_f64(&value, field)?;
                tracing::debug!(field = %field, column = value.column, value = v, "读取 BoM 字段");
                Ok((v, ValueSource::Column(value.column.to_string())))
            }
        }
    }

    fn read_modules_per_string(&self, table: &BomTable) -> ImportResult<(u32, ValueSource)> {
        let field = BomField::ModulesPerString;
        match self.mapper.locate(table, field) {
            None => Ok((self.defaults.modules_per_string, ValueSource::Default)),
            Some(value) => {
                let v = self.mapper.parse_positive_u32(&value, field)?;
                Ok((v, ValueSource::Column(value.column.to_string())))
            }
        }
    }

    fn read_name(&self, table: &BomTable) -> (String, ValueSource) {
        match self.mapper.locate(table, BomField::InverterName) {
            None => (self.defaults.inverter_name.clone(), ValueSource::Default),
            Some(value) => (
                self.mapper.parse_string(&value),
                ValueSource::Column(value.column.to_string()),
            ),
        }
    }
}
