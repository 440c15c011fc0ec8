// ==========================================
// IP商品销量预测模拟器 - 模拟会话
// ==========================================
// 职责: 持有一个用户会话的底表、筛选、目标周数与配置注册表
// 规则: 每次用户交互后同步完成一整轮重算
//       筛选 -> 观测 -> 注册表同步 -> 选店 -> 汇总 -> 聚合
// 红线: 校验失败的编辑不触发重算,注册表保持不变
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::SimulatorConfig;
use crate::domain::configuration::{ClampNotice, ConfigurationEntry};
use crate::domain::forecast::{AggregationOutcome, KeyRollup};
use crate::domain::store::{ProductAttributes, SalesTable};
use crate::domain::types::{ConfigurationKey, LifecycleState};
use crate::engine::{
    ConfigurationRegistry, CrossConfigAggregator, SalesRollupCalculator, SelectionFilter,
    StoreCatalog, StoreSelector,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ==========================================
// ConfigurationRow - 配置表一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationRow {
    pub key: ConfigurationKey,
    pub label: String,               // IP名称-商品编号
    pub start_date: NaiveDate,       // 首发日期
    pub store_types: Vec<String>,    // 覆盖门店种类
    pub store_count: u32,            // 覆盖门店数
    pub max_stores: u32,             // 可选门店数上限
    pub available_types: Vec<String>,
    pub attributes: ProductAttributes,
    pub state: LifecycleState,
}

impl From<&ConfigurationEntry> for ConfigurationRow {
    fn from(entry: &ConfigurationEntry) -> Self {
        Self {
            key: entry.key.clone(),
            label: entry.key.label(),
            start_date: entry.start_date,
            store_types: entry.store_types.iter().cloned().collect(),
            store_count: entry.store_count,
            max_stores: entry.observed_max,
            available_types: entry.observed_types.iter().cloned().collect(),
            attributes: entry.attributes.clone(),
            state: entry.state,
        }
    }
}

// ==========================================
// SimulationReport - 一轮重算的结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub session_id: Uuid,
    pub target_week: u32,
    pub rows: Vec<ConfigurationRow>,
    /// 每个观测到的配置的汇总结果,零销量也保留
    pub rollups: Vec<KeyRollup>,
    pub clamp_notices: Vec<ClampNotice>,
    /// 已删除配置,可通过 reset_deleted 恢复
    pub deleted_keys: Vec<ConfigurationKey>,
    pub outcome: AggregationOutcome,
}

impl SimulationReport {
    pub fn rollup_for(&self, key: &ConfigurationKey) -> Option<&KeyRollup> {
        self.rollups.iter().find(|r| &r.key == key)
    }
}

// ==========================================
// SimulationSession - 模拟会话
// ==========================================
pub struct SimulationSession {
    session_id: Uuid,
    config: SimulatorConfig,
    table: SalesTable,
    selection: SelectionFilter,
    target_week: u32,
    fallback_start: NaiveDate,
    registry: ConfigurationRegistry,
    last_report: Option<SimulationReport>,

    selector: StoreSelector,
    calculator: SalesRollupCalculator,
    aggregator: CrossConfigAggregator,
}

impl SimulationSession {
    /// 创建会话,筛选与目标周数取配置默认值
    ///
    /// 创建后尚未计算,`report()` 返回 None
    pub fn new(table: SalesTable, config: SimulatorConfig) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(session = %session_id, rows = table.len(), "创建模拟会话");

        Self {
            session_id,
            selection: config.default_selection.clone(),
            target_week: config.default_target_week,
            config,
            table,
            fallback_start: Utc::now().date_naive(),
            registry: ConfigurationRegistry::new(),
            last_report: None,
            selector: StoreSelector::new(),
            calculator: SalesRollupCalculator::new(),
            aggregator: CrossConfigAggregator::new(),
        }
    }

    /// 底表缺少销售起始日期时使用的日期 (默认当天)
    pub fn with_fallback_start(mut self, date: NaiveDate) -> Self {
        self.fallback_start = date;
        self
    }

    // ==========================================
    // 用户交互
    // ==========================================

    pub fn set_selection(&mut self, selection: SelectionFilter) -> &SimulationReport {
        self.selection = selection;
        self.recompute()
    }

    pub fn set_target_week(&mut self, week: u32) -> ApiResult<&SimulationReport> {
        if !self.config.allows_target_week(week) {
            return Err(ApiError::InvalidTargetWeek {
                week,
                options: self.config.target_week_options.clone(),
            });
        }
        self.target_week = week;
        Ok(self.recompute())
    }

    pub fn edit_store_count(
        &mut self,
        key: &ConfigurationKey,
        store_count: i64,
    ) -> ApiResult<&SimulationReport> {
        self.registry.set_store_count(key, store_count)?;
        Ok(self.recompute())
    }

    pub fn edit_store_types(
        &mut self,
        key: &ConfigurationKey,
        store_types: BTreeSet<String>,
    ) -> ApiResult<&SimulationReport> {
        self.registry.set_store_types(key, store_types)?;
        Ok(self.recompute())
    }

    /// 删除/确认 勾选框
    pub fn mark_for_deletion(
        &mut self,
        key: &ConfigurationKey,
        delete_flag: bool,
        confirm_flag: bool,
    ) -> ApiResult<&SimulationReport> {
        let state = self
            .registry
            .mark_for_deletion(key, delete_flag, confirm_flag)?;
        tracing::debug!(session = %self.session_id, key = %key, state = %state, "删除勾选已处理");
        Ok(self.recompute())
    }

    /// 恢复全部已删除配置
    pub fn reset_deleted(&mut self) -> &SimulationReport {
        self.registry.reset_deleted();
        self.recompute()
    }

    // ==========================================
    // 重算
    // ==========================================

    /// 完整重算一轮
    pub fn recompute(&mut self) -> &SimulationReport {
        let span = tracing::info_span!("recompute", session = %self.session_id);
        let _enter = span.enter();

        let filtered = self.selection.apply(&self.table);
        let catalog = StoreCatalog::new(&filtered.records);
        let observations = catalog.observe();
        let clamp_notices = self.registry.sync(&observations, self.fallback_start);

        // 每个配置只读自己的记录子集
        let rollups: Vec<KeyRollup> = self
            .registry
            .observed_entries()
            .map(|entry| {
                let view = catalog.view(&entry.key, &entry.store_types);
                let selected = self.selector.select(&view, entry.store_count);
                let rollup = self.calculator.rollup(&view, &selected, self.target_week);
                KeyRollup {
                    key: entry.key.clone(),
                    label: entry.key.label(),
                    selected_store_ids: selected,
                    rollup,
                }
            })
            .collect();

        let outcome = self
            .aggregator
            .aggregate(self.registry.active_entries(), &rollups);
        let rows = self
            .registry
            .observed_entries()
            .map(ConfigurationRow::from)
            .collect();

        tracing::info!(
            target_week = self.target_week,
            configurations = rollups.len(),
            no_data = outcome.is_empty(),
            "重算完成"
        );

        self.last_report.insert(SimulationReport {
            session_id: self.session_id,
            target_week: self.target_week,
            rows,
            rollups,
            clamp_notices,
            deleted_keys: self.registry.deleted_keys().iter().cloned().collect(),
            outcome,
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 最近一次重算结果,尚未计算时为 None
    pub fn report(&self) -> Option<&SimulationReport> {
        self.last_report.as_ref()
    }

    pub fn registry(&self) -> &ConfigurationRegistry {
        &self.registry
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn selection(&self) -> &SelectionFilter {
        &self.selection
    }

    pub fn target_week(&self) -> u32 {
        self.target_week
    }
}
