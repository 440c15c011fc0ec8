// ==========================================
// IP商品销量预测模拟器 - 跨配置聚合器
// ==========================================
// 职责: 合并全部存活配置的汇总结果
// 输出: 销量占比 + 周销量趋势
// 红线: 零销量配置只在这里被剔除,之前各阶段必须保留
// ==========================================

use crate::domain::configuration::ConfigurationEntry;
use crate::domain::forecast::{AggregationOutcome, BreakdownSlice, KeyRollup, TrendSeries};
use crate::domain::types::ConfigurationKey;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

pub struct CrossConfigAggregator;

impl CrossConfigAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 聚合各配置汇总结果
    ///
    /// - 占比: 每个 total > 0 的配置一项,标签 "<IP>-<商品编号>"
    /// - 趋势: 第 w 周日期 = 首发日期 + (w-1) 周;全零序列同样剔除
    /// - 无配置存活时返回 NoData
    pub fn aggregate(
        &self,
        entries: &BTreeMap<ConfigurationKey, ConfigurationEntry>,
        rollups: &[KeyRollup],
    ) -> AggregationOutcome {
        let mut breakdown = Vec::new();
        let mut trends = Vec::new();

        for item in rollups {
            let Some(entry) = entries.get(&item.key) else {
                tracing::warn!(key = %item.key, "汇总结果没有对应的配置项,已忽略");
                continue;
            };
            if !item.rollup.has_sales() {
                tracing::debug!(key = %item.key, "零销量配置不参与展示");
                continue;
            }

            breakdown.push(BreakdownSlice {
                key: item.key.clone(),
                label: item.label.clone(),
                total: item.rollup.total,
                share: 0.0,
            });

            if item.rollup.weekly.iter().any(|v| *v != 0.0) {
                trends.push(TrendSeries {
                    key: item.key.clone(),
                    label: item.label.clone(),
                    dates: week_dates(entry.start_date, item.rollup.weekly.len()),
                    values: item.rollup.weekly.clone(),
                });
            }
        }

        if breakdown.is_empty() {
            tracing::info!("没有销量数据");
            return AggregationOutcome::NoData;
        }

        let grand_total: f64 = breakdown.iter().map(|s| s.total).sum();
        for slice in breakdown.iter_mut() {
            slice.share = slice.total / grand_total;
        }

        tracing::info!(
            configurations = breakdown.len(),
            grand_total,
            "跨配置聚合完成"
        );
        AggregationOutcome::Populated { breakdown, trends }
    }
}

impl Default for CrossConfigAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// 周序列对应日期
fn week_dates(start_date: NaiveDate, weeks: usize) -> Vec<NaiveDate> {
    (0..weeks)
        .map(|w| start_date + Duration::weeks(w as i64))
        .collect()
}
