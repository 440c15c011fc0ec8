// ==========================================
// IP商品销量预测模拟器 - 社媒/电商热度大屏
// ==========================================
// 职责: 按 IP 与时间范围筛选热度数据,计算日均指标卡与趋势序列
// 规则:
// - 指标卡只统计 数据状态=实际 的行
// - 多平台指标: 每行先按所选平台列求和 (空单元格记 0),再求日均
// - 单列指标 (同人热度 / 二手销量): 忽略空单元格求日均
// - 趋势按 IP 拆分为 实际 / 预测 两段
// ==========================================

use crate::domain::dashboard::{
    DashboardKpis, DashboardOutcome, Kpi, MetricSeries, SeriesPoint, TrendMetric,
};
use crate::domain::social::{SocialMetricRecord, SocialMetricTable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod metric_columns {
    pub const POSTS_PREFIX: &str = "社媒热度_发帖数_";
    pub const ENGAGEMENT_PREFIX: &str = "社媒热度_互动量_";
    pub const FAN_HEAT: &str = "社媒热度_同人热度";
    pub const SALES_PREFIX: &str = "电商热度_销量_";
    pub const SECONDHAND_SALES: &str = "电商热度_二手销量";
}

// ==========================================
// 平台
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialPlatform {
    TikTok,
    Instagram,
    Facebook,
    Twitter,
    News,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::TikTok,
        SocialPlatform::Instagram,
        SocialPlatform::Facebook,
        SocialPlatform::Twitter,
        SocialPlatform::News,
    ];

    /// 指标列名后缀
    pub fn column_suffix(self) -> &'static str {
        match self {
            SocialPlatform::TikTok => "tiktok_social",
            SocialPlatform::Instagram => "ins",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::News => "news",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EcommercePlatform {
    Amazon,
    TikTokShop,
}

impl EcommercePlatform {
    pub const ALL: [EcommercePlatform; 2] = [EcommercePlatform::Amazon, EcommercePlatform::TikTokShop];

    pub fn column_suffix(self) -> &'static str {
        match self {
            EcommercePlatform::Amazon => "amazon",
            EcommercePlatform::TikTokShop => "tiktok_sale",
        }
    }
}

// ==========================================
// DashboardQuery - 大屏筛选条件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// 所选 IP,趋势按此顺序输出
    pub ips: Vec<String>,
    /// 起止日期 (含),缺省取数据的最早/最晚日期
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub social_platforms: BTreeSet<SocialPlatform>,
    pub ecommerce_platforms: BTreeSet<EcommercePlatform>,
    /// 趋势图显示的指标
    pub metrics: BTreeSet<TrendMetric>,
}

impl DashboardQuery {
    /// 默认条件: 前两个 IP、全部平台、全时间范围,二手销量趋势默认关闭
    pub fn defaults_for(table: &SocialMetricTable) -> Self {
        Self {
            ips: table.ip_names().into_iter().take(2).collect(),
            start: None,
            end: None,
            social_platforms: SocialPlatform::ALL.into_iter().collect(),
            ecommerce_platforms: EcommercePlatform::ALL.into_iter().collect(),
            metrics: [TrendMetric::Engagement, TrendMetric::Posts, TrendMetric::Sales]
                .into_iter()
                .collect(),
        }
    }
}

// ==========================================
// DashboardEngine - 大屏计算引擎
// ==========================================
pub struct DashboardEngine;

impl DashboardEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, table: &SocialMetricTable, query: &DashboardQuery) -> DashboardOutcome {
        let Some((data_start, data_end)) = table.date_range() else {
            tracing::info!("热度数据为空");
            return DashboardOutcome::NoData;
        };

        let mut start = query.start.unwrap_or(data_start);
        let mut end = query.end.unwrap_or(data_end);
        if start > end {
            tracing::warn!(%start, %end, "起始日期晚于结束日期,已交换");
            std::mem::swap(&mut start, &mut end);
        }

        let mut rows: Vec<&SocialMetricRecord> = table
            .records
            .iter()
            .filter(|r| query.ips.contains(&r.ip_name) && r.date >= start && r.date <= end)
            .collect();
        if rows.is_empty() {
            tracing::info!(ips = ?query.ips, %start, %end, "没有符合条件的热度数据");
            return DashboardOutcome::NoData;
        }
        rows.sort_by_key(|r| r.date);

        let social_posts = self.platform_columns(
            table,
            metric_columns::POSTS_PREFIX,
            query.social_platforms.iter().map(|p| p.column_suffix()),
        );
        let social_engagement = self.platform_columns(
            table,
            metric_columns::ENGAGEMENT_PREFIX,
            query.social_platforms.iter().map(|p| p.column_suffix()),
        );
        let ecommerce_sales = self.platform_columns(
            table,
            metric_columns::SALES_PREFIX,
            query.ecommerce_platforms.iter().map(|p| p.column_suffix()),
        );

        let actual: Vec<&SocialMetricRecord> = rows.iter().copied().filter(|r| r.is_actual()).collect();
        let kpis = DashboardKpis {
            daily_posts: self.summed_kpi(&actual, query.social_platforms.is_empty(), &social_posts),
            daily_engagement: self.summed_kpi(
                &actual,
                query.social_platforms.is_empty(),
                &social_engagement,
            ),
            daily_fan_heat: self.column_kpi(table, &actual, metric_columns::FAN_HEAT),
            daily_sales: self.summed_kpi(
                &actual,
                query.ecommerce_platforms.is_empty(),
                &ecommerce_sales,
            ),
            daily_secondhand: self.column_kpi(table, &actual, metric_columns::SECONDHAND_SALES),
        };

        let mut social_series = Vec::new();
        if !query.social_platforms.is_empty() {
            for (metric, columns) in [
                (TrendMetric::Engagement, &social_engagement),
                (TrendMetric::Posts, &social_posts),
            ] {
                if query.metrics.contains(&metric) {
                    social_series.extend(self.series(&rows, &query.ips, metric, columns));
                }
            }
        }

        let mut ecommerce_series = Vec::new();
        if !query.ecommerce_platforms.is_empty() {
            if query.metrics.contains(&TrendMetric::Sales) {
                ecommerce_series.extend(self.series(
                    &rows,
                    &query.ips,
                    TrendMetric::Sales,
                    &ecommerce_sales,
                ));
            }
            if query.metrics.contains(&TrendMetric::SecondhandSales)
                && table.has_column(metric_columns::SECONDHAND_SALES)
            {
                let column = (None, metric_columns::SECONDHAND_SALES.to_string());
                ecommerce_series.extend(self.series(
                    &rows,
                    &query.ips,
                    TrendMetric::SecondhandSales,
                    std::slice::from_ref(&column),
                ));
            }
        }

        tracing::info!(
            rows = rows.len(),
            actual_rows = actual.len(),
            social_series = social_series.len(),
            ecommerce_series = ecommerce_series.len(),
            "热度大屏计算完成"
        );

        DashboardOutcome::Populated {
            start,
            end,
            kpis,
            social_series,
            ecommerce_series,
        }
    }

    /// 所选平台中数据表确实存在的列: (平台后缀, 列名)
    fn platform_columns<'p>(
        &self,
        table: &SocialMetricTable,
        prefix: &str,
        suffixes: impl Iterator<Item = &'p str>,
    ) -> Vec<(Option<String>, String)> {
        suffixes
            .map(|suffix| (suffix, format!("{}{}", prefix, suffix)))
            .filter(|(_, column)| table.has_column(column))
            .map(|(suffix, column)| (Some(suffix.to_string()), column))
            .collect()
    }

    fn summed_kpi(
        &self,
        actual: &[&SocialMetricRecord],
        nothing_selected: bool,
        columns: &[(Option<String>, String)],
    ) -> Kpi {
        if nothing_selected {
            return Kpi::NotSelected;
        }
        if columns.is_empty() || actual.is_empty() {
            return Kpi::Unavailable;
        }

        let total: f64 = actual
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .filter_map(|(_, c)| r.metric(c))
                    .sum::<f64>()
            })
            .sum();
        Kpi::Average {
            value: total / actual.len() as f64,
            columns: columns.len(),
        }
    }

    fn column_kpi(&self, table: &SocialMetricTable, actual: &[&SocialMetricRecord], column: &str) -> Kpi {
        if !table.has_column(column) {
            return Kpi::Unavailable;
        }
        let values: Vec<f64> = actual.iter().filter_map(|r| r.metric(column)).collect();
        if values.is_empty() {
            return Kpi::Unavailable;
        }
        Kpi::Average {
            value: values.iter().sum::<f64>() / values.len() as f64,
            columns: 1,
        }
    }

    /// 每列 × 每个 IP 一条序列,实际/预测均为空的序列不输出
    fn series(
        &self,
        rows: &[&SocialMetricRecord],
        ips: &[String],
        metric: TrendMetric,
        columns: &[(Option<String>, String)],
    ) -> Vec<MetricSeries> {
        let mut result = Vec::new();
        for (platform, column) in columns {
            for ip in ips {
                let mut actual = Vec::new();
                let mut forecast = Vec::new();
                for record in rows.iter().filter(|r| &r.ip_name == ip) {
                    let Some(value) = record.metric(column) else {
                        continue;
                    };
                    let point = SeriesPoint {
                        date: record.date,
                        value,
                    };
                    if record.is_actual() {
                        actual.push(point);
                    } else {
                        forecast.push(point);
                    }
                }

                if actual.is_empty() && forecast.is_empty() {
                    continue;
                }
                result.push(MetricSeries {
                    ip_name: ip.clone(),
                    metric,
                    platform: platform.clone(),
                    column: column.clone(),
                    actual,
                    forecast,
                });
            }
        }
        result
    }
}

impl Default for DashboardEngine {
    fn default() -> Self {
        Self::new()
    }
}
