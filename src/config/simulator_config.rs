use crate::engine::filter::SelectionFilter;
use serde::{Deserialize, Serialize};

/// 模拟器配置（持久化对象）
///
/// 存储位置：JSON 文件，所有字段可省略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// 可选目标周数
    #[serde(default = "default_target_week_options")]
    pub target_week_options: Vec<u32>,

    /// 默认目标周数
    #[serde(default = "default_target_week")]
    pub default_target_week: u32,

    /// 默认筛选条件
    #[serde(default = "default_selection")]
    pub default_selection: SelectionFilter,

    /// Excel 工作表名
    #[serde(default = "default_sheet_name")]
    pub sheet_name: Option<String>,

    /// 社媒/电商热度数据工作表名
    #[serde(default = "default_social_sheet_name")]
    pub social_sheet_name: Option<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            target_week_options: default_target_week_options(),
            default_target_week: default_target_week(),
            default_selection: default_selection(),
            sheet_name: default_sheet_name(),
            social_sheet_name: default_social_sheet_name(),
        }
    }
}

impl SimulatorConfig {
    pub fn allows_target_week(&self, week: u32) -> bool {
        self.target_week_options.contains(&week)
    }
}

fn default_target_week_options() -> Vec<u32> {
    (1..=8).collect()
}

fn default_target_week() -> u32 {
    8
}

fn default_selection() -> SelectionFilter {
    SelectionFilter {
        ip_categories: ["IP类别_古风独家IP".to_string()].into_iter().collect(),
        materials: ["木质".to_string()].into_iter().collect(),
        purposes: ["箱包配饰".to_string()].into_iter().collect(),
        ..SelectionFilter::default()
    }
}

fn default_sheet_name() -> Option<String> {
    Some("预测结果底表".to_string())
}

fn default_social_sheet_name() -> Option<String> {
    Some("社媒_电商原始数据表".to_string())
}
