// ==========================================
// IP商品销量预测模拟器 - 配置注册表
// ==========================================
// 职责: 配置项的创建、刷新、编辑与两步删除
// 生命周期: 一个用户会话,会话开始时为空
// 红线: 已删除的键不会被自动重建,只能显式重置已删除集合
// ==========================================

use crate::domain::configuration::{
    ClampNotice, ConfigurationEntry, KeyObservation, UpsertOutcome,
};
use crate::domain::types::{ConfigurationKey, LifecycleState};
use crate::engine::error::{ConfigurationViolation, RegistryError, RegistryResult};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// ConfigurationRegistry - 配置注册表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigurationRegistry {
    /// 存活配置项 (Active / MarkedForDeletion)
    entries: BTreeMap<ConfigurationKey, ConfigurationEntry>,
    /// 已删除键集合,跨重建保留
    deleted: BTreeSet<ConfigurationKey>,
    /// 最近一次同步中观测到的存活键
    observed: BTreeSet<ConfigurationKey>,
}

impl ConfigurationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 观测同步
    // ==========================================

    /// 用一次观测结果创建或刷新配置项
    ///
    /// - 新键: 门店数取观测上限,门店类型取全部观测类型
    /// - 已有键: 门店数只会被压回上限,不会自动调高;门店类型只剔除不再出现的类型
    /// - 已删除键: 跳过
    pub fn upsert(
        &mut self,
        key: ConfigurationKey,
        observation: &KeyObservation,
        start_date: NaiveDate,
    ) -> UpsertOutcome {
        if self.is_deleted(&key) {
            return UpsertOutcome::SkippedDeleted;
        }

        match self.entries.get_mut(&key) {
            None => {
                tracing::debug!(key = %key, max_stores = observation.max_stores, "新建配置项");
                let entry = ConfigurationEntry::from_observation(key.clone(), observation, start_date);
                self.entries.insert(key, entry);
                UpsertOutcome::Created
            }
            Some(entry) => {
                entry.observed_max = observation.max_stores;
                entry.observed_types = observation.district_types.clone();
                entry.attributes = observation.attributes.clone();
                entry
                    .store_types
                    .retain(|t| observation.district_types.contains(t));

                let clamped_from = if entry.store_count > observation.max_stores {
                    let previous = entry.store_count;
                    entry.store_count = observation.max_stores;
                    tracing::warn!(
                        key = %key,
                        previous,
                        clamped_to = observation.max_stores,
                        "门店数超出当前可用门店,已压回上限"
                    );
                    Some(previous)
                } else {
                    None
                };

                UpsertOutcome::Refreshed { clamped_from }
            }
        }
    }

    /// 以一次完整观测重建注册表视图
    ///
    /// # 参数
    /// - `observations`: 当前筛选底表的全部观测
    /// - `fallback_start`: 观测不到销售起始日期时使用的日期
    ///
    /// # 返回
    /// 本次被压回上限的配置
    pub fn sync(
        &mut self,
        observations: &BTreeMap<ConfigurationKey, KeyObservation>,
        fallback_start: NaiveDate,
    ) -> Vec<ClampNotice> {
        let mut notices = Vec::new();
        let mut created = 0usize;
        let mut skipped = 0usize;
        self.observed.clear();

        for (key, observation) in observations {
            let start_date = observation.start_date.unwrap_or(fallback_start);
            match self.upsert(key.clone(), observation, start_date) {
                UpsertOutcome::Created => created += 1,
                UpsertOutcome::SkippedDeleted => {
                    skipped += 1;
                    continue;
                }
                UpsertOutcome::Refreshed { clamped_from: Some(previous) } => {
                    notices.push(ClampNotice {
                        key: key.clone(),
                        previous,
                        clamped_to: observation.max_stores,
                    });
                }
                UpsertOutcome::Refreshed { clamped_from: None } => {}
            }
            self.observed.insert(key.clone());
        }

        tracing::info!(
            observed = self.observed.len(),
            created,
            clamped = notices.len(),
            skipped_deleted = skipped,
            "配置注册表同步完成"
        );
        notices
    }

    // ==========================================
    // 用户编辑
    // ==========================================

    /// 修改覆盖门店数
    ///
    /// 合法范围 [0, 最近一次观测的门店上限],校验失败时不做任何修改
    pub fn set_store_count(&mut self, key: &ConfigurationKey, n: i64) -> RegistryResult<()> {
        let entry = self.live_entry_mut(key)?;
        let max = entry.observed_max;
        if n < 0 || n > i64::from(max) {
            return Err(RegistryError::InvalidConfiguration {
                key: key.to_string(),
                violation: ConfigurationViolation::StoreCountOutOfRange { value: n, max },
            });
        }
        entry.store_count = n as u32;
        Ok(())
    }

    /// 替换覆盖门店类型
    ///
    /// 每个类型都必须出现在最近一次观测中;空集合原样保存
    pub fn set_store_types(
        &mut self,
        key: &ConfigurationKey,
        types: BTreeSet<String>,
    ) -> RegistryResult<()> {
        let entry = self.live_entry_mut(key)?;
        let unknown: Vec<String> = types
            .iter()
            .filter(|t| !entry.observed_types.contains(*t))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(RegistryError::InvalidConfiguration {
                key: key.to_string(),
                violation: ConfigurationViolation::UnobservedStoreTypes { types: unknown },
            });
        }
        entry.store_types = types;
        Ok(())
    }

    /// 删除/确认 勾选框状态迁移 (幂等)
    ///
    /// # 返回
    /// 迁移后的生命周期状态
    pub fn mark_for_deletion(
        &mut self,
        key: &ConfigurationKey,
        delete_flag: bool,
        confirm_flag: bool,
    ) -> RegistryResult<LifecycleState> {
        if self.is_deleted(key) {
            return Ok(LifecycleState::Deleted);
        }

        let entry = self.live_entry_mut(key)?;
        let from = entry.state;
        let to = from.transition(delete_flag, confirm_flag);

        if to == LifecycleState::Deleted {
            self.entries.remove(key);
            self.observed.remove(key);
            self.deleted.insert(key.clone());
            tracing::info!(key = %key, from = %from, "配置已删除");
        } else {
            entry.state = to;
            if from != to {
                tracing::debug!(key = %key, from = %from, to = %to, "配置状态变更");
            }
        }

        Ok(to)
    }

    /// 清空已删除集合,被删除的键在下一次同步时重新出现
    ///
    /// # 返回
    /// 被恢复的键数量
    pub fn reset_deleted(&mut self) -> usize {
        let count = self.deleted.len();
        self.deleted.clear();
        tracing::info!(restored = count, "已重置删除集合");
        count
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 全部存活配置项 (不含已删除)
    pub fn active_entries(&self) -> &BTreeMap<ConfigurationKey, ConfigurationEntry> {
        &self.entries
    }

    /// 最近一次同步中观测到的存活配置项
    pub fn observed_entries(&self) -> impl Iterator<Item = &ConfigurationEntry> {
        self.observed.iter().filter_map(|k| self.entries.get(k))
    }

    pub fn entry(&self, key: &ConfigurationKey) -> Option<&ConfigurationEntry> {
        self.entries.get(key)
    }

    /// 键的生命周期状态,从未出现过的键返回 None
    pub fn state(&self, key: &ConfigurationKey) -> Option<LifecycleState> {
        if self.is_deleted(key) {
            return Some(LifecycleState::Deleted);
        }
        self.entries.get(key).map(|e| e.state)
    }

    pub fn is_deleted(&self, key: &ConfigurationKey) -> bool {
        self.deleted.contains(key)
    }

    pub fn deleted_keys(&self) -> &BTreeSet<ConfigurationKey> {
        &self.deleted
    }

    fn live_entry_mut(&mut self, key: &ConfigurationKey) -> RegistryResult<&mut ConfigurationEntry> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| RegistryError::UnknownConfiguration(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::ProductAttributes;

    fn key(product: &str) -> ConfigurationKey {
        ConfigurationKey::new("IP1", product, "线下", "US")
    }

    fn observation(max_stores: u32, types: &[&str]) -> KeyObservation {
        KeyObservation {
            max_stores,
            district_types: types.iter().map(|t| t.to_string()).collect(),
            start_date: None,
            attributes: ProductAttributes::default(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn types(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_upsert_creates_active_entry_with_defaults() {
        let mut registry = ConfigurationRegistry::new();
        let outcome = registry.upsert(key("P1"), &observation(5, &["商场", "社区"]), day());

        assert_eq!(outcome, UpsertOutcome::Created);
        let entry = registry.entry(&key("P1")).unwrap();
        assert_eq!(entry.store_count, 5);
        assert_eq!(entry.store_types, types(&["商场", "社区"]));
        assert_eq!(entry.start_date, day());
        assert_eq!(entry.state, LifecycleState::Active);
    }

    #[test]
    fn test_upsert_clamps_but_never_raises() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(5, &[]), day());
        registry.set_store_count(&key("P1"), 4).unwrap();

        let outcome = registry.upsert(key("P1"), &observation(3, &[]), day());
        assert_eq!(outcome, UpsertOutcome::Refreshed { clamped_from: Some(4) });
        assert_eq!(registry.entry(&key("P1")).unwrap().store_count, 3);

        let outcome = registry.upsert(key("P1"), &observation(10, &[]), day());
        assert_eq!(outcome, UpsertOutcome::Refreshed { clamped_from: None });
        assert_eq!(registry.entry(&key("P1")).unwrap().store_count, 3);
        assert_eq!(registry.entry(&key("P1")).unwrap().observed_max, 10);
    }

    #[test]
    fn test_upsert_drops_unobserved_store_types() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(2, &["商场", "社区"]), day());

        registry.upsert(key("P1"), &observation(2, &["社区", "景区"]), day());
        let entry = registry.entry(&key("P1")).unwrap();
        assert_eq!(entry.store_types, types(&["社区"]));
        assert_eq!(entry.observed_types, types(&["景区", "社区"]));
    }

    #[test]
    fn test_upsert_keeps_start_date() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(2, &[]), day());
        let later = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        registry.upsert(key("P1"), &observation(2, &[]), later);
        assert_eq!(registry.entry(&key("P1")).unwrap().start_date, day());
    }

    #[test]
    fn test_set_store_count_range() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(3, &[]), day());

        for n in 0..=3 {
            registry.set_store_count(&key("P1"), n).unwrap();
            assert_eq!(registry.entry(&key("P1")).unwrap().store_count, n as u32);
        }

        for n in [-1, 4, 100] {
            let err = registry.set_store_count(&key("P1"), n).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidConfiguration { .. }));
            assert_eq!(registry.entry(&key("P1")).unwrap().store_count, 3);
        }
    }

    #[test]
    fn test_set_store_types_rejects_unobserved() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(3, &["商场", "社区"]), day());

        let err = registry
            .set_store_types(&key("P1"), types(&["商场", "机场"]))
            .unwrap_err();
        match err {
            RegistryError::InvalidConfiguration { violation, .. } => assert_eq!(
                violation,
                ConfigurationViolation::UnobservedStoreTypes {
                    types: vec!["机场".to_string()]
                }
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            registry.entry(&key("P1")).unwrap().store_types,
            types(&["商场", "社区"])
        );

        registry.set_store_types(&key("P1"), types(&[])).unwrap();
        assert!(registry.entry(&key("P1")).unwrap().store_types.is_empty());
    }

    #[test]
    fn test_edit_unknown_key_fails() {
        let mut registry = ConfigurationRegistry::new();
        assert!(matches!(
            registry.set_store_count(&key("NOPE"), 1),
            Err(RegistryError::UnknownConfiguration(_))
        ));
        assert!(matches!(
            registry.mark_for_deletion(&key("NOPE"), true, true),
            Err(RegistryError::UnknownConfiguration(_))
        ));
    }

    #[test]
    fn test_two_step_deletion_and_no_resurrection() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(3, &[]), day());

        let state = registry.mark_for_deletion(&key("P1"), true, false).unwrap();
        assert_eq!(state, LifecycleState::MarkedForDeletion);
        assert!(registry.active_entries().contains_key(&key("P1")));

        let state = registry.mark_for_deletion(&key("P1"), true, true).unwrap();
        assert_eq!(state, LifecycleState::Deleted);
        assert!(registry.active_entries().is_empty());
        assert_eq!(registry.state(&key("P1")), Some(LifecycleState::Deleted));
        assert!(registry.is_deleted(&key("P1")));

        let outcome = registry.upsert(key("P1"), &observation(3, &[]), day());
        assert_eq!(outcome, UpsertOutcome::SkippedDeleted);
        assert!(registry.entry(&key("P1")).is_none());

        // 幂等
        let state = registry.mark_for_deletion(&key("P1"), true, true).unwrap();
        assert_eq!(state, LifecycleState::Deleted);
    }

    #[test]
    fn test_unmark_returns_to_active() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(3, &[]), day());

        registry.mark_for_deletion(&key("P1"), true, false).unwrap();
        let state = registry.mark_for_deletion(&key("P1"), false, false).unwrap();
        assert_eq!(state, LifecycleState::Active);
        assert_eq!(registry.entry(&key("P1")).unwrap().state, LifecycleState::Active);
    }

    #[test]
    fn test_reset_deleted_allows_recreation() {
        let mut registry = ConfigurationRegistry::new();
        registry.upsert(key("P1"), &observation(3, &[]), day());
        registry.mark_for_deletion(&key("P1"), true, true).unwrap();

        assert_eq!(registry.deleted_keys().len(), 1);
        assert_eq!(registry.reset_deleted(), 1);
        assert!(registry.deleted_keys().is_empty());
        assert_eq!(
            registry.upsert(key("P1"), &observation(3, &[]), day()),
            UpsertOutcome::Created
        );
    }

    #[test]
    fn test_sync_tracks_observed_keys_and_notices() {
        let mut registry = ConfigurationRegistry::new();
        let mut observations = BTreeMap::new();
        observations.insert(key("P1"), observation(4, &[]));
        observations.insert(key("P2"), observation(2, &[]));
        assert!(registry.sync(&observations, day()).is_empty());
        assert_eq!(registry.observed_entries().count(), 2);
        // 观测不到起始日期时取回退日期
        assert_eq!(registry.entry(&key("P1")).unwrap().start_date, day());

        // P2 不再出现,P1 门店减少
        let mut observations = BTreeMap::new();
        observations.insert(key("P1"), observation(1, &[]));
        let notices = registry.sync(&observations, day());

        assert_eq!(
            notices,
            vec![ClampNotice { key: key("P1"), previous: 4, clamped_to: 1 }]
        );
        let observed: Vec<_> = registry.observed_entries().map(|e| e.key.clone()).collect();
        assert_eq!(observed, vec![key("P1")]);
        // 未观测到的配置保留设置
        assert_eq!(registry.active_entries().len(), 2);
    }

    #[test]
    fn test_sync_prefers_observed_start_date() {
        let mut registry = ConfigurationRegistry::new();
        let observed = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let mut observations = BTreeMap::new();
        observations.insert(
            key("P1"),
            KeyObservation {
                start_date: Some(observed),
                ..observation(1, &[])
            },
        );

        registry.sync(&observations, day());
        assert_eq!(registry.entry(&key("P1")).unwrap().start_date, observed);
    }
}
