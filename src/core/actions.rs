//! 动作分发表模块
//!
//! 以枚举为键，把每个动作映射到按钮文本、确认提示和参数向量

use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::types::{ActionSpec, PowerAction};

/// 默认图标目录（相对于工作目录）
pub const DEFAULT_ICON_DIR: &str = "icons";

/// 动作分发表
#[derive(Debug, Clone)]
pub struct ActionTable {
    specs: BTreeMap<PowerAction, ActionSpec>,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::new(Path::new(DEFAULT_ICON_DIR))
    }
}

impl ActionTable {
    /// 使用默认命令创建分发表
    ///
    /// # 参数
    ///
    /// * `icon_dir` - 图标所在目录
    pub fn new(icon_dir: &Path) -> Self {
        let specs = PowerAction::ALL
            .iter()
            .map(|&action| (action, Self::default_spec(action, icon_dir)))
            .collect();

        Self { specs }
    }

    /// 使用配置中的命令覆盖创建分发表
    ///
    /// 空的覆盖项会被忽略，保留默认命令
    pub fn with_overrides(icon_dir: &Path, overrides: &BTreeMap<PowerAction, Vec<String>>) -> Self {
        let mut table = Self::new(icon_dir);

        for (action, argv) in overrides {
            if argv.first().map_or(true, |program| program.is_empty()) {
                warn!("忽略无效的命令覆盖: {} -> {:?}", action, argv);
                continue;
            }
            if let Some(spec) = table.specs.get_mut(action) {
                info!("命令覆盖: {} -> {:?}", action, argv);
                spec.argv = argv.clone();
            }
        }

        table
    }

    /// 内置的动作描述
    fn default_spec(action: PowerAction, icon_dir: &Path) -> ActionSpec {
        let (message, argv, with_progress): (&str, &[&str], bool) = match action {
            PowerAction::Shutdown => (
                "Are you sure you want to shut down?",
                &["sudo", "shutdown", "-h", "now"],
                false,
            ),
            PowerAction::Reboot => (
                "Are you sure you want to reboot?",
                &["sudo", "reboot"],
                false,
            ),
            PowerAction::Update => (
                "Are you sure you want to update the system?",
                &["sudo", "apt", "update"],
                true,
            ),
            PowerAction::Upgrade => (
                "Are you sure you want to upgrade the system?",
                &["sudo", "apt", "upgrade", "-y"],
                true,
            ),
        };

        ActionSpec {
            action,
            label: action.to_string(),
            icon: Self::resolve_icon(icon_dir, action),
            title: action.to_string(),
            message: message.to_string(),
            argv: argv.iter().map(|s| s.to_string()).collect(),
            with_progress,
        }
    }

    /// 图标路径：`<icon_dir>/<slug>.png`
    pub fn icon_path(icon_dir: &Path, action: PowerAction) -> PathBuf {
        icon_dir.join(format!("{}.png", action.slug()))
    }

    /// 构造时检查一次图标文件，缺失时返回 None
    fn resolve_icon(icon_dir: &Path, action: PowerAction) -> Option<PathBuf> {
        let path = Self::icon_path(icon_dir, action);
        if path.is_file() {
            Some(path)
        } else {
            debug!("图标不存在: {:?}", path);
            None
        }
    }

    /// 查找动作描述
    pub fn get(&self, action: PowerAction) -> &ActionSpec {
        // 构造时已为每个动作填充
        &self.specs[&action]
    }

    /// 按显示顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ActionSpec> {
        self.specs.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_table() {
        let table = ActionTable::default();

        assert_eq!(table.get(PowerAction::Shutdown).argv, ["sudo", "shutdown", "-h", "now"]);
        assert_eq!(table.get(PowerAction::Reboot).argv, ["sudo", "reboot"]);
        assert_eq!(table.get(PowerAction::Update).argv, ["sudo", "apt", "update"]);
        assert_eq!(table.get(PowerAction::Upgrade).argv, ["sudo", "apt", "upgrade", "-y"]);
    }

    #[test]
    fn test_progress_only_for_package_actions() {
        let table = ActionTable::default();
        let with_progress: Vec<_> = table
            .iter()
            .filter(|spec| spec.with_progress)
            .map(|spec| spec.action)
            .collect();

        assert_eq!(with_progress, [PowerAction::Update, PowerAction::Upgrade]);
    }

    #[test]
    fn test_iteration_follows_button_order() {
        let table = ActionTable::default();
        let labels: Vec<_> = table.iter().map(|spec| spec.label.as_str()).collect();
        assert_eq!(labels, ["Shutdown", "Reboot", "Update", "Upgrade"]);
    }

    #[test]
    fn test_icon_paths() {
        let dir = Path::new("icons");
        assert_eq!(ActionTable::icon_path(dir, PowerAction::Reboot), PathBuf::from("icons/reboot.png"));
        assert_eq!(ActionTable::icon_path(dir, PowerAction::Upgrade), PathBuf::from("icons/upgrade.png"));
    }

    #[test]
    fn test_icons_resolved_once_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let reboot = dir.path().join("reboot.png");
        std::fs::write(&reboot, b"png").unwrap();

        let table = ActionTable::new(dir.path());

        assert_eq!(table.get(PowerAction::Reboot).icon.as_deref(), Some(reboot.as_path()));
        assert!(table.get(PowerAction::Shutdown).icon.is_none());

        // 构造后删除文件不影响已解析的结果
        std::fs::remove_file(&reboot).unwrap();
        assert_eq!(table.get(PowerAction::Reboot).icon.as_deref(), Some(reboot.as_path()));
    }

    #[test]
    fn test_prompts_mention_action() {
        let table = ActionTable::default();
        assert!(table.get(PowerAction::Reboot).message.contains("reboot"));
        assert!(table.get(PowerAction::Shutdown).message.contains("shut down"));
    }

    #[test]
    fn test_overrides_replace_argv_and_skip_empty() {
        let mut overrides = BTreeMap::new();
        overrides.insert(PowerAction::Update, vec!["sudo".into(), "apt-get".into(), "update".into()]);
        overrides.insert(PowerAction::Reboot, vec![]);

        let table = ActionTable::with_overrides(Path::new("icons"), &overrides);

        assert_eq!(table.get(PowerAction::Update).argv, ["sudo", "apt-get", "update"]);
        assert_eq!(table.get(PowerAction::Reboot).argv, ["sudo", "reboot"]);
    }
}
