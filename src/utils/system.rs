//! 系统工具模块
//!
//! 启动时检查动作所需的程序是否存在于 PATH 中

use log::{info, warn};
use std::collections::BTreeSet;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::core::actions::ActionTable;

/// 在 PATH 中查找程序
pub fn find_program(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    let cwd = env::current_dir().ok()?;
    find_program_in(name, &path_var, &cwd)
}

/// 在给定的 PATH 值中查找程序
///
/// 含路径分隔符的名称相对 `cwd` 解析
pub fn find_program_in(name: &str, path_var: &OsStr, cwd: &Path) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    which::which_in(name, Some(path_var), cwd).ok()
}

/// 检查分发表中的程序，返回缺失的程序名
///
/// 只记录警告，不阻止启动
pub fn check_required_programs(table: &ActionTable) -> Vec<String> {
    let programs: BTreeSet<&str> = table
        .iter()
        .filter_map(|spec| spec.argv.first().map(String::as_str))
        .collect();

    let mut missing = Vec::new();
    for program in programs {
        match find_program(program) {
            Some(path) => info!("找到程序 {}: {:?}", program, path),
            None => {
                warn!("未找到程序 {}，相关操作将会失败", program);
                missing.push(program.to_string());
            },
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PowerAction;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_program() {
        let dir = tempdir().unwrap();
        assert_eq!(find_program_in("apt", dir.path().as_os_str(), dir.path()), None);
        assert_eq!(find_program_in("", dir.path().as_os_str(), dir.path()), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_finds_executable_on_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let program = dir.path().join("sudo");
        fs::write(&program, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        let not_executable = dir.path().join("apt");
        fs::write(&not_executable, "").unwrap();
        fs::set_permissions(&not_executable, fs::Permissions::from_mode(0o644)).unwrap();

        let path_var = env::join_paths([dir.path()]).unwrap();
        assert_eq!(find_program_in("sudo", &path_var, dir.path()), Some(program));
        assert_eq!(find_program_in("apt", &path_var, dir.path()), None);
    }

    #[test]
    fn test_missing_override_program_reported_once() {
        let mut overrides = std::collections::BTreeMap::new();
        let program = "syspanel-no-such-program";
        overrides.insert(PowerAction::Update, vec![program.to_string(), "update".to_string()]);
        overrides.insert(PowerAction::Upgrade, vec![program.to_string(), "upgrade".to_string()]);
        let table = ActionTable::with_overrides(Path::new("icons"), &overrides);

        let missing = check_required_programs(&table);

        assert_eq!(missing.iter().filter(|name| name.as_str() == program).count(), 1);
    }
}
