//! Strategy-pack scaffolding for `strategy new`.

use crate::domain::error::StrategyCliError;
use crate::domain::layout::PackLayout;
use crate::domain::naming::{StrategyName, check_package};
use crate::domain::templates::{entrypoint_hint, strategy_template, strategy_test_template};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub name: String,
    pub class_name: Option<String>,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct ScaffoldOutput {
    pub name: StrategyName,
    pub strategy_file: PathBuf,
    pub test_file: PathBuf,
    /// Manifest lines the user still has to add.
    pub entrypoint_hint: String,
}

pub fn scaffold(
    layout: &PackLayout,
    request: &ScaffoldRequest,
) -> Result<ScaffoldOutput, StrategyCliError> {
    check_package(&layout.package).map_err(|source| StrategyCliError::InvalidName {
        name: layout.package.clone(),
        source,
    })?;
    let name = StrategyName::parse(&request.name, request.class_name.as_deref()).map_err(
        |source| StrategyCliError::InvalidName {
            name: request.name.clone(),
            source,
        },
    )?;

    let strategy_file = layout.strategy_file(&name);
    let test_file = layout.test_file(&name);

    if !request.force {
        check_free(&strategy_file, "strategy file")?;
        check_free(&test_file, "test file")?;
    }

    for dir in [
        layout.package_dir(),
        layout.strategies_dir(),
        layout.tests_dir(),
    ] {
        fs::create_dir_all(&dir)?;
    }
    ensure_init_file(&layout.package_dir().join("__init__.py"))?;
    ensure_init_file(&layout.strategies_dir().join("__init__.py"))?;

    fs::write(&strategy_file, strategy_template(&name.class_name))?;
    fs::write(
        &test_file,
        strategy_test_template(&layout.package, &name.module_name, &name.class_name),
    )?;

    let entrypoint_hint = entrypoint_hint(&layout.package, &name.module_name, &name.class_name);
    Ok(ScaffoldOutput {
        name,
        strategy_file,
        test_file,
        entrypoint_hint,
    })
}

fn check_free(path: &Path, kind: &str) -> Result<(), StrategyCliError> {
    if path.exists() {
        Err(StrategyCliError::NameCollision {
            kind: kind.to_string(),
            path: path.display().to_string(),
        })
    } else {
        Ok(())
    }
}

fn ensure_init_file(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::write(path, "")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(name: &str) -> ScaffoldRequest {
        ScaffoldRequest {
            name: name.to_string(),
            class_name: None,
            force: false,
        }
    }

    #[test]
    fn creates_strategy_and_test_files() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        let out = scaffold(&layout, &request("alpha edge")).unwrap();

        assert_eq!(
            out.strategy_file,
            dir.path().join("strategy_pack/strategies/alpha_edge.py")
        );
        assert_eq!(out.test_file, dir.path().join("tests/test_alpha_edge.py"));
        assert!(out.strategy_file.is_file());
        assert!(out.test_file.is_file());
        assert!(dir.path().join("strategy_pack/__init__.py").is_file());
        assert!(dir.path().join("strategy_pack/strategies/__init__.py").is_file());

        let src = fs::read_to_string(&out.strategy_file).unwrap();
        assert!(src.contains("class AlphaEdgeStrategy(BaseStrategy):"));
    }

    #[test]
    fn existing_init_files_are_preserved() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        fs::create_dir_all(layout.package_dir()).unwrap();
        fs::write(layout.package_dir().join("__init__.py"), "VERSION = 1\n").unwrap();

        scaffold(&layout, &request("alpha")).unwrap();
        assert_eq!(
            fs::read_to_string(layout.package_dir().join("__init__.py")).unwrap(),
            "VERSION = 1\n"
        );
    }

    #[test]
    fn second_call_collides() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        let first = scaffold(&layout, &request("alpha")).unwrap();
        fs::write(&first.strategy_file, "# edited\n").unwrap();

        let err = scaffold(&layout, &request("Alpha")).unwrap_err();
        assert!(
            matches!(err, StrategyCliError::NameCollision { ref kind, .. } if kind == "strategy file")
        );
        assert_eq!(fs::read_to_string(&first.strategy_file).unwrap(), "# edited\n");
    }

    #[test]
    fn test_file_collision_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        fs::create_dir_all(layout.tests_dir()).unwrap();
        fs::write(layout.tests_dir().join("test_alpha.py"), "keep\n").unwrap();

        let err = scaffold(&layout, &request("alpha")).unwrap_err();
        assert!(matches!(err, StrategyCliError::NameCollision { ref kind, .. } if kind == "test file"));
        assert!(!layout.strategies_dir().join("alpha.py").exists());
    }

    #[test]
    fn force_overwrites() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        let first = scaffold(&layout, &request("alpha")).unwrap();
        fs::write(&first.strategy_file, "# edited\n").unwrap();

        let mut req = request("alpha");
        req.force = true;
        scaffold(&layout, &req).unwrap();
        assert!(fs::read_to_string(&first.strategy_file).unwrap().contains("AlphaStrategy"));
    }

    #[test]
    fn empty_name_is_invalid() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        let err = scaffold(&layout, &request("")).unwrap_err();
        assert!(matches!(err, StrategyCliError::InvalidName { .. }));
        assert!(!layout.package_dir().exists());
    }

    #[test]
    fn class_name_with_space_is_invalid() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "strategy_pack");
        let mut req = request("alpha");
        req.class_name = Some("My Class".into());
        let err = scaffold(&layout, &req).unwrap_err();
        assert!(matches!(err, StrategyCliError::InvalidName { .. }));
        assert!(!layout.package_dir().exists());
    }

    #[test]
    fn package_outside_root_is_invalid() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("pack");
        let layout = PackLayout::new(&root, "../x");
        let err = scaffold(&layout, &request("alpha")).unwrap_err();
        assert!(matches!(err, StrategyCliError::InvalidName { ref name, .. } if name == "../x"));
        assert!(!dir.path().join("x").exists());
    }

    #[test]
    fn custom_package_and_class() {
        let dir = TempDir::new().unwrap();
        let layout = PackLayout::new(dir.path(), "my_pack");
        let mut req = request("mean reversion");
        req.class_name = Some("MeanRev".into());
        let out = scaffold(&layout, &req).unwrap();

        let test_src = fs::read_to_string(&out.test_file).unwrap();
        assert!(test_src.contains("from my_pack.strategies.mean_reversion import MeanRev"));
        assert!(out
            .entrypoint_hint
            .ends_with("mean_reversion = \"my_pack.strategies.mean_reversion:MeanRev\""));
    }
}
