// novade-wm/tests/config_loading.rs

use std::fs;

use novade_core::types::RectInt;
use novade_wm::{ErrorKind, LayoutType, WindowManager, WindowState, WindowType};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn window_manager_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "DEBUG"

[window_management]
screen_width = 1280
screen_height = 720
default_workspace_name = "Main"
default_layout = "Tiling"
stage_padding = 10
"#,
    )
    .unwrap();

    let mut wm = WindowManager::from_config_file(&path).unwrap();
    assert_eq!(wm.screen_geometry(), RectInt::from_coords(0, 0, 1280, 720));
    assert_eq!(wm.layout_engine().layout_type(), LayoutType::Tiling);
    assert_eq!(wm.workspace_manager().active_workspace().map(|ws| ws.name().to_string()), Some("Main".to_string()));

    let a = wm.create_window("a", 0, 0, 100, 100, WindowType::Normal).unwrap();
    let b = wm.create_window("b", 0, 0, 100, 100, WindowType::Normal).unwrap();
    assert_eq!(wm.get_window(a).unwrap().geometry(), RectInt::from_coords(0, 0, 1280, 360));
    assert_eq!(wm.get_window(b).unwrap().geometry(), RectInt::from_coords(0, 360, 1280, 360));
    assert_eq!(wm.get_window(b).unwrap().state(), WindowState::Tiled);
}

#[test]
fn missing_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let wm = WindowManager::from_config_file(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(wm.screen_geometry(), RectInt::from_coords(0, 0, 1920, 1080));
    assert_eq!(wm.layout_engine().layout_type(), LayoutType::Free);
    assert_eq!(wm.workspace_manager().workspace_count(), 1);
}

#[test]
fn invalid_config_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[window_management]\ndefault_layout = \"spiral\"\n").unwrap();

    let err = WindowManager::from_config_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    fs::write(&path, "[window_management]\nscreen_width = \"wide\"\n").unwrap();
    let err = WindowManager::from_config_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
