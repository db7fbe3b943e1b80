use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use modlink::{
    create_method, DeployOptions, DeployUseCase, JsonManifestStore, MethodKind, ModRef, NoMerge,
    NoopEventSink, PurgeOptions, PurgeUseCase,
};

fn flat(_m: &ModRef) -> PathBuf {
    PathBuf::new()
}

fn write_mod_file(install: &Path, mod_dir: &str, rel: &str, content: &str) {
    let path = install.join(mod_dir).join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run_deploy(install: &Path, dest: &Path, state: &Path, mods: &[ModRef], kind: MethodKind) {
    let options = DeployOptions::new("testgame", install).with_destination(dest);
    let mut method = create_method(kind, "testgame");
    DeployUseCase::new(JsonManifestStore::new(state))
        .execute(
            &options,
            mods,
            method.as_mut(),
            &NoMerge,
            &flat,
            &NoopEventSink,
        )
        .unwrap();
}

fn run_purge(install: &Path, dest: &Path, state: &Path, kind: MethodKind) -> modlink::PurgeResult {
    let options = PurgeOptions::new("testgame", install).with_destination(dest);
    let mut method = create_method(kind, "testgame");
    PurgeUseCase::new(JsonManifestStore::new(state))
        .execute(&options, method.as_mut(), &NoopEventSink)
        .unwrap()
}

#[test]
fn purge_after_hardlink_deploy_leaves_sources_intact() {
    let dir = tempdir().unwrap();
    let install = dir.path().join("mods");
    let dest = dir.path().join("game");
    let state = dir.path().join("state");
    write_mod_file(&install, "a", "meshes/chair.nif", "mesh");
    write_mod_file(&install, "a", "plugin.esp", "plugin");

    run_deploy(
        &install,
        &dest,
        &state,
        &[ModRef::new("a", "a")],
        MethodKind::Hardlink,
    );
    let result = run_purge(&install, &dest, &state, MethodKind::Hardlink);

    assert_eq!(result.removed, 2);
    assert!(result.is_clean());
    assert!(!dest.join("plugin.esp").exists());
    assert!(!dest.join("meshes").exists());
    assert_eq!(
        fs::read_to_string(install.join("a/plugin.esp")).unwrap(),
        "plugin"
    );
}

#[test]
fn purge_after_move_deploy_restores_staging() {
    let dir = tempdir().unwrap();
    let install = dir.path().join("mods");
    let dest = dir.path().join("game");
    let state = dir.path().join("state");
    write_mod_file(&install, "a", "scripts/init.lua", "script");

    run_deploy(
        &install,
        &dest,
        &state,
        &[ModRef::new("a", "a")],
        MethodKind::Move,
    );
    assert!(!install.join("a/scripts/init.lua").exists());

    let result = run_purge(&install, &dest, &state, MethodKind::Move);

    assert!(result.is_clean());
    assert!(!dest.join("scripts").exists());
    assert_eq!(
        fs::read_to_string(install.join("a/scripts/init.lua")).unwrap(),
        "script"
    );
}

#[test]
fn deploy_after_purge_starts_from_a_clean_slate() {
    let dir = tempdir().unwrap();
    let install = dir.path().join("mods");
    let dest = dir.path().join("game");
    let state = dir.path().join("state");
    write_mod_file(&install, "a", "file.txt", "v1");

    run_deploy(
        &install,
        &dest,
        &state,
        &[ModRef::new("a", "a")],
        MethodKind::Copy,
    );
    run_purge(&install, &dest, &state, MethodKind::Copy);

    // Purge also dropped the ownership tag, so a different game could
    // claim the directory now; the same game just redeploys.
    run_deploy(
        &install,
        &dest,
        &state,
        &[ModRef::new("a", "a")],
        MethodKind::Copy,
    );

    assert_eq!(fs::read_to_string(dest.join("file.txt")).unwrap(), "v1");
}

#[test]
fn purge_tolerates_externally_deleted_files() {
    let dir = tempdir().unwrap();
    let install = dir.path().join("mods");
    let dest = dir.path().join("game");
    let state = dir.path().join("state");
    write_mod_file(&install, "a", "one.txt", "1");
    write_mod_file(&install, "a", "two.txt", "2");

    run_deploy(
        &install,
        &dest,
        &state,
        &[ModRef::new("a", "a")],
        MethodKind::Copy,
    );
    fs::remove_file(dest.join("one.txt")).unwrap();

    let result = run_purge(&install, &dest, &state, MethodKind::Copy);

    assert!(result.is_clean());
    assert!(!dest.join("two.txt").exists());
}
