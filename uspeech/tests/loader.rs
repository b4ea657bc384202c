use std::fs;
use std::path::Path;

use uspeech::{Arch, Error, Loader, LoaderConfig, REQUIRED_FILES};

fn install(root: &Path, arch: Arch, files: &[&str]) {
    let dir = root.join(arch.lib_folder());
    fs::create_dir_all(&dir).expect("create lib folder");
    for file in files {
        fs::write(dir.join(file), b"MZ").expect("write library file");
    }
}

#[test]
fn complete_set_passes_for_each_arch() {
    for arch in [Arch::X86, Arch::X64] {
        let root = tempfile::tempdir().expect("tempdir");
        install(root.path(), arch, &REQUIRED_FILES);

        let loader = Loader::new(LoaderConfig::new(root.path()).with_arch(arch));
        let dir = loader.check_files().expect("all files present");
        assert_eq!(dir, root.path().join(arch.lib_folder()));
    }
}

#[test]
fn removing_any_file_is_a_missing_dependency() {
    for arch in [Arch::X86, Arch::X64] {
        for removed in REQUIRED_FILES {
            let root = tempfile::tempdir().expect("tempdir");
            let files: Vec<&str> = REQUIRED_FILES
                .iter()
                .copied()
                .filter(|f| *f != removed)
                .collect();
            install(root.path(), arch, &files);

            let loader = Loader::new(LoaderConfig::new(root.path()).with_arch(arch));
            match loader.check_files() {
                Err(Error::MissingDependency { missing, .. }) => {
                    assert_eq!(missing, vec![removed.to_string()])
                }
                other => panic!("{:?} without {}: {:?}", arch, removed, other),
            }
        }
    }
}

#[test]
fn files_for_the_other_arch_do_not_count() {
    let root = tempfile::tempdir().expect("tempdir");
    install(root.path(), Arch::X86, &REQUIRED_FILES);

    let loader = Loader::new(LoaderConfig::new(root.path()).with_arch(Arch::X64));
    match loader.check_files() {
        Err(Error::MissingDependency { dir, missing }) => {
            assert_eq!(dir, root.path().join("lib64"));
            assert_eq!(missing.len(), REQUIRED_FILES.len());
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn missing_folder_lists_every_file() {
    let root = tempfile::tempdir().expect("tempdir");
    let loader = Loader::new(LoaderConfig::new(root.path()).with_arch(Arch::X86));

    let err = loader.check_files().unwrap_err();
    let message = err.to_string();
    for file in REQUIRED_FILES {
        assert!(message.contains(file), "{} not in {}", file, message);
    }
}

#[test]
fn a_directory_does_not_stand_in_for_a_file() {
    let root = tempfile::tempdir().expect("tempdir");
    install(root.path(), Arch::X64, &REQUIRED_FILES[1..]);
    fs::create_dir(root.path().join("lib64").join(REQUIRED_FILES[0])).expect("mkdir");

    let loader = Loader::new(LoaderConfig::new(root.path()).with_arch(Arch::X64));
    assert!(matches!(
        loader.check_files(),
        Err(Error::MissingDependency { .. })
    ));
}

#[test]
fn load_fails_fast_before_opening_anything() {
    let root = tempfile::tempdir().expect("tempdir");
    install(root.path(), Arch::current(), &REQUIRED_FILES[..5]);

    let config = LoaderConfig::new(root.path());
    assert!(matches!(
        Loader::new(config.clone()).load(),
        Err(Error::MissingDependency { .. })
    ));
    assert!(matches!(
        uspeech::UniversalSpeech::with_config(config),
        Err(Error::MissingDependency { .. })
    ));
}

#[cfg(not(windows))]
#[test]
fn load_reports_unsupported_platform_off_windows() {
    let root = tempfile::tempdir().expect("tempdir");
    install(root.path(), Arch::current(), &REQUIRED_FILES);

    let loader = Loader::new(LoaderConfig::new(root.path()));
    assert!(matches!(loader.load(), Err(Error::UnsupportedPlatform)));
}

#[cfg(windows)]
#[test]
fn load_rejects_a_file_that_is_not_a_library() {
    let root = tempfile::tempdir().expect("tempdir");
    install(root.path(), Arch::current(), &REQUIRED_FILES);

    let loader = Loader::new(LoaderConfig::new(root.path()));
    assert!(matches!(loader.load(), Err(Error::LibraryLoad { .. })));
}
