//! End-to-end launches against a staged ament prefix with a stub spawner.
#![cfg(unix)]

use std::collections::BTreeMap;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use scoutspawn_core::ament::{register_package, AmentIndex};
use scoutspawn_core::launch::{generate_launch_description, ScoutSpawnDefaults};
use scoutspawn_core::LaunchError;
use scoutspawn_runner::LaunchRunner;

const SDF: &str = "<sdf><model name=\"scout_v2\">\
<plugin><ros><namespace>/robot_namespace</namespace></ros></plugin>\
<plugin><frameName>/robot_namespace/base_link</frameName></plugin>\
</model></sdf>";

struct Install {
    dir: tempfile::TempDir,
}

impl Install {
    fn new(spawner_exit: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let share = register_package(root, "scout_gazebo_sim").unwrap();
        let model_dir = share.join("models/scout_v2");
        std::fs::create_dir_all(&model_dir).unwrap();
        std::fs::write(model_dir.join("scout_v2.sdf"), SDF).unwrap();

        register_package(root, "gazebo_ros").unwrap();
        let lib = root.join("lib/gazebo_ros");
        std::fs::create_dir_all(&lib).unwrap();
        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\n' \"$@\" > '{args}'\n\
             while [ $# -gt 0 ]; do\n\
               if [ \"$1\" = \"-file\" ]; then cat \"$2\" > '{sdf}'; fi\n\
               shift\n\
             done\n\
             exit {code}\n",
            args = root.join("spawn_args.txt").display(),
            sdf = root.join("spawned.sdf").display(),
            code = spawner_exit,
        );
        let exe = lib.join("spawn_entity.py");
        std::fs::write(&exe, script).unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn index(&self) -> AmentIndex {
        AmentIndex::new(vec![self.root().to_path_buf()])
    }

    fn recorded_args(&self) -> Vec<String> {
        std::fs::read_to_string(self.root().join("spawn_args.txt"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn spawned_sdf(&self) -> String {
        std::fs::read_to_string(self.root().join("spawned.sdf")).unwrap()
    }

    fn model_path(&self) -> PathBuf {
        self.root()
            .join("share/scout_gazebo_sim/models/scout_v2/scout_v2.sdf")
    }
}

fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn spawns_with_default_arguments() {
    let install = Install::new(0);
    let index = install.index();
    let ld = generate_launch_description(&index, &ScoutSpawnDefaults::default()).unwrap();

    let report = LaunchRunner::new(&index).execute(&ld, BTreeMap::new()).unwrap();
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.nodes.len(), 1);

    let recorded = install.recorded_args();
    assert_eq!(recorded.len(), 12);
    assert_eq!(&recorded[0..2], ["-entity", "scout_mini_robot"]);
    assert_eq!(recorded[2], "-file");
    assert_eq!(&recorded[4..], ["-x", "0.0", "-y", "0.0", "-z", "0.349", "-Y", "0.0"]);

    let spawned = install.spawned_sdf();
    assert!(!spawned.contains("/robot_namespace"));
    assert!(spawned.contains("<namespace>/scout_mini</namespace>"));
}

#[test]
fn spawns_namespaced_copy_and_leaves_model_untouched() {
    let install = Install::new(0);
    let index = install.index();
    let ld = generate_launch_description(&index, &ScoutSpawnDefaults::default()).unwrap();

    let report = LaunchRunner::new(&index)
        .execute(
            &ld,
            args(&[
                ("namespace", "robot42"),
                ("x_pose", "2.5"),
                ("y_pose", "-1.0"),
                ("yaw_pose", "1.57"),
            ]),
        )
        .unwrap();
    assert_eq!(report.exit_code(), 0);

    let recorded = install.recorded_args();
    assert_eq!(recorded[1], "robot42_robot");
    assert_ne!(Path::new(&recorded[3]), install.model_path());
    assert_eq!(&recorded[4..], ["-x", "2.5", "-y", "-1.0", "-z", "0.349", "-Y", "1.57"]);

    let spawned = install.spawned_sdf();
    assert!(!spawned.contains("/robot_namespace"));
    assert_eq!(spawned.matches("/robot42").count(), 2);
    assert_eq!(std::fs::read_to_string(install.model_path()).unwrap(), SDF);

    // materialized copy lives as long as the report
    let materialized = PathBuf::from(&recorded[3]);
    assert!(materialized.exists());
    drop(report);
    assert!(!materialized.exists());
}

#[test]
fn propagates_spawner_exit_code() {
    let install = Install::new(7);
    let index = install.index();
    let ld = generate_launch_description(&index, &ScoutSpawnDefaults::default()).unwrap();
    let report = LaunchRunner::new(&index).execute(&ld, BTreeMap::new()).unwrap();
    assert_eq!(report.exit_code(), 7);
}

#[test]
fn dry_run_resolves_without_spawning() {
    let install = Install::new(0);
    let index = install.index();
    let ld = generate_launch_description(&index, &ScoutSpawnDefaults::default()).unwrap();
    let report = LaunchRunner::new(&index)
        .dry_run(true)
        .execute(&ld, args(&[("namespace", "robot42")]))
        .unwrap();

    assert!(!install.root().join("spawn_args.txt").exists());
    let node = &report.nodes[0];
    assert!(node.result.is_none());
    let line = node.planned.command_line();
    assert!(line.ends_with("-x 0.0 -y 0.0 -z 0.349 -Y 0.0"));
    assert!(line.contains("-entity robot42_robot"));
    assert!(line.starts_with(&install.root().join("lib/gazebo_ros/spawn_entity.py").display().to_string()));
}

#[test]
fn invalid_pose_fails_before_spawning() {
    let install = Install::new(0);
    let index = install.index();
    let ld = generate_launch_description(&index, &ScoutSpawnDefaults::default()).unwrap();
    let err = LaunchRunner::new(&index)
        .execute(&ld, args(&[("yaw_pose", "north")]))
        .unwrap_err();
    assert!(matches!(err, LaunchError::InvalidArgument { ref name, .. } if name == "yaw_pose"));
    assert!(!install.root().join("spawn_args.txt").exists());
}

#[test]
fn missing_spawner_fails_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let share = register_package(dir.path(), "scout_gazebo_sim").unwrap();
    std::fs::create_dir_all(share.join("models/scout_v2")).unwrap();
    std::fs::write(share.join("models/scout_v2/scout_v2.sdf"), SDF).unwrap();
    let index = AmentIndex::new(vec![dir.path().to_path_buf()]);

    let ld = generate_launch_description(&index, &ScoutSpawnDefaults::default()).unwrap();
    match LaunchRunner::new(&index)
        .dry_run(true)
        .execute(&ld, BTreeMap::new())
    {
        // a real gazebo_ros install on PATH would satisfy the lookup
        Ok(report) => assert!(report.nodes[0].planned.program.ends_with("spawn_entity.py")),
        Err(err) => assert!(matches!(err, LaunchError::ExecutableNotFound { .. })),
    }
}
