//! End-to-end scenarios of the standard pipeline against a scripted runner

mod common;

use ci_pipeline::prelude::*;
use common::{ScriptedRunner, quiet_context, workspace};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const BUILD: &str = "cargo build --verbose --all";
const TEST: &str = "cargo test --verbose --all";
const INSTALL: &str = "npm install";
const SUB_TEST: &str = "npm test";

fn run(
    runner: ScriptedRunner,
    with_subproject: bool,
) -> (
    PipelineResult,
    LocalExecutor<ScriptedRunner>,
    ExecutionContext,
    tempfile::TempDir,
) {
    let root = workspace(with_subproject);
    let executor = LocalExecutor::with_runner(runner);
    let mut context = quiet_context(root.path());

    let result = executor.execute(&standard_pipeline(&Toolchains::default()), &mut context);
    (result, executor, context, root)
}

fn numbered_pipeline(steps: &[String]) -> Pipeline {
    let stages = steps
        .iter()
        .map(|step| Stage::new(step.clone(), vec![Step::shell(step.clone())]))
        .collect();

    Pipeline::builder().stages(stages).build().unwrap()
}

#[test]
fn scenario_a_all_green() {
    let (result, executor, context, root) = run(ScriptedRunner::new(), true);

    assert_eq!(result, Ok(StageResult::Success));
    assert_eq!(
        executor.runner().commands(),
        vec![BUILD, TEST, INSTALL, SUB_TEST]
    );
    assert_eq!(context.started_stages(), ci_pipeline::STAGE_NAMES.to_vec());
    assert_eq!(context.cwd, root.path().join("test"));
}

#[test]
fn scenario_b_build_fails() {
    let (result, executor, context, root) = run(ScriptedRunner::new().exit_with(BUILD, 2), true);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(executor.runner().commands(), vec![BUILD]);
    assert_eq!(
        context.stage_results,
        vec![("Build".to_string(), StageResult::Failure)]
    );
    assert_eq!(context.cwd, root.path());
}

#[test]
fn scenario_c_subproject_tests_fail() {
    let (result, executor, context, _root) =
        run(ScriptedRunner::new().exit_with(SUB_TEST, 1), true);

    assert_eq!(
        result,
        Err(PipelineError::CommandFailed {
            stage: "Test sub-project".to_string(),
            command: SUB_TEST.to_string(),
            code: 1,
        })
    );
    assert_eq!(
        executor.runner().commands(),
        vec![BUILD, TEST, INSTALL, SUB_TEST]
    );
    assert_eq!(context.stage_results.len(), 5);
}

#[test]
fn scenario_d_missing_subproject() {
    let (result, executor, context, root) = run(ScriptedRunner::new(), false);

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::DirectoryChange { ref path, .. } if path == "test"
    ));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(executor.runner().commands(), vec![BUILD, TEST]);
    assert_eq!(
        context.get_stage_result("Enter sub-project"),
        Some(&StageResult::Failure)
    );
    assert_eq!(context.cwd, root.path());
}

#[test]
fn scenario_e_unset_variable_in_subproject_dir() {
    let toolchains = Toolchains {
        subproject_dir: "${SUBPROJECT_DIR}".to_string(),
        ..Toolchains::default()
    };
    let root = workspace(true);
    let executor = LocalExecutor::with_runner(ScriptedRunner::new());
    let mut context = quiet_context(root.path());

    let err = executor
        .execute(&standard_pipeline(&toolchains), &mut context)
        .unwrap_err();

    assert_eq!(
        err,
        PipelineError::UndefinedVariable {
            name: "SUBPROJECT_DIR".to_string()
        }
    );
    assert_ne!(err.exit_code(), 0);
    assert_eq!(executor.runner().commands(), vec![BUILD, TEST]);
    assert_eq!(context.cwd, root.path());
}

#[test]
fn directory_change_applies_to_later_stages_only() {
    let (result, executor, _context, root) = run(ScriptedRunner::new(), true);
    assert!(result.is_ok());

    let cwds: Vec<_> = executor
        .runner()
        .calls()
        .into_iter()
        .map(|c| c.cwd)
        .collect();
    let sub = root.path().join("test");
    assert_eq!(
        cwds,
        vec![
            root.path().to_path_buf(),
            root.path().to_path_buf(),
            sub.clone(),
            sub,
        ]
    );
}

proptest! {
    /// Fail-fast and exit-code propagation over arbitrary command outcomes
    #[test]
    fn first_failure_decides(
        codes in proptest::collection::vec(prop_oneof![4 => Just(0i32), 1 => 1i32..=255], 1..8)
    ) {
        let steps: Vec<String> = (0..codes.len()).map(|i| format!("step-{i}")).collect();
        let mut runner = ScriptedRunner::new();
        for (step, code) in steps.iter().zip(&codes) {
            runner = runner.exit_with(step, *code);
        }
        let executor = LocalExecutor::with_runner(runner);
        let mut context = quiet_context(std::path::Path::new("/"));

        let result = executor.execute(&numbered_pipeline(&steps), &mut context);

        match codes.iter().position(|c| *c != 0) {
            Some(first) => {
                prop_assert_eq!(result.unwrap_err().exit_code(), codes[first]);
                prop_assert_eq!(executor.runner().commands(), steps[..=first].to_vec());
                prop_assert_eq!(context.stage_results.len(), first + 1);
            }
            None => {
                prop_assert_eq!(result, Ok(StageResult::Success));
                prop_assert_eq!(executor.runner().commands(), steps.clone());
            }
        }
    }
}
