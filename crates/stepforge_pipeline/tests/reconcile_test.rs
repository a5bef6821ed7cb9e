mod test_utils;

use serde_json::json;
use stepforge_interface::GenerationOutcome;
use stepforge_pipeline::{
    BatchOrchestrator, RetrySettings, StageExecutor, StageReconciler, StepStage, regroup,
};
use test_utils::{FnDriver, enumerated_items};

/// Answers a steps prompt with one `click` step per instruction, selector set
/// to the instruction text.
fn echo_steps(prompt: &str) -> GenerationOutcome {
    let steps: Vec<_> = enumerated_items(prompt)
        .into_iter()
        .map(|instruction| json!({"action": "click", "selector": instruction, "value": ""}))
        .collect();
    GenerationOutcome::Success(serde_json::Value::from(steps).to_string())
}

fn groups(layout: &[&[&str]]) -> Vec<Vec<String>> {
    layout
        .iter()
        .map(|group| group.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[tokio::test]
async fn test_steps_are_regrouped_like_subtasks() -> anyhow::Result<()> {
    let executor = StageExecutor::new(FnDriver::new(echo_steps), RetrySettings::default());
    let task_list = groups(&[&["a1", "a2"], &[], &["c1", "c2", "c3"]]);

    let (table, trace) = StageReconciler::new(BatchOrchestrator::new(&executor))
        .reconcile(&StepStage::default(), &task_list, 2)
        .await?;

    let lengths: Vec<usize> = table.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![2, 0, 3]);

    let selectors: Vec<Vec<&str>> = table
        .iter()
        .map(|group| group.iter().map(|step| step.selector.as_str()).collect())
        .collect();
    assert_eq!(selectors, vec![vec!["a1", "a2"], vec![], vec!["c1", "c2", "c3"]]);

    assert_eq!(trace.len(), 5);
    assert_eq!(trace[4].0, "c3");
    assert_eq!(executor.driver().call_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_failed_step_batch_keeps_group_shape() -> anyhow::Result<()> {
    let executor = StageExecutor::new(
        FnDriver::new(|prompt: &str| {
            if prompt.contains("\"broken\"") {
                GenerationOutcome::Success("oops".to_string())
            } else {
                echo_steps(prompt)
            }
        }),
        RetrySettings::default(),
    );
    let task_list = groups(&[&["ok"], &["broken", "also"]]);

    let (table, _) = StageReconciler::new(BatchOrchestrator::new(&executor))
        .reconcile(&StepStage::default(), &task_list, 1)
        .await?;

    assert_eq!(table[0][0].selector, "ok");
    assert!(table[1][0].is_placeholder());
    assert_eq!(table[1][1].selector, "also");
    Ok(())
}

#[tokio::test]
async fn test_all_empty_groups_make_no_calls() -> anyhow::Result<()> {
    let executor = StageExecutor::new(FnDriver::new(echo_steps), RetrySettings::default());
    let task_list = groups(&[&[], &[]]);

    let (table, trace) = StageReconciler::new(BatchOrchestrator::new(&executor))
        .reconcile(&StepStage::default(), &task_list, 20)
        .await?;

    assert_eq!(table.len(), 2);
    assert!(table.iter().all(Vec::is_empty));
    assert!(trace.is_empty());
    assert_eq!(executor.driver().call_count(), 0);
    Ok(())
}

#[test]
fn test_regroup_rejects_mismatched_lengths() {
    assert!(regroup(vec![1, 2, 3], &[2, 2]).is_err());
}
