use stepforge::{
    DatasetSplit, Exporter, PipelineOutput, StepRecord, SummaryRow, summary_rows,
};
use tempfile::TempDir;

fn step(action: &str) -> StepRecord {
    StepRecord {
        action: action.to_string(),
        ..StepRecord::default()
    }
}

fn sample_output() -> PipelineOutput {
    PipelineOutput {
        task_list: vec![vec!["open".to_string(), "verify".to_string()], vec![]],
        task_trace: vec![
            ("Open and verify".to_string(), vec!["open".to_string(), "verify".to_string()]),
            ("Unclear".to_string(), vec![]),
        ],
        step_groups: vec![vec![step("goto"), step("verify")], vec![]],
        step_trace: vec![
            ("open".to_string(), step("goto")),
            ("verify".to_string(), step("verify")),
        ],
    }
}

#[test]
fn test_summary_rows_pair_tasks_with_steps() {
    let rows = summary_rows(DatasetSplit::Test, &sample_output());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].main_task, "Open and verify");
    assert_eq!(rows[0].steps.len(), 2);
    assert_eq!(rows[1].split, DatasetSplit::Test);
    assert!(rows[1].steps.is_empty());
}

#[test]
fn test_missing_step_group_exports_empty_list() {
    let mut output = sample_output();
    output.step_groups.truncate(1);
    let rows = summary_rows(DatasetSplit::Train, &output);
    assert_eq!(rows.len(), 2);
    assert!(rows[1].steps.is_empty());
}

#[test]
fn test_export_writes_three_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let exporter = Exporter::new(dir.path().join("out"));

    let paths = exporter.export("en_0", DatasetSplit::Train, &sample_output())?;

    assert!(paths.task.ends_with("en_0.task.json"));
    let tasks: Vec<Vec<String>> = serde_json::from_str(&std::fs::read_to_string(&paths.task)?)?;
    assert_eq!(tasks[0], vec!["open", "verify"]);

    let steps: Vec<Vec<StepRecord>> =
        serde_json::from_str(&std::fs::read_to_string(&paths.step)?)?;
    assert_eq!(steps[0][0].action, "goto");

    let summary: Vec<SummaryRow> =
        serde_json::from_str(&std::fs::read_to_string(&paths.summary)?)?;
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[1].main_task, "Unclear");
    Ok(())
}

#[test]
fn test_summary_uses_lowercase_split() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let paths = Exporter::new(dir.path()).export("c", DatasetSplit::Test, &sample_output())?;
    let text = std::fs::read_to_string(paths.summary)?;
    assert!(text.contains("\"split\": \"test\""));
    Ok(())
}
