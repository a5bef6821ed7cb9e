mod test_utils;

use stepforge::{CaseRunner, DatasetSplit, Pipeline, PipelineSettings, RetrySettings};
use tempfile::TempDir;
use test_utils::{OfflineDriver, run_config};

fn pipeline(driver: OfflineDriver) -> anyhow::Result<Pipeline<OfflineDriver>> {
    let settings = PipelineSettings::builder()
        .decompose_batch_size(2_usize)
        .step_batch_size(3_usize)
        .input_rounds(1_usize)
        .items_per_round(3_usize)
        .build()?;
    Ok(Pipeline::new(driver, settings, RetrySettings::default()))
}

#[tokio::test]
async fn test_run_all_names_and_splits_cases() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = pipeline(OfflineDriver::new())?;
    let runner = CaseRunner::new(&pipeline, &run_config(dir.path(), 4, 2));

    let summary = runner.run_all("en").await?;

    assert!(summary.failed.is_empty());
    let cases: Vec<_> = summary.completed.iter().map(|r| r.case.as_str()).collect();
    assert_eq!(cases, vec!["en_0", "en_1", "en_2", "en_3"]);
    let splits: Vec<_> = summary.completed.iter().map(|r| r.split).collect();
    assert_eq!(
        splits,
        vec![
            DatasetSplit::Train,
            DatasetSplit::Test,
            DatasetSplit::Train,
            DatasetSplit::Test
        ]
    );

    assert!(dir.path().join("input/test/en_1.txt").exists());
    assert!(dir.path().join("input/train/en_2.txt").exists());
    for report in &summary.completed {
        assert_eq!(report.raw_items, 3);
        assert_eq!(report.empty_groups, 0);
        assert_eq!(report.placeholder_steps, 0);
        assert!(report.exports.summary.exists());
    }
    Ok(())
}

#[tokio::test]
async fn test_existing_input_is_reused() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = pipeline(OfflineDriver::new())?;
    let runner = CaseRunner::new(&pipeline, &run_config(dir.path(), 1, 4));

    let path = runner.input_path("en_0", DatasetSplit::Train);
    std::fs::create_dir_all(path.parent().unwrap())?;
    std::fs::write(&path, "\"Open 'https://a.example'\"")?;

    let report = runner.run_case("en_0", DatasetSplit::Train).await?;

    assert_eq!(report.raw_items, 1);
    // one decomposition call and one step call, no input generation
    assert_eq!(pipeline.driver().call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_unusable_replies_still_export_every_item() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = pipeline(OfflineDriver::new())?;
    let runner = CaseRunner::new(&pipeline, &run_config(dir.path(), 1, 4));

    let path = dir.path().join("poisoned.txt");
    std::fs::write(&path, "\"poison one\",\n\"poison two\",\n\"fine\"")?;

    let report = runner
        .process_file("poisoned", DatasetSplit::Train, &path)
        .await?;

    assert_eq!(report.raw_items, 3);
    assert_eq!(report.empty_groups, 2);
    let summary = std::fs::read_to_string(&report.exports.summary)?;
    assert!(summary.contains("poison two"));
    Ok(())
}

#[tokio::test]
async fn test_missing_input_fails_only_that_case() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = pipeline(OfflineDriver::new())?;
    let runner = CaseRunner::new(&pipeline, &run_config(dir.path(), 1, 4));

    let missing = dir.path().join("absent.txt");
    let err = runner
        .process_file("absent", DatasetSplit::Train, &missing)
        .await
        .unwrap_err();

    assert!(!err.is_fatal());
    Ok(())
}

#[tokio::test]
async fn test_exhaustion_ends_the_run() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pipeline = pipeline(OfflineDriver::with_budget(1))?;
    let runner = CaseRunner::new(&pipeline, &run_config(dir.path(), 3, 4));

    let err = runner.run_all("en").await.unwrap_err();

    assert!(err.is_fatal());
    assert!(!dir.path().join("output/en_0.summary.json").exists());
    Ok(())
}
