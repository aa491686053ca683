//! Integration tests for background scans and deletions.

use duplicate_image_finder::core::control::CancellationToken;
use duplicate_image_finder::core::deleter::{Deleter, RetentionPolicy};
use duplicate_image_finder::core::finder::DuplicateFinder;
use duplicate_image_finder::core::worker::{spawn_delete, spawn_scan};
use duplicate_image_finder::error::ScanError;
use duplicate_image_finder::events::{DeleteEvent, Event, PipelineEvent, PipelinePhase, ScanEvent};
use duplicate_image_finder::DuplicateFinderError;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_image(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(20, 20, Rgb(color)).save(&path).unwrap();
    path
}

fn progress_values(events: &[Event]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Scan(ScanEvent::Progress(p)) => Some(p.fraction),
            _ => None,
        })
        .collect()
}

#[test]
fn background_scan_streams_progress_and_completion() {
    let temp_dir = TempDir::new().unwrap();
    write_image(temp_dir.path(), "a.png", [3, 3, 3]);
    write_image(temp_dir.path(), "b.png", [3, 3, 3]);
    write_image(temp_dir.path(), "c.png", [4, 4, 4]);

    let handle = spawn_scan(
        DuplicateFinder::default(),
        temp_dir.path().to_path_buf(),
        CancellationToken::new(),
    )
    .unwrap();
    let events: Vec<Event> = handle.events().iter().collect();
    let report = handle.join().unwrap();

    assert_eq!(report.groups.len(), 1);
    assert!(matches!(events.first(), Some(Event::Pipeline(PipelineEvent::Started))));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning
        })
    )));

    let progress = progress_values(&events);
    assert_eq!(progress.len(), 3);
    assert_eq!(progress.last().copied(), Some(1.0));

    match events.last() {
        Some(Event::Pipeline(PipelineEvent::Completed { summary })) => {
            assert_eq!(summary.total_files, 3);
            assert_eq!(summary.duplicate_groups, 1);
            assert_eq!(summary.duplicate_count, 1);
            assert_eq!(summary.diagnostics, 0);
        }
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn pre_cancelled_scan_reports_cancellation() {
    let temp_dir = TempDir::new().unwrap();
    write_image(temp_dir.path(), "a.png", [3, 3, 3]);
    write_image(temp_dir.path(), "b.png", [3, 3, 3]);
    let token = CancellationToken::new();
    token.cancel();

    let handle = spawn_scan(DuplicateFinder::default(), temp_dir.path().to_path_buf(), token).unwrap();
    let events: Vec<Event> = handle.events().iter().collect();
    let report = handle.join().unwrap();

    assert!(report.cancelled);
    assert!(report.groups.is_empty());
    assert!(progress_values(&events).is_empty());
    assert!(matches!(events.last(), Some(Event::Pipeline(PipelineEvent::Cancelled))));
}

#[test]
fn missing_root_surfaces_as_scan_error() {
    let handle = spawn_scan(
        DuplicateFinder::default(),
        PathBuf::from("/nonexistent/path/that/does/not/exist"),
        CancellationToken::new(),
    )
    .unwrap();
    let events: Vec<Event> = handle.events().iter().collect();

    assert!(matches!(
        handle.join(),
        Err(DuplicateFinderError::Scan(ScanError::DirectoryNotFound { .. }))
    ));
    assert!(matches!(events.last(), Some(Event::Pipeline(PipelineEvent::Error { .. }))));
}

#[test]
fn background_delete_reports_counts() {
    let temp_dir = TempDir::new().unwrap();
    let original = write_image(temp_dir.path(), "a_original.png", [8, 8, 8]);
    let copy = write_image(temp_dir.path(), "b_copy.png", [8, 8, 8]);
    let report = DuplicateFinder::default().scan_headless(temp_dir.path()).unwrap();

    let handle = spawn_delete(
        report.groups,
        RetentionPolicy::KeepOriginal,
        Deleter::default(),
        CancellationToken::new(),
    )
    .unwrap();
    let events: Vec<Event> = handle.events().iter().collect();
    let deletion = handle.join().unwrap();

    assert_eq!(deletion.deleted, vec![copy.clone()]);
    assert!(original.exists());
    assert!(!copy.exists());
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Delete(DeleteEvent::Started { planned: 1 }))));
    assert!(matches!(
        events.last(),
        Some(Event::Delete(DeleteEvent::Completed {
            deleted: 1,
            failed: 0,
            cancelled: false
        }))
    ));
}

#[test]
fn cancelled_delete_removes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = ["a.png", "b.png", "c.png"]
        .into_iter()
        .map(|name| write_image(temp_dir.path(), name, [2, 4, 6]))
        .collect();
    let report = DuplicateFinder::default().scan_headless(temp_dir.path()).unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let handle = spawn_delete(report.groups, RetentionPolicy::DeleteAll, Deleter::default(), token).unwrap();
    let deletion = handle.join().unwrap();

    assert!(deletion.cancelled);
    assert!(deletion.deleted.is_empty());
    assert!(paths.iter().all(|p| p.exists()));
}
