use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

use navmenu_core::{SectionEvent, SectionId};
use navmenu_engine::{MenuBuild, MenuEngineBuilder, Presenter, RenderInstruction, SectionLoader};
use navmenu_error::{Error, ErrorPolicy, Severity};
use navmenu_io::{pump_events, section_file_name, SectionEvents, SectionLoaderHandle, SectionStore};
use navmenu_test_utils::{init_test_tracing, sample_sections, sid};
use tokio::time::timeout;
use tracing::Level;

const WAIT: Duration = Duration::from_secs(5);

fn memory_loader() -> (SectionLoaderHandle, SectionEvents) {
    init_test_tracing(Level::DEBUG);
    SectionLoaderHandle::builder()
        .with_store(SectionStore::memory(sample_sections()))
        .build()
        .unwrap()
}

fn write_menu_dir(dir: &Path) {
    for (id, root) in sample_sections() {
        let json = serde_json::to_vec(&*root).unwrap();
        std::fs::write(dir.join(section_file_name(id)), json).unwrap();
    }
}

async fn next(events: &mut SectionEvents) -> SectionEvent {
    timeout(WAIT, events.recv())
        .await
        .expect("timed out waiting for a section event")
        .expect("loader stopped")
}

#[derive(Default)]
struct LastBuild {
    builds: Vec<MenuBuild>,
}

impl Presenter for LastBuild {
    fn present(&mut self, build: &MenuBuild) {
        self.builds.push(build.clone());
    }
}

#[derive(Default)]
struct Collect {
    seen: RefCell<Vec<(Severity, String)>>,
}

impl ErrorPolicy for Collect {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, error: &Error) {
        self.seen.borrow_mut().push((self.classify(error), error.to_string()));
    }
}

#[tokio::test]
async fn loads_from_memory_store() {
    let (mut loader, mut events) = memory_loader();
    loader.request(SectionId::ROOT).unwrap();

    match next(&mut events).await {
        SectionEvent::Loaded { id, root } => {
            assert_eq!(id, SectionId::ROOT);
            assert_eq!(root.inline_members().map(<[_]>::len), Some(3));
        }
        other => panic!("unexpected event {other:?}"),
    }
    loader.shutdown();
}

#[tokio::test]
async fn duplicate_requests_are_fetched_once_until_released() {
    let (mut loader, mut events) = memory_loader();
    loader.request(sid(2)).unwrap();
    loader.request(sid(2)).unwrap();

    assert_eq!(next(&mut events).await.id(), sid(2));
    assert!(timeout(Duration::from_millis(200), events.recv()).await.is_err());

    // still delivered, still dropped
    loader.request(sid(2)).unwrap();
    assert!(timeout(Duration::from_millis(200), events.recv()).await.is_err());

    loader.release(sid(2));
    loader.request(sid(2)).unwrap();
    assert_eq!(next(&mut events).await.id(), sid(2));
    loader.shutdown();
}

#[tokio::test]
async fn failed_fetch_can_be_retried() {
    let (loader, mut events) = memory_loader();
    loader.try_request(sid(9)).unwrap();

    match next(&mut events).await {
        SectionEvent::Failed { id, message } => {
            assert_eq!(id, sid(9));
            assert!(message.contains("not in the store"), "{message}");
        }
        other => panic!("unexpected event {other:?}"),
    }

    loader.try_request(sid(9)).unwrap();
    assert!(matches!(next(&mut events).await, SectionEvent::Failed { .. }));
    loader.shutdown();
}

#[tokio::test]
async fn shutdown_closes_both_channels() {
    let (loader, mut events) = memory_loader();
    loader.shutdown();

    assert!(timeout(WAIT, events.recv()).await.unwrap().is_none());
    assert!(loader.is_closed());
    let err: Error = loader.try_request(SectionId::ROOT).unwrap_err().into();
    assert!(matches!(err, Error::Internal(_)));
}

#[tokio::test]
async fn engine_navigates_through_directory_sections() {
    init_test_tracing(Level::DEBUG);
    let dir = tempfile::tempdir().unwrap();
    write_menu_dir(dir.path());

    let (loader, mut events) = SectionLoaderHandle::builder()
        .with_menu_dir(dir.path())
        .build()
        .unwrap();
    let mut engine = MenuEngineBuilder::default()
        .with_max_sections(10)
        .build(loader, LastBuild::default());
    let policy = Collect::default();

    let first = engine
        .go_to_hash_path("File:engine/menu/deep/leaf.rs")
        .unwrap()
        .unwrap();
    assert_eq!(first.need_to_load, Some(SectionId::ROOT));

    for _ in 0..8 {
        let event = next(&mut events).await;
        let _ = engine.apply_event(event);
        pump_events(&mut engine, &mut events, &policy);
        if engine.target().is_none() {
            break;
        }
    }

    let last = engine.presenter().builds.last().unwrap();
    assert!(last.completed);
    assert_eq!(
        last.instructions.last(),
        Some(&RenderInstruction::SelectedFile { name: "leaf.rs".into() })
    );
    assert_eq!(engine.cache().len(), 4);
    assert!(policy.seen.borrow().is_empty());
    engine.loader().shutdown();
}

#[tokio::test]
async fn pump_reports_failures_through_policy() {
    init_test_tracing(Level::DEBUG);
    let dir = tempfile::tempdir().unwrap();
    // only the root section exists
    let sections = sample_sections();
    std::fs::write(
        dir.path().join("files.json"),
        serde_json::to_vec(&*sections[&SectionId::ROOT]).unwrap(),
    )
    .unwrap();

    let (loader, mut events) = SectionLoaderHandle::builder()
        .with_menu_dir(dir.path())
        .build()
        .unwrap();
    let mut engine = MenuEngineBuilder::default().build(loader, LastBuild::default());
    let policy = Collect::default();

    engine.go_to_offsets([0, 0]).unwrap();
    let event = next(&mut events).await;
    engine.apply_event(event).unwrap();

    // section 2 is requested next and fails
    let event = next(&mut events).await;
    assert_eq!(event.id(), sid(2));
    let _ = engine.apply_event(event).map_err(|e| policy.emit(&e));

    let seen = policy.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, Severity::Warning);
    assert!(seen[0].1.contains("Section 2 failed to load"), "{}", seen[0].1);
    assert!(!engine.cache().contains(sid(2)));

    drop(seen);
    engine.loader().shutdown();
    assert!(timeout(WAIT, events.recv()).await.unwrap().is_none());
    // nothing to apply; the closed channel is reported
    assert_eq!(pump_events(&mut engine, &mut events, &policy), 0);
    assert_eq!(policy.seen.borrow().len(), 2);
}

#[tokio::test]
async fn request_to_stopped_loader_leaves_nothing_pending() {
    let (loader, mut events) = memory_loader();
    loader.shutdown();
    assert!(timeout(WAIT, events.recv()).await.unwrap().is_none());

    let mut engine = MenuEngineBuilder::default().build(loader, LastBuild::default());
    let err = engine.go_to_offsets([2]).unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
    // the partial menu was still shown
    assert_eq!(engine.presenter().builds.len(), 1);
    assert!(!engine.cache().contains(SectionId::ROOT));

    // the target is kept and the request is attempted again
    assert!(engine.update().is_err());
    assert!(engine.cache().is_empty());
}
