//! End-to-end runs against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives both the access
//! layer and the manager over real HTTP through `UreqTransport`.

use std::time::Duration;

use bar_core::{
    ApiError, BarApi, BarDraft, BarField, BarManager, ClientConfig, UreqTransport,
    CONNECTIVITY_MESSAGE,
};

/// Start the mock server on a background thread and return its base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            bar_mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn api(base_url: &str) -> BarApi<UreqTransport> {
    BarApi::from_config(&ClientConfig::new(base_url).with_timeout(Duration::from_secs(5)))
}

#[test]
fn crud_lifecycle() {
    let api = api(&spawn_server());

    // Step 1: list should be empty.
    assert!(api.list().unwrap().is_empty(), "expected empty list");

    // Step 2: create from the default draft.
    let draft = BarDraft::default();
    let created = api.create(&draft).unwrap();
    assert_eq!(created.to_draft(), draft);

    // Step 3: get it back.
    assert_eq!(api.get(created.id).unwrap(), created);

    // Step 4: full replacement.
    let mut changed = created.clone();
    changed.recipe_id = "RECIPE2".to_string();
    changed.bar_count = None;
    let updated = api.update(changed.id, &changed).unwrap();
    assert_eq!(updated, changed);

    // Step 5: list holds one item.
    assert_eq!(api.list().unwrap(), vec![updated]);

    // Step 6: delete, then again for a server-reported error.
    api.remove(created.id).unwrap();
    let err = api.remove(created.id).unwrap_err();
    match err {
        ApiError::Server { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Bar not found"));
        }
        other => panic!("expected server error, got {other:?}"),
    }

    // Step 7: list is empty again.
    assert!(api.list().unwrap().is_empty(), "expected empty list after delete");
}

#[test]
fn manager_round_trip() {
    let mut manager = BarManager::new(api(&spawn_server()));
    manager.refresh();
    assert!(manager.bars().is_empty());

    manager.open_for_create();
    manager.edit_field(BarField::BarCount, "7");
    manager.submit();
    assert!(!manager.is_open());
    assert_eq!(manager.error(), None);
    assert_eq!(manager.bars().len(), 1);
    assert_eq!(manager.bars()[0].bar_count, Some(7));

    let record = manager.bars()[0].clone();
    manager.open_for_edit(&record);
    manager.edit_field(BarField::MachineId, "MACHINE9");
    manager.submit();
    assert_eq!(manager.bars()[0].machine_id, "MACHINE9");
    assert_eq!(manager.bars()[0].id, record.id);

    manager.delete(record.id, &mut |_: &str| true);
    assert!(manager.bars().is_empty());
    assert_eq!(manager.error(), None);
}

#[test]
fn unreachable_server_sets_connectivity_banner() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut manager = BarManager::new(api(&format!("http://127.0.0.1:{port}")));

    manager.open_for_create();
    manager.submit();

    assert!(manager.is_open());
    assert!(manager.bars().is_empty());
    assert_eq!(
        manager.error(),
        Some(format!("Failed to create data: {CONNECTIVITY_MESSAGE}").as_str())
    );
}
