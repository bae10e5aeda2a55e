//! Session isolation tests
//!
//! Each interactive session owns its controller and ledger. Sessions can be
//! moved to worker threads but never share state.

use std::thread;
use tempfile::tempdir;
use brixscope::*;

fn model() -> LinearBrixModel {
    LinearBrixModel::new("shared", [0.2, 0.1, -0.05, 0.3], 2.0)
}

#[test]
fn test_sessions_do_not_share_history() {
    let mut first = ExplorerSession::new(ExplorerConfig::default(), model()).unwrap();
    let mut second = ExplorerSession::new(ExplorerConfig::default(), model()).unwrap();

    first.set_min_temp(22.0);
    first.set_min_temp(23.0);
    second.evaluate();

    assert_ne!(first.id(), second.id());
    assert_eq!(first.ledger().len(), 2);
    assert_eq!(second.ledger().len(), 1);
    assert_eq!(second.current_inputs(), ClimateInputs::new(15.0, 20.0, 25.0, 12.0));

    first.reset_history();
    assert_eq!(second.history().len(), 1);
}

#[test]
fn test_sessions_on_worker_threads() {
    let dir = tempdir().unwrap();
    let model_path = dir.path().join("brix_model.json");
    model().save(&model_path).unwrap();

    // One session per thread, each loading the artifact independently
    let mut handles = vec![];
    for thread_id in 0..5 {
        let model_path = model_path.clone();
        let export_path = dir.path().join(format!("history_{}.json", thread_id));
        let handle = thread::spawn(move || {
            let mut session =
                ExplorerSession::open(ExplorerConfig::with_model_path(model_path)).unwrap();

            for i in 0..10 {
                session.set_min_temp(thread_id as f64 + i as f64 * 0.5);
                session.refresh();
            }

            session.export_to_json(&export_path).unwrap();
            session.stats()
        });
        handles.push(handle);
    }

    for handle in handles {
        let stats = handle.join().unwrap();
        assert_eq!(stats.stored_records, 20);
        assert_eq!(stats.distinct_records, 10);
    }
}

#[test]
fn test_cloned_session_diverges() {
    let mut original = ExplorerSession::new(ExplorerConfig::default(), model()).unwrap();
    original.evaluate();

    let mut copy = original.clone();
    copy.set_max_temp(33.0);

    assert_eq!(original.ledger().len(), 1);
    assert_eq!(copy.ledger().len(), 2);
    assert_eq!(original.controller().max(), 25.0);
}
