use pinboard_core::{
    Board, BoardRef, CallObserver, CatalogError, CatalogResult, CatalogService, CatalogStore,
    InMemoryCatalog, MemoryDecorator, MemoryProbe, Metric, Observation, Pin, TimingDecorator,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingObserver {
    seen: Mutex<Vec<Observation>>,
}

impl RecordingObserver {
    fn operations(&self) -> Vec<&'static str> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|observation| observation.operation)
            .collect()
    }

    fn observations(&self) -> Vec<Observation> {
        self.seen.lock().unwrap().clone()
    }
}

impl CallObserver for RecordingObserver {
    fn observe(&self, observation: &Observation) {
        self.seen.lock().unwrap().push(*observation);
    }
}

/// Probe whose reading grows by `step` bytes on every call.
struct SteppingProbe {
    next: AtomicU64,
    step: u64,
}

impl MemoryProbe for SteppingProbe {
    fn resident_bytes(&self) -> Option<u64> {
        Some(self.next.fetch_add(self.step, Ordering::SeqCst))
    }
}

struct BlindProbe;

impl MemoryProbe for BlindProbe {
    fn resident_bytes(&self) -> Option<u64> {
        None
    }
}

/// Store whose every operation fails as if a lock were poisoned.
struct PoisonedStore;

const POISONED: CatalogError = CatalogError::LockPoisoned("test store");

impl CatalogStore for PoisonedStore {
    fn get_all_boards(&self) -> CatalogResult<Vec<BoardRef>> {
        Err(POISONED)
    }
    fn add_board(&self, _board: &BoardRef) -> CatalogResult<()> {
        Err(POISONED)
    }
    fn delete_board(&self, _board: &BoardRef) -> CatalogResult<()> {
        Err(POISONED)
    }
    fn get_all_pins(&self) -> CatalogResult<Vec<Pin>> {
        Err(POISONED)
    }
    fn add_pin(&self, _board: &BoardRef, _pin: Pin) -> CatalogResult<()> {
        Err(POISONED)
    }
    fn delete_pin(&self, _pin: &Pin) -> CatalogResult<()> {
        Err(POISONED)
    }
    fn get_board_by_name(&self, _name: &str) -> CatalogResult<Option<BoardRef>> {
        Err(POISONED)
    }
    fn get_boards_by_category(&self, _category: &str) -> CatalogResult<Vec<BoardRef>> {
        Err(POISONED)
    }
    fn get_pin_by_name(&self, _name: &str) -> CatalogResult<Option<Pin>> {
        Err(POISONED)
    }
    fn get_pins_by_category(&self, _category: &str) -> CatalogResult<Vec<Pin>> {
        Err(POISONED)
    }
}

fn pin(id: &str, name: &str, category: &str) -> Pin {
    Pin::new(id, "U01", name, "", "").with_category(category)
}

/// Applies the same call sequence to `store` and returns every query result
/// as comparable pin ids / board names.
fn run_script(store: &dyn CatalogStore) -> Vec<Vec<String>> {
    let food = Board::new_ref(1, "U01", "Food", "");
    let travel = Board::new_ref(2, "U01", "Travel", "");
    let outsider = Board::new_ref(3, "U01", "Outside", "");
    food.add_category_board("eat").unwrap();

    store.add_board(&food).unwrap();
    store.add_board(&travel).unwrap();
    store.add_board(&food).unwrap();
    store.add_pin(&food, pin("P001", "P1", "food")).unwrap();
    store.add_pin(&travel, pin("P002", "P2", "travel")).unwrap();
    store.add_pin(&travel, pin("P003", "P3", "food")).unwrap();
    store.add_pin(&outsider, pin("P004", "P4", "food")).unwrap();
    store.delete_pin(&pin("P003", "P3", "food")).unwrap();
    store.delete_board(&outsider).unwrap();

    let pin_ids = |pins: Vec<Pin>| -> Vec<String> {
        pins.iter().map(|p| p.id().to_string()).collect()
    };
    let board_names = |boards: Vec<BoardRef>| -> Vec<String> {
        boards.iter().map(|b| b.name().to_string()).collect()
    };

    vec![
        board_names(store.get_all_boards().unwrap()),
        pin_ids(store.get_all_pins().unwrap()),
        board_names(store.get_board_by_name("Travel").unwrap().into_iter().collect()),
        board_names(store.get_boards_by_category("eat").unwrap()),
        pin_ids(store.get_pin_by_name("P2").unwrap().into_iter().collect()),
        pin_ids(store.get_pins_by_category("food").unwrap()),
    ]
}

#[test]
fn decorated_stores_return_same_results_as_base() {
    let observer: Arc<dyn CallObserver> = Arc::new(RecordingObserver::default());
    let probe: Arc<dyn MemoryProbe> = Arc::new(BlindProbe);

    let base = InMemoryCatalog::new();
    let timed = TimingDecorator::with_observer(InMemoryCatalog::new(), Arc::clone(&observer));
    let memory_then_timing = MemoryDecorator::with_parts(
        TimingDecorator::with_observer(InMemoryCatalog::new(), Arc::clone(&observer)),
        Arc::clone(&probe),
        Arc::clone(&observer),
    );
    let timing_then_memory = TimingDecorator::with_observer(
        MemoryDecorator::with_parts(InMemoryCatalog::new(), probe, Arc::clone(&observer)),
        observer,
    );

    let expected = run_script(&base);
    assert_eq!(
        expected,
        vec![
            vec!["Food".to_string(), "Travel".to_string()],
            vec!["P001".to_string(), "P002".to_string()],
            vec!["Travel".to_string()],
            vec!["Food".to_string()],
            vec!["P002".to_string()],
            vec!["P001".to_string()],
        ]
    );
    assert_eq!(run_script(&timed), expected);
    assert_eq!(run_script(&memory_then_timing), expected);
    assert_eq!(run_script(&timing_then_memory), expected);
}

#[test]
fn every_call_emits_one_observation_per_layer() {
    let recorder = Arc::new(RecordingObserver::default());
    let probe = Arc::new(SteppingProbe {
        next: AtomicU64::new(4096),
        step: 1024,
    });
    let service = CatalogService::instrumented_with(probe, recorder.clone());

    let board = Board::new_ref(1, "U01", "Food", "");
    service.add_board(&board).unwrap();
    service.get_all_pins().unwrap();

    // Timing is recorded inside the memory window, so it reports first.
    assert_eq!(
        recorder.operations(),
        vec!["add_board", "add_board", "get_all_pins", "get_all_pins"]
    );

    let observations = recorder.observations();
    assert!(matches!(observations[0].metric, Metric::Elapsed(_)));
    assert_eq!(observations[1].metric, Metric::ResidentDelta(Some(1024)));
    assert!(matches!(observations[2].metric, Metric::Elapsed(_)));
    assert_eq!(observations[3].metric, Metric::ResidentDelta(Some(1024)));
}

#[test]
fn unreadable_memory_reports_missing_delta() {
    let recorder = Arc::new(RecordingObserver::default());
    let store = MemoryDecorator::with_parts(
        InMemoryCatalog::new(),
        Arc::new(BlindProbe),
        recorder.clone(),
    );

    assert!(store.get_all_boards().unwrap().is_empty());

    assert_eq!(
        recorder.observations(),
        vec![Observation {
            operation: "get_all_boards",
            metric: Metric::ResidentDelta(None),
        }]
    );
}

#[test]
fn failures_propagate_unchanged_without_observations() {
    let recorder = Arc::new(RecordingObserver::default());
    let store = MemoryDecorator::with_parts(
        TimingDecorator::with_observer(PoisonedStore, recorder.clone()),
        Arc::new(BlindProbe),
        recorder.clone(),
    );
    let board = Board::new_ref(1, "U01", "Food", "");
    let sample = pin("P001", "P1", "food");

    assert_eq!(store.get_all_boards().unwrap_err(), POISONED);
    assert_eq!(store.add_board(&board).unwrap_err(), POISONED);
    assert_eq!(store.delete_board(&board).unwrap_err(), POISONED);
    assert_eq!(store.get_all_pins().unwrap_err(), POISONED);
    assert_eq!(store.add_pin(&board, sample.clone()).unwrap_err(), POISONED);
    assert_eq!(store.delete_pin(&sample).unwrap_err(), POISONED);
    assert_eq!(store.get_board_by_name("Food").unwrap_err(), POISONED);
    assert_eq!(store.get_boards_by_category("food").unwrap_err(), POISONED);
    assert_eq!(store.get_pin_by_name("P1").unwrap_err(), POISONED);
    assert_eq!(store.get_pins_by_category("food").unwrap_err(), POISONED);

    assert!(recorder.observations().is_empty());
}
