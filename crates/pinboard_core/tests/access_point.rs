use pinboard_core::{
    Board, BoardRecord, CatalogService, InstrumentedCatalog, NewBoard, NewPin, Pin,
};
use std::sync::Arc;

fn new_board(id: i64, name: &str, categories: &[&str]) -> NewBoard {
    NewBoard {
        id,
        user_id: "U01".to_string(),
        name: name.to_string(),
        description: format!("{name} board"),
        categories: categories.iter().map(|tag| tag.to_string()).collect(),
    }
}

fn new_pin(id: &str, name: &str, categories: &[&str]) -> NewPin {
    NewPin {
        id: id.to_string(),
        user_id: "U01".to_string(),
        name: name.to_string(),
        description: String::new(),
        url: format!("https://pins.example/{id}"),
        categories: categories.iter().map(|tag| tag.to_string()).collect(),
    }
}

fn seeded() -> CatalogService<InstrumentedCatalog> {
    let service = CatalogService::instrumented();
    let food = service.create_board(&new_board(1, "Food", &["eat"])).unwrap();
    let travel = service.create_board(&new_board(2, "Travel", &[])).unwrap();
    service
        .create_pin(&food, &new_pin("P001", "P1", &["food"]))
        .unwrap();
    service
        .create_pin(&travel, &new_pin("P002", "P2", &["travel"]))
        .unwrap();
    service
}

#[test]
fn food_travel_scenario() {
    let service = seeded();

    let ids: Vec<String> = service
        .get_all_pins()
        .unwrap()
        .iter()
        .map(|pin| pin.id().to_string())
        .collect();
    assert_eq!(ids, vec!["P001", "P002"]);

    let found = service.get_pin_by_name("P2").unwrap().expect("full scan finds P2");
    assert_eq!(found.id(), "P002");
    assert_eq!(service.get_pins_by_category("travel").unwrap(), vec![found]);
    assert_eq!(service.get_boards_by_category("eat").unwrap().len(), 1);
    assert_eq!(
        service.get_board_by_name("Travel").unwrap().unwrap().id(),
        2
    );
}

#[test]
fn create_pin_on_foreign_board_is_ignored() {
    let service = seeded();
    let foreign = Board::new_ref(9, "U01", "Foreign", "");

    let pin = service
        .create_pin(&foreign, &new_pin("P003", "P3", &[]))
        .unwrap();

    assert_eq!(pin.id(), "P003");
    assert!(foreign.get_all_pins().unwrap().is_empty());
    assert!(service.find_pin_by_id("P003").unwrap().is_none());
}

#[test]
fn delete_pin_by_id_removes_from_owner_only() {
    let service = seeded();

    assert!(service.delete_pin_by_id("P002").unwrap());
    assert!(!service.delete_pin_by_id("P002").unwrap());

    let travel = service.find_board_by_id(2).unwrap().unwrap();
    assert!(travel.get_all_pins().unwrap().is_empty());
    let food = service.find_board_by_id(1).unwrap().unwrap();
    assert_eq!(food.get_all_pins().unwrap().len(), 1);
}

#[test]
fn delete_board_by_id_removes_every_match() {
    let service = seeded();
    service.create_board(&new_board(2, "Travel copy", &[])).unwrap();

    assert_eq!(service.delete_board_by_id(2).unwrap(), 2);
    assert_eq!(service.delete_board_by_id(2).unwrap(), 0);

    let names: Vec<String> = service
        .get_all_boards()
        .unwrap()
        .iter()
        .map(|board| board.name().to_string())
        .collect();
    assert_eq!(names, vec!["Food"]);
}

#[test]
fn next_ids_follow_catalog_contents() {
    let service = seeded();
    assert_eq!(service.next_board_id().unwrap(), 3);
    assert_eq!(service.next_pin_id().unwrap(), "P003");
}

#[test]
fn hydrate_adds_every_record_through_the_chain() {
    let service = CatalogService::instrumented();
    let records = vec![
        BoardRecord {
            id: 1,
            user_id: "U01".to_string(),
            name: "Food".to_string(),
            description: String::new(),
            pins: vec![Pin::new("P001", "U01", "P1", "", "").with_category("food")],
            categories: vec!["eat".to_string()],
        },
        BoardRecord {
            id: 2,
            user_id: "U02".to_string(),
            name: "Travel".to_string(),
            description: String::new(),
            pins: Vec::new(),
            categories: Vec::new(),
        },
    ];

    assert_eq!(service.hydrate(&records).unwrap(), 2);
    assert_eq!(service.get_all_boards().unwrap().len(), 2);
    assert_eq!(service.get_pins_by_category("food").unwrap().len(), 1);
}

#[test]
fn shared_service_serves_concurrent_callers() {
    let service = Arc::new(seeded());
    let food = service.find_board_by_id(1).unwrap().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let service = Arc::clone(&service);
            let food = Arc::clone(&food);
            std::thread::spawn(move || {
                for n in 0..10 {
                    let id = format!("T{worker}{n}");
                    service
                        .create_pin(&food, &new_pin(&id, &id, &["bulk"]))
                        .unwrap();
                    food.add_category_board(&format!("tag-{worker}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.get_pins_by_category("bulk").unwrap().len(), 40);
    // "eat" plus one tag per worker; repeats fold into the existing entry.
    assert_eq!(food.categories().unwrap().len(), 5);
}
