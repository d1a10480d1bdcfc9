use peopledb_core::{
    ErrorKind, Person, PersonService, ServiceError, SqlitePersonStore, StoreConfig,
};
use std::sync::{Arc, Barrier};
use std::thread;

fn service() -> PersonService<SqlitePersonStore> {
    PersonService::new(SqlitePersonStore::open_in_memory().unwrap())
}

#[test]
fn create_get_duplicate_delete_scenario() {
    let service = service();

    let created = service
        .save(&Person::new("John Doe", "john@example.com"))
        .unwrap();
    assert_eq!(created, Person::with_id(1, "John Doe", "john@example.com"));

    let err = service
        .save(&Person::new("Johnny", "john@example.com"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(service.get_by_id(1).unwrap(), created);

    service.delete(1).unwrap();
    assert!(matches!(service.get_by_id(1), Err(ServiceError::NotFound(1))));
}

#[test]
fn round_trip_returns_input_with_assigned_id() {
    let service = service();
    let input = Person::new("Ada Lovelace", "ada@example.com");

    let saved = service.save(&input).unwrap();
    let loaded = service.get_by_id(saved.id.unwrap()).unwrap();

    assert_eq!(loaded, Person { id: saved.id, ..input });
}

#[test]
fn saving_returned_record_again_is_idempotent() {
    let service = service();

    let first = service
        .save(&Person::new("Ada Lovelace", "ada@example.com"))
        .unwrap();
    let second = service.save(&first).unwrap();

    assert_eq!(first, second);
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn update_to_another_owners_email_is_rejected() {
    let service = service();
    let john = service
        .save(&Person::new("John Doe", "john@example.com"))
        .unwrap();
    service
        .save(&Person::new("Jane Doe", "jane@example.com"))
        .unwrap();

    let err = service
        .save(&Person::with_id(john.id.unwrap(), "John Doe", "jane@example.com"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(service.get_by_id(john.id.unwrap()).unwrap(), john);
}

#[test]
fn update_keeping_own_email_succeeds() {
    let service = service();
    let john = service
        .save(&Person::new("John Doe", "john@example.com"))
        .unwrap();

    let updated = service
        .save(&Person::with_id(john.id.unwrap(), "John Updated", "john@example.com"))
        .unwrap();

    assert_eq!(updated.full_name, "John Updated");
    assert_eq!(service.get_all().unwrap(), vec![updated]);
}

#[test]
fn update_of_missing_id_is_not_found_and_creates_nothing() {
    let service = service();

    let err = service
        .save(&Person::with_id(42, "Ghost", "ghost@example.com"))
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(42)));
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn blank_fields_are_rejected_without_touching_storage() {
    let service = service();
    service
        .save(&Person::new("John Doe", "john@example.com"))
        .unwrap();

    for candidate in [
        Person::new("", "x@example.com"),
        Person::new("   ", "x@example.com"),
        Person::new("X", ""),
        Person::new("X", " \t "),
    ] {
        let err = service.save(&candidate).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{candidate:?}");
    }

    assert_eq!(service.count().unwrap(), 1);
    assert!(service.get_by_id(1).is_ok());
    assert!(service.get_by_id(2).is_err());
}

#[test]
fn non_positive_ids_are_invalid_arguments() {
    let service = service();

    assert_eq!(
        service.get_by_id(0).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        service.delete(-1).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        service
            .save(&Person::with_id(0, "X", "x@example.com"))
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn delete_is_terminal() {
    let service = service();
    let saved = service
        .save(&Person::new("John Doe", "john@example.com"))
        .unwrap();
    let id = saved.id.unwrap();

    service.delete(id).unwrap();

    assert!(matches!(service.get_by_id(id), Err(ServiceError::NotFound(_))));
    assert!(matches!(service.delete(id), Err(ServiceError::NotFound(_))));
}

#[test]
fn round_trip_keeps_surrounding_whitespace() {
    let service = service();
    let input = Person::new(" John Doe ", " john@example.com ");

    let saved = service.save(&input).unwrap();
    let loaded = service.get_by_id(saved.id.unwrap()).unwrap();

    assert_eq!(saved, Person { id: saved.id, ..input.clone() });
    assert_eq!(loaded, Person { id: saved.id, ..input });
}

#[test]
fn email_padding_is_ignored_by_uniqueness_check() {
    let service = service();
    service
        .save(&Person::new("John Doe", " john@example.com "))
        .unwrap();

    let err = service
        .save(&Person::new("Other", "john@example.com\t"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    service
        .save(&Person::new("Other", "John@example.com"))
        .expect("email comparison is case-sensitive");
}

#[test]
fn update_keeping_own_email_with_different_padding_succeeds() {
    let service = service();
    let john = service
        .save(&Person::new("John Doe", "john@example.com"))
        .unwrap();

    let updated = service
        .save(&Person::with_id(john.id.unwrap(), "John Doe", "  john@example.com"))
        .unwrap();

    assert_eq!(updated.email, "  john@example.com");
}

#[test]
fn update_of_missing_id_to_taken_email_is_not_found() {
    let service = service();
    service
        .save(&Person::new("Ada", "a@example.com"))
        .unwrap();

    let err = service
        .save(&Person::with_id(9, "B", "a@example.com"))
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(9)));
}

#[test]
fn get_all_lists_in_ascending_id_order() {
    let service = service();
    assert!(service.get_all().unwrap().is_empty());

    for (name, email) in [("C", "c@example.com"), ("A", "a@example.com"), ("B", "b@example.com")] {
        service.save(&Person::new(name, email)).unwrap();
    }

    let ids: Vec<_> = service
        .get_all()
        .unwrap()
        .into_iter()
        .map(|person| person.id.unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn concurrent_creates_with_same_email_admit_one_winner() {
    const WORKERS: usize = 8;
    let service = Arc::new(service());
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.save(&Person::new(format!("Worker {worker}"), "race@example.com"))
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let winners = results.iter().filter(|result| result.is_ok()).count();

    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .all(|err| err.kind() == ErrorKind::InvalidArgument));
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn two_stores_on_one_file_still_enforce_uniqueness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.db");
    let left = PersonService::new(SqlitePersonStore::open(StoreConfig::file(&path)).unwrap());
    let right = PersonService::new(SqlitePersonStore::open(StoreConfig::file(&path)).unwrap());

    left.save(&Person::new("Left", "shared@example.com")).unwrap();
    let err = right
        .save(&Person::new("Right", "shared@example.com"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(right.count().unwrap(), 1);
}

#[test]
fn service_works_over_a_borrowed_store() {
    let store = SqlitePersonStore::open_in_memory().unwrap();
    let writer = PersonService::new(&store);
    let reader = PersonService::new(&store);

    let saved = writer
        .save(&Person::new("John Doe", "john@example.com"))
        .unwrap();

    assert_eq!(reader.get_by_id(saved.id.unwrap()).unwrap(), saved);
}
