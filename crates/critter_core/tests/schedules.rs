use chrono::{NaiveDate, Weekday};
use critter_core::db::open_db_in_memory;
use critter_core::{
    CreateScheduleRequest, Customer, CustomerService, EmployeeService, EmployeeSkill, ErrorKind,
    NewCustomer, NewEmployee, NewPet, Pet, PetService, PetType, Schedule, ScheduleRepository,
    ScheduleService, SqliteCustomerRepository, SqliteEmployeeRepository, SqlitePetRepository,
    SqliteScheduleRepository,
};
use rusqlite::Connection;
use std::collections::{BTreeSet, HashSet};

type Schedules<'conn> = ScheduleService<
    SqliteScheduleRepository<'conn>,
    SqliteEmployeeRepository<'conn>,
    SqlitePetRepository<'conn>,
    SqliteCustomerRepository<'conn>,
>;

fn schedule_service(conn: &Connection) -> Schedules<'_> {
    ScheduleService::new(
        SqliteScheduleRepository::try_new(conn).unwrap(),
        SqliteEmployeeRepository::try_new(conn).unwrap(),
        SqlitePetRepository::try_new(conn).unwrap(),
        SqliteCustomerRepository::try_new(conn).unwrap(),
    )
}

fn add_customer(conn: &Connection, name: &str) -> Customer {
    CustomerService::new(SqliteCustomerRepository::try_new(conn).unwrap())
        .create_customer(&NewCustomer::new(name, "555-0100"))
        .unwrap()
}

fn add_pet(conn: &Connection, owner: &Customer, name: &str) -> Pet {
    PetService::new(
        SqlitePetRepository::try_new(conn).unwrap(),
        SqliteCustomerRepository::try_new(conn).unwrap(),
    )
    .create_pet(&NewPet::new(PetType::Dog, name, owner.id))
    .unwrap()
}

fn add_employee(conn: &Connection, name: &str) -> i64 {
    EmployeeService::new(SqliteEmployeeRepository::try_new(conn).unwrap())
        .create_employee(&NewEmployee::new(
            name,
            [EmployeeSkill::Feeding, EmployeeSkill::Walking],
            [Weekday::Mon],
        ))
        .unwrap()
        .id
}

fn request(employee_ids: Vec<i64>, pet_ids: Vec<i64>) -> CreateScheduleRequest {
    CreateScheduleRequest {
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        activities: vec![EmployeeSkill::Feeding],
        employee_ids,
        pet_ids,
    }
}

fn schedule_ids(schedules: &[Schedule]) -> Vec<i64> {
    schedules.iter().map(|schedule| schedule.id).collect()
}

#[test]
fn create_schedule_keeps_activity_order_and_sets() {
    let conn = open_db_in_memory().unwrap();
    let owner = add_customer(&conn, "Ada");
    let rex = add_pet(&conn, &owner, "Rex");
    let sam = add_employee(&conn, "Sam");
    let schedules = schedule_service(&conn);

    let created = schedules
        .create_schedule(&CreateScheduleRequest {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            activities: vec![
                EmployeeSkill::Walking,
                EmployeeSkill::Feeding,
                EmployeeSkill::Walking,
            ],
            employee_ids: vec![sam, sam],
            pet_ids: vec![rex.id],
        })
        .unwrap();

    let listed = schedules.list_schedules().unwrap();
    assert_eq!(listed.len(), 1);
    let stored = &listed[0];
    assert_eq!(stored.id, created.id);
    assert_eq!(stored.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(
        stored.activities,
        vec![
            EmployeeSkill::Walking,
            EmployeeSkill::Feeding,
            EmployeeSkill::Walking
        ]
    );
    assert_eq!(stored.employee_ids, BTreeSet::from([sam]));
    assert_eq!(stored.pet_ids, BTreeSet::from([rex.id]));
}

#[test]
fn unknown_ids_are_dropped_without_error() {
    let conn = open_db_in_memory().unwrap();
    let owner = add_customer(&conn, "Ada");
    let rex = add_pet(&conn, &owner, "Rex");
    let sam = add_employee(&conn, "Sam");

    let created = schedule_service(&conn)
        .create_schedule(&request(vec![sam, sam + 100], vec![rex.id, rex.id + 100]))
        .unwrap();

    assert_eq!(created.employee_ids, BTreeSet::from([sam]));
    assert_eq!(created.pet_ids, BTreeSet::from([rex.id]));
}

#[test]
fn schedule_with_only_unknown_ids_is_still_created() {
    let conn = open_db_in_memory().unwrap();
    let schedules = schedule_service(&conn);

    let created = schedules.create_schedule(&request(vec![5], vec![6])).unwrap();
    assert!(created.employee_ids.is_empty());
    assert!(created.pet_ids.is_empty());
    assert!(created.is_empty());
    assert_eq!(schedule_ids(&schedules.list_schedules().unwrap()), vec![created.id]);
}

#[test]
fn lookups_by_pet_and_employee() {
    let conn = open_db_in_memory().unwrap();
    let owner = add_customer(&conn, "Ada");
    let rex = add_pet(&conn, &owner, "Rex");
    let tom = add_pet(&conn, &owner, "Tom");
    let sam = add_employee(&conn, "Sam");
    let kim = add_employee(&conn, "Kim");
    let schedules = schedule_service(&conn);

    let first = schedules
        .create_schedule(&request(vec![sam], vec![rex.id]))
        .unwrap();
    let second = schedules
        .create_schedule(&request(vec![sam, kim], vec![rex.id, tom.id]))
        .unwrap();

    assert_eq!(
        schedule_ids(&schedules.schedules_for_pet(rex.id).unwrap()),
        vec![first.id, second.id]
    );
    assert_eq!(
        schedule_ids(&schedules.schedules_for_pet(tom.id).unwrap()),
        vec![second.id]
    );
    assert_eq!(
        schedule_ids(&schedules.schedules_for_employee(sam).unwrap()),
        vec![first.id, second.id]
    );
    assert_eq!(
        schedule_ids(&schedules.schedules_for_employee(kim).unwrap()),
        vec![second.id]
    );

    for schedule in schedules.schedules_for_pet(tom.id).unwrap() {
        assert!(schedule.includes_pet(tom.id));
        assert!(schedule.includes_employee(kim));
    }
    assert!(!first.includes_pet(tom.id));
    assert!(!first.includes_employee(kim));
    assert!(!first.is_empty());
}

#[test]
fn customer_lookup_is_union_of_pet_lookups_without_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let ada = add_customer(&conn, "Ada");
    let bob = add_customer(&conn, "Bob");
    let rex = add_pet(&conn, &ada, "Rex");
    let tom = add_pet(&conn, &ada, "Tom");
    let fido = add_pet(&conn, &bob, "Fido");
    let sam = add_employee(&conn, "Sam");
    let schedules = schedule_service(&conn);

    schedules
        .create_schedule(&request(vec![sam], vec![rex.id]))
        .unwrap();
    // Both of Ada's pets on one schedule must not produce a duplicate.
    schedules
        .create_schedule(&request(vec![sam], vec![rex.id, tom.id]))
        .unwrap();
    schedules
        .create_schedule(&request(vec![sam], vec![fido.id]))
        .unwrap();

    let for_ada = schedules.schedules_for_customer(ada.id).unwrap();
    let mut union: Vec<i64> = [rex.id, tom.id]
        .iter()
        .flat_map(|pet_id| schedule_ids(&schedules.schedules_for_pet(*pet_id).unwrap()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    union.sort_unstable();
    assert_eq!(schedule_ids(&for_ada), union);
    assert_eq!(for_ada.len(), 2);

    let for_bob: HashSet<i64> = schedule_ids(&schedules.schedules_for_customer(bob.id).unwrap())
        .into_iter()
        .collect();
    assert_eq!(for_bob.len(), 1);
    assert!(for_ada.iter().all(|schedule| !for_bob.contains(&schedule.id)));
}

#[test]
fn existing_roots_without_schedules_yield_empty_lists() {
    let conn = open_db_in_memory().unwrap();
    let owner = add_customer(&conn, "Ada");
    let rex = add_pet(&conn, &owner, "Rex");
    let sam = add_employee(&conn, "Sam");
    let petless = add_customer(&conn, "Bob");
    let schedules = schedule_service(&conn);

    assert!(schedules.schedules_for_pet(rex.id).unwrap().is_empty());
    assert!(schedules.schedules_for_employee(sam).unwrap().is_empty());
    assert!(schedules.schedules_for_customer(owner.id).unwrap().is_empty());
    assert!(schedules
        .schedules_for_customer(petless.id)
        .unwrap()
        .is_empty());
}

#[test]
fn missing_roots_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let schedules = schedule_service(&conn);

    for err in [
        schedules.schedules_for_pet(11).unwrap_err(),
        schedules.schedules_for_employee(12).unwrap_err(),
        schedules.schedules_for_customer(13).unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

#[test]
fn very_long_unknown_id_lists_are_dropped_not_rejected() {
    let conn = open_db_in_memory().unwrap();
    let schedules = schedule_service(&conn);

    let created = schedules
        .create_schedule(&request((1..=40_000).collect(), (1..=40_000).collect()))
        .unwrap();

    assert!(created.employee_ids.is_empty());
    assert!(created.pet_ids.is_empty());
}

#[test]
fn repeated_ids_collapse_to_one_member() {
    let conn = open_db_in_memory().unwrap();
    let owner = add_customer(&conn, "Ada");
    let rex = add_pet(&conn, &owner, "Rex");
    let sam = add_employee(&conn, "Sam");

    let created = schedule_service(&conn)
        .create_schedule(&request(vec![sam; 40_000], vec![rex.id; 40_000]))
        .unwrap();

    assert_eq!(created.employee_ids, BTreeSet::from([sam]));
    assert_eq!(created.pet_ids, BTreeSet::from([rex.id]));
}

#[test]
fn schedule_matched_by_pets_in_different_batches_is_listed_once() {
    let conn = open_db_in_memory().unwrap();
    let owner = add_customer(&conn, "Ada");
    let near = add_pet(&conn, &owner, "Rex");
    // Far enough from `near` that the two ids land in separate lookup batches.
    conn.execute(
        "INSERT INTO pets (id, type, name, customer_id) VALUES (5000, 'cat', 'Tom', ?1);",
        [owner.id],
    )
    .unwrap();
    let sam = add_employee(&conn, "Sam");
    let schedules = schedule_service(&conn);

    let shared = schedules
        .create_schedule(&request(vec![sam], vec![near.id, 5000]))
        .unwrap();
    let far_only = schedules
        .create_schedule(&request(vec![sam], vec![5000]))
        .unwrap();
    assert_eq!(shared.pet_ids, BTreeSet::from([near.id, 5000]));

    let repo = SqliteScheduleRepository::try_new(&conn).unwrap();
    let wanted: Vec<i64> = (1..=6000).rev().collect();
    assert_eq!(
        schedule_ids(&repo.list_by_pets(&wanted).unwrap()),
        vec![shared.id, far_only.id]
    );
    assert_eq!(
        schedule_ids(&schedules.schedules_for_customer(owner.id).unwrap()),
        vec![shared.id, far_only.id]
    );
}
