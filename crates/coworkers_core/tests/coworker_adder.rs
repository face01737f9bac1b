use coworkers_core::db::open_db_in_memory;
use coworkers_core::{
    AddCoworkerError, Company, CompanyAttributes, CoworkerAdder, CoworkerParams, MemberAttributes,
    MemberValidationError, Repository, Space, SqliteCompanyRepository, SqliteMemberRepository,
};
use rusqlite::Connection;

fn factory() -> Space {
    Space::new(1, "Factory")
}

fn john() -> MemberAttributes {
    MemberAttributes::new("John")
        .with_phone_no("1234")
        .with_email("random@example.com")
}

fn params(member: MemberAttributes, company: CompanyAttributes) -> CoworkerParams {
    CoworkerParams::new(member, company).unwrap()
}

fn counts(conn: &Connection) -> (usize, usize) {
    let companies = SqliteCompanyRepository::try_new(conn).unwrap();
    let members = SqliteMemberRepository::try_new(conn).unwrap();
    (companies.count().unwrap(), members.count().unwrap())
}

fn seed_company(conn: &Connection, name: &str, space: &Space) -> Company {
    let companies = SqliteCompanyRepository::try_new(conn).unwrap();
    companies.save(&Company::new(name, space.id)).unwrap()
}

#[test]
fn new_company_is_created_and_member_becomes_boss() {
    let conn = open_db_in_memory().unwrap();
    let space = factory();
    let adder = CoworkerAdder::with_sqlite(
        params(john(), CompanyAttributes::new("GB")),
        &space,
        &conn,
    )
    .unwrap();

    let added = adder.add().unwrap();

    assert!(added.company_created);
    assert_eq!(counts(&conn), (1, 1));

    let companies = SqliteCompanyRepository::try_new(&conn).unwrap();
    let members = SqliteMemberRepository::try_new(&conn).unwrap();
    let member = members.last().unwrap().unwrap();
    assert!(member.is_boss);
    assert_eq!(member.space_id, space.id);
    assert_eq!(member.company_id, added.company.id);

    let company = companies
        .find_by_id(member.company_id.unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(company.name, "GB");
    assert_eq!(company.space_id, space.id);
    assert_eq!(added.member, member);
}

#[test]
fn existing_company_is_reused_without_new_boss() {
    let conn = open_db_in_memory().unwrap();
    let space = factory();
    let existing = seed_company(&conn, "Group Buddies", &space);
    let adder = CoworkerAdder::with_sqlite(
        params(
            john(),
            CompanyAttributes::new("Group Buddies").with_space_id(space.id),
        ),
        &space,
        &conn,
    )
    .unwrap();

    let added = adder.add().unwrap();

    assert!(!added.company_created);
    assert_eq!(counts(&conn), (1, 1));
    assert_eq!(added.company, existing);

    let members = SqliteMemberRepository::try_new(&conn).unwrap();
    let member = members.last().unwrap().unwrap();
    assert!(!member.is_boss);
    assert_eq!(member.company_id, existing.id);
}

#[test]
fn invalid_member_persists_nothing_for_new_company() {
    let conn = open_db_in_memory().unwrap();
    let space = factory();
    let adder = CoworkerAdder::with_sqlite(
        params(
            MemberAttributes::new("Mr. Invalid"),
            CompanyAttributes::new("GB"),
        ),
        &space,
        &conn,
    )
    .unwrap();

    let err = adder.add().unwrap_err();

    assert!(matches!(
        err,
        AddCoworkerError::InvalidMember(MemberValidationError::MissingPhoneNo)
    ));
    assert!(err.is_validation());
    assert_eq!(counts(&conn), (0, 0));
}

#[test]
fn blank_member_name_persists_nothing_for_existing_company() {
    let conn = open_db_in_memory().unwrap();
    let space = factory();
    seed_company(&conn, "Group Buddies", &space);
    let blank_name = MemberAttributes::new("   ")
        .with_phone_no("1234")
        .with_email("random@example.com");
    let adder = CoworkerAdder::with_sqlite(
        params(blank_name, CompanyAttributes::new("Group Buddies")),
        &space,
        &conn,
    )
    .unwrap();

    let err = adder.add().unwrap_err();

    assert!(matches!(
        err,
        AddCoworkerError::InvalidMember(MemberValidationError::BlankName)
    ));
    assert_eq!(counts(&conn), (1, 0));
}

#[test]
fn same_name_in_another_space_creates_new_company() {
    let conn = open_db_in_memory().unwrap();
    let space = factory();
    let other_space = Space::new(2, "Cowork X");
    let elsewhere = seed_company(&conn, "Random name", &other_space);
    let adder = CoworkerAdder::with_sqlite(
        params(
            john(),
            CompanyAttributes::new("Random name").with_space_id(other_space.id),
        ),
        &space,
        &conn,
    )
    .unwrap();

    let added = adder.add().unwrap();

    assert!(added.company_created);
    assert_ne!(added.company.id, elsewhere.id);
    assert_eq!(added.company.space_id, space.id);
    assert!(added.member.is_boss);
    assert_eq!(counts(&conn), (2, 1));
}

#[test]
fn repeated_add_creates_second_member_and_reuses_company() {
    let conn = open_db_in_memory().unwrap();
    let space = factory();
    let adder = CoworkerAdder::with_sqlite(
        params(john(), CompanyAttributes::new("GB")),
        &space,
        &conn,
    )
    .unwrap();

    let first = adder.add().unwrap();
    let second = adder.add().unwrap();

    assert_eq!(counts(&conn), (1, 2));
    assert!(first.company_created);
    assert!(!second.company_created);
    assert_eq!(first.company.id, second.company.id);
    assert_ne!(first.member.id, second.member.id);

    let members = SqliteMemberRepository::try_new(&conn).unwrap();
    let all = members.all().unwrap();
    assert!(all[0].is_boss);
    assert!(!all[1].is_boss);
    assert_eq!(members.first().unwrap().unwrap(), first.member);
}

#[test]
fn adder_reports_storage_failures_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let space = factory();
    let adder = CoworkerAdder::with_sqlite(
        params(john(), CompanyAttributes::new("GB")),
        &space,
        &conn,
    )
    .unwrap();
    conn.execute_batch("DROP TABLE members;").unwrap();

    let err = adder.add().unwrap_err();

    assert!(matches!(err, AddCoworkerError::Repo(_)));
    assert!(!err.is_validation());
    let companies = SqliteCompanyRepository::try_new(&conn).unwrap();
    assert_eq!(companies.count().unwrap(), 0);
}

#[test]
fn adder_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let space = factory();

    let result = CoworkerAdder::with_sqlite(
        params(john(), CompanyAttributes::new("GB")),
        &space,
        &conn,
    );

    assert!(result.is_err());
}
