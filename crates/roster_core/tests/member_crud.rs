use roster_core::db::open_db_in_memory;
use roster_core::{
    CrudRepository, EntityValidationError, Member, RepoError, SqliteMemberRepository,
    SqliteTeamRepository, Team,
};
use rusqlite::ErrorCode;
use uuid::Uuid;

#[test]
fn save_and_find_by_id_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let member = Member::named("memberA");
    let saved_id = repo.save(&member).unwrap();

    let found = repo.find_by_id(saved_id).unwrap().unwrap();
    assert_eq!(found.id, member.id);
    assert_eq!(found.username, member.username);
    assert_eq!(found, member);
}

#[test]
fn basic_crud() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let member1 = Member::named("member1");
    let member2 = Member::named("member2");
    repo.save(&member1).unwrap();
    repo.save(&member2).unwrap();

    assert_eq!(repo.find_by_id(member1.id).unwrap(), Some(member1.clone()));
    assert_eq!(repo.find_by_id(member2.id).unwrap(), Some(member2.clone()));

    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(repo.count().unwrap(), 2);

    repo.delete(&member1).unwrap();
    repo.delete(&member2).unwrap();
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn find_all_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let names = ["charlie", "alice", "bob"];
    for name in names {
        repo.save(&Member::named(name)).unwrap();
    }

    let loaded: Vec<_> = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|member| member.username)
        .collect();
    assert_eq!(loaded, names);
}

#[test]
fn save_existing_member_updates_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let mut member = Member::new("draft", 10);
    repo.save(&member).unwrap();

    member.username = "final".to_string();
    member.age = 11;
    repo.save(&member).unwrap();

    assert_eq!(repo.count().unwrap(), 1);
    assert_eq!(repo.find_by_id(member.id).unwrap(), Some(member));
}

#[test]
fn exists_by_id_tracks_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let member = Member::new("AAA", 10);
    assert!(!repo.exists_by_id(member.id).unwrap());

    repo.save(&member).unwrap();
    assert!(repo.exists_by_id(member.id).unwrap());

    repo.delete_by_id(member.id).unwrap();
    assert!(!repo.exists_by_id(member.id).unwrap());
}

#[test]
fn delete_absent_entity_is_noop_but_delete_by_id_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let ghost = Member::new("ghost", 1);
    repo.delete(&ghost).unwrap();

    let err = repo.delete_by_id(ghost.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == ghost.id));
}

#[test]
fn delete_all_empties_table() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    repo.save_all(&[Member::new("a", 1), Member::new("b", 2)])
        .unwrap();
    assert_eq!(repo.count().unwrap(), 2);

    repo.delete_all().unwrap();
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn find_by_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    assert_eq!(repo.find_by_id(Uuid::new_v4()).unwrap(), None);
}

#[test]
fn invalid_member_is_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let err = repo.save(&Member::new("", 10)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EntityValidationError::BlankField { .. })
    ));
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn save_all_is_atomic() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let batch = [Member::new("ok", 1), Member::new(" ", 2)];
    assert!(repo.save_all(&batch).is_err());
    assert_eq!(repo.count().unwrap(), 0);

    let ids = repo
        .save_all(&[Member::new("one", 1), Member::new("two", 2)])
        .unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn member_round_trips_team_reference() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let team = Team::new("teamA");
    teams.save(&team).unwrap();
    let member = Member::in_team("AAA", 10, &team);
    repo.save(&member).unwrap();

    let loaded = repo.find_by_id(member.id).unwrap().unwrap();
    assert_eq!(loaded.team_id, Some(team.id));
}

#[test]
fn unknown_team_reference_surfaces_native_constraint_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let member = Member::in_team("AAA", 10, &Team::new("never saved"));
    let err = repo.save(&member).unwrap_err();

    let native = err.as_sqlite().expect("store failure should be passed through");
    assert_eq!(
        native.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    );
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn corrupted_row_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    conn.execute(
        "INSERT INTO members (id, username, age) VALUES ('not-a-uuid', 'AAA', 10);",
        [],
    )
    .unwrap();

    let err = repo.find_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("not-a-uuid")));
}
