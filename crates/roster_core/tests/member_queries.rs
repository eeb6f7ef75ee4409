use roster_core::db::open_db_in_memory;
use roster_core::{
    CrudRepository, Member, MemberRepository, MemberRepositoryCustom, RepoError,
    SqliteMemberRepository, SqliteTeamRepository, Team,
};

#[test]
fn find_by_username_and_age_greater_than() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let m1 = Member::new("AAA", 10);
    let m2 = Member::new("AAA", 20);
    repo.save(&m1).unwrap();
    repo.save(&m2).unwrap();

    let result = repo
        .find_by_username_and_age_greater_than("AAA", 15)
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].username, "AAA");
    assert_eq!(result[0].age, 20);
    assert_eq!(result[0].id, m2.id);
}

#[test]
fn age_threshold_is_strict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    repo.save(&Member::new("AAA", 15)).unwrap();
    repo.save(&Member::new("BBB", 30)).unwrap();

    assert!(repo
        .find_by_username_and_age_greater_than("AAA", 15)
        .unwrap()
        .is_empty());
}

#[test]
fn find_top3_takes_first_three_by_username() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    for name in ["member5", "member3", "member4", "member1", "member2"] {
        repo.save(&Member::new(name, 10)).unwrap();
    }

    let top: Vec<_> = repo
        .find_top3()
        .unwrap()
        .into_iter()
        .map(|member| member.username)
        .collect();
    assert_eq!(top, ["member1", "member2", "member3"]);
}

#[test]
fn find_user_matches_username_and_age() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let m1 = Member::new("AAA", 10);
    let m2 = Member::new("BBB", 10);
    repo.save(&m1).unwrap();
    repo.save(&m2).unwrap();

    let result = repo.find_user("AAA", 10).unwrap();
    assert_eq!(result, vec![m1]);
    assert!(repo.find_user("AAA", 11).unwrap().is_empty());
}

#[test]
fn find_username_list_projects_usernames() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    repo.save(&Member::new("AAA", 10)).unwrap();
    repo.save(&Member::new("BBB", 10)).unwrap();

    assert_eq!(repo.find_username_list().unwrap(), ["AAA", "BBB"]);
}

#[test]
fn find_member_dto_joins_team_name() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let team_a = Team::new("teamA");
    teams.save(&team_a).unwrap();

    let m1 = Member::in_team("AAA", 10, &team_a);
    repo.save(&m1).unwrap();
    repo.save(&Member::new("no team", 10)).unwrap();

    let dtos = repo.find_member_dto().unwrap();
    assert_eq!(dtos.len(), 1);
    assert_eq!(dtos[0].id, m1.id);
    assert_eq!(dtos[0].username, "AAA");
    assert_eq!(dtos[0].team_name, "teamA");
}

#[test]
fn find_by_names_uses_collection_parameter() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    repo.save(&Member::new("AAA", 10)).unwrap();
    repo.save(&Member::new("BBB", 10)).unwrap();
    repo.save(&Member::new("CCC", 10)).unwrap();

    let names = vec!["AAA".to_string(), "BBB".to_string()];
    let result: Vec<_> = repo
        .find_by_names(&names)
        .unwrap()
        .into_iter()
        .map(|member| member.username)
        .collect();
    assert_eq!(result, ["AAA", "BBB"]);

    assert!(repo.find_by_names(&[]).unwrap().is_empty());
}

#[test]
fn return_types_for_username_lookups() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let m1 = Member::new("AAA", 10);
    repo.save(&m1).unwrap();
    repo.save(&Member::new("BBB", 10)).unwrap();

    assert_eq!(repo.find_list_by_username("AAA").unwrap(), vec![m1.clone()]);
    assert_eq!(repo.find_member_by_username("AAA").unwrap(), Some(m1));
    assert_eq!(repo.find_member_by_username("23AAA").unwrap(), None);
    assert_eq!(repo.find_optional_by_username("dfdf").unwrap(), None);
    assert!(repo.find_list_by_username("dfdf").unwrap().is_empty());
}

#[test]
fn single_result_lookup_fails_on_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    repo.save(&Member::new("AAA", 10)).unwrap();
    repo.save(&Member::new("AAA", 20)).unwrap();

    let err = repo.find_optional_by_username("AAA").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NonUniqueResult {
            query: "find_optional_by_username",
            count: 2
        }
    ));
    assert!(matches!(
        repo.find_member_by_username("AAA"),
        Err(RepoError::NonUniqueResult { count: 2, .. })
    ));
}

#[test]
fn find_by_team_returns_only_team_members() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::try_new(&conn).unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let team_a = Team::new("teamA");
    let team_b = Team::new("teamB");
    teams.save_all(&[team_a.clone(), team_b.clone()]).unwrap();

    let a1 = Member::in_team("a1", 10, &team_a);
    let b1 = Member::in_team("b1", 10, &team_b);
    let a2 = Member::in_team("a2", 10, &team_a);
    repo.save_all(&[a1.clone(), b1, a2.clone()]).unwrap();

    assert_eq!(repo.find_by_team(team_a.id).unwrap(), vec![a1, a2]);
}

#[test]
fn bulk_age_plus_updates_threshold_and_above() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let young = Member::new("member1", 10);
    let edge = Member::new("member2", 19);
    let older = Member::new("member3", 20);
    let oldest = Member::new("member4", 21);
    repo.save_all(&[young.clone(), edge.clone(), older.clone(), oldest.clone()])
        .unwrap();

    assert_eq!(repo.bulk_age_plus(20).unwrap(), 2);

    let age_of = |member: &Member| repo.find_by_id(member.id).unwrap().unwrap().age;
    assert_eq!(age_of(&young), 10);
    assert_eq!(age_of(&edge), 19);
    assert_eq!(age_of(&older), 21);
    assert_eq!(age_of(&oldest), 22);
}

#[test]
fn bulk_age_plus_skips_members_at_max_age() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::try_default(&conn).unwrap();

    let oldest = Member::new("old", u32::MAX);
    let young = Member::new("AAA", 10);
    repo.save_all(&[oldest.clone(), young.clone()]).unwrap();

    assert_eq!(repo.bulk_age_plus(0).unwrap(), 1);

    assert_eq!(repo.find_all().unwrap().len(), 2);
    assert_eq!(repo.find_member_custom().unwrap().len(), 2);
    assert_eq!(repo.find_by_id(oldest.id).unwrap().unwrap().age, u32::MAX);
    assert_eq!(repo.find_by_id(young.id).unwrap().unwrap().age, 11);
}
