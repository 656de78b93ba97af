use collabmatch_core::db::{open_db_in_memory, seed_demo_data};
use collabmatch_core::{
    find_matches, NewUser, RepoError, SqliteCollabService, SqliteUserRepository, UserId,
    UserRepository,
};
use rusqlite::Connection;

fn add(repo: &SqliteUserRepository<'_>, user: NewUser) -> UserId {
    repo.create_user(&user).unwrap()
}

fn score_for(conn: &Connection, target: UserId, candidate: UserId) -> Option<u32> {
    let repo = SqliteUserRepository::try_new(conn).unwrap();
    find_matches(&repo, target)
        .unwrap()
        .into_iter()
        .find(|item| item.user.id == candidate)
        .map(|item| item.score)
}

#[test]
fn worked_example_scores_thirty_five() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let a = add(
        &repo,
        NewUser::new("A")
            .with_skills(["Python", "SQL"])
            .with_interests(["AI"])
            .looking_for_project(true),
    );
    let b = add(
        &repo,
        NewUser::new("B")
            .with_skills(["Python", "R"])
            .with_interests(["AI", "bio"])
            .looking_for_project(true),
    );

    let matches = find_matches(&repo, a).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].user.id, b);
    assert_eq!(matches[0].score, 35);
    assert_eq!(matches[0].shared_skills, vec!["Python"]);
    assert_eq!(matches[0].shared_interests, vec!["AI"]);
}

#[test]
fn scores_are_symmetric_across_store() {
    let mut conn = open_db_in_memory().unwrap();
    seed_demo_data(&mut conn).unwrap();
    let ids = SqliteUserRepository::try_new(&conn)
        .unwrap()
        .list_users()
        .unwrap()
        .into_iter()
        .map(|user| user.id)
        .collect::<Vec<_>>();

    for &a in &ids {
        for &b in &ids {
            if a != b {
                assert_eq!(score_for(&conn, a, b), score_for(&conn, b, a));
            }
        }
    }
}

#[test]
fn seeded_programmer_matches_biologist_on_interest_with_bonus() {
    let mut conn = open_db_in_memory().unwrap();
    seed_demo_data(&mut conn).unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let users = repo.list_users().unwrap();
    let ivan = users
        .iter()
        .find(|user| user.name == "Иван Программист")
        .unwrap();

    let matches = find_matches(&repo, ivan.id).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].user.name, "Мария Биолог");
    assert_eq!(matches[0].shared_interests, vec!["нейросети"]);
    assert!(matches[0].shared_skills.is_empty());
    assert_eq!(matches[0].score, 25);
}

#[test]
fn user_without_overlap_gets_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let loner = add(
        &repo,
        NewUser::new("Loner")
            .with_skills(["COBOL"])
            .looking_for_project(true),
    );
    add(
        &repo,
        NewUser::new("Other")
            .with_skills(["Rust"])
            .looking_for_project(true),
    );

    assert!(find_matches(&repo, loner).unwrap().is_empty());
}

#[test]
fn results_sorted_descending_with_name_order_on_ties() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let target = add(
        &repo,
        NewUser::new("Target")
            .with_skills(["Python", "SQL"])
            .with_interests(["AI"]),
    );
    let zed = add(&repo, NewUser::new("Zed").with_skills(["Python"]));
    let amy = add(&repo, NewUser::new("Amy").with_skills(["SQL"]));
    let best = add(
        &repo,
        NewUser::new("Mid").with_skills(["Python", "SQL"]),
    );
    let low = add(&repo, NewUser::new("Bea").with_interests(["AI"]));

    let ranked = find_matches(&repo, target)
        .unwrap()
        .into_iter()
        .map(|item| (item.user.id, item.score))
        .collect::<Vec<_>>();
    assert_eq!(ranked, vec![(best, 20), (amy, 10), (zed, 10), (low, 5)]);
}

#[test]
fn unknown_user_fails_with_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let err = find_matches(&repo, 42).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "user",
            id: 42
        }
    ));
}

#[test]
fn service_find_matches_delegates_to_engine() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCollabService::from_connection(&conn).unwrap();
    let a = service
        .add_user(NewUser::new("A").with_skills([" Rust ", ""]))
        .unwrap();
    let b = service
        .add_user(NewUser::new("B").with_skills(["Rust"]))
        .unwrap();

    let matches = service.find_matches(a).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].user.id, b);
    assert_eq!(matches[0].score, 10);
}
