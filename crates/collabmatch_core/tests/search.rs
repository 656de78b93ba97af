use collabmatch_core::db::{open_db_in_memory, seed_demo_data};
use collabmatch_core::{
    search_all, NewEvent, NewProject, NewUser, ProjectStatus, SearchQuery, SqliteCollabService,
    SqliteEventRepository, SqliteProjectRepository, SqliteUserRepository,
};
use rusqlite::Connection;

fn seeded() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    seed_demo_data(&mut conn).unwrap();
    conn
}

#[test]
fn cyrillic_query_finds_event_case_insensitively() {
    let conn = seeded();
    let service = SqliteCollabService::from_connection(&conn).unwrap();

    for text in ["нейросети", "НЕЙРОСЕТИ", "Нейро"] {
        let results = service.search(&SearchQuery::new(text)).unwrap();
        assert!(
            results
                .events
                .iter()
                .any(|event| event.title == "Нейросети в биологии"),
            "query `{text}` should find the event"
        );
    }
}

#[test]
fn tag_only_match_is_found() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCollabService::from_connection(&conn).unwrap();
    let id = service
        .add_event(NewEvent::new("Вечер").with_tags(["neural-nets"]))
        .unwrap();

    let results = service.search(&SearchQuery::new("NEURAL")).unwrap();
    assert_eq!(
        results.events.iter().map(|event| event.id).collect::<Vec<_>>(),
        vec![id]
    );
    assert!(results.users.is_empty());
    assert!(results.projects.is_empty());
}

#[test]
fn user_fields_are_all_searchable() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCollabService::from_connection(&conn).unwrap();
    service
        .add_user(
            NewUser::new("Ольга")
                .with_email("olga@example.com")
                .with_skills(["Копирайтинг"])
                .with_interests(["менеджмент"])
                .with_status("Готова помочь"),
        )
        .unwrap();

    for text in ["ольга", "EXAMPLE.COM", "копирайт", "МЕНЕДЖ", "помочь"] {
        let results = service.search(&SearchQuery::new(text)).unwrap();
        assert_eq!(results.users.len(), 1, "query `{text}` should match");
    }
}

#[test]
fn project_status_is_searchable() {
    let conn = seeded();
    let service = SqliteCollabService::from_connection(&conn).unwrap();

    let results = service.search(&SearchQuery::new("in_progress")).unwrap();
    assert_eq!(results.projects.len(), 1);
    assert_eq!(results.projects[0].status, ProjectStatus::InProgress);
}

#[test]
fn buckets_use_fixed_secondary_order() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCollabService::from_connection(&conn).unwrap();
    let zed = service.add_user(NewUser::new("Zed common")).unwrap();
    let amy = service.add_user(NewUser::new("Amy common")).unwrap();
    let late = service
        .add_event(NewEvent::new("common late").with_schedule("2025-02-01", ""))
        .unwrap();
    let early = service
        .add_event(NewEvent::new("common early").with_schedule("2025-01-01", ""))
        .unwrap();
    let first = service.add_project(NewProject::new("common first")).unwrap();
    let second = service.add_project(NewProject::new("common second")).unwrap();

    let results = service.search(&SearchQuery::new("common")).unwrap();
    assert_eq!(
        results.users.iter().map(|user| user.id).collect::<Vec<_>>(),
        vec![amy, zed]
    );
    assert_eq!(
        results.events.iter().map(|event| event.id).collect::<Vec<_>>(),
        vec![early, late]
    );
    // Newest first.
    assert_eq!(
        results
            .projects
            .iter()
            .map(|project| project.id)
            .collect::<Vec<_>>(),
        vec![second, first]
    );
    assert_eq!(results.total(), 6);
}

#[test]
fn blank_query_returns_empty_results() {
    let conn = seeded();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let events = SqliteEventRepository::try_new(&conn).unwrap();
    let projects = SqliteProjectRepository::try_new(&conn).unwrap();

    let results = search_all(&users, &events, &projects, &SearchQuery::new("   ")).unwrap();
    assert!(results.is_empty());
}

#[test]
fn limit_per_kind_caps_each_bucket() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCollabService::from_connection(&conn).unwrap();
    for name in ["token a", "token b", "token c"] {
        service.add_user(NewUser::new(name)).unwrap();
    }
    service.add_event(NewEvent::new("token event")).unwrap();

    let mut query = SearchQuery::new("token");
    query.limit_per_kind = Some(2);
    let results = service.search(&query).unwrap();
    assert_eq!(results.users.len(), 2);
    assert_eq!(results.events.len(), 1);
}

#[test]
fn json_punctuation_does_not_match_across_labels() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteCollabService::from_connection(&conn).unwrap();
    service
        .add_user(NewUser::new("x").with_skills(["a", "b"]))
        .unwrap();

    let results = service.search(&SearchQuery::new("\",\"")).unwrap();
    assert!(results.users.is_empty());
}
