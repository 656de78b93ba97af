//! Sample data shown on first launch.
//!
//! # Responsibility
//! - Fill an empty store with the demo users, events and projects.
//!
//! # Invariants
//! - Seeding only happens when `users` is empty.
//! - The emptiness check and all inserts share one immediate transaction.
//! - Project owners point at the seeded users by their assigned ids.

use crate::model::event::NewEvent;
use crate::model::project::{NewProject, ProjectStatus};
use crate::model::user::NewUser;
use crate::repo::event_repo::{EventRepository, SqliteEventRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Inserts the demo data set into an empty store.
///
/// Returns `Ok(true)` when rows were inserted, `Ok(false)` when the store
/// already had users.
pub fn seed_demo_data(conn: &mut Connection) -> RepoResult<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let users = SqliteUserRepository::try_new(&tx)?;
    if users.count_users()? > 0 {
        return Ok(false);
    }

    let mut user_ids = Vec::new();
    for user in demo_users() {
        user_ids.push(users.create_user(&user)?);
    }

    let events = SqliteEventRepository::try_new(&tx)?;
    for event in demo_events() {
        events.create_event(&event)?;
    }

    let projects = SqliteProjectRepository::try_new(&tx)?;
    for (project, owner_index) in demo_projects() {
        let mut project = project;
        project.owner_id = user_ids.get(owner_index).copied();
        projects.create_project(&project)?;
    }

    tx.commit()?;
    info!(
        "event=db_seed module=db status=ok users={} events={}",
        user_ids.len(),
        demo_events().len()
    );
    Ok(true)
}

fn demo_users() -> Vec<NewUser> {
    vec![
        NewUser::new("Иван Программист")
            .with_email("ivan@example.com")
            .with_skills(["Python", "SQL", "AI", "Flask"])
            .with_interests(["биология", "нейросети", "машинное обучение"])
            .with_status("Хочу сотрудничать с биологами")
            .looking_for_project(true),
        NewUser::new("Мария Биолог")
            .with_email("maria@example.com")
            .with_skills(["биоинформатика", "статистика", "R"])
            .with_interests(["нейросети", "генетика", "Python"])
            .with_status("Ищу программиста для проекта")
            .looking_for_project(true),
        NewUser::new("Алексей Дизайнер")
            .with_email("alex@example.com")
            .with_skills(["UI/UX", "Figma", "Photoshop"])
            .with_interests(["стартапы", "веб-разработка", "IT"])
            .with_status("Открыт к коллаборациям")
            .looking_for_project(true),
        NewUser::new("Ольга Маркетолог")
            .with_email("olga@example.com")
            .with_skills(["SMM", "Аналитика", "Копирайтинг"])
            .with_interests(["образование", "социальные проекты", "менеджмент"])
            .with_status("Готова помочь с продвижением"),
        NewUser::new("Сергей Инженер")
            .with_email("sergey@example.com")
            .with_skills(["Arduino", "электроника", "C++"])
            .with_interests(["робототехника", "IoT", "программирование"])
            .with_status("Ищу команду для хакатона")
            .looking_for_project(true),
    ]
}

fn demo_events() -> Vec<NewEvent> {
    vec![
        NewEvent::new("Нейросети в биологии")
            .with_description("Лекция о применении нейросетей в биологических исследованиях")
            .with_schedule("2024-12-15 18:00", "2024-12-15 20:00")
            .with_location("Аудитория 101")
            .with_tags(["нейросети", "биология", "исследования"])
            .with_capacity(50),
        NewEvent::new("Стартап-уикенд")
            .with_description("Интенсив по созданию междисциплинарных проектов")
            .with_schedule("2024-12-20 10:00", "2024-12-21 18:00")
            .with_location("Коворкинг \"Точка кипения\"")
            .with_tags(["стартап", "проекты", "коллаборации"])
            .with_capacity(100),
        NewEvent::new("Хакатон по биоинформатике")
            .with_description("Соревнование по созданию IT-решений для биологии")
            .with_schedule("2024-12-25 09:00", "2024-12-27 21:00")
            .with_location("Технопарк")
            .with_tags(["хакатон", "биоинформатика", "программирование"])
            .with_capacity(30),
    ]
}

// Owner is an index into `demo_users()`.
fn demo_projects() -> Vec<(NewProject, usize)> {
    vec![
        (
            NewProject::new("AI для анализа ДНК")
                .with_description("Проект по созданию нейросети для анализа генетических данных")
                .with_status(ProjectStatus::Active),
            0,
        ),
        (
            NewProject::new("EdTech платформа")
                .with_description("Образовательная платформа для студентов")
                .with_status(ProjectStatus::Planning),
            2,
        ),
        (
            NewProject::new("Робот-помощник")
                .with_description("Автоматизация лабораторных работ")
                .with_status(ProjectStatus::InProgress),
            4,
        ),
    ]
}
