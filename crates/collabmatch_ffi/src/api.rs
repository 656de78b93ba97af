//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the collaboration use cases to Dart via FRB.
//! - Convert core errors into response envelopes with readable messages.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each DB-backed call opens its own connection and drops it before returning.
//! - An unknown user id yields an empty match list plus a message.

use collabmatch_core::db::{open_db, seed_demo_data};
use collabmatch_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    split_label_input, CoreConfig, Event, EventFilter, LookingFilter, MatchCandidate, NewEvent,
    NewProject, NewUser, Project, ProjectStatus, RepoError, RepoResult, SearchQuery,
    SqliteCollabService, User, UserFilter,
};
use log::warn;
use rusqlite::Connection;
use std::sync::OnceLock;

const SEARCH_DEFAULT_LIMIT: u32 = 50;
const SEARCH_LIMIT_MAX: u32 = 200;

static CONFIG: OnceLock<Result<CoreConfig, String>> = OnceLock::new();
static DEMO_SEED_CHECKED: OnceLock<()> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// User row projected for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserItem {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub status: String,
    pub looking_for_project: bool,
    pub created_at: String,
}

/// Event row projected for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub tags: Vec<String>,
    /// `0` means unlimited.
    pub capacity: u32,
    pub created_at: String,
}

/// Project row projected for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Status text (`planning|active|in_progress|completed|archived` or custom).
    pub status: String,
    pub owner_id: Option<i64>,
    pub created_at: String,
}

/// One ranked collaborator suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchItem {
    pub user: UserItem,
    pub score: u32,
    pub shared_skills: Vec<String>,
    pub shared_interests: Vec<String>,
}

/// Envelope for user list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListResponse {
    pub items: Vec<UserItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Envelope for event list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub items: Vec<EventItem>,
    pub message: String,
}

/// Envelope for project list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListResponse {
    pub items: Vec<ProjectItem>,
    pub message: String,
}

/// Envelope for match calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchListResponse {
    pub items: Vec<MatchItem>,
    pub message: String,
}

/// Grouped search envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub users: Vec<UserItem>,
    pub events: Vec<EventItem>,
    pub projects: Vec<ProjectItem>,
    pub message: String,
    /// Effective per-bucket limit.
    pub applied_limit: u32,
}

/// Summary counters for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsResponse {
    pub ok: bool,
    pub total_users: u64,
    pub total_events: u64,
    pub looking_for_project: u64,
    pub total_projects: u64,
    pub unique_skills: u64,
    pub message: String,
}

/// Envelope for the label catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCatalogResponse {
    pub labels: Vec<String>,
    pub message: String,
}

/// Generic action response envelope for insert calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created row id.
    pub id: Option<i64>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: i64) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Lists all users ordered by name.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_users() -> UserListResponse {
    match with_service(|service| service.list_users()) {
        Ok(Served {
            value: users,
            notice,
        }) => UserListResponse {
            message: with_notice(count_message(users.len()), notice),
            items: users.into_iter().map(to_user_item).collect(),
        },
        Err(err) => UserListResponse {
            items: Vec::new(),
            message: format!("list_users failed: {err}"),
        },
    }
}

/// Lists all events ordered by start date.
#[flutter_rust_bridge::frb(sync)]
pub fn list_events() -> EventListResponse {
    match with_service(|service| service.list_events()) {
        Ok(Served {
            value: events,
            notice,
        }) => EventListResponse {
            message: with_notice(count_message(events.len()), notice),
            items: events.into_iter().map(to_event_item).collect(),
        },
        Err(err) => EventListResponse {
            items: Vec::new(),
            message: format!("list_events failed: {err}"),
        },
    }
}

/// Lists all projects, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn list_projects() -> ProjectListResponse {
    match with_service(|service| service.list_projects()) {
        Ok(Served {
            value: projects,
            notice,
        }) => ProjectListResponse {
            message: with_notice(count_message(projects.len()), notice),
            items: projects.into_iter().map(to_project_item).collect(),
        },
        Err(err) => ProjectListResponse {
            items: Vec::new(),
            message: format!("list_projects failed: {err}"),
        },
    }
}

/// Ranks collaborators for one user.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unknown `user_id` returns an empty list and a "not found" message.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn find_matches(user_id: i64) -> MatchListResponse {
    match with_service(|service| service.find_matches(user_id)) {
        Ok(Served {
            value: matches,
            notice,
        }) => MatchListResponse {
            message: with_notice(
                if matches.is_empty() {
                    "No matches.".to_string()
                } else {
                    format!("Found {} match(es).", matches.len())
                },
                notice,
            ),
            items: matches.into_iter().map(to_match_item).collect(),
        },
        Err(err) => MatchListResponse {
            items: Vec::new(),
            message: format!("find_matches failed: {err}"),
        },
    }
}

/// Case-insensitive substring search across users, events and projects.
///
/// `limit` caps each bucket separately; `None` or `0` means default.
#[flutter_rust_bridge::frb(sync)]
pub fn search(text: String, limit: Option<u32>) -> SearchResponse {
    let applied_limit = normalize_search_limit(limit);
    let query = SearchQuery {
        text,
        limit_per_kind: Some(applied_limit as usize),
    };

    match with_service(|service| service.search(&query)) {
        Ok(Served {
            value: results,
            notice,
        }) => SearchResponse {
            message: with_notice(
                if results.is_empty() {
                    "No results.".to_string()
                } else {
                    format!("Found {} result(s).", results.total())
                },
                notice,
            ),
            users: results.users.into_iter().map(to_user_item).collect(),
            events: results.events.into_iter().map(to_event_item).collect(),
            projects: results.projects.into_iter().map(to_project_item).collect(),
            applied_limit,
        },
        Err(err) => SearchResponse {
            users: Vec::new(),
            events: Vec::new(),
            projects: Vec::new(),
            message: format!("search failed: {err}"),
            applied_limit,
        },
    }
}

/// Returns dashboard counters.
#[flutter_rust_bridge::frb(sync)]
pub fn get_stats() -> StatsResponse {
    match with_service(|service| service.get_stats()) {
        Ok(Served {
            value: stats,
            notice,
        }) => StatsResponse {
            ok: true,
            total_users: stats.total_users,
            total_events: stats.total_events,
            looking_for_project: stats.looking_for_project,
            total_projects: stats.total_projects,
            unique_skills: stats.unique_skills,
            message: with_notice(String::new(), notice),
        },
        Err(err) => StatsResponse {
            ok: false,
            total_users: 0,
            total_events: 0,
            looking_for_project: 0,
            total_projects: 0,
            unique_skills: 0,
            message: format!("get_stats failed: {err}"),
        },
    }
}

/// Filters the user list.
///
/// `looking`: `None` accepts everyone, `Some(flag)` keeps users with that flag.
#[flutter_rust_bridge::frb(sync)]
pub fn filter_users(
    text: Option<String>,
    skill: Option<String>,
    looking: Option<bool>,
) -> UserListResponse {
    let filter = UserFilter {
        text,
        skill,
        looking: match looking {
            None => LookingFilter::Any,
            Some(true) => LookingFilter::Looking,
            Some(false) => LookingFilter::NotLooking,
        },
    };
    match with_service(|service| service.filter_users(&filter)) {
        Ok(Served {
            value: users,
            notice,
        }) => UserListResponse {
            message: with_notice(count_message(users.len()), notice),
            items: users.into_iter().map(to_user_item).collect(),
        },
        Err(err) => UserListResponse {
            items: Vec::new(),
            message: format!("filter_users failed: {err}"),
        },
    }
}

/// Filters the event list by text and exact tag.
#[flutter_rust_bridge::frb(sync)]
pub fn filter_events(text: Option<String>, tag: Option<String>) -> EventListResponse {
    let filter = EventFilter { text, tag };
    match with_service(|service| service.filter_events(&filter)) {
        Ok(Served {
            value: events,
            notice,
        }) => EventListResponse {
            message: with_notice(count_message(events.len()), notice),
            items: events.into_iter().map(to_event_item).collect(),
        },
        Err(err) => EventListResponse {
            items: Vec::new(),
            message: format!("filter_events failed: {err}"),
        },
    }
}

/// Sorted union of all skills and event tags.
#[flutter_rust_bridge::frb(sync)]
pub fn label_catalog() -> LabelCatalogResponse {
    match with_service(|service| service.label_catalog()) {
        Ok(Served {
            value: labels,
            notice,
        }) => LabelCatalogResponse {
            message: with_notice(count_message(labels.len()), notice),
            labels,
        },
        Err(err) => LabelCatalogResponse {
            labels: Vec::new(),
            message: format!("label_catalog failed: {err}"),
        },
    }
}

/// Creates a user from form input.
///
/// `skills` and `interests` are comma-separated lists.
#[flutter_rust_bridge::frb(sync)]
pub fn add_user(
    name: String,
    email: Option<String>,
    skills: String,
    interests: String,
    status: String,
    looking_for_project: bool,
) -> ActionResponse {
    let mut user = NewUser::new(name)
        .with_skills(split_label_input(&skills))
        .with_interests(split_label_input(&interests))
        .with_status(status)
        .looking_for_project(looking_for_project);
    if let Some(email) = email {
        user = user.with_email(email);
    }

    match with_service(|service| service.add_user(user)) {
        Ok(Served { value: id, notice }) => {
            ActionResponse::success(with_notice("User created.".to_string(), notice), id)
        }
        Err(err) => ActionResponse::failure(format!("add_user failed: {err}")),
    }
}

/// Creates an event from form input.
///
/// `tags` is a comma-separated list; `capacity` `0` means unlimited.
#[flutter_rust_bridge::frb(sync)]
pub fn add_event(
    title: String,
    description: String,
    start_date: String,
    end_date: String,
    location: String,
    tags: String,
    capacity: u32,
) -> ActionResponse {
    let event = NewEvent::new(title)
        .with_description(description)
        .with_schedule(start_date, end_date)
        .with_location(location)
        .with_tags(split_label_input(&tags))
        .with_capacity(capacity);

    match with_service(|service| service.add_event(event)) {
        Ok(Served { value: id, notice }) => {
            ActionResponse::success(with_notice("Event created.".to_string(), notice), id)
        }
        Err(err) => ActionResponse::failure(format!("add_event failed: {err}")),
    }
}

/// Creates a project from form input.
///
/// `status` accepts any text; blank falls back to `planning`.
#[flutter_rust_bridge::frb(sync)]
pub fn add_project(
    title: String,
    description: String,
    status: String,
    owner_id: Option<i64>,
) -> ActionResponse {
    let mut project = NewProject::new(title)
        .with_description(description)
        .with_status(ProjectStatus::parse(&status));
    if let Some(owner_id) = owner_id {
        project = project.with_owner(owner_id);
    }

    match with_service(|service| service.add_project(project)) {
        Ok(Served { value: id, notice }) => {
            ActionResponse::success(with_notice("Project created.".to_string(), notice), id)
        }
        Err(err) => ActionResponse::failure(format!("add_project failed: {err}")),
    }
}

fn normalize_search_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => SEARCH_DEFAULT_LIMIT,
        Some(value) => value.min(SEARCH_LIMIT_MAX),
    }
}

fn resolve_config() -> Result<&'static CoreConfig, String> {
    CONFIG
        .get_or_init(|| CoreConfig::from_env().map_err(|err| err.to_string()))
        .as_ref()
        .map_err(Clone::clone)
}

// Result of a DB-backed call plus an optional note for the response message.
struct Served<T> {
    value: T,
    notice: Option<String>,
}

fn with_service<T>(
    f: impl FnOnce(&SqliteCollabService<'_>) -> RepoResult<T>,
) -> Result<Served<T>, String> {
    let config = resolve_config()?;
    let mut conn = open_db(&config.db_path).map_err(|err| format!("DB open failed: {err}"))?;

    let notice = if config.seed_demo_data {
        seed_demo_once(&mut conn, &DEMO_SEED_CHECKED)
    } else {
        None
    };

    let service = SqliteCollabService::from_connection(&conn)
        .map_err(|err| format!("service init failed: {err}"))?;
    let value = f(&service).map_err(|err| match err {
        RepoError::NotFound { entity, id } => format!("{entity} {id} not found"),
        other => other.to_string(),
    })?;
    Ok(Served { value, notice })
}

// Seeds until one attempt succeeds; a failure is returned as a notice.
fn seed_demo_once(conn: &mut Connection, checked: &OnceLock<()>) -> Option<String> {
    if checked.get().is_some() {
        return None;
    }
    match seed_demo_data(conn) {
        Ok(_) => {
            let _ = checked.set(());
            None
        }
        Err(err) => {
            warn!("event=db_seed module=ffi status=error error={err}");
            Some(format!("demo data seeding failed: {err}"))
        }
    }
}

fn with_notice(message: String, notice: Option<String>) -> String {
    match notice {
        None => message,
        Some(notice) if message.is_empty() => notice,
        Some(notice) => format!("{message} ({notice})"),
    }
}

fn count_message(count: usize) -> String {
    if count == 0 {
        "No items.".to_string()
    } else {
        format!("{count} item(s).")
    }
}

fn to_user_item(user: User) -> UserItem {
    UserItem {
        id: user.id,
        name: user.name,
        email: user.email,
        skills: user.skills,
        interests: user.interests,
        status: user.status,
        looking_for_project: user.looking_for_project,
        created_at: user.created_at,
    }
}

fn to_event_item(event: Event) -> EventItem {
    EventItem {
        id: event.id,
        title: event.title,
        description: event.description,
        start_date: event.start_date,
        end_date: event.end_date,
        location: event.location,
        tags: event.tags,
        capacity: event.capacity,
        created_at: event.created_at,
    }
}

fn to_project_item(project: Project) -> ProjectItem {
    ProjectItem {
        id: project.id,
        title: project.title,
        description: project.description,
        status: project.status.as_str().to_string(),
        owner_id: project.owner_id,
        created_at: project.created_at,
    }
}

fn to_match_item(candidate: MatchCandidate) -> MatchItem {
    MatchItem {
        user: to_user_item(candidate.user),
        score: candidate.score,
        shared_skills: candidate.shared_skills,
        shared_interests: candidate.shared_interests,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_event, add_project, add_user, core_version, filter_users, find_matches, get_stats,
        init_logging, label_catalog, list_projects, normalize_search_limit, ping, search,
        seed_demo_once, with_notice,
    };
    use rusqlite::Connection;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn search_limit_is_normalized() {
        assert_eq!(normalize_search_limit(None), 50);
        assert_eq!(normalize_search_limit(Some(0)), 50);
        assert_eq!(normalize_search_limit(Some(7)), 7);
        assert_eq!(normalize_search_limit(Some(10_000)), 200);
    }

    #[test]
    fn add_user_then_match_by_unique_skill() {
        let skill = unique_token("skill");
        let first = add_user(
            "First".to_string(),
            None,
            format!("{skill}, Rust"),
            String::new(),
            String::new(),
            true,
        );
        assert!(first.ok, "{}", first.message);
        let second = add_user(
            "Second".to_string(),
            Some("second@example.com".to_string()),
            format!(" {skill} "),
            String::new(),
            String::new(),
            true,
        );
        assert!(second.ok, "{}", second.message);

        let response = find_matches(first.id.expect("created user should return id"));
        let item = response
            .items
            .iter()
            .find(|item| Some(item.user.id) == second.id)
            .expect("second user should match");
        assert_eq!(item.score, 30);
        assert_eq!(item.shared_skills, vec![skill]);
    }

    #[test]
    fn unknown_user_returns_empty_matches_with_message() {
        let response = find_matches(i64::MAX);
        assert!(response.items.is_empty());
        assert!(response.message.contains("not found"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let response = add_user(
            "   ".to_string(),
            None,
            String::new(),
            String::new(),
            String::new(),
            false,
        );
        assert!(!response.ok);
        assert!(response.id.is_none());
    }

    #[test]
    fn search_finds_created_event_by_uppercase_token() {
        let token = unique_token("событие");
        let created = add_event(
            format!("Встреча {token}"),
            String::new(),
            "2025-01-01".to_string(),
            String::new(),
            String::new(),
            String::new(),
            0,
        );
        assert!(created.ok, "{}", created.message);

        let response = search(token.to_uppercase(), Some(0));
        assert_eq!(response.applied_limit, 50);
        assert!(response.events.iter().any(|event| Some(event.id) == created.id));
    }

    #[test]
    fn add_project_keeps_custom_status() {
        let title = unique_token("project");
        let created = add_project(title.clone(), String::new(), "on hold".to_string(), None);
        assert!(created.ok, "{}", created.message);

        let project = list_projects()
            .items
            .into_iter()
            .find(|project| project.title == title)
            .expect("created project should be listed");
        assert_eq!(project.status, "on hold");
        assert_eq!(project.owner_id, None);
    }

    #[test]
    fn stats_and_catalog_reflect_new_user() {
        let skill = unique_token("catalog");
        let created = add_user(
            "Catalog".to_string(),
            None,
            skill.clone(),
            String::new(),
            String::new(),
            false,
        );
        assert!(created.ok, "{}", created.message);

        let stats = get_stats();
        assert!(stats.ok, "{}", stats.message);
        assert!(stats.total_users >= 1);
        assert!(stats.unique_skills >= 1);
        assert!(label_catalog().labels.contains(&skill));

        let filtered = filter_users(None, Some(skill), Some(false));
        assert_eq!(
            filtered.items.iter().map(|user| Some(user.id)).collect::<Vec<_>>(),
            vec![created.id]
        );
    }

    #[test]
    fn seeding_failure_becomes_notice_until_it_succeeds() {
        let checked = OnceLock::new();
        // No migrations applied, so the seed guard rejects the connection.
        let mut bare = Connection::open_in_memory().expect("open bare connection");
        let notice = seed_demo_once(&mut bare, &checked).expect("failure should be reported");
        assert!(notice.contains("demo data seeding failed"));
        assert!(checked.get().is_none());

        let mut ready = collabmatch_core::db::open_db_in_memory().expect("open migrated db");
        assert_eq!(seed_demo_once(&mut ready, &checked), None);
        assert!(checked.get().is_some());
        assert_eq!(seed_demo_once(&mut bare, &checked), None);
    }

    #[test]
    fn notice_is_appended_to_response_message() {
        assert_eq!(with_notice("2 item(s).".to_string(), None), "2 item(s).");
        assert_eq!(
            with_notice("2 item(s).".to_string(), Some("seeding failed".to_string())),
            "2 item(s). (seeding failed)"
        );
        assert_eq!(
            with_notice(String::new(), Some("seeding failed".to_string())),
            "seeding failed"
        );
    }

    #[test]
    fn add_project_maps_capitalized_known_status() {
        let title = unique_token("project-status");
        let created = add_project(title.clone(), String::new(), "Active".to_string(), None);
        assert!(created.ok, "{}", created.message);

        let project = list_projects()
            .items
            .into_iter()
            .find(|project| project.title == title)
            .expect("created project should be listed");
        assert_eq!(project.status, "active");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
