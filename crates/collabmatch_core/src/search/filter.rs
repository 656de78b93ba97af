//! List-screen filters and the label catalog.
//!
//! # Invariants
//! - Label filters compare exactly; text filters fold case.
//! - Filters keep the input order.

use crate::model::event::Event;
use crate::model::labels::contains_label;
use crate::model::user::User;
use crate::search::substring::{user_matches, Needle};
use std::collections::BTreeSet;

/// Project-seeking filter for the user list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookingFilter {
    #[default]
    Any,
    Looking,
    NotLooking,
}

impl LookingFilter {
    fn accepts(self, user: &User) -> bool {
        match self {
            Self::Any => true,
            Self::Looking => user.looking_for_project,
            Self::NotLooking => !user.looking_for_project,
        }
    }
}

/// User list filter. Unset criteria accept everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Substring over the same fields as global search.
    pub text: Option<String>,
    /// Exact skill label.
    pub skill: Option<String>,
    pub looking: LookingFilter,
}

/// Event list filter. Unset criteria accept everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Substring over title, description and location.
    pub text: Option<String>,
    /// Exact tag label.
    pub tag: Option<String>,
}

/// Keeps users accepted by every set criterion.
pub fn filter_users(users: Vec<User>, filter: &UserFilter) -> Vec<User> {
    let needle = filter.text.as_deref().and_then(Needle::new);
    let skill = non_blank(filter.skill.as_deref());

    users
        .into_iter()
        .filter(|user| needle.as_ref().map_or(true, |needle| user_matches(user, needle)))
        .filter(|user| skill.map_or(true, |skill| contains_label(&user.skills, skill)))
        .filter(|user| filter.looking.accepts(user))
        .collect()
}

/// Keeps events accepted by every set criterion.
///
/// Unlike global search, the text criterion does not look at tags; tags are
/// filtered through `tag`.
pub fn filter_events(events: Vec<Event>, filter: &EventFilter) -> Vec<Event> {
    let needle = filter.text.as_deref().and_then(Needle::new);
    let tag = non_blank(filter.tag.as_deref());

    events
        .into_iter()
        .filter(|event| {
            needle.as_ref().map_or(true, |needle| {
                needle.found_in(&event.title)
                    || needle.found_in(&event.description)
                    || needle.found_in(&event.location)
            })
        })
        .filter(|event| tag.map_or(true, |tag| contains_label(&event.tags, tag)))
        .collect()
}

/// Sorted, deduplicated union of user skills and event tags.
///
/// Labels are kept as stored so each entry works as an exact filter value.
pub fn label_catalog(users: &[User], events: &[Event]) -> Vec<String> {
    users
        .iter()
        .flat_map(|user| user.skills.iter())
        .chain(events.iter().flat_map(|event| event.tags.iter()))
        .map(String::as_str)
        .filter(|label| !label.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{filter_users, label_catalog, LookingFilter, UserFilter};
    use crate::model::event::Event;
    use crate::model::user::User;

    fn user(id: i64, name: &str, skills: &[&str], looking: bool) -> User {
        User {
            id,
            name: name.to_string(),
            email: None,
            skills: skills.iter().map(|value| (*value).to_string()).collect(),
            interests: Vec::new(),
            status: String::new(),
            looking_for_project: looking,
            created_at: String::new(),
        }
    }

    #[test]
    fn filter_combines_text_skill_and_looking() {
        let users = vec![
            user(1, "Ivan", &["Python", "SQL"], true),
            user(2, "Ivana", &["Python"], false),
            user(3, "Olga", &["SQL"], true),
        ];

        let filter = UserFilter {
            text: Some("ivan".to_string()),
            skill: Some("Python".to_string()),
            looking: LookingFilter::Looking,
        };
        let ids = filter_users(users, &filter)
            .into_iter()
            .map(|user| user.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let users = vec![user(1, "a", &[], true), user(2, "b", &[], false)];
        let filter = UserFilter {
            text: Some("  ".to_string()),
            skill: Some(String::new()),
            looking: LookingFilter::Any,
        };
        assert_eq!(filter_users(users, &filter).len(), 2);
    }

    #[test]
    fn skill_filter_is_exact() {
        let users = vec![user(1, "a", &["Python"], false)];
        let filter = UserFilter {
            skill: Some("python".to_string()),
            ..UserFilter::default()
        };
        assert!(filter_users(users, &filter).is_empty());
    }

    #[test]
    fn catalog_merges_skills_and_tags() {
        let users = vec![user(1, "a", &["SQL", "AI", " "], false)];
        let events = vec![Event {
            id: 1,
            title: "t".to_string(),
            description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            location: String::new(),
            tags: vec!["AI".to_string(), "хакатон".to_string()],
            capacity: 0,
            created_at: String::new(),
        }];

        assert_eq!(label_catalog(&users, &events), vec!["AI", "SQL", "хакатон"]);
    }
}
