//! Sort tokens (`priority`, `priorityDesc`) and the stable in-memory sort of list rows.

use std::cmp::Ordering;

use crate::entities::project;
use crate::views::{SortLink, TaskRow};

const DESC_SUFFIX: &str = "Desc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A sortable column of a list view.
pub trait SortKey: Copy + Eq + 'static {
    /// Every key in column order. The first one is the default.
    const KEYS: &'static [Self];

    /// Ascending token; the descending token appends `Desc`.
    fn token(self) -> &'static str;
}

/// Key and direction selected by a sort token such as `priorityDesc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<K> {
    pub key: K,
    pub direction: Direction,
}

impl<K: SortKey> Default for SortOrder<K> {
    fn default() -> Self {
        Self {
            key: K::KEYS[0],
            direction: Direction::Asc,
        }
    }
}

impl<K: SortKey> SortOrder<K> {
    /// Missing, empty and unrecognized tokens all give the default order.
    #[must_use]
    pub fn parse(token: Option<&str>) -> Self {
        let token = token.unwrap_or_default();
        let (base, direction) = match token.strip_suffix(DESC_SUFFIX) {
            Some(base) => (base, Direction::Desc),
            None => (token, Direction::Asc),
        };

        K::KEYS
            .iter()
            .copied()
            .find(|key| key.token() == base)
            .map_or_else(Self::default, |key| Self { key, direction })
    }

    #[must_use]
    pub fn token(&self) -> String {
        match self.direction {
            Direction::Asc => self.key.token().to_string(),
            Direction::Desc => format!("{}{DESC_SUFFIX}", self.key.token()),
        }
    }

    /// Stable sort; equal keys keep their incoming order in both directions.
    pub fn sort<T, F>(&self, items: &mut [T], compare: F)
    where
        F: Fn(K, &T, &T) -> Ordering,
    {
        let key = self.key;
        match self.direction {
            Direction::Asc => items.sort_by(|a, b| compare(key, a, b)),
            Direction::Desc => items.sort_by(|a, b| compare(key, b, a)),
        }
    }
}

/// Tokens the column headers should link to given the current token.
///
/// The default column flips between `""` and its `Desc` token; every other
/// column offers its `Desc` token only while it is the current ascending sort.
#[must_use]
pub fn next_sort_tokens<K: SortKey>(current: Option<&str>) -> Vec<SortLink> {
    let current = current.unwrap_or_default();
    K::KEYS
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let token = key.token();
            let sort_order = if index == 0 {
                if current.is_empty() {
                    format!("{token}{DESC_SUFFIX}")
                } else {
                    String::new()
                }
            } else if current == token {
                format!("{token}{DESC_SUFFIX}")
            } else {
                token.to_string()
            };
            SortLink {
                column: token,
                sort_order,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSortKey {
    Name,
    Customer,
    Executor,
    StartDate,
    EndDate,
    Priority,
}

impl SortKey for ProjectSortKey {
    const KEYS: &'static [Self] = &[
        Self::Name,
        Self::Customer,
        Self::Executor,
        Self::StartDate,
        Self::EndDate,
        Self::Priority,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Customer => "customer",
            Self::Executor => "executor",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Priority => "priority",
        }
    }
}

#[must_use]
pub fn compare_projects(key: ProjectSortKey, a: &project::Model, b: &project::Model) -> Ordering {
    match key {
        ProjectSortKey::Name => a.name.cmp(&b.name),
        ProjectSortKey::Customer => a.customer_company.cmp(&b.customer_company),
        ProjectSortKey::Executor => a.executor_company.cmp(&b.executor_company),
        ProjectSortKey::StartDate => a.start_date.cmp(&b.start_date),
        ProjectSortKey::EndDate => a.end_date.cmp(&b.end_date),
        ProjectSortKey::Priority => a.priority.cmp(&b.priority),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortKey {
    Name,
    Description,
    Project,
    Author,
    Executor,
    Status,
    Priority,
}

impl SortKey for TaskSortKey {
    const KEYS: &'static [Self] = &[
        Self::Name,
        Self::Description,
        Self::Project,
        Self::Author,
        Self::Executor,
        Self::Status,
        Self::Priority,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Project => "project",
            Self::Author => "author",
            Self::Executor => "executor",
            Self::Status => "status",
            Self::Priority => "priority",
        }
    }
}

/// Project sorts by project name, author and executor by first name.
#[must_use]
pub fn compare_tasks(key: TaskSortKey, a: &TaskRow, b: &TaskRow) -> Ordering {
    match key {
        TaskSortKey::Name => a.task.name.cmp(&b.task.name),
        TaskSortKey::Description => a.task.description.cmp(&b.task.description),
        TaskSortKey::Project => a.project_name.cmp(&b.project_name),
        TaskSortKey::Author => a.author_first_name.cmp(&b.author_first_name),
        TaskSortKey::Executor => a.executor_first_name.cmp(&b.executor_first_name),
        TaskSortKey::Status => a.task.status.cmp(&b.task.status),
        TaskSortKey::Priority => a.task.priority.cmp(&b.task.priority),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(links: &[SortLink]) -> Vec<(&'static str, &str)> {
        links
            .iter()
            .map(|link| (link.column, link.sort_order.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_ascending_and_descending() {
        let order = SortOrder::<ProjectSortKey>::parse(Some("priority"));
        assert_eq!(order.key, ProjectSortKey::Priority);
        assert_eq!(order.direction, Direction::Asc);

        let order = SortOrder::<ProjectSortKey>::parse(Some("startDateDesc"));
        assert_eq!(order.key, ProjectSortKey::StartDate);
        assert_eq!(order.direction, Direction::Desc);

        let order = SortOrder::<TaskSortKey>::parse(Some("nameDesc"));
        assert_eq!(order.key, TaskSortKey::Name);
        assert_eq!(order.direction, Direction::Desc);
    }

    #[test]
    fn test_parse_falls_back_to_name_ascending() {
        for token in [None, Some(""), Some("Desc"), Some("bogus"), Some("PRIORITY"), Some("priorityDescDesc")] {
            let order = SortOrder::<TaskSortKey>::parse(token);
            assert_eq!(order, SortOrder::default(), "token {token:?}");
            assert_eq!(order.key, TaskSortKey::Name);
            assert_eq!(order.direction, Direction::Asc);
        }
    }

    #[test]
    fn test_token_round_trips_every_key() {
        for key in TaskSortKey::KEYS {
            for direction in [Direction::Asc, Direction::Desc] {
                let order = SortOrder { key: *key, direction };
                assert_eq!(SortOrder::<TaskSortKey>::parse(Some(&order.token())), order);
            }
        }
    }

    #[test]
    fn test_next_tokens_without_current_sort() {
        let links = next_sort_tokens::<ProjectSortKey>(None);
        assert_eq!(
            tokens(&links),
            vec![
                ("name", "nameDesc"),
                ("customer", "customer"),
                ("executor", "executor"),
                ("startDate", "startDate"),
                ("endDate", "endDate"),
                ("priority", "priority"),
            ]
        );
    }

    #[test]
    fn test_next_tokens_toggle_current_column() {
        let links = next_sort_tokens::<TaskSortKey>(Some("author"));
        let map = tokens(&links);
        assert!(map.contains(&("name", "")));
        assert!(map.contains(&("author", "authorDesc")));
        assert!(map.contains(&("executor", "executor")));

        let links = next_sort_tokens::<TaskSortKey>(Some("authorDesc"));
        assert!(tokens(&links).contains(&("author", "author")));

        let links = next_sort_tokens::<TaskSortKey>(Some("nameDesc"));
        assert!(tokens(&links).contains(&("name", "")));
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let mut items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        let by_number = |_: ProjectSortKey, a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);

        SortOrder::<ProjectSortKey>::parse(Some("priority")).sort(&mut items, by_number);
        assert_eq!(items, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);

        SortOrder::<ProjectSortKey>::parse(Some("priorityDesc")).sort(&mut items, by_number);
        assert_eq!(items, vec![(2, 'a'), (2, 'c'), (1, 'b'), (1, 'd')]);
    }
}
