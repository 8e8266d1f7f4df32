//! In-process `MovieStore`, used by the test suite and for running without a database.

use super::{MovieStore, StoreError};
use crate::filters::{Filters, SortDirection};
use crate::movie::Movie;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

#[derive(Default)]
pub struct MemoryMovieStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    movies: BTreeMap<i64, Movie>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn insert(&self, movie: &mut Movie) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        movie.id = inner.next_id;
        movie.created_at = Utc::now();
        movie.version = 1;
        inner.movies.insert(movie.id, movie.clone());
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Movie, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.movies.get(&id).cloned().ok_or(StoreError::RecordNotFound)
    }

    async fn get_all(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, i64), StoreError> {
        let column = filters.sort_column()?;
        let direction = filters.sort_direction();

        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut matched: Vec<Movie> = inner
            .movies
            .values()
            .filter(|m| title_matches(&m.title, title))
            .filter(|m| genres.iter().all(|g| m.genres.contains(g)))
            .cloned()
            .collect();
        drop(inner);

        matched.sort_by(|a, b| {
            let ord = compare_by(column, a, b);
            let ord = match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            ord.then(a.id.cmp(&b.id))
        });

        let total = matched.len() as i64;
        let page = matched
            .into_iter()
            .skip(filters.offset().max(0) as usize)
            .take(filters.limit().max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(&self, movie: &mut Movie) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match inner.movies.get(&movie.id) {
            Some(current) if current.version == movie.version => {}
            _ => return Err(StoreError::EditConflict),
        }
        movie.version += 1;
        inner.movies.insert(movie.id, movie.clone());
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .movies
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::RecordNotFound)
    }
}

/// Every word of `query` appears as a word of `title`, ignoring case. An empty query matches all.
fn title_matches(title: &str, query: &str) -> bool {
    let words: Vec<String> = title.split_whitespace().map(str::to_lowercase).collect();
    query
        .split_whitespace()
        .all(|q| words.iter().any(|w| *w == q.to_lowercase()))
}

fn compare_by(column: &str, a: &Movie, b: &Movie) -> Ordering {
    match column {
        "title" => a.title.cmp(&b.title),
        "year" => a.year.cmp(&b.year),
        "runtime" => a.runtime.cmp(&b.runtime),
        _ => a.id.cmp(&b.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::UnsafeSortParameter;
    use crate::movie::{MovieInput, MOVIE_SORT_SAFE_LIST};

    fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
        Filters {
            page,
            page_size,
            sort: sort.into(),
            sort_safe_list: MOVIE_SORT_SAFE_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    async fn seeded() -> MemoryMovieStore {
        let store = MemoryMovieStore::new();
        for (title, year, genres) in [
            ("Black Hawk Down", 2001, vec!["war", "drama"]),
            ("The Breakfast Club", 1985, vec!["comedy", "drama"]),
            ("Moana", 2016, vec!["animation", "adventure"]),
            ("Dunkirk", 2017, vec!["war"]),
        ] {
            let mut m = Movie::from_input(MovieInput {
                title: title.into(),
                year,
                runtime: 100,
                genres: genres.into_iter().map(String::from).collect(),
            });
            store.insert(&mut m).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_version() {
        let store = seeded().await;
        let m = store.get(4).await.unwrap();
        assert_eq!(m.title, "Dunkirk");
        assert_eq!(m.version, 1);
        assert!(matches!(store.get(5).await, Err(StoreError::RecordNotFound)));
    }

    #[tokio::test]
    async fn test_get_all_sorts_and_pages() {
        let store = seeded().await;
        let (page, total) = store.get_all("", &[], &filters(1, 3, "-year")).await.unwrap();
        assert_eq!(total, 4);
        let years: Vec<i32> = page.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2017, 2016, 2001]);

        let (page, total) = store.get_all("", &[], &filters(2, 3, "-year")).await.unwrap();
        assert_eq!(total, 4);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].year, 1985);
    }

    #[tokio::test]
    async fn test_get_all_filters_title_and_genres() {
        let store = seeded().await;
        let (page, total) = store
            .get_all("", &["war".to_string()], &filters(1, 20, "title"))
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(page[0].title, "Black Hawk Down");
        assert_eq!(page[1].title, "Dunkirk");

        let (page, _) = store.get_all("black hawk", &[], &filters(1, 20, "id")).await.unwrap();
        assert_eq!(page.len(), 1);

        let (page, total) = store.get_all("nothing", &[], &filters(1, 20, "id")).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_get_all_rejects_unvalidated_sort() {
        let store = seeded().await;
        let err = store.get_all("", &[], &filters(1, 20, "created_at")).await.unwrap_err();
        assert!(matches!(err, StoreError::UnsafeSort(UnsafeSortParameter(s)) if s == "created_at"));
    }

    #[tokio::test]
    async fn test_update_detects_stale_version() {
        let store = seeded().await;
        let mut first = store.get(1).await.unwrap();
        let mut second = first.clone();

        first.runtime = 144;
        store.update(&mut first).await.unwrap();
        assert_eq!(first.version, 2);

        second.runtime = 150;
        assert!(matches!(store.update(&mut second).await, Err(StoreError::EditConflict)));
        assert_eq!(store.get(1).await.unwrap().runtime, 144);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded().await;
        store.delete(2).await.unwrap();
        assert!(matches!(store.delete(2).await, Err(StoreError::RecordNotFound)));
        assert!(matches!(store.get(2).await, Err(StoreError::RecordNotFound)));
    }
}
