//! The data service: one generated collection and the read operations over it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use roster_seeker::{sort_positions, sort_stable, Dir, OrderBy, Query, TextSearch};

use crate::cache::{SortCache, SortKey};
use crate::clock::{Clock, SystemClock};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::field::Field;
use crate::generator::Generator;
use crate::model::User;
use crate::page::{self, Page};
use crate::stats::Stats;

/// Owns the user collection and answers sort, search, export and stats
/// requests over it.
///
/// The collection is generated once in the constructor and never changes
/// afterwards. Every operation takes `&self`; the only mutable state is the
/// sort cache, guarded by a mutex so the service can be shared across
/// threads.
pub struct DataService {
    config: ServiceConfig,
    users: Vec<User>,
    clock: Box<dyn Clock>,
    cache: Mutex<SortCache>,
}

impl DataService {
    /// Builds a service on the system clock.
    ///
    /// Registration dates are bounded by the construction instant, so two
    /// services built this way differ in every `registeredDate`. Use
    /// [`with_clock`](Self::with_clock) with a [`FixedClock`](crate::FixedClock)
    /// for reproducible dates.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// Builds a service reading "now" from `clock`.
    ///
    /// The clock's current instant is the upper bound of the registration
    /// window for the whole collection.
    pub fn with_clock(config: ServiceConfig, clock: impl Clock + 'static) -> Result<Self> {
        config.validate()?;
        let cache = SortCache::new(config.cache_capacity)?;

        let generated_at = clock.now();
        let users = Generator::new(config.seed)
            .with_window_start(config.window_start)
            .generate(config.record_count, generated_at);

        tracing::info!(
            records = users.len(),
            seed = config.seed,
            cache_capacity = config.cache_capacity,
            "data service ready"
        );

        Ok(Self {
            cache: Mutex::new(cache),
            config,
            users,
            clock: Box::new(clock),
        })
    }

    /// The configuration the service was built from.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The full collection in id order.
    pub fn get_all(&self) -> &[User] {
        &self.users
    }

    /// Number of records in the collection.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` when the collection has no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// The instant derived fields are evaluated at.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Sorts `subset`, or the full collection when `subset` is `None`.
    ///
    /// Full-collection orderings are cached per field, direction and
    /// collection length. Subsets are always sorted afresh.
    pub fn sort<'a>(&'a self, field: Field, dir: Dir, subset: Option<&[&'a User]>) -> Vec<&'a User> {
        let now = self.clock.now();
        match subset {
            Some(records) => {
                sort_stable(records, &[OrderBy::new(field, dir)], |u, f| f.value(u, now))
            }
            None => self.sort_all(field, dir, now),
        }
    }

    /// Like [`sort`](Self::sort), with field and direction given by name.
    pub fn sort_by_name<'a>(
        &'a self,
        field: &str,
        dir: &str,
        subset: Option<&[&'a User]>,
    ) -> Result<Vec<&'a User>> {
        let field: Field = field.parse()?;
        let dir: Dir = dir.parse()?;
        Ok(self.sort(field, dir, subset))
    }

    fn sort_all(&self, field: Field, dir: Dir, now: DateTime<Utc>) -> Vec<&User> {
        let key = SortKey::new(field, dir, self.users.len());

        // Held until the result is stored so concurrent callers never compute
        // or evict the same key twice.
        let mut cache = self.lock_cache();

        if let Some(positions) = cache.get(&key) {
            tracing::debug!(%field, %dir, "sort cache hit");
            return self.resolve(positions);
        }
        tracing::debug!(
            %field,
            %dir,
            derived = field.is_derived(),
            clock_dependent = field.depends_on_clock(),
            "sort cache miss"
        );

        let all: Vec<&User> = self.users.iter().collect();
        let positions = sort_positions(&all, &[OrderBy::new(field, dir)], |u, f| f.value(u, now));
        let sorted = self.resolve(&positions);

        if let Some(evicted) = cache.insert(key, positions) {
            tracing::debug!(field = %evicted.field, dir = %evicted.dir, "sort cache evict");
        }
        sorted
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&User> {
        positions.iter().filter_map(|&p| self.users.get(p)).collect()
    }

    /// Records where every term of `query` occurs in at least one of
    /// `fields`, in id order.
    ///
    /// `fields` defaults to [`Field::SEARCH_DEFAULT`]. A blank query
    /// returns the whole collection.
    pub fn search(&self, query: &str, fields: Option<&[Field]>) -> Vec<&User> {
        let fields = fields.unwrap_or(&Field::SEARCH_DEFAULT).to_vec();
        let search = TextSearch::new(query, fields);
        if search.is_empty() {
            return self.users.iter().collect();
        }

        let now = self.clock.now();
        let found = search.filter(&self.users, |u, f| f.value(u, now));
        tracing::debug!(terms = search.terms().len(), matches = found.len(), "search");
        found
    }

    /// Runs a structured query over the full collection. Never cached.
    pub fn filter(&self, query: &Query<Field>) -> Vec<&User> {
        let now = self.clock.now();
        query.filter(&self.users, |u, f| f.value(u, now))
    }

    /// One page of `records`; see [`page::paginate`].
    pub fn page<'a>(&self, records: &[&'a User], page: usize, page_size: usize) -> Result<Page<'a>> {
        page::paginate(records, page, page_size)
    }

    /// Serializes `subset`, or the full collection, in `format`.
    pub fn export(&self, format: ExportFormat, subset: Option<&[&User]>) -> Result<String> {
        let now = self.clock.now();
        let out = match subset {
            Some(records) => export::export(records, format, now),
            None => {
                let all: Vec<&User> = self.users.iter().collect();
                export::export(&all, format, now)
            }
        }?;
        tracing::debug!(%format, bytes = out.len(), "export");
        Ok(out)
    }

    /// Like [`export`](Self::export) with the format given by name.
    pub fn export_data(&self, format: &str, subset: Option<&[&User]>) -> Result<String> {
        let format: ExportFormat = format.parse()?;
        self.export(format, subset)
    }

    /// Aggregates over the full collection, computed on every call.
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.users, self.clock.now())
    }

    /// Drops every cached ordering. The collection is untouched.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
        tracing::debug!("sort cache cleared");
    }

    /// Number of cached orderings.
    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    fn lock_cache(&self) -> MutexGuard<'_, SortCache> {
        // The cache holds no invariant a panicking holder could break.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataService")
            .field("config", &self.config)
            .field("records", &self.users.len())
            .field("cached_orderings", &self.cache_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::RosterError;
    use chrono::TimeZone;

    fn service(count: usize) -> DataService {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        DataService::with_clock(ServiceConfig::new().record_count(count), FixedClock(now)).unwrap()
    }

    #[test]
    fn zero_capacity_fails_construction() {
        let err = DataService::new(ServiceConfig::new().cache_capacity(0)).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn full_sorts_are_cached_and_subsets_are_not() {
        let svc = service(40);
        let first = svc.sort(Field::LastName, Dir::Asc, None);
        assert_eq!(svc.cache_len(), 1);

        let again = svc.sort(Field::LastName, Dir::Asc, None);
        assert_eq!(svc.cache_len(), 1);
        assert_eq!(first, again);

        let subset: Vec<&User> = svc.get_all().iter().take(5).collect();
        let sorted = svc.sort(Field::City, Dir::Desc, Some(subset.as_slice()));
        assert_eq!(sorted.len(), 5);
        assert_eq!(svc.cache_len(), 1);
    }

    #[test]
    fn clear_cache_keeps_collection() {
        let svc = service(10);
        svc.sort(Field::Email, Dir::Desc, None);
        svc.clear_cache();
        assert_eq!(svc.cache_len(), 0);
        assert_eq!(svc.len(), 10);
    }

    #[test]
    fn names_are_parsed() {
        let svc = service(10);
        let by_name = svc.sort_by_name("registeredDate", "descending", None).unwrap();
        assert_eq!(by_name, svc.sort(Field::RegisteredDate, Dir::Desc, None));

        assert!(matches!(
            svc.sort_by_name("age", "asc", None),
            Err(RosterError::UnknownField(_))
        ));
        assert!(matches!(
            svc.sort_by_name("city", "sideways", None),
            Err(RosterError::Seeker(_))
        ));
    }

    #[test]
    fn blank_search_returns_everything() {
        let svc = service(15);
        let all: Vec<&User> = svc.get_all().iter().collect();
        assert_eq!(svc.search("   ", None), all);
    }

    #[test]
    fn unsupported_format() {
        let svc = service(3);
        let err = svc.export_data("xml", None).unwrap_err();
        assert!(matches!(err, RosterError::UnsupportedFormat(f) if f == "xml"));
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataService>();
    }
}
