//! Aggregate statistics over a set of users.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::User;

/// Number of cities reported in [`Stats::top_cities`].
pub const TOP_CITIES: usize = 10;

/// A city and how many users live there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// Snapshot of the collection, computed fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: usize,
    /// Mean of `daysSinceRegistered`, rounded half away from zero.
    pub average_days_since_registered: i64,
    pub users_by_year: BTreeMap<i32, usize>,
    /// Most common cities, largest first; ties keep first-seen order.
    pub top_cities: Vec<CityCount>,
}

impl Stats {
    /// Computes statistics for `users` with derived fields evaluated at `now`.
    ///
    /// Users without a parseable registration date are left out of the mean
    /// and the per-year counts; users without a city are left out of the
    /// city ranking.
    pub fn compute<'a, I>(users: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a User>,
    {
        let mut total_users = 0;
        let mut day_sum: i64 = 0;
        let mut dated = 0usize;
        let mut users_by_year = BTreeMap::new();
        let mut city_index: HashMap<&str, usize> = HashMap::new();
        let mut cities: Vec<CityCount> = Vec::new();

        for user in users {
            total_users += 1;

            if let Some(days) = user.days_since_registered(now) {
                day_sum += days;
                dated += 1;
            }
            if let Some(year) = user.registration_year() {
                *users_by_year.entry(year).or_insert(0) += 1;
            }
            if let Some(city) = user.city.as_deref() {
                match city_index.get(city) {
                    Some(&i) => cities[i].count += 1,
                    None => {
                        city_index.insert(city, cities.len());
                        cities.push(CityCount {
                            city: city.to_string(),
                            count: 1,
                        });
                    }
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        cities.sort_by(|a, b| b.count.cmp(&a.count));
        cities.truncate(TOP_CITIES);

        let average_days_since_registered = if dated == 0 {
            0
        } else {
            (day_sum as f64 / dated as f64).round() as i64
        };

        Stats {
            total_users,
            average_days_since_registered,
            users_by_year,
            top_cities: cities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(id: u64, city: Option<&str>, registered: &str) -> User {
        User::new(
            id,
            "A",
            "B",
            "a@b.c",
            city.map(str::to_string),
            registered,
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 11, 0, 0, 0).unwrap()
    }

    #[test]
    fn empty_input() {
        let stats = Stats::compute(&Vec::<User>::new(), now());
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.average_days_since_registered, 0);
        assert!(stats.users_by_year.is_empty());
        assert!(stats.top_cities.is_empty());
    }

    #[test]
    fn mean_rounds_half_up() {
        let users = [
            user(1, None, "2022-01-10T00:00:00Z"),
            user(2, None, "2022-01-09T00:00:00Z"),
        ];
        // 1 and 2 days: mean 1.5 rounds to 2.
        assert_eq!(Stats::compute(&users, now()).average_days_since_registered, 2);
    }

    #[test]
    fn years_and_undated_records() {
        let users = [
            user(1, None, "2021-06-01T00:00:00Z"),
            user(2, None, "2021-07-01T00:00:00Z"),
            user(3, None, "2022-01-01T00:00:00Z"),
            user(4, None, "not a date"),
        ];
        let stats = Stats::compute(&users, now());
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.users_by_year.get(&2021), Some(&2));
        assert_eq!(stats.users_by_year.get(&2022), Some(&1));
        assert_eq!(stats.users_by_year.values().sum::<usize>(), 3);
    }

    #[test]
    fn top_cities_ties_keep_first_seen_order() {
        let d = "2021-01-01T00:00:00Z";
        let users = [
            user(1, Some("Denver"), d),
            user(2, Some("Austin"), d),
            user(3, Some("Boston"), d),
            user(4, Some("Austin"), d),
            user(5, Some("Boston"), d),
            user(6, None, d),
        ];
        let stats = Stats::compute(&users, now());
        let names: Vec<&str> = stats.top_cities.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(names, vec!["Austin", "Boston", "Denver"]);
        assert_eq!(stats.top_cities[0].count, 2);
    }

    #[test]
    fn top_cities_capped_at_ten() {
        let cities: Vec<String> = (0..15).map(|i| format!("City {i}")).collect();
        let users: Vec<User> = cities
            .iter()
            .enumerate()
            .map(|(i, c)| user(i as u64 + 1, Some(c), "2021-01-01T00:00:00Z"))
            .collect();
        let stats = Stats::compute(&users, now());
        assert_eq!(stats.top_cities.len(), TOP_CITIES);
        assert_eq!(stats.top_cities[0].city, "City 0");
        assert_eq!(stats.top_cities[9].city, "City 9");
    }

    #[test]
    fn serializes_camel_case() {
        let stats = Stats::compute(&Vec::<User>::new(), now());
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("averageDaysSinceRegistered").is_some());
        assert!(json.get("topCities").is_some());
    }
}
