//! Deterministic synthetic user generation.
//!
//! Every call to [`Generator::generate`] seeds a fresh ChaCha12 stream, so the
//! same seed, count and generation instant always produce the same records,
//! in this process or any later one.

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::model::User;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Margaret", "Mark",
    "Sandra", "Steven", "Ashley", "Paul", "Emily", "Andrew", "Donna", "Joshua", "Michelle",
    "Kevin", "Carol", "Brian", "Amanda", "George", "Melissa", "Edward", "Deborah", "Ronald",
    "Stephanie", "Timothy", "Rebecca", "Jason", "Laura",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts",
];

const CITIES: &[&str] = &[
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
    "Austin",
    "Jacksonville",
    "Fort Worth",
    "Columbus",
    "Charlotte",
    "Indianapolis",
    "San Francisco",
    "Seattle",
    "Denver",
    "Washington, D.C.",
    "Boston",
    "Nashville",
    "Portland",
    "Las Vegas",
    "Detroit",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "icloud.com",
    "proton.me",
    "example.com",
];

/// Default lower bound of the registration window: 2020-01-01 (UTC).
pub fn default_window_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Produces synthetic users from a seed.
#[derive(Debug, Clone)]
pub struct Generator {
    seed: u64,
    window_start: DateTime<Utc>,
}

impl Generator {
    /// Creates a generator with the default registration window start.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            window_start: default_window_start(),
        }
    }

    /// Overrides the earliest possible registration instant.
    pub fn with_window_start(mut self, start: DateTime<Utc>) -> Self {
        self.window_start = start;
        self
    }

    /// Generates `count` users with ids `1..=count`.
    ///
    /// Registration instants are drawn uniformly from
    /// `[window_start, generated_at]`; `generated_at` is the single upper bound
    /// shared by every record. `count == 0` yields an empty vector.
    pub fn generate(&self, count: usize, generated_at: DateTime<Utc>) -> Vec<User> {
        let mut rng = ChaCha12Rng::seed_from_u64(self.seed);
        let span_ms = (generated_at - self.window_start).num_milliseconds().max(0);

        let users: Vec<User> = (1..=count as u64)
            .map(|id| {
                let first = pick(&mut rng, FIRST_NAMES);
                let last = pick(&mut rng, LAST_NAMES);
                let domain = pick(&mut rng, EMAIL_DOMAINS);
                let suffix: u32 = rng.gen_range(1..100);
                let city = pick(&mut rng, CITIES);
                let offset_ms = rng.gen_range(0..=span_ms);

                let email = format!("{first}.{last}{suffix}@{domain}").to_ascii_lowercase();
                let registered = self.window_start + Duration::milliseconds(offset_ms);

                User::new(
                    id,
                    first,
                    last,
                    email,
                    Some(city.to_string()),
                    registered.to_rfc3339_opts(SecondsFormat::Millis, true),
                )
            })
            .collect();

        tracing::debug!(count, seed = self.seed, "generated users");
        users
    }
}

fn pick<'a>(rng: &mut ChaCha12Rng, table: &[&'a str]) -> &'a str {
    table[rng.gen_range(0..table.len())]
}
