//! Lookup maps over one record collection.
//!
//! Built once per collection in a single pass and read-only afterwards. List
//! valued maps keep source order so every scan over them is deterministic.

use std::collections::HashMap;

use crate::models::Record;
use crate::normalize::{domain_key, normalize_username, root_domain};

/// `normalizedUrl::normalizedUsername`
#[must_use]
pub fn exact_key(record: &Record) -> String {
    record.exact_key()
}

/// `domain::normalizedUsername`
#[must_use]
pub fn domain_user_key(domain: &str, username: &str) -> String {
    format!("{domain}::{}", normalize_username(username))
}

/// `rootDomain::normalizedUsername`
#[must_use]
pub fn fuzzy_key(domain: &str, username: &str) -> String {
    format!("{}::{}", root_domain(domain), normalize_username(username))
}

/// Five complementary key -> record maps over one collection.
#[derive(Debug, Default)]
pub struct LookupIndex<'a> {
    exact: HashMap<String, &'a Record>,
    domain_and_user: HashMap<String, Vec<&'a Record>>,
    domain_only: HashMap<String, Vec<&'a Record>>,
    domain_order: Vec<String>,
    username_only: HashMap<String, Vec<&'a Record>>,
    fuzzy: HashMap<String, Vec<&'a Record>>,
    len: usize,
}

impl<'a> LookupIndex<'a> {
    /// Index every record of the collection.
    ///
    /// Duplicate exact keys keep the last record seen. Records without a
    /// usable domain are keyed by their literal url.
    pub fn build(records: &'a [Record]) -> Self {
        let mut index = Self::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    fn insert(&mut self, record: &'a Record) {
        let domain = domain_key(&record.url);

        self.exact.insert(exact_key(record), record);
        self.domain_and_user
            .entry(domain_user_key(&domain, &record.username))
            .or_default()
            .push(record);
        self.username_only
            .entry(normalize_username(&record.username))
            .or_default()
            .push(record);
        self.fuzzy
            .entry(fuzzy_key(&domain, &record.username))
            .or_default()
            .push(record);

        if let Some(bucket) = self.domain_only.get_mut(&domain) {
            bucket.push(record);
        } else {
            self.domain_order.push(domain.clone());
            self.domain_only.insert(domain, vec![record]);
        }

        self.len += 1;
    }

    /// Number of indexed records
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn exact(&self, key: &str) -> Option<&'a Record> {
        self.exact.get(key).copied()
    }

    #[must_use]
    pub fn domain_and_user(&self, key: &str) -> &[&'a Record] {
        self.domain_and_user.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn domain_only(&self, domain: &str) -> &[&'a Record] {
        self.domain_only.get(domain).map_or(&[], Vec::as_slice)
    }

    /// Distinct domains with their records, in first-seen order
    pub fn domains(&self) -> impl Iterator<Item = (&str, &[&'a Record])> + '_ {
        self.domain_order
            .iter()
            .map(|domain| (domain.as_str(), self.domain_only(domain)))
    }

    #[must_use]
    pub fn username_only(&self, username: &str) -> &[&'a Record] {
        self.username_only.get(username).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn fuzzy(&self, key: &str) -> &[&'a Record] {
        self.fuzzy.get(key).map_or(&[], Vec::as_slice)
    }
}
