//! Cascading record matcher.
//!
//! A probe record is compared against a [`LookupIndex`] by an ordered list of
//! rules; the first rule that produces a candidate wins. Structural equality
//! comes first, then progressively fuzzier signals. Password equality is only
//! ever used to break a tie between same-username candidates.

mod strategies;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::index::LookupIndex;
use crate::models::Record;
use crate::normalize::{extract_domain, normalize_username};

pub use strategies::{DomainAndUser, ExactUrlAndUser, SimilarDomainAndUser, UsernameOnly};

/// Rule that paired two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    ExactUrlAndUser,
    DomainAndUser,
    SimilarDomainAndUser,
    UniqueUsername,
    UsernameAndSimilarDomain,
    UsernameAndSamePassword,
    #[serde(rename = "none")]
    NoMatch,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ExactUrlAndUser => "exact URL + username",
            Self::DomainAndUser => "domain + username",
            Self::SimilarDomainAndUser => "similar domain + username",
            Self::UniqueUsername => "unique username",
            Self::UsernameAndSimilarDomain => "username + similar domain",
            Self::UsernameAndSamePassword => "username + same password",
            Self::NoMatch => "none",
        };
        f.write_str(label)
    }
}

/// Best candidate for a probe, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
    pub record: Option<&'a Record>,
    pub strategy: MatchStrategy,
}

impl<'a> MatchOutcome<'a> {
    #[must_use]
    pub const fn hit(record: &'a Record, strategy: MatchStrategy) -> Self {
        Self {
            record: Some(record),
            strategy,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            record: None,
            strategy: MatchStrategy::NoMatch,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.record.is_some()
    }
}

/// Normalized view of the record being matched.
#[derive(Debug, Clone)]
pub struct Probe<'r> {
    pub exact_key: String,
    pub domain: Option<String>,
    pub username: String,
    pub password: &'r str,
}

impl<'r> Probe<'r> {
    #[must_use]
    pub fn new(record: &'r Record) -> Self {
        Self {
            exact_key: record.exact_key(),
            domain: extract_domain(&record.url),
            username: normalize_username(&record.username),
            password: &record.password,
        }
    }
}

/// Ids of indexed records already paired during the current merge.
pub type Claimed<'c> = HashSet<&'c str>;

/// One step of the cascade.
pub trait MatchRule {
    /// Candidate for the probe among unclaimed indexed records.
    fn try_match<'a>(
        &self,
        probe: &Probe<'_>,
        index: &LookupIndex<'a>,
        claimed: &Claimed<'_>,
    ) -> Option<MatchOutcome<'a>>;
}

pub(crate) fn is_available(record: &Record, claimed: &Claimed<'_>) -> bool {
    !claimed.contains(record.id.as_str())
}

static CASCADE: [&(dyn MatchRule + Sync); 4] = [
    &ExactUrlAndUser,
    &DomainAndUser,
    &SimilarDomainAndUser,
    &UsernameOnly,
];

/// Ordered list of rules; the first non-empty outcome wins.
#[derive(Clone, Copy)]
pub struct Matcher<'r> {
    rules: &'r [&'r (dyn MatchRule + Sync)],
}

impl Matcher<'static> {
    /// exact key, domain + user, similar domain + user, username only
    #[must_use]
    pub fn standard() -> Self {
        Self { rules: &CASCADE }
    }
}

impl Default for Matcher<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> Matcher<'r> {
    #[must_use]
    pub const fn with_rules(rules: &'r [&'r (dyn MatchRule + Sync)]) -> Self {
        Self { rules }
    }

    /// Best match for `record` among indexed records not in `claimed`.
    #[must_use]
    pub fn find_unclaimed<'a>(
        &self,
        record: &Record,
        index: &LookupIndex<'a>,
        claimed: &Claimed<'_>,
    ) -> MatchOutcome<'a> {
        let probe = Probe::new(record);
        self.rules
            .iter()
            .find_map(|rule| rule.try_match(&probe, index, claimed))
            .unwrap_or_else(MatchOutcome::none)
    }
}

/// Best match for `record` in `index` using the standard cascade.
#[must_use]
pub fn find_best_match<'a>(record: &Record, index: &LookupIndex<'a>) -> MatchOutcome<'a> {
    Matcher::standard().find_unclaimed(record, index, &Claimed::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{apple, google};

    fn matched_id(outcome: &MatchOutcome<'_>) -> Option<String> {
        outcome.record.map(|record| record.id.clone())
    }

    #[test]
    fn exact_key_wins_over_everything_else() {
        let right = vec![
            google(0, "a.com", "bob", "same"),
            google(1, "https://www.example.com/", "BOB", "other"),
        ];
        let index = LookupIndex::build(&right);
        let outcome = find_best_match(&apple(0, "example.com", "bob", "same"), &index);

        assert_eq!(outcome.strategy, MatchStrategy::ExactUrlAndUser);
        assert_eq!(matched_id(&outcome).as_deref(), Some("google-1"));
    }

    #[test]
    fn identical_keys_never_fall_through() {
        let pairs = [
            ("https://example.com", "bob", "example.com/", "Bob"),
            ("a.com/login", "carol", "http://www.a.com/login/", " CAROL "),
            ("", "dave", "", "dave"),
        ];
        for (left_url, left_user, right_url, right_user) in pairs {
            let right = vec![google(0, right_url, right_user, "x")];
            let index = LookupIndex::build(&right);
            let outcome = find_best_match(&apple(0, left_url, left_user, "y"), &index);
            assert_eq!(outcome.strategy, MatchStrategy::ExactUrlAndUser, "{left_url}");
        }
    }

    #[test]
    fn domain_and_user_ignores_path() {
        let right = vec![google(0, "https://example.com/signin", "bob", "pw")];
        let index = LookupIndex::build(&right);
        let probe = apple(0, "https://example.com/account", "bob", "pw");
        let outcome = find_best_match(&probe, &index);

        assert_eq!(outcome.strategy, MatchStrategy::DomainAndUser);
    }

    #[test]
    fn similar_domain_requires_same_username() {
        let right = vec![
            google(0, "accounts.example.com", "alice", "pw"),
            google(1, "login.example.com", "bob", "pw"),
            google(2, "other.com", "bob", "pw"),
        ];
        let index = LookupIndex::build(&right);
        let outcome = find_best_match(&apple(0, "example.com", "bob", "pw"), &index);

        assert_eq!(outcome.strategy, MatchStrategy::SimilarDomainAndUser);
        assert_eq!(matched_id(&outcome).as_deref(), Some("google-1"));
    }

    #[test]
    fn unique_username_matches_across_domains() {
        let right = vec![google(0, "totally-different.org", "bob@mail.com", "pw")];
        let index = LookupIndex::build(&right);
        let outcome = find_best_match(&apple(0, "example.com", "Bob@mail.com", "other"), &index);

        assert_eq!(outcome.strategy, MatchStrategy::UniqueUsername);
    }

    #[test]
    fn shared_username_without_tie_break_is_no_match() {
        let right = vec![
            google(0, "one.org", "bob", "p1"),
            google(1, "two.org", "bob", "p2"),
        ];
        let index = LookupIndex::build(&right);
        let outcome = find_best_match(&apple(0, "three.org", "bob", "p3"), &index);

        assert_eq!(outcome, MatchOutcome::none());
    }

    #[test]
    fn shared_username_prefers_password_when_domains_differ() {
        let right = vec![
            google(0, "one.org", "bob", "p1"),
            google(1, "two.org", "bob", "p2"),
        ];
        let index = LookupIndex::build(&right);
        let outcome = find_best_match(&apple(0, "three.org", "bob", "p2"), &index);

        assert_eq!(outcome.strategy, MatchStrategy::UsernameAndSamePassword);
        assert_eq!(matched_id(&outcome).as_deref(), Some("google-1"));
    }

    #[test]
    fn empty_username_skips_username_only_rule() {
        let right = vec![google(0, "one.org", "", "pw")];
        let index = LookupIndex::build(&right);
        let outcome = find_best_match(&apple(0, "two.org", "", "pw"), &index);

        assert!(!outcome.is_match());
    }

    #[test]
    fn claimed_records_are_skipped() {
        let right = vec![
            google(0, "a.com", "bob", "pw"),
            google(1, "a.com", "bob", "pw"),
        ];
        let index = LookupIndex::build(&right);
        let mut claimed = Claimed::new();
        claimed.insert("google-1");

        let outcome =
            Matcher::standard().find_unclaimed(&apple(0, "a.com", "bob", "pw"), &index, &claimed);
        assert_eq!(outcome.strategy, MatchStrategy::DomainAndUser);
        assert_eq!(matched_id(&outcome).as_deref(), Some("google-0"));
    }

    #[test]
    fn custom_rule_list_runs_in_given_order() {
        let right = vec![google(0, "example.com", "bob", "pw")];
        let index = LookupIndex::build(&right);
        let rules: [&(dyn MatchRule + Sync); 1] = [&UsernameOnly];
        let outcome = Matcher::with_rules(&rules).find_unclaimed(
            &apple(0, "example.com", "bob", "pw"),
            &index,
            &Claimed::new(),
        );

        assert_eq!(outcome.strategy, MatchStrategy::UniqueUsername);
    }

    #[test]
    fn strategy_labels_are_readable() {
        assert_eq!(
            MatchStrategy::ExactUrlAndUser.to_string(),
            "exact URL + username"
        );
        assert_eq!(MatchStrategy::NoMatch.to_string(), "none");
    }
}
