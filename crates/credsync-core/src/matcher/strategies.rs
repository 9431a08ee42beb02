//! Individual rules of the matching cascade.

use crate::index::{domain_user_key, LookupIndex};
use crate::matcher::{is_available, Claimed, MatchOutcome, MatchRule, MatchStrategy, Probe};
use crate::models::Record;
use crate::normalize::{domains_similar, extract_domain, normalize_username};

/// Same normalized url and username.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactUrlAndUser;

impl MatchRule for ExactUrlAndUser {
    fn try_match<'a>(
        &self,
        probe: &Probe<'_>,
        index: &LookupIndex<'a>,
        claimed: &Claimed<'_>,
    ) -> Option<MatchOutcome<'a>> {
        index
            .exact(&probe.exact_key)
            .filter(|candidate| is_available(candidate, claimed))
            .map(|candidate| MatchOutcome::hit(candidate, MatchStrategy::ExactUrlAndUser))
    }
}

/// Same host and username, any path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainAndUser;

impl MatchRule for DomainAndUser {
    fn try_match<'a>(
        &self,
        probe: &Probe<'_>,
        index: &LookupIndex<'a>,
        claimed: &Claimed<'_>,
    ) -> Option<MatchOutcome<'a>> {
        let domain = probe.domain.as_deref()?;
        let key = domain_user_key(domain, &probe.username);
        first_available(index.domain_and_user(&key), claimed)
            .map(|candidate| MatchOutcome::hit(candidate, MatchStrategy::DomainAndUser))
    }
}

/// A similar host (shared root domain or mobile/www variant) and the same
/// username. Domains are scanned in first-seen order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarDomainAndUser;

impl MatchRule for SimilarDomainAndUser {
    fn try_match<'a>(
        &self,
        probe: &Probe<'_>,
        index: &LookupIndex<'a>,
        claimed: &Claimed<'_>,
    ) -> Option<MatchOutcome<'a>> {
        let domain = probe.domain.as_deref()?;
        index
            .domains()
            .filter(|(candidate_domain, _)| domains_similar(domain, candidate_domain))
            .find_map(|(_, records)| {
                records.iter().copied().find(|candidate| {
                    is_available(candidate, claimed)
                        && normalize_username(&candidate.username) == probe.username
                })
            })
            .map(|candidate| MatchOutcome::hit(candidate, MatchStrategy::SimilarDomainAndUser))
    }
}

/// Username alone: a single candidate is taken as is; several are narrowed
/// by a similar domain, then by an equal password.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsernameOnly;

impl MatchRule for UsernameOnly {
    fn try_match<'a>(
        &self,
        probe: &Probe<'_>,
        index: &LookupIndex<'a>,
        claimed: &Claimed<'_>,
    ) -> Option<MatchOutcome<'a>> {
        if probe.username.is_empty() {
            return None;
        }

        let candidates = index
            .username_only(&probe.username)
            .iter()
            .copied()
            .filter(|candidate| is_available(candidate, claimed))
            .collect::<Vec<&'a Record>>();

        match candidates.as_slice() {
            [] => None,
            [only] => Some(MatchOutcome::hit(*only, MatchStrategy::UniqueUsername)),
            _ => {
                let by_domain = probe.domain.as_deref().and_then(|domain| {
                    candidates.iter().copied().find(|candidate| {
                        extract_domain(&candidate.url).is_some_and(|candidate_domain| {
                            domains_similar(domain, &candidate_domain)
                        })
                    })
                });
                if let Some(candidate) = by_domain {
                    return Some(MatchOutcome::hit(
                        candidate,
                        MatchStrategy::UsernameAndSimilarDomain,
                    ));
                }

                candidates
                    .iter()
                    .copied()
                    .find(|candidate| candidate.password == probe.password)
                    .map(|candidate| {
                        MatchOutcome::hit(candidate, MatchStrategy::UsernameAndSamePassword)
                    })
            }
        }
    }
}

fn first_available<'a>(records: &[&'a Record], claimed: &Claimed<'_>) -> Option<&'a Record> {
    records
        .iter()
        .copied()
        .find(|record| is_available(record, claimed))
}
