//! Publisher activity and organisations behind e-mail publishers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherCount {
    pub publisher: String,
    pub articles: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationCount {
    pub organization: String,
    pub articles: u64,
}

/// First label of the domain of an e-mail address:
/// `"jane@benzinga.com"` gives `"benzinga"`. Anything without `@` is
/// returned unchanged.
pub fn organization_from_email(publisher: &str) -> &str {
    match publisher.split_once('@') {
        Some((_, domain)) => domain.split('.').next().unwrap_or(domain),
        None => publisher,
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublisherCounter {
    publishers: HashMap<String, u64>,
    organizations: HashMap<String, u64>,
}

impl PublisherCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, publisher: &str) {
        bump(&mut self.publishers, publisher);
        if publisher.contains('@') {
            bump(&mut self.organizations, organization_from_email(publisher));
        }
    }

    pub fn distinct_publishers(&self) -> usize {
        self.publishers.len()
    }

    /// Publishers by article count descending, name ascending on ties.
    pub fn top_publishers(&self, n: usize) -> Vec<PublisherCount> {
        ranked(&self.publishers, n)
            .into_iter()
            .map(|(publisher, articles)| PublisherCount {
                publisher,
                articles,
            })
            .collect()
    }

    /// Organisations of e-mail publishers, all of them, ranked like
    /// `top_publishers`.
    pub fn organization_counts(&self) -> Vec<OrganizationCount> {
        ranked(&self.organizations, usize::MAX)
            .into_iter()
            .map(|(organization, articles)| OrganizationCount {
                organization,
                articles,
            })
            .collect()
    }
}

fn bump(map: &mut HashMap<String, u64>, key: &str) {
    match map.get_mut(key) {
        Some(c) => *c += 1,
        None => {
            map.insert(key.to_string(), 1);
        }
    }
}

fn ranked(map: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut all: Vec<(String, u64)> = map.iter().map(|(k, &v)| (k.clone(), v)).collect();
    all.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    all.truncate(n);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_extraction() {
        assert_eq!(organization_from_email("jane@benzinga.com"), "benzinga");
        assert_eq!(organization_from_email("a@gmail.co.uk"), "gmail");
        assert_eq!(organization_from_email("Paul Quintaro"), "Paul Quintaro");
        assert_eq!(organization_from_email("x@"), "");
    }

    #[test]
    fn publisher_ranking() {
        let mut pc = PublisherCounter::new();
        for p in ["Benzinga Newsdesk", "Lisa Levin", "Benzinga Newsdesk", "Charles Gross"] {
            pc.add(p);
        }
        let top = pc.top_publishers(2);
        assert_eq!(top[0].publisher, "Benzinga Newsdesk");
        assert_eq!(top[0].articles, 2);
        assert_eq!(top[1].publisher, "Charles Gross");
        assert_eq!(pc.distinct_publishers(), 3);
    }

    #[test]
    fn organizations_only_from_email_publishers() {
        let mut pc = PublisherCounter::new();
        pc.add("Lisa Levin");
        pc.add("eric@benzinga.com");
        pc.add("vick@benzinga.com");
        pc.add("ron@gmail.com");
        let orgs = pc.organization_counts();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].organization, "benzinga");
        assert_eq!(orgs[0].articles, 2);
        assert_eq!(orgs[1].organization, "gmail");
    }
}
