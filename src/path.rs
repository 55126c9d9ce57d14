//! # Path Resolver
//!
//! Field paths are `/`-separated key sequences such as `positive/latitude_d`.
//! The terminal segment may end in a type suffix (`_s`, `_d`, `_i`, plus the
//! `_f`/`_l` variants found in older tables). Producers of instance documents
//! are not consistent about keeping that suffix, so how keys are matched is a
//! [`SuffixConvention`] chosen when the schema is compiled and applied to the
//! schema and to every instance validated against it.

use serde::{Deserialize, Serialize};

use crate::coercion::TypeSuffix;
use crate::instance::InstanceNode;
use crate::schema::{SchemaField, SchemaTree};

/// Separator between path segments
pub const SEPARATOR: char = '/';

/// How terminal path segments are turned into match keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixConvention {
    /// Strip the type suffix on both sides: `latitude_d` and `latitude` both match
    #[default]
    Strip,
    /// Keep keys verbatim on both sides: only `latitude_d` matches
    Keep,
}

/// Split a raw path into trimmed segments
pub fn split(raw: &str) -> Vec<String> {
    raw.split(SEPARATOR).map(|s| s.trim().to_string()).collect()
}

/// Join segments for display
pub fn display<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip a recognized trailing type suffix from a segment.
///
/// The stem must stay non-empty, so `_s` on its own is returned untouched.
pub fn strip_suffix(segment: &str) -> (&str, Option<TypeSuffix>) {
    if let Some((stem, token)) = segment.rsplit_once('_') {
        if !stem.is_empty() {
            if let Some(suffix) = TypeSuffix::from_token(token) {
                return (stem, Some(suffix));
            }
        }
    }
    (segment, None)
}

/// Match key of an instance key. Only leaf keys carry type suffixes, the same
/// way only the terminal segment of a schema path does.
pub fn match_key(key: &str, is_leaf: bool, convention: SuffixConvention) -> &str {
    match convention {
        SuffixConvention::Strip if is_leaf => strip_suffix(key).0,
        _ => key,
    }
}

/// Look up the field declared at exactly `path`
pub fn resolve<'a, S: AsRef<str>>(tree: &'a SchemaTree, path: &[S]) -> Option<&'a SchemaField> {
    tree.root().descend(path).and_then(|node| node.field())
}

/// Outcome of looking up a schema path in an instance document
#[derive(Debug)]
pub enum Resolution<'a, N> {
    /// Exactly one instance node matched at every step
    Found(&'a N),
    /// Several sibling keys of the needed shape normalized to the same match
    /// key; the first in key order with a value was used
    Ambiguous(&'a N),
    /// Some segment had no counterpart
    NotFound,
}

impl<'a, N> Resolution<'a, N> {
    /// The matched node, if any
    pub fn node(&self) -> Option<&'a N> {
        match self {
            Resolution::Found(node) | Resolution::Ambiguous(node) => Some(node),
            Resolution::NotFound => None,
        }
    }

    /// True when a step had more than one candidate
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Ambiguous(_))
    }
}

/// Walk `path` (schema match keys) through an instance document.
///
/// Intermediate steps only descend into mappings. The terminal step prefers
/// leaves over mappings, and among several matching leaves takes the first
/// non-null one in key order. A step is ambiguous when more than one key of
/// the shape it needs matches.
pub fn resolve_instance<'a, N, S>(
    root: &'a N,
    path: &[S],
    convention: SuffixConvention,
) -> Resolution<'a, N>
where
    N: InstanceNode,
    S: AsRef<str>,
{
    let mut current = root;
    let mut ambiguous = false;

    for (index, segment) in path.iter().enumerate() {
        let segment = segment.as_ref();
        let terminal = index + 1 == path.len();
        if current.is_leaf() {
            return Resolution::NotFound;
        }

        let node = current;
        let mut keys = node.keys();
        keys.sort_unstable();

        let mut candidates: Vec<&'a N> = keys
            .into_iter()
            .filter_map(|key| {
                let child = node.child(key)?;
                (match_key(key, child.is_leaf(), convention) == segment).then_some(child)
            })
            .collect();

        if !terminal {
            candidates.retain(|child| !child.is_leaf());
        } else if candidates.iter().any(|child| child.is_leaf()) {
            candidates.retain(|child| child.is_leaf());
        }

        let chosen = if terminal {
            candidates
                .iter()
                .copied()
                .find(|child| !child.is_null())
                .or_else(|| candidates.first().copied())
        } else {
            candidates.first().copied()
        };

        match chosen {
            Some(child) => {
                ambiguous |= candidates.len() > 1;
                current = child;
            }
            None => return Resolution::NotFound,
        }
    }

    if ambiguous {
        Resolution::Ambiguous(current)
    } else {
        Resolution::Found(current)
    }
}
