//! Inlining of document-local `$ref` pointers.
//!
//! API description documents refer to shared definitions with objects of the
//! form `{"$ref": "#/components/schemas/Pet"}`. [`resolve`] replaces each of
//! those objects with the node it points at, wherever it appears in the
//! tree, so that later consumers can walk the document without chasing
//! pointers.
//!
//! ```
//! use cachelens_schema::resolve;
//! use serde_json::json;
//!
//! let document = json!({
//!     "definitions": { "id": { "type": "integer" } },
//!     "properties": { "owner": { "$ref": "#/definitions/id" } }
//! });
//!
//! let resolved = resolve(document).unwrap();
//! assert_eq!(resolved["properties"]["owner"], json!({ "type": "integer" }));
//! ```
//!
//! A `$ref` is recognised anywhere, not only where a given schema dialect
//! allows it. Only pointers into the same document (`#`, `#/a/b`) are
//! supported. A recursive definition is expanded once and its inner pointer
//! back to itself is kept, and the output size is capped (see
//! [`resolve_with_limit`]).

mod error;

pub use error::ResolveError;

use std::collections::HashMap;

use serde_json::{Map, Value};

const REF_KEY: &str = "$ref";

/// Default cap on the number of nodes in a resolved document.
///
/// Shared definitions are copied to every place that refers to them, so the
/// output can be much larger than the input.
pub const DEFAULT_NODE_LIMIT: usize = 1_000_000;

/// Replaces every `$ref` object in `root` with its target.
///
/// A reference to another reference is followed until a concrete node is
/// reached. Targets are looked up in the document as it was passed in, and
/// their own references are resolved in turn. A reference back into a
/// definition that is already being expanded (a recursive schema) is left
/// in place.
///
/// # Errors
///
/// - [`ResolveError::External`] for a reference that does not start with `#`.
/// - [`ResolveError::Missing`] when a pointer segment does not exist.
/// - [`ResolveError::Cycle`] when a chain of references leads back to itself
///   without reaching a concrete node.
/// - [`ResolveError::TooLarge`] when the output would exceed
///   [`DEFAULT_NODE_LIMIT`] nodes.
pub fn resolve(root: Value) -> Result<Value, ResolveError> {
    resolve_with_limit(root, DEFAULT_NODE_LIMIT)
}

/// Same as [`resolve`], with an explicit cap on the output size in nodes.
pub fn resolve_with_limit(root: Value, node_limit: usize) -> Result<Value, ResolveError> {
    let mut resolver = Resolver {
        root: &root,
        active: Vec::new(),
        memo: HashMap::new(),
        limit: node_limit,
        produced: 0,
    };
    let inlined = resolver.inline(root.clone())?;
    Ok(inlined.value)
}

/// Marks an expansion that kept no pointer to an enclosing definition.
const UNREACHED: usize = usize::MAX;

struct Inlined {
    value: Value,
    nodes: usize,
    /// Lowest index in `active` that a kept pointer refers to.
    reach: usize,
}

struct Resolver<'a> {
    root: &'a Value,
    /// References being expanded, outermost first.
    active: Vec<String>,
    /// Expansions that do not depend on the enclosing definitions.
    memo: HashMap<String, (Value, usize)>,
    limit: usize,
    produced: usize,
}

impl Resolver<'_> {
    fn inline(&mut self, node: Value) -> Result<Inlined, ResolveError> {
        let depth = self.active.len();
        let mut node = node;
        let mut cached = None;

        while let Some(reference) = reference_of(&node) {
            let reference = reference.to_owned();
            if self.active[depth..].contains(&reference) {
                return Err(ResolveError::Cycle { reference });
            }
            if let Some(position) = self.active[..depth].iter().position(|r| *r == reference) {
                tracing::trace!(reference = %reference, "keeping recursive reference");
                self.active.truncate(depth);
                self.spend(1)?;
                return Ok(Inlined {
                    value: node,
                    nodes: 1,
                    reach: position,
                });
            }
            if let Some(nodes) = self.memo.get(&reference).map(|(_, nodes)| *nodes) {
                self.spend(nodes)?;
                let value = self.memo[&reference].0.clone();
                cached = Some(Inlined {
                    value,
                    nodes,
                    reach: UNREACHED,
                });
                break;
            }
            tracing::trace!(reference = %reference, "following reference");
            node = lookup(self.root, &reference)?.clone();
            self.active.push(reference);
        }

        let inlined = match cached {
            Some(inlined) => inlined,
            None => self.descend(node)?,
        };

        for (offset, reference) in self.active[depth..].iter().enumerate() {
            if inlined.reach >= depth + offset && !self.memo.contains_key(reference) {
                self.memo
                    .insert(reference.clone(), (inlined.value.clone(), inlined.nodes));
            }
        }
        self.active.truncate(depth);

        Ok(Inlined {
            reach: if inlined.reach < depth {
                inlined.reach
            } else {
                UNREACHED
            },
            ..inlined
        })
    }

    fn descend(&mut self, node: Value) -> Result<Inlined, ResolveError> {
        self.spend(1)?;
        let mut nodes = 1;
        let mut reach = UNREACHED;

        let value = match node {
            Value::Object(map) => {
                let mut resolved = Map::with_capacity(map.len());
                for (key, value) in map {
                    let child = self.inline(value)?;
                    nodes += child.nodes;
                    reach = reach.min(child.reach);
                    resolved.insert(key, child.value);
                }
                Value::Object(resolved)
            }
            Value::Array(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    let child = self.inline(item)?;
                    nodes += child.nodes;
                    reach = reach.min(child.reach);
                    resolved.push(child.value);
                }
                Value::Array(resolved)
            }
            scalar => scalar,
        };

        Ok(Inlined {
            value,
            nodes,
            reach,
        })
    }

    fn spend(&mut self, nodes: usize) -> Result<(), ResolveError> {
        self.produced = self.produced.saturating_add(nodes);
        if self.produced > self.limit {
            Err(ResolveError::TooLarge { limit: self.limit })
        } else {
            Ok(())
        }
    }
}

fn reference_of(node: &Value) -> Option<&str> {
    node.as_object()?.get(REF_KEY)?.as_str()
}

fn lookup<'a>(root: &'a Value, reference: &str) -> Result<&'a Value, ResolveError> {
    let Some(pointer) = reference.strip_prefix('#') else {
        return Err(ResolveError::External {
            reference: reference.to_owned(),
        });
    };

    pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |target, raw| {
            let segment = unescape(raw);
            let next = match target {
                Value::Object(map) => map.get(&segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            next.ok_or_else(|| ResolveError::Missing {
                reference: reference.to_owned(),
                segment,
            })
        })
}

// `~1` before `~0`, so that `~01` decodes to `~1` and not `/`.
fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
