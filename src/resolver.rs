/*!
 * Recursive beneficial-ownership resolution.
 *
 * Walks the ownership chain of an entity by fetching its disclosure
 * document, parsing the owner records out of it and descending into every
 * organization owner that has not been resolved yet. The output is the flat
 * list of natural persons found across all levels, in depth-first document
 * order.
 */

use futures::future::BoxFuture;
use log::{debug, warn};
use std::collections::HashSet;

use crate::errors::AppError;
use crate::extract::LineExtractor;
use crate::owner_parser::{OwnerKind, OwnerRecord, parse_owners};
use crate::registry::DocumentFetcher;

/// Resolver for the ultimate beneficial owners of a registered entity
#[derive(Debug)]
pub struct OwnershipResolver<F, X> {
    /// Source of disclosure documents
    fetcher: F,
    /// Converts document bytes into text lines
    extractor: X,
}

impl<F, X> OwnershipResolver<F, X>
where
    F: DocumentFetcher,
    X: LineExtractor,
{
    /// Create a resolver over a document source and a line extractor
    pub fn new(fetcher: F, extractor: X) -> Self {
        Self { fetcher, extractor }
    }

    /// Consume the resolver, handing back its fetcher and extractor
    pub fn into_parts(self) -> (F, X) {
        (self.fetcher, self.extractor)
    }

    /// Resolve the beneficial owners of an entity.
    ///
    /// `root` is a tax identifier or a free-text entity name. The returned
    /// records are natural persons only; organization owners are descended
    /// into, each identifier at most once per call, so ownership cycles and
    /// diamonds terminate. Failures below the root contribute zero owners to
    /// their branch; a failure fetching or reading the root document is the
    /// caller's error.
    pub async fn resolve_owners(&self, root: &str) -> Result<Vec<OwnerRecord>, AppError> {
        let mut visited = HashSet::new();
        // The root counts as visited: a cyclic chain leading back to it
        // must not fetch it a second time
        visited.insert(root.to_string());

        let document = self.fetcher.fetch_document(root).await?;
        let lines = self.extractor.extract_lines(&document)?;

        Ok(self.resolve_level(lines, 0, &mut visited).await)
    }

    // One recursion level: parse the lines of a fetched document, collect
    // persons, descend into unvisited organizations. Boxed future because the
    // recursion depth follows the real ownership structure.
    fn resolve_level<'a>(
        &'a self,
        lines: Vec<String>,
        depth: usize,
        visited: &'a mut HashSet<String>,
    ) -> BoxFuture<'a, Vec<OwnerRecord>> {
        Box::pin(async move {
            let mut owners = Vec::new();

            for record in parse_owners(&lines) {
                match record.kind {
                    OwnerKind::Person => {
                        debug!("[depth {}] Person: {}", depth, record.name);
                        owners.push(record);
                    }
                    OwnerKind::Organization => {
                        let Some(identifier) = record.identifier.clone() else {
                            // Nothing to query by; the branch cannot be expanded
                            debug!(
                                "[depth {}] Organization without identifier dropped: {}",
                                depth, record.name
                            );
                            continue;
                        };

                        if visited.contains(&identifier) {
                            debug!(
                                "[depth {}] Skipping already resolved identifier {}",
                                depth, identifier
                            );
                            continue;
                        }

                        // Mark before fetching so a cyclic chain cannot
                        // re-enter this identifier
                        visited.insert(identifier.clone());
                        debug!(
                            "[depth {}] Descending into {} ({})",
                            depth, record.name, identifier
                        );

                        match self.fetch_lines(&identifier).await {
                            Ok(child_lines) => {
                                let child_owners =
                                    self.resolve_level(child_lines, depth + 1, visited).await;
                                owners.extend(child_owners);
                            }
                            Err(e) => {
                                // A dead branch loses its owners but must not
                                // abort the rest of the resolution
                                warn!(
                                    "[depth {}] Failed to resolve {} ({}): {}",
                                    depth, record.name, identifier, e
                                );
                            }
                        }
                    }
                }
            }

            debug!("[depth {}] {} person(s) at this level", depth, owners.len());
            owners
        })
    }

    // Fetch a document and turn it into lines in one go
    async fn fetch_lines(&self, query: &str) -> Result<Vec<String>, AppError> {
        let document = self.fetcher.fetch_document(query).await?;
        Ok(self.extractor.extract_lines(&document)?)
    }
}
