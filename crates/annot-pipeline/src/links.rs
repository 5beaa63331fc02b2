use std::collections::HashMap;

use annot_core::ids::EnsemblId;

use crate::rows::DatabaseLinkRow;

/// Source object id to Ensembl gene ids, from the database-link table.
#[derive(Debug, Clone, Default)]
pub struct GeneResolver {
    genes: HashMap<String, Vec<String>>,
}

impl GeneResolver {
    /// Keep links to `database_id` for `species` that carry an identifier.
    ///
    /// Versioned Ensembl ids are stored without their version suffix.
    #[must_use]
    pub fn new(links: &[DatabaseLinkRow], database_id: &str, species: &str) -> Self {
        let mut genes: HashMap<String, Vec<String>> = HashMap::new();
        for link in links {
            if link.database_id != database_id || link.species_id.as_deref() != Some(species) {
                continue;
            }
            let Some(gene) = &link.placeholder else {
                continue;
            };
            let gene = EnsemblId::parse(gene)
                .map_or_else(|_| gene.clone(), |id| id.unversioned().to_string());
            let mapped = genes.entry(link.object_id.clone()).or_default();
            if !mapped.contains(&gene) {
                mapped.push(gene);
            }
        }

        tracing::debug!(objects = genes.len(), "indexed database links");
        Self { genes }
    }

    /// Gene ids linked to `object_id`, in link order. Empty when unmapped.
    #[must_use]
    pub fn resolve(&self, object_id: &str) -> &[String] {
        self.genes.get(object_id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Whether `id` is a well-formed Ensembl gene id.
#[must_use]
pub fn is_ensembl_gene(id: &str) -> bool {
    EnsemblId::parse(id).is_ok_and(|parsed| parsed.is_gene())
}
