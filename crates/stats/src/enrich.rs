use serde::Serialize;

use crate::classifier::Classifier;
use crate::error::ClassifyError;
use crate::model::{Product, Record};

/// A product whose classification failed. It still appears in
/// `Enrichment::records` as an Unknown record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationFailure {
    /// Position in the input batch.
    pub index: usize,
    pub identity: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub records: Vec<Record>,
    pub failures: Vec<ClassificationFailure>,
}

/// Classify every product, producing one `Record` per product in input order.
pub fn enrich<C>(products: Vec<Product>, classifier: &C) -> Enrichment
where
    C: Classifier + ?Sized,
{
    log::info!("classifying {} products", products.len());

    let mut out = Enrichment {
        records: Vec::with_capacity(products.len()),
        failures: Vec::new(),
    };

    for (index, product) in products.into_iter().enumerate() {
        match classifier.classify(&product.description) {
            Ok(classification) => {
                log::debug!(
                    "{}: {} ({:.4})",
                    product.name,
                    classification.label,
                    classification.confidence
                );
                out.records.push(Record::classified(product, classification));
            }
            Err(err) => {
                log::warn!("classification failed for '{}': {err}", product.name);
                out.failures.push(failure(index, &product, &err));
                out.records.push(Record::unclassified(product));
            }
        }
    }

    log::info!(
        "classified {} products ({} failures)",
        out.records.len(),
        out.failures.len()
    );
    out
}

fn failure(index: usize, product: &Product, err: &ClassifyError) -> ClassificationFailure {
    ClassificationFailure {
        index,
        identity: product.name.clone(),
        reason: err.to_string(),
    }
}
