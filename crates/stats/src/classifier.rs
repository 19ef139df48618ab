use crate::error::ClassifyError;
use crate::model::Classification;

/// Anything that can assign a sentiment label to a piece of text.
///
/// Implementations are expected to be deterministic for a given input, but
/// the engine does not rely on it: each product is classified exactly once
/// during enrichment.
pub trait Classifier {
    fn classify(&self, text: &str) -> Result<Classification, ClassifyError>;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> Result<Classification, ClassifyError>,
{
    fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;

    fn always_negative(text: &str) -> Result<Classification, ClassifyError> {
        Ok(Classification {
            label: Label::Negative,
            confidence: 0.6,
            annotated_text: text.to_string(),
        })
    }

    #[test]
    fn fn_items_are_classifiers() {
        let c = always_negative.classify("meh").unwrap();
        assert_eq!(c.label, Label::Negative);
        assert_eq!(c.annotated_text, "meh");
    }

    #[test]
    fn closures_are_classifiers() {
        let failing = |_: &str| -> Result<Classification, ClassifyError> {
            Err(ClassifyError::Model("offline".into()))
        };
        assert_eq!(
            failing.classify("x").unwrap_err(),
            ClassifyError::Model("offline".into())
        );
    }

    #[test]
    fn boxed_trait_objects_are_classifiers() {
        let boxed: Box<dyn Classifier> = Box::new(always_negative);
        assert_eq!(boxed.classify("x").unwrap().confidence, 0.6);
    }
}
