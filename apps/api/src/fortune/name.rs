//! Name fortune calculator: full name → oracle stroke total → element.

use serde::Serialize;

use crate::fortune::symbols::Element;
use crate::stroke_client::{StrokeClient, StrokeError};

#[derive(Debug, Clone, Serialize)]
pub struct NameFacts {
    pub total_strokes: u32,
    pub element: Element,
}

/// Strokes come from the oracle only; a blank name is 0 strokes without a
/// lookup, and an unreachable oracle fails the whole reading.
pub async fn compute_name_reading(
    strokes: &StrokeClient,
    name: &str,
) -> Result<NameFacts, StrokeError> {
    let total_strokes = strokes.strokes_of(name).await?;

    Ok(NameFacts {
        total_strokes,
        element: Element::from_index(total_strokes),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::stroke_client::testing::CountingOracle;

    #[tokio::test]
    async fn test_element_is_strokes_mod_five() {
        let oracle = Arc::new(CountingOracle::with(&[("王小明", 15), ("陳美麗", 36)]));
        let client = StrokeClient::new(oracle.clone());

        let facts = compute_name_reading(&client, "王小明").await.unwrap();
        assert_eq!(facts.total_strokes, 15);
        assert_eq!(facts.element, Element::Metal);

        let facts = compute_name_reading(&client, "陳美麗").await.unwrap();
        assert_eq!(facts.element, Element::Wood);
    }

    #[tokio::test]
    async fn test_blank_name_is_zero_strokes_first_element() {
        let oracle = Arc::new(CountingOracle::unavailable());
        let client = StrokeClient::new(oracle.clone());

        let facts = compute_name_reading(&client, "  ").await.unwrap();
        assert_eq!(facts.total_strokes, 0);
        assert_eq!(facts.element, Element::ALL[0]);
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let client = StrokeClient::new(Arc::new(CountingOracle::unavailable()));
        assert!(compute_name_reading(&client, "王小明").await.is_err());
    }
}
