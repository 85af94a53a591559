//! Natural-language question to SQL statement translation.
//!
//! The translator sends a fixed schema description plus the user's question
//! to the hosted model and cleans the completion up for execution. The
//! SELECT-only instruction in the system prompt is advisory: the cleaned
//! text is handed to the executor without further validation.

use crate::ai::client::ChatClient;
use crate::error::{DashResult, DashboardError};
use tracing::info;

/// Schema description embedded in every translation request.
const SCHEMA_DESCRIPTION: &str = "\
Tables:
- Region(RegionID, Region)
- Country(CountryID, Country, RegionID)
- Customer(CustomerID, FirstName, LastName, Address, City, CountryID)
- ProductCategory(ProductCategoryID, ProductCategory, ProductCategoryDescription)
- Product(ProductID, ProductName, ProductUnitPrice, ProductCategoryID)
- OrderDetail(OrderID, CustomerID, ProductID, OrderDate, QuantityOrdered)";

const SYSTEM_PROMPT: &str = "You are an assistant that writes SQL for a SQLite database. \
    Return ONLY a valid SQL SELECT statement. \
    Do not include explanations, comments, or markdown.";

/// Translates natural-language questions into executable SQL text.
#[derive(Debug)]
pub struct SqlTranslator {
    client: ChatClient,
}

impl SqlTranslator {
    /// Create a new translator over the given client.
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    /// Translate a question into SQL text.
    ///
    /// An empty or whitespace-only question is rejected before any network
    /// call is made. Markdown code fences in the completion are stripped;
    /// nothing else about the model's output is verified.
    pub async fn translate(&self, question: &str) -> DashResult<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DashboardError::invalid_input("Please type a question"));
        }

        let user_prompt = format!("{}\n\nQuestion:\n{}\n\nSQL:\n", SCHEMA_DESCRIPTION, question);

        let completion = self.client.complete(SYSTEM_PROMPT, &user_prompt).await?;
        let sql = strip_code_fences(&completion);

        info!(model = %self.client.model(), "Generated SQL from question");
        Ok(sql)
    }
}

/// Remove accidental Markdown code fences from model output.
///
/// Leading/trailing backticks are trimmed, along with an optional leading
/// `sql` language tag. Unfenced input is returned unchanged (trimmed).
pub fn strip_code_fences(text: &str) -> String {
    let text = text.trim();
    if !text.starts_with("```") {
        return text.to_string();
    }

    let stripped = text.trim_matches('`').trim();
    match stripped.get(..3) {
        Some(tag) if tag.eq_ignore_ascii_case("sql") => stripped[3..].trim().to_string(),
        _ => stripped.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_language_tag() {
        assert_eq!(strip_code_fences("```sql\nSELECT 1;\n```"), "SELECT 1;");
    }

    #[test]
    fn test_strip_fences_without_language_tag() {
        assert_eq!(strip_code_fences("```\nSELECT 1;\n```"), "SELECT 1;");
    }

    #[test]
    fn test_unfenced_input_unchanged() {
        assert_eq!(strip_code_fences("SELECT 1;"), "SELECT 1;");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(strip_code_fences("  SELECT 1;\n"), "SELECT 1;");
    }

    #[test]
    fn test_language_tag_case_insensitive() {
        assert_eq!(strip_code_fences("```SQL\nSELECT 1;\n```"), "SELECT 1;");
    }

    #[test]
    fn test_multiline_statement_survives() {
        let fenced = "```sql\nSELECT Name\nFROM Customer\nORDER BY Name;\n```";
        assert_eq!(
            strip_code_fences(fenced),
            "SELECT Name\nFROM Customer\nORDER BY Name;"
        );
    }

    #[tokio::test]
    async fn test_empty_question_rejected_without_model_call() {
        // Unroutable endpoint: a network attempt would fail as an AI service
        // error, so getting InvalidInput proves no call was made.
        let client = ChatClient::new("test-key", "http://127.0.0.1:9/never", "test-model");
        let translator = SqlTranslator::new(client);

        for question in ["", "   ", "\n\t "] {
            let err = translator.translate(question).await.unwrap_err();
            assert!(
                matches!(err, DashboardError::InvalidInput { .. }),
                "expected InvalidInput for {:?}, got {:?}",
                question,
                err
            );
        }
    }
}
