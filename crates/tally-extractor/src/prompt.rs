//! LLM prompt engineering for receipt and invoice extraction

use tally_domain::PromptPair;

/// Builds the system/user prompt pair for one document
///
/// The system prompt is constant; the user prompt only embeds the text.
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the prompt pair
    pub fn build(&self) -> PromptPair {
        let mut user = String::with_capacity(USER_PREAMBLE.len() + self.text.len());
        user.push_str(USER_PREAMBLE);
        user.push_str(&self.text);

        PromptPair {
            system: EXTRACTION_INSTRUCTIONS.to_string(),
            user,
        }
    }
}

// The EUR rate below is a rough hint to the model; nothing checks the
// converted amount.
const EXTRACTION_INSTRUCTIONS: &str = r#"You are an experienced accountant reviewing a financial document. Perform these tasks:

1. Classify the document as "None" (not a financial document), "Invoice" or "Receipt".
2. Extract the name of the company that provides the service and requests payment.
3. Extract the date the document was issued, formatted as YYYY-MM-DD.
4. Write a short description (at most 50 characters). For Invoice and Receipt documents use a
   generic accounting category such as "Cloud Services" or "AI Services"; for None documents say
   what the document is about.
5. Extract the total amount and express it in Swedish öre (hundredths of SEK) as an integer.
   - Amounts in SEK: multiply by 100 (95.37 SEK = 9537).
   - Amounts in EUR or another currency: convert to SEK first using approximate rates
     (1 EUR ≈ 11.5 SEK), then multiply by 100.
   - Use null if no amount is present or it cannot be converted.

Also report the total and VAT in the original currency with its ISO 4217 code, a description of
the service or items paid for, and every identifier on the document (invoice number, receipt
number, customer ID, ...) as name/value pairs.

Be precise. Only extract information that is clearly present in the document and use null for
anything that is missing."#;

const USER_PREAMBLE: &str =
    "Please analyze the following document and extract the required information:\n\n";
